use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Database,
};
use tokio::sync::RwLock;

use crate::{
    error::StoreError,
    models::{Category, Product},
};

/// Read side of the product catalog. The cart and order code only ever look
/// products up; nothing here writes.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;
    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError>;

    /// Available products ordered by name, optionally limited to one category.
    async fn available_products(
        &self,
        category_id: Option<ObjectId>,
    ) -> Result<Vec<Product>, StoreError>;

    async fn product(&self, id: ObjectId) -> Result<Option<Product>, StoreError>;

    /// Batch lookup. Unknown ids are simply missing from the result.
    async fn products_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Product>, StoreError>;
}

pub struct MongoCatalog {
    db: Database,
}

impl MongoCatalog {
    pub fn new(db: Database) -> Self {
        MongoCatalog { db }
    }
}

fn by_name() -> FindOptions {
    FindOptions::builder().sort(doc! { "name": 1 }).build()
}

#[async_trait]
impl Catalog for MongoCatalog {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let col = self.db.collection::<Category>("categories");
        let cursor = col.find(doc! {}, by_name()).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let col = self.db.collection::<Category>("categories");
        Ok(col.find_one(doc! { "slug": slug }, None).await?)
    }

    async fn available_products(
        &self,
        category_id: Option<ObjectId>,
    ) -> Result<Vec<Product>, StoreError> {
        let col = self.db.collection::<Product>("products");

        let mut filter: Document = doc! { "available": true };
        if let Some(id) = category_id {
            filter.insert("category_id", id);
        }

        let cursor = col.find(filter, by_name()).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn product(&self, id: ObjectId) -> Result<Option<Product>, StoreError> {
        let col = self.db.collection::<Product>("products");
        Ok(col.find_one(doc! { "_id": id }, None).await?)
    }

    async fn products_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Product>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let col = self.db.collection::<Product>("products");
        let cursor = col.find(doc! { "_id": { "$in": ids.to_vec() } }, None).await?;
        Ok(cursor.try_collect().await?)
    }
}

/// Catalog held in process memory. Used by the tests and handy for running
/// the storefront without a database.
#[derive(Default)]
pub struct MemoryCatalog {
    categories: RwLock<Vec<Category>>,
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_category(&self, category: Category) {
        self.categories.write().await.push(category);
    }

    pub async fn add_product(&self, product: Product) {
        self.products.write().await.push(product);
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut out = self.categories.read().await.clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn available_products(
        &self,
        category_id: Option<ObjectId>,
    ) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        let mut out: Vec<Product> = products
            .iter()
            .filter(|p| p.available)
            .filter(|p| category_id.is_none_or(|id| p.category_id == id))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn product(&self, id: ObjectId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn products_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}
