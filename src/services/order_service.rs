use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::FindOptions,
    Database,
};
use tokio::sync::RwLock;

use crate::{
    cart::Cart,
    error::StoreError,
    models::{CustomerDetails, Order, OrderItem, PlacedOrder},
    services::catalog_service::Catalog,
};

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists an order and all of its items.
    async fn create_order(&self, order: &Order, items: &[OrderItem]) -> Result<(), StoreError>;

    async fn get_order(&self, id: ObjectId) -> Result<Option<Order>, StoreError>;

    async fn order_items(&self, order_id: ObjectId) -> Result<Vec<OrderItem>, StoreError>;

    /// Newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;
}

pub struct MongoOrderStore {
    db: Database,
}

impl MongoOrderStore {
    pub fn new(db: Database) -> Self {
        MongoOrderStore { db }
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn create_order(&self, order: &Order, items: &[OrderItem]) -> Result<(), StoreError> {
        let orders = self.db.collection::<Order>("orders");
        orders.insert_one(order, None).await?;

        if items.is_empty() {
            return Ok(());
        }

        let order_items = self.db.collection::<OrderItem>("order_items");
        if let Err(e) = order_items.insert_many(items, None).await {
            // don't leave an order behind without its lines
            if let Err(cleanup) = order_items
                .delete_many(doc! { "order_id": order.id }, None)
                .await
            {
                tracing::error!(
                    order_id = %order.id,
                    "could not remove partial order items: {cleanup}"
                );
            }
            if let Err(cleanup) = orders.delete_one(doc! { "_id": order.id }, None).await {
                tracing::error!(
                    order_id = %order.id,
                    "could not remove order without items: {cleanup}"
                );
            }
            return Err(e.into());
        }

        Ok(())
    }

    async fn get_order(&self, id: ObjectId) -> Result<Option<Order>, StoreError> {
        let orders = self.db.collection::<Order>("orders");
        Ok(orders.find_one(doc! { "_id": id }, None).await?)
    }

    async fn order_items(&self, order_id: ObjectId) -> Result<Vec<OrderItem>, StoreError> {
        let order_items = self.db.collection::<OrderItem>("order_items");
        let cursor = order_items
            .find(doc! { "order_id": order_id }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.db.collection::<Order>("orders");
        let opts = FindOptions::builder()
            .sort(doc! { "created": -1, "_id": -1 })
            .build();
        let cursor = orders.find(doc! {}, opts).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[derive(Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
    items: RwLock<Vec<OrderItem>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create_order(&self, order: &Order, items: &[OrderItem]) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        let mut stored = self.items.write().await;
        orders.push(order.clone());
        stored.extend_from_slice(items);
        Ok(())
    }

    async fn get_order(&self, id: ObjectId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn order_items(&self, order_id: ObjectId) -> Result<Vec<OrderItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        // reverse first so orders created in the same millisecond still come
        // out latest-inserted first after the stable sort
        let mut out: Vec<Order> = self.orders.read().await.iter().rev().cloned().collect();
        out.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(out)
    }
}

/// Loads an order with its items.
pub async fn get_placed_order(
    store: &dyn OrderStore,
    id: ObjectId,
) -> Result<Option<PlacedOrder>, StoreError> {
    let Some(order) = store.get_order(id).await? else {
        return Ok(None);
    };
    let items = store.order_items(id).await?;
    Ok(Some(PlacedOrder { order, items }))
}

/// Turns the visitor's cart into an order.
///
/// One item is written per cart line still present in the catalog, carrying
/// the price captured in the cart. The cart is cleared only after the order
/// has been stored, so a failed write leaves it intact. An empty cart still
/// produces an order, with no items.
pub async fn place_order(
    orders: &dyn OrderStore,
    catalog: &dyn Catalog,
    cart: &mut Cart,
    customer: CustomerDetails,
) -> Result<PlacedOrder, StoreError> {
    let order = Order::new(customer);

    let items: Vec<OrderItem> = cart
        .items(catalog)
        .await?
        .into_iter()
        .map(|item| OrderItem::new(order.id, item.product.id, item.price, item.quantity))
        .collect();

    orders.create_order(&order, &items).await?;
    cart.clear().await?;

    tracing::info!(
        order_id = %order.id.to_hex(),
        items = items.len(),
        "order placed"
    );

    Ok(PlacedOrder { order, items })
}
