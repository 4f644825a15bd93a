use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(name: &str, slug: &str) -> Self {
        Category {
            id: ObjectId::new(),
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    pub fn absolute_url(&self) -> String {
        format!("/category/{}/", self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub category_id: ObjectId,
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,

    // stored as a string so Mongo never rounds it through a double
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub available: bool,

    // unix millis
    pub created: i64,
    pub updated: i64,
}

impl Product {
    pub fn new(category: &Category, name: &str, slug: &str, price: Decimal) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Product {
            id: ObjectId::new(),
            category_id: category.id,
            name: name.to_string(),
            slug: slug.to_string(),
            image: None,
            description: String::new(),
            price,
            available: true,
            created: now,
            updated: now,
        }
    }

    pub fn absolute_url(&self) -> String {
        format!("/product/{}/{}/", self.id.to_hex(), self.slug)
    }
}
