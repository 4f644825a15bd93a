use std::fmt;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated checkout fields, in the order the form presents them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,

    // unix millis
    pub created: i64,
    pub updated: i64,

    // flipped later by whatever takes the payment
    #[serde(default)]
    pub paid: bool,
}

impl Order {
    pub fn new(customer: CustomerDetails) -> Self {
        let now = Utc::now().timestamp_millis();
        Order {
            id: ObjectId::new(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            address: customer.address,
            postal_code: customer.postal_code,
            city: customer.city,
            created: now,
            updated: now,
            paid: false,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order {}", self.id.to_hex())
    }
}

/// Snapshot of one cart line taken at checkout. The price is copied, never
/// re-read from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub order_id: ObjectId,
    pub product_id: ObjectId,

    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(order_id: ObjectId, product_id: ObjectId, price: Decimal, quantity: u32) -> Self {
        OrderItem {
            id: ObjectId::new(),
            order_id,
            product_id,
            price,
            quantity,
        }
    }

    pub fn get_cost(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An order together with its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl PlacedOrder {
    pub fn get_total_cost(&self) -> Decimal {
        self.items.iter().map(OrderItem::get_cost).sum()
    }
}
