//! Session-backed shopping cart.
//!
//! The cart is a map of product id (hex string) to quantity and the unit
//! price seen when the product was first added. It lives inside the
//! visitor's session under a configurable key and keeps insertion order, so
//! the cart page lists products in the order they were added.

use std::collections::HashMap;
use std::num::NonZeroU32;

use indexmap::IndexMap;
use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{error::StoreError, models::Product, services::catalog_service::Catalog};

/// One product's entry in the cart as it is kept in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// A cart line resolved against the catalog, ready for display or checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal,
}

/// Item count and total for the page header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartSummary {
    pub count: u64,
    pub total: Decimal,
}

pub struct Cart {
    session: Session,
    key: String,
    lines: IndexMap<String, CartLine>,
}

impl Cart {
    /// Reads the cart out of `session`. A missing key gives an empty cart; the
    /// key is only written once something calls `save`.
    ///
    /// Fails only when the session store itself cannot be read.
    pub async fn load(session: Session, key: &str) -> Result<Self, StoreError> {
        let lines = match session.get_value(key).await? {
            Some(raw) => match serde_json::from_value::<IndexMap<String, CartLine>>(raw) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!("discarding unreadable cart in session: {e}");
                    IndexMap::new()
                }
            },
            None => IndexMap::new(),
        };

        Ok(Cart {
            session,
            key: key.to_string(),
            lines,
        })
    }

    /// Adds `quantity` of `product`, or sets the line to exactly `quantity`
    /// when `override_quantity` is true.
    pub async fn add(
        &mut self,
        product: &Product,
        quantity: NonZeroU32,
        override_quantity: bool,
    ) -> Result<(), StoreError> {
        let line = self
            .lines
            .entry(product.id.to_hex())
            .or_insert_with(|| CartLine {
                quantity: 0,
                price: product.price,
            });

        if override_quantity {
            line.quantity = quantity.get();
        } else {
            line.quantity = line.quantity.saturating_add(quantity.get());
        }

        self.save().await
    }

    /// Drops the product's line. Returns false (and leaves the session
    /// untouched) when the product was not in the cart.
    pub async fn remove(&mut self, product: &Product) -> Result<bool, StoreError> {
        if self.lines.shift_remove(&product.id.to_hex()).is_none() {
            return Ok(false);
        }
        self.save().await?;
        Ok(true)
    }

    /// Writes the lines back into the session, which marks it for
    /// persistence at the end of the request.
    pub async fn save(&mut self) -> Result<(), StoreError> {
        self.session.insert(&self.key, &self.lines).await?;
        Ok(())
    }

    /// Removes the cart from the session altogether.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.lines.clear();
        self.session.remove_value(&self.key).await?;
        Ok(())
    }

    /// Total number of units across all lines.
    pub fn len(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get_total_price(&self) -> Decimal {
        self.lines
            .values()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            count: self.len(),
            total: self.get_total_price(),
        }
    }

    /// Raw lines in insertion order, keyed by product id.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &CartLine)> {
        self.lines.iter().map(|(id, line)| (id.as_str(), line))
    }

    /// Resolves every line against the catalog with a single batch lookup.
    ///
    /// Lines whose product has disappeared from the catalog are skipped. The
    /// price is the one captured in the cart, not the current catalog price.
    pub async fn items(&self, catalog: &dyn Catalog) -> Result<Vec<CartItem>, StoreError> {
        let ids: Vec<ObjectId> = self
            .lines
            .keys()
            .filter_map(|k| ObjectId::parse_str(k).ok())
            .collect();

        let mut products: HashMap<ObjectId, Product> = catalog
            .products_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut items = Vec::with_capacity(self.lines.len());
        for (id, line) in &self.lines {
            let Some(product) = ObjectId::parse_str(id)
                .ok()
                .and_then(|oid| products.remove(&oid))
            else {
                continue;
            };

            items.push(CartItem {
                product,
                price: line.price,
                quantity: line.quantity,
                total_price: line.price * Decimal::from(line.quantity),
            });
        }

        Ok(items)
    }
}
