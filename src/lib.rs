//! Library entrypoint for RustShop.
//!
//! Integration tests under `tests/` import the app state, routers, stores and
//! the cart from here.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;

#[path = "middleware/session.rs"]
pub mod session;

pub mod services;

pub mod cart;
pub mod forms;

#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

use services::{
    catalog_service::{Catalog, MongoCatalog},
    order_service::{MongoOrderStore, OrderStore},
};

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    // None when running on the in-memory stores
    pub db: Option<mongodb::Database>,
    pub catalog: Arc<dyn Catalog>,
    pub orders: Arc<dyn OrderStore>,
}

impl AppState {
    /// State backed entirely by MongoDB.
    pub fn with_mongo(hbs: templates::Hbs, settings: config::Settings, db: mongodb::Database) -> Self {
        AppState {
            hbs,
            settings,
            catalog: Arc::new(MongoCatalog::new(db.clone())),
            orders: Arc::new(MongoOrderStore::new(db.clone())),
            db: Some(db),
        }
    }
}
