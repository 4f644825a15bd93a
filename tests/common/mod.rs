#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rustshop::{
    config::Settings,
    models::{Category, Product},
    routes,
    services::{catalog_service::MemoryCatalog, order_service::MemoryOrderStore},
    templates, AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::{
    session::{Id, Record},
    session_store, MemoryStore, SessionStore,
};

pub struct TestApp {
    pub state: AppState,
    pub catalog: Arc<MemoryCatalog>,
    pub orders: Arc<MemoryOrderStore>,
    pub sessions: MemoryStore,
    pub category: Category,
}

impl TestApp {
    pub async fn new() -> Self {
        let catalog = Arc::new(MemoryCatalog::new());
        let orders = Arc::new(MemoryOrderStore::new());
        let sessions = MemoryStore::default();

        let category = Category::new("Test Category", "test-category");
        catalog.add_category(category.clone()).await;

        let state = AppState {
            hbs: templates::build_handlebars().expect("templates"),
            settings: Settings::default(),
            db: None,
            catalog: catalog.clone(),
            orders: orders.clone(),
        };

        TestApp {
            state,
            catalog,
            orders,
            sessions,
            category,
        }
    }

    pub async fn seed_product(&self, name: &str, slug: &str, price: &str) -> Product {
        let product = Product::new(&self.category, name, slug, dec(price));
        self.catalog.add_product(product.clone()).await;
        product
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.send_with_store(req, self.sessions.clone()).await
    }

    pub async fn send_with_store<S>(&self, req: Request<Body>, store: S) -> Response
    where
        S: SessionStore + Clone,
    {
        routes::app(self.state.clone(), store)
            .oneshot(req)
            .await
            .unwrap()
    }

    /// Session values stored under the `sessionid=<id>` cookie pair.
    pub async fn session_values(&self, cookie: &str) -> Option<HashMap<String, Value>> {
        let id = cookie.split_once('=').map(|(_, v)| v)?;
        let id = Id::from_str(id).ok()?;
        self.sessions.load(&id).await.unwrap().map(|r| r.data)
    }
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// The `name=value` part of the session Set-Cookie header, if one was sent.
pub fn session_cookie(res: &Response) -> Option<String> {
    let raw = res.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(|s| s.trim().to_string())
}

pub fn location(res: &Response) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn response_body_string(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

/// Session backend that is always down.
#[derive(Debug, Clone, Default)]
pub struct UnavailableStore;

fn unavailable() -> session_store::Error {
    session_store::Error::Backend("session backend unavailable".to_string())
}

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn create(&self, _record: &mut Record) -> session_store::Result<()> {
        Err(unavailable())
    }

    async fn save(&self, _record: &Record) -> session_store::Result<()> {
        Err(unavailable())
    }

    async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &Id) -> session_store::Result<()> {
        Err(unavailable())
    }
}

/// A well-formed session cookie for an id the store has never seen.
pub fn unknown_session_cookie() -> String {
    format!("{}={}", Settings::default().session_cookie_name, Id::default())
}
