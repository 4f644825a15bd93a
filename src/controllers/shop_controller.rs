use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use tower_sessions::Session;

use crate::{
    cart::CartSummary,
    controllers::load_cart,
    forms,
    models::{Category, Product},
    render::{self, fmt_money},
    AppState,
};

fn product_json(p: &Product) -> serde_json::Value {
    json!({
        "id": p.id.to_hex(),
        "name": p.name,
        "slug": p.slug,
        "image": p.image,
        "description": p.description,
        "price": fmt_money(p.price),
        "url": p.absolute_url(),
    })
}

fn category_json(c: &Category, current: Option<&Category>) -> serde_json::Value {
    json!({
        "name": c.name,
        "slug": c.slug,
        "url": c.absolute_url(),
        "selected": current.is_some_and(|cur| cur.id == c.id),
    })
}

async fn cart_summary(
    state: &AppState,
    headers: &HeaderMap,
    session: Session,
) -> Result<CartSummary, Response> {
    Ok(load_cart(state, headers, session).await?.summary())
}

async fn render_list(
    state: &AppState,
    headers: &HeaderMap,
    summary: CartSummary,
    category: Option<Category>,
) -> Response {

    let categories = match state.catalog.categories().await {
        Ok(c) => c,
        Err(e) => return render::server_error(state, headers, &summary, &e),
    };
    let products = match state
        .catalog
        .available_products(category.as_ref().map(|c| c.id))
        .await
    {
        Ok(p) => p,
        Err(e) => return render::server_error(state, headers, &summary, &e),
    };

    let title = category
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Products".to_string());

    let ctx = json!({
        "title": title,
        "category": category.as_ref().map(|c| category_json(c, None)),
        "categories": categories
            .iter()
            .map(|c| category_json(c, category.as_ref()))
            .collect::<Vec<_>>(),
        "products": products.iter().map(product_json).collect::<Vec<_>>(),
    });

    render::page(
        state,
        headers,
        StatusCode::OK,
        &title,
        "shop/product_list",
        &ctx,
        &summary,
    )
}

// GET /
pub async fn product_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Response {
    match cart_summary(&state, &headers, session).await {
        Ok(summary) => render_list(&state, &headers, summary, None).await,
        Err(res) => res,
    }
}

// GET /category/:slug/
pub async fn product_list_by_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(slug): Path<String>,
) -> Response {
    let summary = match cart_summary(&state, &headers, session).await {
        Ok(s) => s,
        Err(res) => return res,
    };

    match state.catalog.category_by_slug(&slug).await {
        Ok(Some(category)) => render_list(&state, &headers, summary, Some(category)).await,
        Ok(None) => render::not_found(&state, &headers, &summary),
        Err(e) => render::server_error(&state, &headers, &summary, &e),
    }
}

// GET /product/:id/:slug/
pub async fn product_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((id, slug)): Path<(String, String)>,
) -> Response {
    let summary = match cart_summary(&state, &headers, session).await {
        Ok(s) => s,
        Err(res) => return res,
    };

    let Ok(oid) = ObjectId::parse_str(&id) else {
        return render::not_found(&state, &headers, &summary);
    };

    let product = match state.catalog.product(oid).await {
        Ok(Some(p)) if p.slug == slug && p.available => p,
        Ok(_) => return render::not_found(&state, &headers, &summary),
        Err(e) => return render::server_error(&state, &headers, &summary, &e),
    };

    let choices: Vec<serde_json::Value> = forms::quantity_choices()
        .into_iter()
        .map(|(value, label)| json!({ "value": value, "label": label, "selected": value == 1 }))
        .collect();

    let ctx = json!({
        "product": product_json(&product),
        "add_url": format!("/cart/add/{}/", product.id.to_hex()),
        "quantity_choices": choices,
    });

    render::page(
        &state,
        &headers,
        StatusCode::OK,
        &product.name,
        "shop/product_detail",
        &ctx,
        &summary,
    )
}
