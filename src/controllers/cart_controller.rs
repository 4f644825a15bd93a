use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use tower_sessions::Session;

use crate::{
    cart::CartSummary,
    controllers::load_cart,
    forms::{self, CartAddProductForm},
    models::Product,
    render::{self, fmt_money},
    AppState,
};

const CART_DETAIL: &str = "/cart/";

/// Catalog lookup for the cart endpoints: unknown or malformed ids are a 404,
/// whether or not the product is in the cart.
async fn lookup_product(
    state: &AppState,
    headers: &HeaderMap,
    summary: &CartSummary,
    product_id: &str,
) -> Result<Product, Response> {
    let Ok(oid) = ObjectId::parse_str(product_id) else {
        return Err(render::not_found(state, headers, summary));
    };

    match state.catalog.product(oid).await {
        Ok(Some(p)) => Ok(p),
        Ok(None) => Err(render::not_found(state, headers, summary)),
        Err(e) => Err(render::server_error(state, headers, summary, &e)),
    }
}

// POST /cart/add/:product_id/
pub async fn cart_add(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(product_id): Path<String>,
    Form(form): Form<CartAddProductForm>,
) -> Response {
    let mut cart = match load_cart(&state, &headers, session).await {
        Ok(c) => c,
        Err(res) => return res,
    };

    let product = match lookup_product(&state, &headers, &cart.summary(), &product_id).await {
        Ok(p) => p,
        Err(res) => return res,
    };

    match form.validate() {
        Ok(add) => {
            if let Err(e) = cart.add(&product, add.quantity, add.override_quantity).await {
                return render::server_error(&state, &headers, &cart.summary(), &e);
            }
        }
        // invalid submissions still land on the cart page
        Err(errs) => tracing::debug!(?errs, %product_id, "ignoring invalid cart add"),
    }

    Redirect::to(CART_DETAIL).into_response()
}

// POST /cart/remove/:product_id/
pub async fn cart_remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(product_id): Path<String>,
) -> Response {
    let mut cart = match load_cart(&state, &headers, session).await {
        Ok(c) => c,
        Err(res) => return res,
    };

    let product = match lookup_product(&state, &headers, &cart.summary(), &product_id).await {
        Ok(p) => p,
        Err(res) => return res,
    };

    if let Err(e) = cart.remove(&product).await {
        return render::server_error(&state, &headers, &cart.summary(), &e);
    }

    Redirect::to(CART_DETAIL).into_response()
}

// GET /cart/
pub async fn cart_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Response {
    let cart = match load_cart(&state, &headers, session).await {
        Ok(c) => c,
        Err(res) => return res,
    };
    let summary = cart.summary();

    let items = match cart.items(state.catalog.as_ref()).await {
        Ok(items) => items,
        Err(e) => return render::server_error(&state, &headers, &summary, &e),
    };

    let rows: Vec<serde_json::Value> = items
        .iter()
        .map(|item| {
            let id = item.product.id.to_hex();
            let choices: Vec<serde_json::Value> = forms::quantity_choices()
                .into_iter()
                .map(|(value, label)| {
                    json!({ "value": value, "label": label, "selected": value == item.quantity })
                })
                .collect();

            json!({
                "product": {
                    "id": id,
                    "name": item.product.name,
                    "image": item.product.image,
                    "url": item.product.absolute_url(),
                },
                "quantity": item.quantity,
                "price": fmt_money(item.price),
                "total_price": fmt_money(item.total_price),
                "update_url": format!("/cart/add/{id}/"),
                "remove_url": format!("/cart/remove/{id}/"),
                "quantity_choices": choices,
            })
        })
        .collect();

    let ctx = json!({
        "items": rows,
        "is_empty": items.is_empty(),
        "total": fmt_money(cart.get_total_price()),
    });

    render::page(
        &state,
        &headers,
        StatusCode::OK,
        "Your shopping cart",
        "cart/detail",
        &ctx,
        &summary,
    )
}
