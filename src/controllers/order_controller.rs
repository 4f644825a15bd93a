use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
    Form,
};
use serde_json::json;
use tower_sessions::Session;

use crate::{
    cart::{Cart, CartSummary},
    controllers::load_cart,
    forms::{FieldErrors, OrderCreateForm},
    render::{self, fmt_money},
    services::order_service,
    AppState,
};

async fn render_form(
    state: &AppState,
    headers: &HeaderMap,
    cart: &Cart,
    form: &OrderCreateForm,
    errors: &FieldErrors,
) -> Response {
    let summary = cart.summary();

    let items = match cart.items(state.catalog.as_ref()).await {
        Ok(items) => items,
        Err(e) => return render::server_error(state, headers, &summary, &e),
    };

    let values: serde_json::Map<String, serde_json::Value> = form
        .values()
        .into_iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();

    let ctx = json!({
        "values": values,
        "errors": errors,
        "has_errors": !errors.is_empty(),
        "items": items
            .iter()
            .map(|item| json!({
                "name": item.product.name,
                "quantity": item.quantity,
                "total_price": fmt_money(item.total_price),
            }))
            .collect::<Vec<_>>(),
        "total": fmt_money(cart.get_total_price()),
    });

    render::page(
        state,
        headers,
        StatusCode::OK,
        "Checkout",
        "orders/create",
        &ctx,
        &summary,
    )
}

// GET /orders/create/
pub async fn get_order_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Response {
    let cart = match load_cart(&state, &headers, session).await {
        Ok(c) => c,
        Err(res) => return res,
    };

    render_form(
        &state,
        &headers,
        &cart,
        &OrderCreateForm::default(),
        &FieldErrors::new(),
    )
    .await
}

// POST /orders/create/
pub async fn post_order_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Form(form): Form<OrderCreateForm>,
) -> Response {
    let mut cart = match load_cart(&state, &headers, session).await {
        Ok(c) => c,
        Err(res) => return res,
    };

    let customer = match form.validate() {
        Ok(c) => c,
        Err(errors) => return render_form(&state, &headers, &cart, &form, &errors).await,
    };

    let placed = match order_service::place_order(
        state.orders.as_ref(),
        state.catalog.as_ref(),
        &mut cart,
        customer,
    )
    .await
    {
        Ok(p) => p,
        Err(e) => return render::server_error(&state, &headers, &cart.summary(), &e),
    };

    let ctx = json!({
        "order": {
            "id": placed.order.id.to_hex(),
            "label": placed.order.to_string(),
            "first_name": placed.order.first_name,
            "item_count": placed.items.len(),
            "total": fmt_money(placed.get_total_cost()),
        },
    });

    render::page(
        &state,
        &headers,
        StatusCode::OK,
        "Thank you",
        "orders/created",
        &ctx,
        &CartSummary::default(),
    )
}
