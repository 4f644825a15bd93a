use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;

use crate::{cart::CartSummary, AppState};

pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn fmt_money(v: Decimal) -> String {
    format!("{:.2}", v)
}

pub fn render_full(
    state: &AppState,
    title: &str,
    body_html: String,
    cart: &CartSummary,
) -> Result<String, String> {
    let ctx = json!({
        "title": title,
        "body": body_html,
        "cart": {
            "count": cart.count,
            "total": fmt_money(cart.total),
            "has_items": cart.count > 0,
        },
    });

    state
        .hbs
        .render("layouts/base", &ctx)
        .map_err(|e| e.to_string())
}

/// Renders `template` and, unless this is an HTMX request, wraps it in the
/// base layout.
pub fn page(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    title: &str,
    template: &str,
    ctx: &serde_json::Value,
    cart: &CartSummary,
) -> Response {
    let body = match state.hbs.render(template, ctx) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("template {template} failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("template error: {e}")),
            )
                .into_response();
        }
    };

    if is_htmx(headers) {
        return (status, Html(body)).into_response();
    }

    match render_full(state, title, body, cart) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

pub fn not_found(state: &AppState, headers: &HeaderMap, cart: &CartSummary) -> Response {
    page(
        state,
        headers,
        StatusCode::NOT_FOUND,
        "Not found",
        "pages/not_found",
        &json!({}),
        cart,
    )
}

/// Storage failures end up here: logged, and shown as a plain 500 page.
pub fn server_error(
    state: &AppState,
    headers: &HeaderMap,
    cart: &CartSummary,
    err: &dyn std::fmt::Display,
) -> Response {
    tracing::error!("request failed: {err}");
    page(
        state,
        headers,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Server error",
        "pages/error",
        &json!({}),
        cart,
    )
}
