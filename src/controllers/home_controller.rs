use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use mongodb::bson::doc;

use tower_sessions::Session;

use crate::{cart::Cart, render, AppState};

pub async fn not_found(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Session>,
) -> Response {
    // a broken session shouldn't turn a 404 into a 500
    let summary = match session {
        Some(s) => match Cart::load(s, &state.settings.cart_session_key).await {
            Ok(cart) => cart.summary(),
            Err(e) => {
                tracing::warn!("cart unavailable on 404 page: {e}");
                Default::default()
            }
        },
        None => Default::default(),
    };

    render::not_found(&state, &headers, &summary)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    let Some(db) = state.db.as_ref() else {
        return (StatusCode::OK, Html("mongo: not configured".to_string())).into_response();
    };

    match db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => (StatusCode::OK, Html("mongo: ok".to_string())).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("mongo error: {}", e)),
        )
            .into_response(),
    }
}
