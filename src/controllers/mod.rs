use axum::{http::HeaderMap, response::Response};
use tower_sessions::Session;

use crate::{
    cart::{Cart, CartSummary},
    render, AppState,
};

pub mod home_controller;
pub mod shop_controller;
pub mod cart_controller;
pub mod order_controller;

/// Loads the visitor's cart, or the 500 page when the session store can't be
/// read.
pub(crate) async fn load_cart(
    state: &AppState,
    headers: &HeaderMap,
    session: Session,
) -> Result<Cart, Response> {
    Cart::load(session, &state.settings.cart_session_key)
        .await
        .map_err(|e| render::server_error(state, headers, &CartSummary::default(), &e))
}
