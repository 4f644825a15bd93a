use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::cart_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/cart/", get(cart_controller::cart_detail))
        .route("/cart/add/:product_id/", post(cart_controller::cart_add))
        .route("/cart/remove/:product_id/", post(cart_controller::cart_remove))
}
