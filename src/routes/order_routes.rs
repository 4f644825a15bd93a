use axum::{Router, routing::get};
use crate::{AppState, controllers::order_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/orders/create/",
        get(order_controller::get_order_create).post(order_controller::post_order_create),
    )
}
