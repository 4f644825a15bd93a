use axum::{Router, routing::get};
use crate::{AppState, controllers::shop_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(shop_controller::product_list))
        .route("/category/:slug/", get(shop_controller::product_list_by_category))
        .route("/product/:id/:slug/", get(shop_controller::product_detail))
}
