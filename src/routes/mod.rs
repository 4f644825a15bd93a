use axum::Router;
use tower_http::services::ServeDir;
use tower_sessions::SessionStore;

use crate::{AppState, controllers::home_controller, session::session_layer};

pub mod home_routes;
pub mod shop_routes;
pub mod cart_routes;
pub mod order_routes;

/// Full router. `sessions` backs the visitor sessions the cart lives in.
pub fn app<S>(state: AppState, sessions: S) -> Router
where
    S: SessionStore + Clone,
{
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = shop_routes::add_routes(router);
    let router = cart_routes::add_routes(router);
    let router = order_routes::add_routes(router);

    router
        .nest_service("/static", ServeDir::new("static"))
        .fallback(home_controller::not_found)
        .layer(session_layer(&state.settings, sessions))
        .with_state(state)
}
