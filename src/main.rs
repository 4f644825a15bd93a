use std::net::SocketAddr;

use mongodb::Client;

use rustshop::{
    config, routes,
    services::{db_init, session_store::MongoSessionStore},
    templates, AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = db_init::ensure_indexes(&db).await {
        tracing::warn!("could not create indexes: {e}");
    }

    let hbs = templates::build_handlebars().expect("Failed to load templates");
    let sessions = MongoSessionStore::new(db.clone());
    let state = AppState::with_mongo(hbs, settings.clone(), db);

    let app = routes::app(state, sessions);

    let ip = settings
        .host
        .parse::<std::net::IpAddr>()
        .expect("HOST must be an IP address");
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind");
    axum::serve(listener, app).await.expect("server error");
}
