use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    // session key the cart lives under
    pub cart_session_key: String,
    pub session_cookie_name: String,
    pub cookie_secure: bool,
    // idle time before a session expires
    pub session_ttl_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_db: "shop".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            cart_session_key: "cart".to_string(),
            session_cookie_name: "sessionid".to_string(),
            cookie_secure: false,
            // two weeks
            session_ttl_secs: 14 * 24 * 60 * 60,
        }
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::default();

    let mongodb_uri = env::var("MONGODB_URI").unwrap_or(defaults.mongodb_uri);
    let mongodb_db = env::var("MONGODB_DB").unwrap_or(defaults.mongodb_db);
    let host = env::var("HOST").unwrap_or(defaults.host);

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let cart_session_key = env::var("CART_SESSION_ID").unwrap_or(defaults.cart_session_key);
    let session_cookie_name =
        env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.session_cookie_name);
    let cookie_secure = env::var("COOKIE_SECURE")
        .map(|v| parse_bool(&v))
        .unwrap_or(defaults.cookie_secure);
    let session_ttl_secs = env::var("SESSION_COOKIE_AGE")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(defaults.session_ttl_secs);

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        cart_session_key,
        session_cookie_name,
        cookie_secure,
        session_ttl_secs,
    }
}
