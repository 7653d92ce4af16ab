//! Runtime configuration, read once from the environment at startup.

use std::env;

/// Shared application configuration, injected as `web::Data`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the SolarMarket REST API.
    pub vendor_base_url: String,
    /// Bearer token attached to every forwarded vendor request.
    pub vendor_token: String,
    /// Path of the sqlite file holding users and sessions.
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> AppConfig {
        AppConfig {
            vendor_base_url: env::var("SOLARMARKET_API_URL")
                .unwrap_or_else(|_| "https://api.solarmarket.com.br/v1".to_string()),
            vendor_token: env::var("SOLARMARKET_API_TOKEN").unwrap_or_default(),
            db_path: env::var("GDIS_DB_PATH").unwrap_or_else(|_| "gdis.sqlite".to_string()),
            host: env::var("GDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("GDIS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
