pub mod auth;
pub mod solarmarket;
