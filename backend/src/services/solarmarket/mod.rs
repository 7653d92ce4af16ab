mod custom_fields;
mod forward;
mod project;
mod proposals;
mod update_field;

use actix_web::web;

const API_PATH: &str = "/solarmarket";

/// Configures and returns the Actix `Scope` for the SolarMarket proxy.
///
/// Every route requires a valid session and forwards to the vendor API
/// with the server-side bearer token attached. The browser never sees
/// that token.
pub fn configure_routes() -> actix_web::Scope {
    web::scope(API_PATH)
        .route("/projects/{id}", web::get().to(project::process))
        .route("/projects/{id}/proposals", web::get().to(proposals::process))
        .route(
            "/projects/{id}/custom-fields",
            web::get().to(custom_fields::process),
        )
        .route(
            "/projects/{id}/custom-fields/{field_id}",
            web::post().to(update_field::process),
        )
}
