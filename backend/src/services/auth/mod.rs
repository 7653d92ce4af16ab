mod create_user;
mod login;
mod me;
pub mod store;

use actix_web::web;

const API_PATH: &str = "/auth";

/// Configures and returns the Actix `Scope` for all authentication routes.
pub fn configure_routes() -> actix_web::Scope {
    web::scope(API_PATH)
        .route("/login", web::post().to(login::process))
        .route("/create-user", web::post().to(create_user::process))
        .route("/me", web::get().to(me::process))
}
