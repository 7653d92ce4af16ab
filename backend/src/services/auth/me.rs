use crate::config::AppConfig;
use crate::services::auth::store;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::{ErrorResponse, MeResponse, SessionUser};

/// The Actix web handler for `GET /auth/me`.
///
/// Resolves the bearer token to the logged-in user, letting the
/// frontend restore a session after a page reload.
pub(crate) async fn process(req: HttpRequest, cfg: web::Data<AppConfig>) -> impl Responder {
    match store::authenticate(&req, &cfg.db_path) {
        Some(email) => HttpResponse::Ok().json(MeResponse {
            user: SessionUser { email },
        }),
        None => HttpResponse::Unauthorized().json(ErrorResponse {
            message: "Sessão expirada".to_string(),
        }),
    }
}
