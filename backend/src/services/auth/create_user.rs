use crate::config::AppConfig;
use crate::services::auth::store;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{CredentialsRequest, ErrorResponse};
use rusqlite::Connection;

/// The Actix web handler for `POST /auth/create-user`.
///
/// Registers a new user. Only logged-in users may create accounts, so a
/// valid session token is required.
pub(crate) async fn process(
    req: actix_web::HttpRequest,
    cfg: web::Data<AppConfig>,
    payload: web::Json<CredentialsRequest>,
) -> impl Responder {
    if store::authenticate(&req, &cfg.db_path).is_none() {
        return HttpResponse::Unauthorized().json(ErrorResponse {
            message: "Sessão expirada".to_string(),
        });
    }

    let conn = match Connection::open(&cfg.db_path) {
        Ok(conn) => conn,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    let creds = payload.into_inner();
    match store::create_user(&conn, &creds.email, &creds.password) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "created": creds.email })),
        Err(e) => HttpResponse::Conflict().json(ErrorResponse { message: e }),
    }
}
