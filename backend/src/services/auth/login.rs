use crate::config::AppConfig;
use crate::services::auth::store;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{CredentialsRequest, ErrorResponse, SessionResponse};
use rusqlite::Connection;

/// The Actix web handler for `POST /auth/login`.
///
/// Validates the credentials and returns a fresh session token. Wrong
/// passwords and unknown users both answer 401 without distinction.
pub(crate) async fn process(
    cfg: web::Data<AppConfig>,
    payload: web::Json<CredentialsRequest>,
) -> impl Responder {
    let conn = match Connection::open(&cfg.db_path) {
        Ok(conn) => conn,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    let creds = payload.into_inner();
    match store::login(&conn, &creds.email, &creds.password) {
        Ok(Some(token)) => HttpResponse::Ok().json(SessionResponse {
            token,
            email: creds.email,
        }),
        Ok(None) => HttpResponse::Unauthorized().json(ErrorResponse {
            message: "E-mail ou senha inválidos".to_string(),
        }),
        Err(e) => HttpResponse::InternalServerError().body(e),
    }
}
