use crate::config::AppConfig;
use crate::services::solarmarket::forward;
use actix_web::{web, HttpRequest, Responder};

/// The Actix web handler for `GET /solarmarket/projects/{id}/custom-fields`.
pub(crate) async fn process(
    req: HttpRequest,
    cfg: web::Data<AppConfig>,
    http: web::Data<reqwest::Client>,
    path: web::Path<u64>,
) -> impl Responder {
    if let Err(resp) = forward::require_session(&req, &cfg) {
        return resp;
    }

    let url = format!(
        "{}/projects/{}/custom-fields",
        cfg.vendor_base_url,
        path.into_inner()
    );
    forward::relay(http.get(url), &cfg).await
}
