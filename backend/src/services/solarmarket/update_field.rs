use crate::config::AppConfig;
use crate::services::solarmarket::forward;
use actix_web::{web, HttpRequest, Responder};
use common::requests::UpdateFieldRequest;

/// The Actix web handler for
/// `POST /solarmarket/projects/{id}/custom-fields/{field_id}`.
///
/// Writes a single custom field value. The whole serialized list goes
/// in one value, so the last writer wins on the vendor side.
pub(crate) async fn process(
    req: HttpRequest,
    cfg: web::Data<AppConfig>,
    http: web::Data<reqwest::Client>,
    path: web::Path<(u64, u32)>,
    payload: web::Json<UpdateFieldRequest>,
) -> impl Responder {
    if let Err(resp) = forward::require_session(&req, &cfg) {
        return resp;
    }

    let (project_id, field_id) = path.into_inner();
    let url = format!(
        "{}/projects/{}/custom-fields/{}",
        cfg.vendor_base_url, project_id, field_id
    );
    forward::relay(http.post(url).json(&payload.into_inner()), &cfg).await
}
