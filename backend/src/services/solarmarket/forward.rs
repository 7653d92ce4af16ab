//! # SolarMarket Proxy Plumbing
//!
//! This module provides the shared forwarding machinery used by every
//! `/solarmarket/*` route. The handlers themselves only build the vendor
//! URL; everything else — the session check, the vendor credential and the
//! relay of the answer — lives here so the proxy behaves identically for
//! all four operations.
//!
//! ## Workflow:
//!
//! 1.  **Session Check**: The handler calls [`require_session`], which looks
//!     up the caller's bearer token in the local session store. A missing or
//!     stale token short-circuits with a 401 JSON body, which the frontend
//!     takes as its cue to drop the stored session and return to login. The
//!     vendor is never contacted for an unauthenticated request.
//!
//! 2.  **Request Preparation**: The handler builds a `reqwest::RequestBuilder`
//!     for the vendor resource (GET for reads, POST with a JSON body for the
//!     custom-field update) and hands it to [`relay`].
//!
//! 3.  **Credential Attachment**: `relay` attaches the vendor API token from
//!     [`AppConfig`] as a `Bearer` authorization header. The token only ever
//!     exists server-side; the browser sees the local session token instead.
//!
//! 4.  **Verbatim Relay**: The vendor's HTTP status and response body are
//!     copied onto the Actix response untouched. The frontend is written
//!     against SolarMarket's own payloads, so the proxy must not reshape,
//!     re-wrap or "improve" them. A vendor 404 stays a 404, a vendor error
//!     body arrives as sent.
//!
//! 5.  **Transport Failures**: Only when the vendor cannot be reached at all,
//!     or its body cannot be read, does the proxy answer for itself: a 502
//!     with a Portuguese error message, after logging the underlying cause.
//!     There is no retry and no backoff; the user refreshes when the vendor
//!     recovers.

use crate::config::AppConfig;
use crate::services::auth::store;
use actix_web::{HttpRequest, HttpResponse};
use common::requests::ErrorResponse;
use log::warn;

pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        message: "Sessão expirada".to_string(),
    })
}

/// Rejects the request unless it carries a live session token.
pub(crate) fn require_session(req: &HttpRequest, cfg: &AppConfig) -> Result<(), HttpResponse> {
    match store::authenticate(req, &cfg.db_path) {
        Some(_) => Ok(()),
        None => Err(unauthorized()),
    }
}

/// Sends a prepared vendor request and maps the answer onto an Actix
/// response, preserving the vendor's status code.
pub(crate) async fn relay(builder: reqwest::RequestBuilder, cfg: &AppConfig) -> HttpResponse {
    let response = builder
        .header("Authorization", format!("Bearer {}", cfg.vendor_token))
        .send()
        .await;

    match response {
        Ok(resp) => {
            let status = actix_web::http::StatusCode::from_u16(resp.status().as_u16())
                .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY);
            match resp.text().await {
                Ok(body) => HttpResponse::build(status)
                    .content_type("application/json")
                    .body(body),
                Err(e) => {
                    warn!("Failed to read vendor response body: {}", e);
                    HttpResponse::BadGateway().json(ErrorResponse {
                        message: "Resposta inválida do SolarMarket".to_string(),
                    })
                }
            }
        }
        Err(e) => {
            warn!("Vendor request failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                message: "Falha ao contatar o SolarMarket".to_string(),
            })
        }
    }
}
