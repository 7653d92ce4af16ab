//! HTTP client for the backend.
//!
//! All vendor data goes through the `/solarmarket` proxy; the browser
//! only ever holds the short-lived session token, never the vendor
//! credential. A 401 on any authorized call expires the local session
//! and sends the user back to the login screen.

use std::fmt;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use common::model::project::{CustomFieldEntry, ProjectMeta, Proposal};
use common::requests::{
    CredentialsRequest, ErrorResponse, MeResponse, SessionResponse, UpdateFieldRequest,
};

use crate::session;

/// Error of a backend call: the HTTP status (0 for transport failures)
/// plus a message suitable for a toast.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn transport(err: gloo_net::Error) -> ApiError {
        ApiError {
            status: 0,
            message: err.to_string(),
        }
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Turns a non-2xx response into an `ApiError`, expiring the session on
/// a 401 so the app falls back to the login page.
async fn fail(resp: Response) -> ApiError {
    let status = resp.status();
    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => format!("Erro {}", status),
    };
    gloo_console::error!(format!("Request failed ({}): {}", status, message));
    if status == 401 {
        session::expire();
    }
    ApiError { status, message }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if resp.ok() {
        resp.json::<T>().await.map_err(ApiError::transport)
    } else {
        Err(fail(resp).await)
    }
}

/// Logs in and returns the new session. A 401 here means wrong
/// credentials and does not touch the stored session.
pub async fn login(email: &str, password: &str) -> Result<SessionResponse, ApiError> {
    let resp = Request::post("/auth/login")
        .json(&CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(ApiError::transport)?
        .send()
        .await
        .map_err(ApiError::transport)?;

    if resp.ok() {
        resp.json::<SessionResponse>().await.map_err(ApiError::transport)
    } else {
        let status = resp.status();
        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => format!("Erro {}", status),
        };
        Err(ApiError { status, message })
    }
}

pub async fn create_user(email: &str, password: &str) -> Result<(), ApiError> {
    let resp = authorized(Request::post("/auth/create-user"))
        .json(&CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(ApiError::transport)?
        .send()
        .await
        .map_err(ApiError::transport)?;

    if resp.ok() { Ok(()) } else { Err(fail(resp).await) }
}

/// Validates the stored token against the backend.
pub async fn me() -> Result<MeResponse, ApiError> {
    let resp = authorized(Request::get("/auth/me"))
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(resp).await
}

pub async fn get_project(id: u64) -> Result<ProjectMeta, ApiError> {
    let resp = authorized(Request::get(&format!("/solarmarket/projects/{}", id)))
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(resp).await
}

pub async fn get_proposals(id: u64) -> Result<Vec<Proposal>, ApiError> {
    let resp = authorized(Request::get(&format!(
        "/solarmarket/projects/{}/proposals",
        id
    )))
    .send()
    .await
    .map_err(ApiError::transport)?;
    read_json(resp).await
}

pub async fn get_custom_fields(id: u64) -> Result<Vec<CustomFieldEntry>, ApiError> {
    let resp = authorized(Request::get(&format!(
        "/solarmarket/projects/{}/custom-fields",
        id
    )))
    .send()
    .await
    .map_err(ApiError::transport)?;
    read_json(resp).await
}

/// Writes one custom field. The value always carries the whole encoded
/// list (or total), so the last writer wins.
pub async fn update_custom_field(
    project_id: u64,
    field_id: u32,
    value: String,
) -> Result<(), ApiError> {
    let resp = authorized(Request::post(&format!(
        "/solarmarket/projects/{}/custom-fields/{}",
        project_id, field_id
    )))
    .json(&UpdateFieldRequest { value })
    .map_err(ApiError::transport)?
    .send()
    .await
    .map_err(ApiError::transport)?;

    if resp.ok() { Ok(()) } else { Err(fail(resp).await) }
}
