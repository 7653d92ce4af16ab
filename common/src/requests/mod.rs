use serde::{Deserialize, Serialize};

/// Body of `POST /solarmarket/projects/{id}/custom-fields/{field_id}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpdateFieldRequest {
    pub value: String,
}

/// Body of `POST /auth/login` and `POST /auth/create-user`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub email: String,
}

/// `GET /auth/me` response.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MeResponse {
    pub user: SessionUser,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionUser {
    pub email: String,
}

impl SessionUser {
    /// Short username shown in the UI and stamped on created items:
    /// the local part of the e-mail address.
    pub fn username(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Error body returned by the backend for failed requests.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_local_part_of_email() {
        let user = SessionUser {
            email: "jean.marcel@example.com".into(),
        };
        assert_eq!(user.username(), "jean.marcel");
    }
}
