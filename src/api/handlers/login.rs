use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth_error_response;
use crate::{auth::SessionManager, store::PgStore};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = LoginResponse),
        (status = 400, description = "Missing payload", body = String),
        (status = 401, description = "Unauthorized", body = String)
    ),
    tag = "sessions"
)]
pub async fn login(
    manager: Extension<Arc<SessionManager<PgStore>>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = request.email.trim().to_lowercase();

    match manager.login(&email, &request.password).await {
        Ok(tokens) => (
            StatusCode::OK,
            Json(LoginResponse {
                id: tokens.user_id,
                email,
                token: tokens.token,
                refresh_token: tokens.refresh_token,
            }),
        )
            .into_response(),
        Err(err) => auth_error_response(&err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn login_response_exposes_both_tokens() -> Result<()> {
        let response = LoginResponse {
            id: Uuid::nil(),
            email: "alice@example.com".to_string(),
            token: "header.claims.signature".to_string(),
            refresh_token: "ab".repeat(32),
        };
        let value = serde_json::to_value(&response)?;
        let refresh = value
            .get("refresh_token")
            .and_then(serde_json::Value::as_str)
            .context("missing refresh_token")?;
        assert_eq!(refresh.len(), 64);
        assert!(value.get("password").is_none());
        Ok(())
    }
}
