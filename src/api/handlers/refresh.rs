use std::sync::Arc;

use axum::{extract::Extension, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth_error_response;
use crate::{
    auth::{extract::bearer_token, SessionManager},
    store::PgStore,
};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RefreshResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/refresh",
    responses(
        (status = 200, description = "New access token issued", body = RefreshResponse),
        (status = 401, description = "Unauthorized", body = String)
    ),
    security(("refresh_token" = [])),
    tag = "sessions"
)]
pub async fn refresh(
    manager: Extension<Arc<SessionManager<PgStore>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let refresh_token = match bearer_token(&headers) {
        Ok(token) => token,
        Err(err) => return auth_error_response(&err).into_response(),
    };

    match manager.refresh(&refresh_token).await {
        Ok(token) => (StatusCode::OK, Json(RefreshResponse { token })).into_response(),
        Err(err) => auth_error_response(&err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/revoke",
    responses(
        (status = 204, description = "Refresh token revoked"),
        (status = 401, description = "Unauthorized", body = String)
    ),
    security(("refresh_token" = [])),
    tag = "sessions"
)]
pub async fn revoke(
    manager: Extension<Arc<SessionManager<PgStore>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let refresh_token = match bearer_token(&headers) {
        Ok(token) => token,
        Err(err) => return auth_error_response(&err).into_response(),
    };

    match manager.revoke(&refresh_token).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => auth_error_response(&err).into_response(),
    }
}
