use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{auth_error_response, storage};
use crate::{
    auth::{extract::bearer_token, SessionManager},
    store::PgStore,
};

/// Longest chirp body accepted, in characters.
const MAX_CHIRP_LENGTH: usize = 140;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateChirpRequest {
    pub body: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: i64,
}

impl From<storage::ChirpRow> for ChirpResponse {
    fn from(row: storage::ChirpRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            body: row.body,
            created_at: row.created_at_unix,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/chirps",
    request_body = CreateChirpRequest,
    responses(
        (status = 201, description = "Chirp created", body = ChirpResponse),
        (status = 400, description = "Validation error", body = String),
        (status = 401, description = "Unauthorized", body = String)
    ),
    security(("access_token" = [])),
    tag = "chirps"
)]
pub async fn create_chirp(
    manager: Extension<Arc<SessionManager<PgStore>>>,
    pool: Extension<PgPool>,
    headers: HeaderMap,
    payload: Option<Json<CreateChirpRequest>>,
) -> impl IntoResponse {
    let token = match bearer_token(&headers) {
        Ok(token) => token,
        Err(err) => return auth_error_response(&err).into_response(),
    };
    let user_id = match manager.verify_access_token(&token) {
        Ok(user_id) => user_id,
        Err(err) => return auth_error_response(&err).into_response(),
    };

    let request: CreateChirpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let body = request.body.trim();
    if body.is_empty() {
        return (StatusCode::BAD_REQUEST, "Chirp is empty".to_string()).into_response();
    }
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return (StatusCode::BAD_REQUEST, "Chirp is too long".to_string()).into_response();
    }

    match storage::insert_chirp(&pool, user_id, body).await {
        Ok(row) => (StatusCode::CREATED, Json(ChirpResponse::from(row))).into_response(),
        Err(err) => {
            error!("Failed to create chirp: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/chirps",
    responses(
        (status = 200, description = "All chirps, oldest first", body = [ChirpResponse])
    ),
    tag = "chirps"
)]
pub async fn list_chirps(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_chirps(&pool).await {
        Ok(rows) => {
            let chirps: Vec<ChirpResponse> = rows.into_iter().map(ChirpResponse::from).collect();
            (StatusCode::OK, Json(chirps)).into_response()
        }
        Err(err) => {
            error!("Failed to list chirps: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/chirps/{chirp_id}",
    params(("chirp_id" = Uuid, Path, description = "Chirp id")),
    responses(
        (status = 200, description = "Chirp found", body = ChirpResponse),
        (status = 404, description = "Chirp not found", body = String)
    ),
    tag = "chirps"
)]
pub async fn get_chirp(
    pool: Extension<PgPool>,
    Path(chirp_id): Path<Uuid>,
) -> impl IntoResponse {
    match storage::get_chirp(&pool, chirp_id).await {
        Ok(Some(row)) => (StatusCode::OK, Json(ChirpResponse::from(row))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Chirp not found".to_string()).into_response(),
        Err(err) => {
            error!("Failed to lookup chirp: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
                .into_response()
        }
    }
}
