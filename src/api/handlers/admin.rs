use std::sync::{atomic::Ordering, Arc};

use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use tracing::{error, info};

use super::storage::delete_all_users;
use crate::api::{ApiState, Platform};

#[utoipa::path(
    get,
    path = "/admin/metrics",
    responses(
        (status = 200, description = "Fileserver hit count", body = String)
    ),
    tag = "admin"
)]
pub async fn metrics(state: Extension<Arc<ApiState>>) -> impl IntoResponse {
    let hits = state.fileserver_hits.load(Ordering::Relaxed);
    (
        StatusCode::OK,
        format!("Chirps has been visited {hits} times!"),
    )
}

/// Wipe all users (chirps and refresh tokens cascade) and reset the hit
/// counter. Only honored on dev deployments.
#[utoipa::path(
    post,
    path = "/admin/reset",
    responses(
        (status = 200, description = "State reset", body = String),
        (status = 403, description = "Forbidden outside dev", body = String)
    ),
    tag = "admin"
)]
pub async fn reset(state: Extension<Arc<ApiState>>, pool: Extension<PgPool>) -> impl IntoResponse {
    if state.platform != Platform::Dev {
        return (StatusCode::FORBIDDEN, "Forbidden".to_string());
    }

    if let Err(err) = delete_all_users(&pool).await {
        error!("Failed to reset state: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error".to_string(),
        );
    }

    state.fileserver_hits.store(0, Ordering::Relaxed);
    info!("Dev reset: all users deleted, hit counter zeroed");
    (StatusCode::OK, "Reset".to_string())
}
