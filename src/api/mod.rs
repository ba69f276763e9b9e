use crate::{
    api::handlers::{admin, chirps, health, login, refresh, users},
    auth::{SessionConfig, SessionManager},
    store::PgStore,
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Extension, Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, services::ServeDir, set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
mod openapi;

/// Deployment platform, gating destructive admin endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Dev,
    Prod,
}

impl Platform {
    /// Anything that is not explicitly `dev` is treated as production.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("dev") {
            Self::Dev
        } else {
            Self::Prod
        }
    }
}

/// Shared mutable state for the admin endpoints.
pub struct ApiState {
    pub platform: Platform,
    pub fileserver_hits: AtomicU64,
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(
    port: u16,
    dsn: String,
    session_config: SessionConfig,
    platform: Platform,
) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    let manager = Arc::new(SessionManager::new(PgStore::new(pool.clone()), session_config));
    let state = Arc::new(ApiState {
        platform,
        fileserver_hits: AtomicU64::new(0),
    });

    let fileserver = Router::new()
        .fallback_service(ServeDir::new("web"))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits));

    let app = Router::new()
        .route("/health", get(health::health))
        .route("/api/users", post(users::create_user))
        .route("/api/login", post(login::login))
        .route("/api/refresh", post(refresh::refresh))
        .route("/api/revoke", post(refresh::revoke))
        .route(
            "/api/chirps",
            post(chirps::create_chirp).get(chirps::list_chirps),
        )
        .route("/api/chirps/:chirp_id", get(chirps::get_chirp))
        .route("/admin/metrics", get(admin::metrics))
        .route("/admin/reset", post(admin::reset))
        .nest("/app", fileserver)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(manager))
                .layer(Extension(state))
                .layer(Extension(pool.clone())),
        )
        .layer(Extension(pool));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

/// Bump the fileserver hit counter before serving static content.
async fn count_hits(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Response {
    state.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}

// span
fn make_span(request: &axum::http::Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    info_span!("http.request", http.method = %request.method(), path, request_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parse_defaults_to_prod() {
        assert_eq!(Platform::parse("dev"), Platform::Dev);
        assert_eq!(Platform::parse("DEV"), Platform::Dev);
        assert_eq!(Platform::parse("prod"), Platform::Prod);
        assert_eq!(Platform::parse("staging"), Platform::Prod);
        assert_eq!(Platform::parse(""), Platform::Prod);
    }

    #[test]
    fn hit_counter_starts_at_zero() {
        let state = ApiState {
            platform: Platform::Dev,
            fileserver_hits: AtomicU64::new(0),
        };
        assert_eq!(state.fileserver_hits.load(Ordering::Relaxed), 0);
        state.fileserver_hits.fetch_add(1, Ordering::Relaxed);
        assert_eq!(state.fileserver_hits.load(Ordering::Relaxed), 1);
    }
}
