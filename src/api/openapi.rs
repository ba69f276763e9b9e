//! OpenAPI document for the service, served through Swagger UI at `/docs`.

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "chirps",
        description = "Social-posting backend with token-based authentication"
    ),
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::users::create_user,
        crate::api::handlers::login::login,
        crate::api::handlers::refresh::refresh,
        crate::api::handlers::refresh::revoke,
        crate::api::handlers::chirps::create_chirp,
        crate::api::handlers::chirps::list_chirps,
        crate::api::handlers::chirps::get_chirp,
        crate::api::handlers::admin::metrics,
        crate::api::handlers::admin::reset,
    ),
    components(schemas(
        crate::api::handlers::health::Health,
        crate::api::handlers::users::CreateUserRequest,
        crate::api::handlers::users::UserResponse,
        crate::api::handlers::login::LoginRequest,
        crate::api::handlers::login::LoginResponse,
        crate::api::handlers::refresh::RefreshResponse,
        crate::api::handlers::chirps::CreateChirpRequest,
        crate::api::handlers::chirps::ChirpResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Account signup"),
        (name = "sessions", description = "Login, token refresh and revocation"),
        (name = "chirps", description = "Posting and reading chirps"),
        (name = "admin", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "access_token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
            components.add_security_scheme(
                "refresh_token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/health",
            "/api/users",
            "/api/login",
            "/api/refresh",
            "/api/revoke",
            "/api/chirps",
            "/api/chirps/{chirp_id}",
            "/admin/metrics",
            "/admin/reset",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }
}
