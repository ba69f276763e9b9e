//! API handlers and shared utilities.

pub mod admin;
pub mod chirps;
pub mod health;
pub mod login;
pub mod refresh;
pub(crate) mod storage;
pub mod users;

use axum::http::StatusCode;
use regex::Regex;
use tracing::{debug, error};

use crate::auth;

/// Lightweight email sanity check used before persisting data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Map an auth-core error to a client response.
///
/// Every authentication failure collapses to the same 401 body so clients
/// cannot distinguish a bad signature from an expired claim or an unknown
/// account; the precise variant goes to the logs only.
pub(crate) fn auth_error_response(err: &auth::Error) -> (StatusCode, String) {
    if err.is_auth_failure() {
        debug!("Authentication failed: {err}");
        (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
    } else {
        error!("Auth subsystem failure: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error".to_string(),
        )
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
    }

    #[test]
    fn auth_failures_and_faults_get_distinct_statuses() {
        let (status, body) = auth_error_response(&auth::Error::TokenRevoked);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthorized");

        let (status, _) = auth_error_response(&auth::Error::Signing);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
