//! Authentication core.
//!
//! Stateless compute around one shared mutable resource, the refresh-token
//! store. Access tokens are signed HS256 assertions verified purely from
//! (token, secret, now); refresh tokens are opaque random strings persisted
//! server-side and checked lazily at use.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod error;
pub mod extract;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod session;

pub use error::Error;
pub use session::{LoginTokens, SessionConfig, SessionManager};

/// Current unix time in seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(0))
}
