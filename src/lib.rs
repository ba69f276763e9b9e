//! # Chirps
//!
//! `chirps` is a social-posting backend. Users sign up with an email and
//! password, log in to receive a short-lived signed access token plus a
//! long-lived refresh token, and post short messages ("chirps").
//!
//! ## Token model
//!
//! - **Access tokens** are HS256-signed, carry the user id in `sub`, and
//!   expire after a configurable TTL (one hour by default). They are verified
//!   offline on every request, no database lookup involved.
//! - **Refresh tokens** are 256-bit random values, hex encoded, persisted in
//!   `PostgreSQL` with an expiry timestamp. They can be revoked server-side at
//!   any time, which is the trade-off for requiring a lookup per refresh.
//!
//! All authentication failures collapse into a single `401 Unauthorized`
//! response so the API never reveals whether an email exists, a password was
//! wrong, or a token was merely expired.

pub mod api;
pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::GIT_COMMIT_HASH;

    #[test]
    fn commit_hash_is_never_empty() {
        assert!(!GIT_COMMIT_HASH.is_empty());
    }
}
