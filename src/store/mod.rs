//! Repository boundary for credentials and refresh tokens.
//!
//! The session manager talks to storage only through [`AuthStore`], so it
//! runs unchanged against Postgres in production and the in-memory fake in
//! tests.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A user's stable identifier plus the hash to compare a login password
/// against. The auth core never sees plaintext credentials at rest.
#[derive(Debug, Clone)]
pub struct UserCredential {
    pub user_id: Uuid,
    pub hashed_password: String,
}

/// Persisted refresh-token record. Timestamps are unix seconds.
///
/// A record is usable iff the current time is before `expires_at_unix` and
/// `revoked_at_unix` is unset. Revocation is one-way; records are never
/// deleted by the normal flow.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: Uuid,
    pub created_at_unix: i64,
    pub expires_at_unix: i64,
    pub revoked_at_unix: Option<i64>,
}

#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Look up a user's identifier and password hash by email.
    async fn find_user_credential(&self, email: &str) -> Result<Option<UserCredential>>;

    /// Persist a new refresh-token record.
    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> Result<()>;

    /// Fetch a refresh-token record by exact token match.
    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>>;

    /// Set the revocation timestamp on a record if not already set.
    ///
    /// Returns `false` when no record matches. Must be atomic at the record
    /// level so a revoke racing a refresh cannot be lost; revoking an
    /// already-revoked or expired record succeeds without rewriting the
    /// original timestamp.
    async fn revoke_refresh_token(&self, token: &str, revoked_at_unix: i64) -> Result<bool>;
}
