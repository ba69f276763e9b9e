//! Postgres-backed [`AuthStore`].
//!
//! Timestamps live in the database as `timestamptz` and cross the boundary
//! as epoch seconds, so the core stays on plain integers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::Instrument;

use super::{AuthStore, RefreshTokenRecord, UserCredential};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthStore for PgStore {
    async fn find_user_credential(&self, email: &str) -> Result<Option<UserCredential>> {
        let query = "SELECT id, hashed_password FROM users WHERE email = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup user credential")?;

        Ok(row.map(|row| UserCredential {
            user_id: row.get("id"),
            hashed_password: row.get("hashed_password"),
        }))
    }

    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> Result<()> {
        let query = r"
            INSERT INTO refresh_tokens (token, user_id, created_at, expires_at)
            VALUES ($1, $2, to_timestamp($3::double precision), to_timestamp($4::double precision))
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(&record.token)
            .bind(record.user_id)
            .bind(record.created_at_unix)
            .bind(record.expires_at_unix)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to insert refresh token")?;
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        let query = r"
            SELECT token, user_id,
                   EXTRACT(EPOCH FROM created_at)::BIGINT AS created_at_unix,
                   EXTRACT(EPOCH FROM expires_at)::BIGINT AS expires_at_unix,
                   EXTRACT(EPOCH FROM revoked_at)::BIGINT AS revoked_at_unix
            FROM refresh_tokens
            WHERE token = $1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup refresh token")?;

        Ok(row.map(|row| RefreshTokenRecord {
            token: row.get("token"),
            user_id: row.get("user_id"),
            created_at_unix: row.get("created_at_unix"),
            expires_at_unix: row.get("expires_at_unix"),
            revoked_at_unix: row.get("revoked_at_unix"),
        }))
    }

    async fn revoke_refresh_token(&self, token: &str, revoked_at_unix: i64) -> Result<bool> {
        // Single statement keeps revocation atomic against concurrent
        // refreshes; COALESCE keeps the first revocation timestamp.
        let query = r"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, to_timestamp($2::double precision))
            WHERE token = $1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(token)
            .bind(revoked_at_unix)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to revoke refresh token")?;

        Ok(result.rows_affected() > 0)
    }
}
