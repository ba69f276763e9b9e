//! Database helpers for the user and chirp handlers.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::is_unique_violation;

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub(super) enum SignupOutcome {
    Created(Uuid),
    Conflict,
}

pub(super) struct ChirpRow {
    pub(super) id: Uuid,
    pub(super) user_id: Uuid,
    pub(super) body: String,
    pub(super) created_at_unix: i64,
}

fn chirp_from_row(row: &sqlx::postgres::PgRow) -> ChirpRow {
    ChirpRow {
        id: row.get("id"),
        user_id: row.get("user_id"),
        body: row.get("body"),
        created_at_unix: row.get("created_at_unix"),
    }
}

pub(super) async fn insert_user(
    pool: &PgPool,
    email: &str,
    hashed_password: &str,
) -> Result<SignupOutcome> {
    let query = r"
        INSERT INTO users (email, hashed_password)
        VALUES ($1, $2)
        RETURNING id
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(SignupOutcome::Created(row.get("id"))),
        Err(err) if is_unique_violation(&err) => Ok(SignupOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

pub(super) async fn insert_chirp(pool: &PgPool, user_id: Uuid, body: &str) -> Result<ChirpRow> {
    let query = r"
        INSERT INTO chirps (user_id, body)
        VALUES ($1, $2)
        RETURNING id, user_id, body,
                  EXTRACT(EPOCH FROM created_at)::BIGINT AS created_at_unix
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .bind(body)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert chirp")?;
    Ok(chirp_from_row(&row))
}

pub(super) async fn list_chirps(pool: &PgPool) -> Result<Vec<ChirpRow>> {
    let query = r"
        SELECT id, user_id, body,
               EXTRACT(EPOCH FROM created_at)::BIGINT AS created_at_unix
        FROM chirps
        ORDER BY created_at ASC
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list chirps")?;
    Ok(rows.iter().map(chirp_from_row).collect())
}

pub(super) async fn get_chirp(pool: &PgPool, chirp_id: Uuid) -> Result<Option<ChirpRow>> {
    let query = r"
        SELECT id, user_id, body,
               EXTRACT(EPOCH FROM created_at)::BIGINT AS created_at_unix
        FROM chirps
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(chirp_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup chirp")?;
    Ok(row.as_ref().map(chirp_from_row))
}

/// Delete every user (chirps and refresh tokens cascade). Dev-only reset.
pub(super) async fn delete_all_users(pool: &PgPool) -> Result<()> {
    let query = "DELETE FROM users";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete users")?;
    Ok(())
}
