//! Command-line argument dispatch and server initialization.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::auth;
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let token_secret = matches
        .get_one::<String>(auth::ARG_TOKEN_SECRET)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --token-secret")?;

    let platform = matches
        .get_one::<String>(auth::ARG_PLATFORM)
        .cloned()
        .unwrap_or_else(|| "prod".to_string());

    let access_token_ttl_seconds = matches
        .get_one::<i64>(auth::ARG_ACCESS_TOKEN_TTL)
        .copied()
        .unwrap_or(3600);

    let refresh_token_ttl_seconds = matches
        .get_one::<i64>(auth::ARG_REFRESH_TOKEN_TTL)
        .copied()
        .unwrap_or(5_184_000);

    Ok(Action::Server(Args {
        port,
        dsn,
        token_secret,
        platform,
        access_token_ttl_seconds,
        refresh_token_ttl_seconds,
    }))
}
