//! Session orchestration: login, refresh, revoke.
//!
//! A refresh-token record is `Active` until it either passes its expiry or
//! gets a revocation timestamp; both end states are terminal for
//! access-token issuance. Expiry is checked lazily at use, never swept.

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use super::{
    error::Error,
    jwt,
    refresh::generate_refresh_token,
    unix_now,
    password::verify_password,
};
use crate::store::{AuthStore, RefreshTokenRecord};

const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 60;

/// Explicit configuration for token issuance. The signing secret is wrapped
/// so it never lands in logs or debug output.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    signing_secret: SecretString,
    access_token_ttl_seconds: i64,
    refresh_token_ttl_seconds: i64,
}

impl SessionConfig {
    #[must_use]
    pub fn new(signing_secret: SecretString) -> Self {
        Self {
            signing_secret,
            access_token_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            refresh_token_ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_access_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.access_token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_refresh_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.refresh_token_ttl_seconds = seconds;
        self
    }

    fn signing_secret_bytes(&self) -> &[u8] {
        self.signing_secret.expose_secret().as_bytes()
    }
}

/// Tokens handed back on a successful login.
#[derive(Debug)]
pub struct LoginTokens {
    pub user_id: Uuid,
    pub token: String,
    pub refresh_token: String,
}

/// Stateless orchestrator over an [`AuthStore`]. Safe to share across
/// request tasks; concurrency correctness is the store's job.
pub struct SessionManager<S> {
    store: S,
    config: SessionConfig,
}

impl<S: AuthStore> SessionManager<S> {
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Verify a credential and mint an (access token, refresh token) pair,
    /// persisting the refresh record.
    ///
    /// If persistence fails the error propagates and the login did not
    /// happen; no partial state is observable to the caller.
    ///
    /// # Errors
    ///
    /// [`Error::CredentialMismatch`] for a wrong password or unknown
    /// account; otherwise the failing step's error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginTokens, Error> {
        let credential = self
            .store
            .find_user_credential(email)
            .await?
            .ok_or(Error::CredentialMismatch)?;

        verify_password(password, &credential.hashed_password)?;

        let now = unix_now();
        let token = jwt::sign_hs256(
            self.config.signing_secret_bytes(),
            credential.user_id,
            self.config.access_token_ttl_seconds,
            now,
        )?;

        let refresh_token = generate_refresh_token()?;
        let record = RefreshTokenRecord {
            token: refresh_token.clone(),
            user_id: credential.user_id,
            created_at_unix: now,
            expires_at_unix: now + self.config.refresh_token_ttl_seconds,
            revoked_at_unix: None,
        };
        self.store.insert_refresh_token(&record).await?;

        Ok(LoginTokens {
            user_id: credential.user_id,
            token,
            refresh_token,
        })
    }

    /// Exchange a presented refresh token for a fresh access token.
    ///
    /// The refresh token itself is not rotated; concurrent refreshes of an
    /// active record may each mint an independent access token.
    ///
    /// # Errors
    ///
    /// [`Error::TokenNotFound`] when no record matches,
    /// [`Error::Expired`] past expiry, [`Error::TokenRevoked`] once revoked.
    pub async fn refresh(&self, presented_token: &str) -> Result<String, Error> {
        let record = self
            .store
            .find_refresh_token(presented_token)
            .await?
            .ok_or(Error::TokenNotFound)?;

        let now = unix_now();
        if record.expires_at_unix <= now {
            return Err(Error::Expired);
        }
        if record.revoked_at_unix.is_some() {
            return Err(Error::TokenRevoked);
        }

        jwt::sign_hs256(
            self.config.signing_secret_bytes(),
            record.user_id,
            self.config.access_token_ttl_seconds,
            now,
        )
    }

    /// Mark a refresh token revoked. Idempotent: revoking an already-revoked
    /// or expired record succeeds.
    ///
    /// # Errors
    ///
    /// [`Error::TokenNotFound`] when no record matches.
    pub async fn revoke(&self, presented_token: &str) -> Result<(), Error> {
        if self
            .store
            .revoke_refresh_token(presented_token, unix_now())
            .await?
        {
            Ok(())
        } else {
            Err(Error::TokenNotFound)
        }
    }

    /// Verify a presented access token and return its subject.
    ///
    /// # Errors
    ///
    /// Propagates the codec's verification errors.
    pub fn verify_access_token(&self, token: &str) -> Result<Uuid, Error> {
        jwt::verify_hs256(token, self.config.signing_secret_bytes(), unix_now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::store::{MemoryStore, UserCredential};

    const EMAIL: &str = "alice@example.com";
    const PASSWORD: &str = "correct horse battery staple";

    async fn manager_with_user() -> Result<(SessionManager<MemoryStore>, Uuid), Error> {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        store
            .add_user(
                EMAIL,
                UserCredential {
                    user_id,
                    hashed_password: hash_password(PASSWORD)?,
                },
            )
            .await;
        let config = SessionConfig::new(SecretString::from("test-signing-secret".to_string()));
        Ok((SessionManager::new(store, config), user_id))
    }

    #[tokio::test]
    async fn login_then_refresh_yields_distinct_token_for_same_subject() -> Result<(), Error> {
        let (manager, user_id) = manager_with_user().await?;

        let tokens = manager.login(EMAIL, PASSWORD).await?;
        assert_eq!(tokens.user_id, user_id);
        assert_eq!(tokens.refresh_token.len(), 64);
        assert_eq!(manager.verify_access_token(&tokens.token)?, user_id);

        let refreshed = manager.refresh(&tokens.refresh_token).await?;
        assert_ne!(refreshed, tokens.token);
        assert_eq!(manager.verify_access_token(&refreshed)?, user_id);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_account_both_mismatch() -> Result<(), Error> {
        let (manager, _) = manager_with_user().await?;

        let result = manager.login(EMAIL, "wrong-password").await;
        assert!(matches!(result, Err(Error::CredentialMismatch)));

        let result = manager.login("nobody@example.com", PASSWORD).await;
        assert!(matches!(result, Err(Error::CredentialMismatch)));
        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_no_longer_refreshes() -> Result<(), Error> {
        let (manager, _) = manager_with_user().await?;

        let tokens = manager.login(EMAIL, PASSWORD).await?;
        manager.revoke(&tokens.refresh_token).await?;

        let result = manager.refresh(&tokens.refresh_token).await;
        assert!(matches!(result, Err(Error::TokenRevoked)));
        Ok(())
    }

    #[tokio::test]
    async fn revoke_is_idempotent_but_unknown_token_fails() -> Result<(), Error> {
        let (manager, _) = manager_with_user().await?;

        let tokens = manager.login(EMAIL, PASSWORD).await?;
        manager.revoke(&tokens.refresh_token).await?;
        manager.revoke(&tokens.refresh_token).await?;

        let result = manager.revoke("0000000000000000000000000000000000000000000000000000000000000000").await;
        assert!(matches!(result, Err(Error::TokenNotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_refresh_token_is_not_found() -> Result<(), Error> {
        let (manager, _) = manager_with_user().await?;
        let result = manager.refresh("deadbeef").await;
        assert!(matches!(result, Err(Error::TokenNotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn expired_record_fails_even_when_unrevoked() -> Result<(), Error> {
        let (manager, user_id) = manager_with_user().await?;

        let record = RefreshTokenRecord {
            token: "aa".repeat(32),
            user_id,
            created_at_unix: unix_now() - 120,
            expires_at_unix: unix_now() - 60,
            revoked_at_unix: None,
        };
        manager.store().insert_refresh_token(&record).await?;

        let result = manager.refresh(&record.token).await;
        assert!(matches!(result, Err(Error::Expired)));

        // Revoking the expired record still succeeds.
        manager.revoke(&record.token).await
    }
}
