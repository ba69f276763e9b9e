//! In-memory [`AuthStore`] for tests.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{AuthStore, RefreshTokenRecord, UserCredential};

/// Hash-map fake with the same contract as the Postgres store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, UserCredential>>,
    tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, email: &str, credential: UserCredential) {
        self.users
            .lock()
            .await
            .insert(email.to_string(), credential);
    }
}

#[async_trait]
impl AuthStore for MemoryStore {
    async fn find_user_credential(&self, email: &str) -> Result<Option<UserCredential>> {
        Ok(self.users.lock().await.get(email).cloned())
    }

    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> Result<()> {
        self.tokens
            .lock()
            .await
            .insert(record.token.clone(), record.clone());
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        Ok(self.tokens.lock().await.get(token).cloned())
    }

    async fn revoke_refresh_token(&self, token: &str, revoked_at_unix: i64) -> Result<bool> {
        let mut tokens = self.tokens.lock().await;
        let Some(record) = tokens.get_mut(token) else {
            return Ok(false);
        };
        // First revocation wins; later calls are no-ops.
        record.revoked_at_unix.get_or_insert(revoked_at_unix);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(token: &str) -> RefreshTokenRecord {
        RefreshTokenRecord {
            token: token.to_string(),
            user_id: Uuid::new_v4(),
            created_at_unix: 1_700_000_000,
            expires_at_unix: 1_700_000_000 + 60,
            revoked_at_unix: None,
        }
    }

    #[tokio::test]
    async fn insert_then_find_returns_the_record() -> Result<()> {
        let store = MemoryStore::new();
        store.insert_refresh_token(&record("abc")).await?;
        let found = store.find_refresh_token("abc").await?;
        assert_eq!(found.map(|r| r.token), Some("abc".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn find_unknown_token_is_none() -> Result<()> {
        let store = MemoryStore::new();
        assert!(store.find_refresh_token("missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn revoke_is_one_way_and_idempotent() -> Result<()> {
        let store = MemoryStore::new();
        store.insert_refresh_token(&record("abc")).await?;

        assert!(store.revoke_refresh_token("abc", 100).await?);
        assert!(store.revoke_refresh_token("abc", 200).await?);

        let found = store.find_refresh_token("abc").await?;
        assert_eq!(found.and_then(|r| r.revoked_at_unix), Some(100));
        Ok(())
    }

    #[tokio::test]
    async fn revoke_unknown_token_reports_no_match() -> Result<()> {
        let store = MemoryStore::new();
        assert!(!store.revoke_refresh_token("missing", 100).await?);
        Ok(())
    }
}
