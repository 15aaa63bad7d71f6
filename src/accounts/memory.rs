use async_trait::async_trait;
use std::collections::{HashMap, hash_map::Entry};
use tokio::sync::RwLock;

use super::{Account, AccountStore, StoreError};

/// Process-local account store, selected with `--dsn memory://`.
///
/// Uniqueness holds because the existence check and the insert happen under
/// one write lock.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate),
            Entry::Vacant(slot) => {
                let account = Account::new(username.to_string(), password_hash.to_string());
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
