use async_trait::async_trait;
use thiserror::Error;

use super::Account;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already exists")]
    Duplicate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for accounts.
///
/// Implementations must enforce username uniqueness atomically inside
/// `insert`; callers never check for existence first.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account.
    ///
    /// # Errors
    /// Returns `StoreError::Duplicate` if the username is taken.
    async fn insert(&self, username: &str, password_hash: &str) -> Result<Account, StoreError>;

    /// Look an account up by its exact username.
    ///
    /// # Errors
    /// Returns an error if the backing storage fails.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Check that the backing storage is reachable.
    ///
    /// # Errors
    /// Returns an error if the backing storage fails.
    async fn ping(&self) -> Result<(), StoreError>;
}
