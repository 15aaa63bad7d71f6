use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, instrument};

use super::{Account, AccountStore, PasswordError, PasswordHasher, StoreError};

const MAX_USERNAME_CHARS: usize = 256;
const MAX_PASSWORD_BYTES: usize = 1024;

/// Any non-empty string of at most 256 characters.
pub fn valid_username(username: &str) -> bool {
    !username.is_empty() && username.chars().count() <= MAX_USERNAME_CHARS
}

/// At most 1024 bytes, which keeps hashing cost bounded.
pub fn valid_password(password: &str) -> bool {
    password.len() <= MAX_PASSWORD_BYTES
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("username already exists")]
    DuplicateUsername,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid password")]
    InvalidPassword,
    #[error(transparent)]
    Store(StoreError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::DuplicateUsername,
            other => Self::Store(other),
        }
    }
}

/// Registers and verifies accounts against an `AccountStore`.
#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

impl Credentials {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Create an account.
    ///
    /// # Errors
    /// `DuplicateUsername` if the name is taken, `InvalidUsername`/`InvalidPassword`
    /// for malformed input, or a store/hashing failure.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Account, CredentialError> {
        if !valid_username(username) {
            return Err(CredentialError::InvalidUsername);
        }
        if !valid_password(password.expose_secret()) {
            return Err(CredentialError::InvalidPassword);
        }

        let hasher = self.hasher.clone();
        let password = SecretString::from(password.expose_secret().to_owned());
        let password_hash =
            tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret().as_bytes()))
                .await??;

        let account = self.store.insert(username, &password_hash).await?;
        debug!(account_id = %account.id, "Account created");
        Ok(account)
    }

    /// Check a username/password pair.
    ///
    /// # Errors
    /// `InvalidCredentials` for an unknown user, a wrong password or malformed
    /// input; a store failure otherwise.
    #[instrument(skip(self, password))]
    pub async fn verify(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Account, CredentialError> {
        if !valid_password(password.expose_secret()) {
            return Err(CredentialError::InvalidCredentials);
        }

        let account = if valid_username(username) {
            self.store.find_by_username(username).await?
        } else {
            None
        };

        let hasher = self.hasher.clone();
        let password = SecretString::from(password.expose_secret().to_owned());
        let stored_hash = account.as_ref().map(|a| a.password_hash.clone());
        let matched = tokio::task::spawn_blocking(move || {
            let candidate = password.expose_secret().as_bytes();
            match stored_hash {
                Some(hash) => hasher.verify(candidate, &hash),
                None => hasher.verify_dummy(candidate),
            }
        })
        .await?;

        match account {
            Some(account) if matched => Ok(account),
            Some(_) => {
                debug!("Password mismatch");
                Err(CredentialError::InvalidCredentials)
            }
            None => {
                debug!("Unknown username");
                Err(CredentialError::InvalidCredentials)
            }
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl CredentialError {
    /// Log unexpected failures; expected rejections stay at debug level.
    pub fn log(&self) {
        match self {
            Self::Store(_) | Self::Password(_) | Self::Task(_) => error!("Credential failure: {self}"),
            _ => debug!("Credential rejected: {self}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::accounts::MemoryAccountStore;

    fn credentials() -> Credentials {
        let store: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
        Credentials::new(store, PasswordHasher::with_params(256, 1, 1).unwrap())
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn username_rules() {
        assert!(valid_username("alice"));
        assert!(valid_username("a.b-c_d+e@example.com"));
        assert!(valid_username("Alice Smith"));
        assert!(valid_username("user#1"));
        assert!(valid_username("josé"));
        assert!(valid_username("名前"));
        assert!(valid_username(&"é".repeat(MAX_USERNAME_CHARS)));
        assert!(!valid_username(""));
        assert!(!valid_username(&"x".repeat(MAX_USERNAME_CHARS + 1)));
    }

    #[test]
    fn password_rules() {
        assert!(valid_password("s3cret!"));
        assert!(valid_password(""));
        assert!(valid_password(&"p".repeat(MAX_PASSWORD_BYTES)));
        assert!(!valid_password(&"p".repeat(MAX_PASSWORD_BYTES + 1)));
    }

    #[tokio::test]
    async fn register_then_verify_returns_same_account() {
        let creds = credentials();
        let created = creds.register("alice", &secret("s3cret!")).await.unwrap();
        let verified = creds.verify("alice", &secret("s3cret!")).await.unwrap();
        assert_eq!(created.id, verified.id);
        assert_eq!(verified.username, "alice");
        assert_ne!(verified.password_hash, "s3cret!");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let creds = credentials();
        creds.register("alice", &secret("s3cret!")).await.unwrap();
        let err = creds
            .register("alice", &secret("anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::DuplicateUsername));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_identically() {
        let creds = credentials();
        creds.register("alice", &secret("s3cret!")).await.unwrap();

        let wrong = creds.verify("alice", &secret("wrong")).await.unwrap_err();
        let unknown = creds.verify("mallory", &secret("wrong")).await.unwrap_err();

        assert!(matches!(wrong, CredentialError::InvalidCredentials));
        assert!(matches!(unknown, CredentialError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn malformed_signin_input_is_invalid_credentials() {
        let creds = credentials();
        creds.register("alice", &secret("s3cret!")).await.unwrap();
        let err = creds.verify("", &secret("s3cret!")).await.unwrap_err();
        assert!(matches!(err, CredentialError::InvalidCredentials));
        let oversized = "p".repeat(MAX_PASSWORD_BYTES + 1);
        let err = creds.verify("alice", &secret(&oversized)).await.unwrap_err();
        assert!(matches!(err, CredentialError::InvalidCredentials));
    }

    #[tokio::test]
    async fn free_form_usernames_and_empty_passwords_register() {
        let creds = credentials();
        for username in ["josé", "Alice Smith", "user#1", "名前"] {
            let created = creds.register(username, &secret("s3cret!")).await.unwrap();
            let verified = creds.verify(username, &secret("s3cret!")).await.unwrap();
            assert_eq!(created.id, verified.id);
        }

        creds.register("bob", &secret("")).await.unwrap();
        assert!(creds.verify("bob", &secret("")).await.is_ok());
        assert!(creds.verify("bob", &secret("x")).await.is_err());
    }

    #[tokio::test]
    async fn register_validates_input() {
        let creds = credentials();
        let err = creds.register("", &secret("s3cret!")).await.unwrap_err();
        assert!(matches!(err, CredentialError::InvalidUsername));
        let oversized = "p".repeat(MAX_PASSWORD_BYTES + 1);
        let err = creds.register("alice", &secret(&oversized)).await.unwrap_err();
        assert!(matches!(err, CredentialError::InvalidPassword));
    }

    #[tokio::test]
    async fn concurrent_registrations_create_one_account() {
        let creds = credentials();
        let (one, two) = (secret("one"), secret("two"));
        let (first, second) = tokio::join!(
            creds.register("alice", &one),
            creds.register("alice", &two),
        );
        let outcomes = [first, second];
        let created = outcomes.iter().filter(|r| r.is_ok()).count();
        let duplicates = outcomes
            .iter()
            .filter(|r| matches!(r, Err(CredentialError::DuplicateUsername)))
            .count();
        assert_eq!(created, 1);
        assert_eq!(duplicates, 1);
    }
}
