//! Argon2id password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`) so the
//! parameters travel with each record and can be raised without a migration.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

// Verified against when the username is unknown, so a miss costs the same as a wrong password.
const DUMMY_PASSWORD: &[u8] = b"tessera-dummy-password";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("failed to hash password")]
    Hash,
}

#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Build a hasher with explicit cost parameters.
    ///
    /// # Errors
    /// Returns an error if the parameters are out of range.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(PasswordError::Params)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, DUMMY_PASSWORD)?;
        Ok(Self {
            argon2,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    /// Returns an error if hashing fails.
    pub fn hash(&self, password: &[u8]) -> Result<String, PasswordError> {
        hash_with(&self.argon2, password)
    }

    /// Compare a password with a stored PHC string in constant time.
    ///
    /// A stored hash that cannot be parsed never matches.
    #[must_use]
    pub fn verify(&self, password: &[u8], stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            warn!("Stored password hash is not a valid PHC string");
            return false;
        };
        self.argon2.verify_password(password, &parsed).is_ok()
    }

    /// Burn one verification against the dummy hash. Always `false`.
    #[must_use]
    pub fn verify_dummy(&self, password: &[u8]) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.argon2.params();
        f.debug_struct("PasswordHasher")
            .field("algorithm", &"argon2id")
            .field("m_cost", &params.m_cost())
            .field("t_cost", &params.t_cost())
            .field("p_cost", &params.p_cost())
            .finish_non_exhaustive()
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &[u8]) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password, &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}
