//! Credential store: account persistence and password verification.
//!
//! Flow Overview:
//! 1) `register` validates the input, hashes the password with Argon2id and
//!    inserts a single row; the storage layer rejects duplicate usernames.
//! 2) `verify` looks the account up and compares the password against the
//!    stored PHC string. Unknown users and wrong passwords fail identically.

mod memory;
mod models;
pub mod password;
mod postgres;
mod service;
mod store;

pub use memory::MemoryAccountStore;
pub use models::Account;
pub use password::{PasswordError, PasswordHasher};
pub use postgres::PgAccountStore;
pub use service::{CredentialError, Credentials, valid_password, valid_username};
pub use store::{AccountStore, StoreError};
