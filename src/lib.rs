//! # Tessera (account registration and bearer tokens)
//!
//! `tessera` registers accounts, verifies credentials, and issues short lived
//! bearer tokens that identify the caller on later requests.
//!
//! ## Credentials
//!
//! Passwords are hashed with **Argon2id** and a per-record random salt; only
//! the PHC string is stored. Username uniqueness is enforced by the storage
//! layer, so concurrent registrations of the same name yield exactly one
//! account.
//!
//! Sign-in failures never reveal whether the username exists: unknown users
//! and wrong passwords share one error, and unknown users still pay for a
//! hash verification.
//!
//! ## Sessions
//!
//! Tokens are HS256 JWTs carrying `sub`, `iat`, `exp`, `iss` and `jti`. They
//! are stateless: validity is decided by signature, issuer and expiry alone.
//! Forged, malformed and expired tokens are indistinguishable to the caller.

pub mod accounts;
pub mod api;
pub mod cli;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
