//! Session issuer: stateless HS256 bearer tokens.
//!
//! Flow Overview:
//! 1) `issue` signs `{sub, iat, exp, iss, jti}` with the process secret.
//! 2) `resolve` checks the signature, the issuer and `now < exp`, then returns
//!    the subject. Every failure collapses into `InvalidToken` for callers;
//!    `TokenError` keeps the reason for logs only.

mod claims;
mod config;

pub use claims::{Claims, IssuedToken};
pub use config::{DEFAULT_TOKEN_ISSUER, DEFAULT_TOKEN_TTL_SECONDS, MIN_SECRET_BYTES, TokenConfig};

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("token secret must be at least {MIN_SECRET_BYTES} bytes")]
    WeakSecret,
    #[error("token TTL must be positive")]
    InvalidTtl,
}

/// Reason a token was rejected. Callers must not surface the variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid signature")]
    Signature,
    #[error("token expired")]
    Expired,
    #[error("invalid claims")]
    Claims,
    #[error("failed to sign token")]
    Encoding,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::Signature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidSubject
            | ErrorKind::MissingRequiredClaim(_) => Self::Claims,
            _ => Self::Malformed,
        }
    }
}

#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
    issuer: String,
}

impl SessionIssuer {
    /// Build an issuer from its configuration.
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than `MIN_SECRET_BYTES` or the TTL is not positive.
    pub fn new(config: &TokenConfig) -> Result<Self, ConfigError> {
        let secret = config.secret().expose_secret().as_bytes();
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::WeakSecret);
        }
        if config.ttl_seconds() <= 0 {
            return Err(ConfigError::InvalidTtl);
        }

        // Expiry is checked by hand against an injectable clock, without leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds: config.ttl_seconds(),
            issuer: config.issuer().to_string(),
        })
    }

    /// Mint a token for `subject` valid for the configured TTL.
    ///
    /// # Errors
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Mint a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue_at(&self, subject: &str, now: i64) -> Result<IssuedToken, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Encoding)?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// Returns the rejection reason; callers must treat every variant alike.
    pub fn resolve(&self, token: &str) -> Result<String, TokenError> {
        self.resolve_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    /// Returns the rejection reason; callers must treat every variant alike.
    pub fn resolve_at(&self, token: &str, now: i64) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.exp <= now {
            debug!(exp = claims.exp, now, "Token expired");
            return Err(TokenError::Expired);
        }
        if claims.sub.is_empty() {
            return Err(TokenError::Claims);
        }

        Ok(claims.sub)
    }
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("algorithm", &"HS256")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
