use secrecy::SecretString;

pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 30 * 60;
pub const DEFAULT_TOKEN_ISSUER: &str = "tessera";
pub const MIN_SECRET_BYTES: usize = 32;

/// Signing configuration, built once at startup and handed to `SessionIssuer`.
#[derive(Clone)]
pub struct TokenConfig {
    secret: SecretString,
    ttl_seconds: i64,
    issuer: String,
}

impl TokenConfig {
    #[must_use]
    pub fn new(secret: impl Into<SecretString>) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            issuer: DEFAULT_TOKEN_ISSUER.to_string(),
        }
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: String) -> Self {
        self.issuer = issuer;
        self
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"***")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("issuer", &self.issuer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults() {
        let config = TokenConfig::new("secret".to_string());
        assert_eq!(config.ttl_seconds(), DEFAULT_TOKEN_TTL_SECONDS);
        assert_eq!(config.issuer(), DEFAULT_TOKEN_ISSUER);
        assert_eq!(config.secret().expose_secret(), "secret");
    }

    #[test]
    fn builder_overrides() {
        let config = TokenConfig::new("secret".to_string())
            .with_ttl_seconds(3600)
            .with_issuer("auth.example.test".to_string());
        assert_eq!(config.ttl_seconds(), 3600);
        assert_eq!(config.issuer(), "auth.example.test");
    }

    #[test]
    fn debug_redacts_secret() {
        let config = TokenConfig::new("super-secret-value".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("***"));
    }
}
