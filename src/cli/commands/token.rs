use crate::session::{DEFAULT_TOKEN_ISSUER, DEFAULT_TOKEN_TTL_SECONDS, TokenConfig};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_TOKEN_SECRET: &str = "token-secret";
pub const ARG_TOKEN_TTL_SECONDS: &str = "token-ttl-seconds";
pub const ARG_TOKEN_ISSUER: &str = "token-issuer";

#[derive(Debug, Clone)]
pub struct Options {
    pub secret: SecretString,
    pub ttl_seconds: i64,
    pub issuer: String,
}

impl Options {
    /// Parse token arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the secret is missing or empty.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let secret = match matches.get_one::<String>(ARG_TOKEN_SECRET) {
            Some(value) if !value.trim().is_empty() => SecretString::from(value.clone()),
            _ => anyhow::bail!("missing required argument: --{ARG_TOKEN_SECRET}"),
        };

        Ok(Self {
            secret,
            ttl_seconds: matches
                .get_one::<i64>(ARG_TOKEN_TTL_SECONDS)
                .copied()
                .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS),
            issuer: matches
                .get_one::<String>(ARG_TOKEN_ISSUER)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_ISSUER.to_string()),
        })
    }

    #[must_use]
    pub fn into_config(self) -> TokenConfig {
        TokenConfig::new(self.secret)
            .with_ttl_seconds(self.ttl_seconds)
            .with_issuer(self.issuer)
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_TOKEN_SECRET)
                .long(ARG_TOKEN_SECRET)
                .help("Secret used to sign bearer tokens (at least 32 bytes)")
                .env("TESSERA_TOKEN_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL_SECONDS)
                .long(ARG_TOKEN_TTL_SECONDS)
                .help("Bearer token lifetime in seconds")
                .env("TESSERA_TOKEN_TTL_SECONDS")
                .default_value("1800")
                .value_parser(clap::value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new(ARG_TOKEN_ISSUER)
                .long(ARG_TOKEN_ISSUER)
                .help("Issuer (iss) written into and required from bearer tokens")
                .env("TESSERA_TOKEN_ISSUER")
                .default_value(DEFAULT_TOKEN_ISSUER),
        )
}
