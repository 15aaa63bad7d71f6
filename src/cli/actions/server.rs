use crate::{
    accounts::{AccountStore, Credentials, MemoryAccountStore, PasswordHasher, PgAccountStore},
    api::{self, handlers::AuthState},
    cli::commands::hashing,
    session::{SessionIssuer, TokenConfig},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

const MEMORY_DSN_SCHEME: &str = "memory";

pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub db_max_connections: u32,
    pub cors_origins: Vec<String>,
    pub token: TokenConfig,
    pub hashing: hashing::Options,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("dsn", &redact_dsn(&self.dsn))
            .field("db_max_connections", &self.db_max_connections)
            .field("cors_origins", &self.cors_origins)
            .field("token", &self.token)
            .field("hashing", &self.hashing)
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the account store cannot be opened, the token or hashing
/// configuration is invalid, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let store = open_store(&args.dsn, args.db_max_connections).await?;

    let hasher = PasswordHasher::with_params(
        args.hashing.memory_kib,
        args.hashing.iterations,
        args.hashing.parallelism,
    )
    .context("Invalid Argon2 parameters")?;

    let sessions = SessionIssuer::new(&args.token).context("Invalid token configuration")?;

    let cors = api::cors_layer(&args.cors_origins)?;

    let auth_state = Arc::new(AuthState::new(Credentials::new(store, hasher), sessions));

    api::new(args.port, auth_state, cors).await
}

/// Open the account store named by `dsn`; `memory://` keeps accounts in process.
///
/// # Errors
/// Returns an error if the database is unreachable or the schema cannot be applied.
pub async fn open_store(dsn: &str, max_connections: u32) -> Result<Arc<dyn AccountStore>> {
    if is_memory_dsn(dsn) {
        warn!("Using in-memory account store; accounts are lost on restart");
        return Ok(Arc::new(MemoryAccountStore::new()));
    }

    let store = PgAccountStore::connect(dsn, max_connections).await?;
    info!("Connected to database: {}", redact_dsn(dsn));
    Ok(Arc::new(store))
}

fn is_memory_dsn(dsn: &str) -> bool {
    Url::parse(dsn).is_ok_and(|url| url.scheme() == MEMORY_DSN_SCHEME)
}

fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
