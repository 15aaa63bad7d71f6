//! Map validated CLI arguments to the server action.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{
    ARG_CORS_ORIGIN, ARG_DB_MAX_CONNECTIONS, ARG_DSN, ARG_PORT, hashing, token,
};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .filter(|dsn| !dsn.trim().is_empty())
        .context("missing required argument: --dsn")?;
    let db_max_connections = matches
        .get_one::<u32>(ARG_DB_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(5);
    let cors_origins = matches
        .get_many::<String>(ARG_CORS_ORIGIN)
        .map(|values| {
            values
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let token_opts = token::Options::parse(matches)?;
    let hashing_opts = hashing::Options::parse(matches);

    Ok(Action::Server(Args {
        port,
        dsn,
        db_max_connections,
        cors_origins,
        token: token_opts.into_config(),
        hashing: hashing_opts,
    }))
}
