use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    Connection, PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};
use std::time::Duration;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::{Account, AccountStore, StoreError};

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

/// PostgreSQL-backed account store.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a bounded pool and make sure the schema exists.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable or the schema cannot be applied.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(max_connections)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        let store = Self::new(pool);
        store.apply_schema().await?;
        Ok(store)
    }

    /// Apply `sql/schema.sql`; every statement is idempotent.
    ///
    /// # Errors
    /// Returns an error if a statement fails.
    pub async fn apply_schema(&self) -> Result<()> {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "CREATE",
            db.statement = "schema.sql"
        );
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("Failed to apply database schema")?;
        Ok(())
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, sqlx::Error> {
    Ok(Account {
        id: row.try_get::<Uuid, _>("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// Each operation holds a pooled connection for its own duration only; the
// guard returns it to the pool on every exit path.
#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<Account, StoreError> {
        let query = "INSERT INTO accounts (id, username, password_hash) VALUES ($1, $2, $3) \
                     RETURNING id, username, password_hash, created_at";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );

        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(query)
            .bind(Uuid::now_v7())
            .bind(username)
            .bind(password_hash)
            .fetch_one(&mut *conn)
            .instrument(span)
            .await;

        match result {
            Ok(row) => Ok(account_from_row(&row)?),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Duplicate),
            Err(err) => Err(StoreError::Database(err)),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let query =
            "SELECT id, username, password_hash, created_at FROM accounts WHERE username = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );

        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&mut *conn)
            .instrument(span)
            .await?;

        Ok(row.as_ref().map(account_from_row).transpose()?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;
        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_declares_unique_username() {
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS accounts"));
        assert!(SCHEMA_SQL.contains("UNIQUE (username)"));
    }

    #[test]
    fn row_not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
