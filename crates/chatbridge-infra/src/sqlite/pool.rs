//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. This module provides a `DatabasePool`
//! with a multi-connection reader pool for concurrent reads and a single-connection
//! writer pool for serialized writes.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection pool (up to 8) for concurrent SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERTs.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Create a new DatabasePool and apply the embedded migrations.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::connect(database_url, true).await
    }

    /// Create a new DatabasePool with split reader/writer connections.
    ///
    /// When `run_migrations` is set, the embedded migrations are applied on
    /// the writer before the reader pool is opened. Migrations are idempotent.
    /// Pass `false` when the schema is managed externally.
    ///
    /// Foreign keys are left at the driver default. `chats.user_id` carries no
    /// foreign key, so a chat row never depends on a `users` row.
    pub async fn connect(database_url: &str, run_migrations: bool) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        if run_migrations {
            sqlx::migrate!("../../migrations").run(&writer).await?;
        } else {
            tracing::info!("Skipping embedded migrations");
        }

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(read_opts)
            .await?;

        tracing::debug!(run_migrations, "Database pool ready");

        Ok(Self { reader, writer })
    }
}
