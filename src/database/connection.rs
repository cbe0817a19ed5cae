use std::time::Duration;

use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;

use crate::config::settings::DatabaseSettings;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// The pool connects lazily. An unreachable store is reported by each query
/// as it runs, not when the pool is created.
pub fn create_pool(settings: &DatabaseSettings) -> DbPool {
    let manager = build_manager(&settings.path);
    build_pool(manager, settings)
}

/// Connections are read-only; the dashboard never writes to the store.
fn build_manager(path: &str) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path).with_flags(
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn build_pool(manager: SqliteConnectionManager, settings: &DatabaseSettings) -> DbPool {
    r2d2::Pool::builder()
        .max_size(settings.pool_size)
        .min_idle(Some(0))
        .connection_timeout(Duration::from_millis(settings.connection_timeout_ms))
        .build_unchecked(manager)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn, r2d2::Error> {
    pool.get()
}

/// Single-connection pool over a private in-memory database.
///
/// One connection is required: every in-memory connection opens its own empty
/// database.
#[cfg(test)]
pub fn create_memory_pool() -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(1)
        .build(SqliteConnectionManager::memory())
        .context("Failed to create in-memory database pool")
}
