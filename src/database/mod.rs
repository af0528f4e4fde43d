pub mod assert;
pub mod transaction;

use crate::{config::DbSettings, DbPool};
use anyhow::Context;
use diesel::{
    connection::SimpleConnection,
    r2d2::{ConnectionManager, PooledConnection},
    SqliteConnection,
};
use std::time::Duration;

pub use self::transaction::write_transaction;

const SCHEMA_SQL: &str = include_str!("../../db/schema.sql");

pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Per-connection settings applied when the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    lock_wait_timeout: Duration,
}

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // busy_timeout goes first so the remaining pragmas wait on a locked file
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {};
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
            self.lock_wait_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(settings: &DbSettings) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(&settings.url);
    r2d2::Pool::builder()
        .max_size(settings.pool_size)
        // waiting for a free connection is bounded like waiting for the lock
        .connection_timeout(settings.lock_wait_timeout.max(Duration::from_millis(1)))
        .connection_customizer(Box::new(ConnectionOptions {
            lock_wait_timeout: settings.lock_wait_timeout,
        }))
        .build(manager)
        .with_context(|| format!("Failed to create pool for {}", settings.url))
}

pub fn init_schema(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = get_db_conn(pool)?;
    conn.batch_execute(SCHEMA_SQL).context("Failed to apply schema")?;
    Ok(())
}

pub fn get_db_conn(pool: &DbPool) -> anyhow::Result<DbConn> {
    pool.get().context("DB connection")
}
