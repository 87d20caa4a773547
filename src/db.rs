use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use thiserror::Error;

use crate::config::DbConfig;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum DbSetupError {
    #[error("Connection pool could not be established: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Failed to run database migrations: {0}")]
    Migration(String),
}

/// Applies `statement_timeout` to every connection the pool opens, so no
/// query can hold a pooled connection indefinitely.
#[derive(Debug)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("SET statement_timeout = {}", self.0.as_millis()))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build the bounded connection pool. Callers block for at most
/// `acquire_timeout` waiting on a free connection before getting an error.
pub fn create_pool(config: &DbConfig) -> Result<DbPool, DbSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(config.connection_string());
    let pool = Pool::builder()
        .min_idle(Some(config.min_idle))
        .max_size(config.max_size)
        .connection_timeout(config.acquire_timeout)
        .connection_customizer(Box::new(StatementTimeout(config.statement_timeout)))
        .build(manager)?;

    log::info!(
        "Connection pool ready ({}:{}/{}, min_idle={}, max_size={})",
        config.host,
        config.port,
        config.name,
        config.min_idle,
        config.max_size
    );
    Ok(pool)
}
