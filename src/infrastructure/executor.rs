use diesel::r2d2::{ManageConnection, Pool};

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Unavailable(e.to_string())
    }
}

// ── Executor ──────────────────────────────────────────────────────────────────

/// Runs work on a pooled connection.
///
/// Every call borrows exactly one connection and hands it back when the call
/// returns, whether the work succeeded, failed or unwound. Acquisition
/// failures surface as `DomainError::Unavailable`; anything the work itself
/// reports is converted into a `DomainError`.
pub struct QueryExecutor<M: ManageConnection> {
    pool: Pool<M>,
}

impl<M: ManageConnection> QueryExecutor<M> {
    pub fn new(pool: Pool<M>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<M> {
        &self.pool
    }

    /// Read-only execution: no transaction is opened.
    pub fn fetch<T, E, F>(&self, query: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut M::Connection) -> Result<T, E>,
        DomainError: From<E>,
    {
        let mut conn = self.pool.get()?;
        let rows = query(&mut *conn)?;
        Ok(rows)
    }
}

impl<M> QueryExecutor<M>
where
    M: ManageConnection,
    M::Connection: diesel::Connection,
{
    /// Mutating execution: `statement` runs inside a transaction that is
    /// committed on `Ok` and rolled back on `Err`.
    pub fn execute<T, F>(&self, statement: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut M::Connection) -> Result<T, DomainError>,
    {
        let mut conn = self.pool.get()?;
        diesel::Connection::transaction(&mut *conn, statement)
    }
}
