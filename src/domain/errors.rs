use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order {0} not found")]
    NotFound(i32),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// No pooled connection could be acquired.
    #[error("Database unavailable: {0}")]
    Unavailable(String),
    /// A statement failed to execute, fetch or commit.
    #[error("{0}")]
    Store(String),
}
