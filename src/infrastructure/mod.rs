pub mod executor;
pub mod models;
pub mod order_repo;
