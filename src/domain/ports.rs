use super::errors::DomainError;
use super::order::{NewOrder, OrderView};

/// Persistence port for orders.
///
/// Mutations that match no row return `DomainError::NotFound`.
pub trait OrderRepository: Send + Sync + 'static {
    /// All orders, ascending by id.
    fn list(&self) -> Result<Vec<OrderView>, DomainError>;
    /// Orders whose customer name contains `name`, ignoring case.
    fn search_by_customer(&self, name: &str) -> Result<Vec<OrderView>, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError>;
    fn create(&self, order: NewOrder) -> Result<i32, DomainError>;
    fn update_status(&self, id: i32, status: &str) -> Result<(), DomainError>;
    fn update_quantity(&self, id: i32, quantity: i32) -> Result<(), DomainError>;
    /// Moves every "Shipped" order to "Delivered" and returns how many changed.
    fn deliver_shipped(&self) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<(), DomainError>;
}
