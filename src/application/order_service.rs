use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderView};
use crate::domain::ports::OrderRepository;

/// Validates caller input and delegates to the repository.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("{field} must not be blank")));
    }
    Ok(())
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    pub fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        self.repo.list()
    }

    /// Any term is a valid substring, including the empty one, which
    /// matches every order.
    pub fn search_orders(&self, name: &str) -> Result<Vec<OrderView>, DomainError> {
        self.repo.search_by_customer(name)
    }

    pub fn get_order(&self, id: i32) -> Result<OrderView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound(id))
    }

    pub fn create_order(&self, order: NewOrder) -> Result<i32, DomainError> {
        require_text("customer_name", &order.customer_name)?;
        require_text("product_name", &order.product_name)?;
        self.repo.create(order)
    }

    pub fn update_status(&self, id: i32, status: &str) -> Result<(), DomainError> {
        require_text("status", status)?;
        self.repo.update_status(id, status)
    }

    pub fn update_quantity(&self, id: i32, quantity: i32) -> Result<(), DomainError> {
        self.repo.update_quantity(id, quantity)
    }

    pub fn deliver_shipped(&self) -> Result<usize, DomainError> {
        self.repo.deliver_shipped()
    }

    pub fn delete_order(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete(id)
    }
}
