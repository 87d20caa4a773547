use std::collections::BTreeMap;
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use order_management::domain::errors::DomainError;
use order_management::domain::order::{NewOrder, OrderView};
use order_management::domain::ports::OrderRepository;

/// `OrderRepository` backed by a map, mirroring the store's semantics:
/// ascending ids, case-insensitive search, zero-row mutations are not found.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: i32,
    orders: BTreeMap<i32, OrderView>,
}

fn with_total(mut order: OrderView) -> OrderView {
    order.total_amount = &order.price * BigDecimal::from(order.quantity);
    order
}

impl OrderRepository for InMemoryOrderRepository {
    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.values().cloned().map(with_total).collect())
    }

    fn search_by_customer(&self, name: &str) -> Result<Vec<OrderView>, DomainError> {
        let needle = name.to_lowercase();
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .values()
            .filter(|o| o.customer_name.to_lowercase().contains(&needle))
            .cloned()
            .map(with_total)
            .collect())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.get(&id).cloned().map(with_total))
    }

    fn create(&self, order: NewOrder) -> Result<i32, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.orders.insert(
            id,
            OrderView {
                id,
                customer_name: order.customer_name,
                product_name: order.product_name,
                price: order.price,
                quantity: order.quantity,
                status: "Pending".to_string(),
                total_amount: BigDecimal::from(0),
            },
        );
        Ok(id)
    }

    fn update_status(&self, id: i32, status: &str) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let order = state.orders.get_mut(&id).ok_or(DomainError::NotFound(id))?;
        order.status = status.to_string();
        Ok(())
    }

    fn update_quantity(&self, id: i32, quantity: i32) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let order = state.orders.get_mut(&id).ok_or(DomainError::NotFound(id))?;
        order.quantity = quantity;
        Ok(())
    }

    fn deliver_shipped(&self) -> Result<usize, DomainError> {
        let mut state = self.state.lock().unwrap();
        let mut updated = 0;
        for order in state.orders.values_mut().filter(|o| o.status == "Shipped") {
            order.status = "Delivered".to_string();
            updated += 1;
        }
        Ok(updated)
    }

    fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound(id))
    }
}

/// Every call fails the way a lost database connection would.
pub struct FailingOrderRepository;

impl FailingOrderRepository {
    fn fail<T>() -> Result<T, DomainError> {
        Err(DomainError::Store(
            "server closed the connection unexpectedly".to_string(),
        ))
    }
}

impl OrderRepository for FailingOrderRepository {
    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        Self::fail()
    }

    fn search_by_customer(&self, _name: &str) -> Result<Vec<OrderView>, DomainError> {
        Self::fail()
    }

    fn find_by_id(&self, _id: i32) -> Result<Option<OrderView>, DomainError> {
        Self::fail()
    }

    fn create(&self, _order: NewOrder) -> Result<i32, DomainError> {
        Self::fail()
    }

    fn update_status(&self, _id: i32, _status: &str) -> Result<(), DomainError> {
        Self::fail()
    }

    fn update_quantity(&self, _id: i32, _quantity: i32) -> Result<(), DomainError> {
        Self::fail()
    }

    fn deliver_shipped(&self) -> Result<usize, DomainError> {
        Self::fail()
    }

    fn delete(&self, _id: i32) -> Result<(), DomainError> {
        Self::fail()
    }
}
