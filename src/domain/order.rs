use bigdecimal::BigDecimal;

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_SHIPPED: &str = "Shipped";
pub const STATUS_DELIVERED: &str = "Delivered";

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub product_name: String,
    pub price: BigDecimal,
    pub quantity: i32,
}

/// An order as read back from the store, with the computed total.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: i32,
    pub customer_name: String,
    pub product_name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub status: String,
    pub total_amount: BigDecimal,
}
