use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::domain::order::OrderView;
use crate::schema::orders;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub customer_name: String,
    pub product_name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub status: String,
}

impl OrderRow {
    pub fn into_view(self, total_amount: BigDecimal) -> OrderView {
        OrderView {
            id: self.id,
            customer_name: self.customer_name,
            product_name: self.product_name,
            price: self.price,
            quantity: self.quantity,
            status: self.status,
            total_amount,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub customer_name: &'a str,
    pub product_name: &'a str,
    pub price: &'a BigDecimal,
    pub quantity: i32,
    pub status: &'a str,
}
