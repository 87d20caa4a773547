use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;
use diesel::sql_types::{Int4, Numeric};

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderView, STATUS_DELIVERED, STATUS_PENDING, STATUS_SHIPPED};
use crate::domain::ports::OrderRepository;
use crate::schema::orders;

use super::executor::QueryExecutor;
use super::models::{NewOrderRow, OrderRow};

diesel::define_sql_function! {
    /// Store-side `price * quantity`, installed by the initial migration.
    fn get_total_amount(price: Numeric, quantity: Int4) -> Numeric;
}

/// Escape LIKE metacharacters so `needle` only ever matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn ensure_affected(rows: usize, id: i32) -> Result<(), DomainError> {
    if rows == 0 {
        Err(DomainError::NotFound(id))
    } else {
        Ok(())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    executor: QueryExecutor<ConnectionManager<PgConnection>>,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            executor: QueryExecutor::new(pool),
        }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        let rows = self.executor.fetch(|conn| {
            orders::table
                .select((
                    OrderRow::as_select(),
                    get_total_amount(orders::price, orders::quantity),
                ))
                .order(orders::id.asc())
                .load::<(OrderRow, BigDecimal)>(conn)
        })?;

        Ok(rows
            .into_iter()
            .map(|(row, total)| row.into_view(total))
            .collect())
    }

    fn search_by_customer(&self, name: &str) -> Result<Vec<OrderView>, DomainError> {
        let pattern = like_pattern(name);
        let rows = self.executor.fetch(|conn| {
            orders::table
                .filter(orders::customer_name.ilike(pattern.as_str()))
                .select((
                    OrderRow::as_select(),
                    get_total_amount(orders::price, orders::quantity),
                ))
                .order(orders::id.asc())
                .load::<(OrderRow, BigDecimal)>(conn)
        })?;

        Ok(rows
            .into_iter()
            .map(|(row, total)| row.into_view(total))
            .collect())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        let row = self.executor.fetch(|conn| {
            orders::table
                .find(id)
                .select((
                    OrderRow::as_select(),
                    get_total_amount(orders::price, orders::quantity),
                ))
                .first::<(OrderRow, BigDecimal)>(conn)
                .optional()
        })?;

        Ok(row.map(|(row, total)| row.into_view(total)))
    }

    fn create(&self, order: NewOrder) -> Result<i32, DomainError> {
        self.executor.execute(|conn| {
            let id = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    customer_name: &order.customer_name,
                    product_name: &order.product_name,
                    price: &order.price,
                    quantity: order.quantity,
                    status: STATUS_PENDING,
                })
                .returning(orders::id)
                .get_result::<i32>(conn)?;
            Ok(id)
        })
    }

    fn update_status(&self, id: i32, status: &str) -> Result<(), DomainError> {
        self.executor.execute(|conn| {
            let updated = diesel::update(orders::table.find(id))
                .set(orders::status.eq(status))
                .execute(conn)?;
            ensure_affected(updated, id)
        })
    }

    fn update_quantity(&self, id: i32, quantity: i32) -> Result<(), DomainError> {
        self.executor.execute(|conn| {
            let updated = diesel::update(orders::table.find(id))
                .set(orders::quantity.eq(quantity))
                .execute(conn)?;
            ensure_affected(updated, id)
        })
    }

    fn deliver_shipped(&self) -> Result<usize, DomainError> {
        self.executor.execute(|conn| {
            let updated = diesel::update(orders::table.filter(orders::status.eq(STATUS_SHIPPED)))
                .set(orders::status.eq(STATUS_DELIVERED))
                .execute(conn)?;
            Ok(updated)
        })
    }

    fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.executor.execute(|conn| {
            let deleted = diesel::delete(orders::table.find(id)).execute(conn)?;
            ensure_affected(deleted, id)
        })
    }
}
