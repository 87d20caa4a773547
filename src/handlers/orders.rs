use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::application::order_service::OrderService;
use crate::domain::order::{NewOrder, OrderView};
use crate::errors::{AppError, ErrorResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[schema(example = "Nidhi Chaudhary")]
    pub customer_name: String,
    #[schema(example = "Laptop")]
    pub product_name: String,
    #[schema(example = 50000.0)]
    pub price: f64,
    #[schema(example = 2)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "Shipped")]
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    #[schema(example = 3)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the customer name.
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub customer: String,
    pub product: String,
    pub price: f64,
    pub qty: i32,
    pub status: String,
    /// `price * qty`, computed by the database.
    pub total_amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub status: String,
    pub message: String,
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkDeliverResponse {
    pub status: String,
    pub message: String,
    pub updated: usize,
}

/// Decimal → JSON number. Goes through the decimal's text form so 29.97
/// stays 29.97 instead of picking up binary noise.
fn decimal_to_f64(value: &BigDecimal) -> f64 {
    value.to_string().parse().unwrap_or(f64::NAN)
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        Self {
            id: o.id,
            price: decimal_to_f64(&o.price),
            total_amount: decimal_to_f64(&o.total_amount),
            customer: o.customer_name,
            product: o.product_name,
            qty: o.quantity,
            status: o.status,
        }
    }
}

fn success(message: impl Into<String>) -> MessageResponse {
    MessageResponse {
        status: "success".to_string(),
        message: message.into(),
    }
}

fn into_responses(orders: Vec<OrderView>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// All orders ascending by id, each with its computed total.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "List of all orders", body = [OrderResponse]),
        (status = 400, description = "Database failure", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.list_orders()).await??;
    Ok(HttpResponse::Ok().json(into_responses(orders)))
}

/// GET /orders/search?name=
#[utoipa::path(
    get,
    path = "/orders/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Filtered orders", body = [OrderResponse]),
        (status = 400, description = "Missing name or database failure", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn search_orders(
    service: web::Data<OrderService>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    let name = query.into_inner().name;
    let orders = web::block(move || service.search_orders(&name)).await??;
    Ok(HttpResponse::Ok().json(into_responses(orders)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let order = web::block(move || service.get_order(id)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /orders
///
/// Places a new order in status "Pending" and returns its id.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = CreateOrderResponse),
        (status = 400, description = "Invalid body or database failure", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let price = BigDecimal::from_str(&body.price.to_string())
        .map_err(|e| AppError::Validation(format!("Invalid price '{}': {}", body.price, e)))?;

    let new_order = NewOrder {
        customer_name: body.customer_name,
        product_name: body.product_name,
        price,
        quantity: body.quantity,
    };
    let id = web::block(move || service.create_order(new_order)).await??;
    log::info!("Created order {}", id);

    Ok(HttpResponse::Created().json(CreateOrderResponse {
        status: "success".to_string(),
        message: "Order created successfully".to_string(),
        id,
    }))
}

/// PUT /orders/status/{id}
#[utoipa::path(
    put,
    path = "/orders/status/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated successfully", body = MessageResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn update_status(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status = body.into_inner().status;
    web::block(move || service.update_status(id, &status)).await??;
    Ok(HttpResponse::Ok().json(success("Status updated successfully")))
}

/// PUT /orders/quantity/{id}
#[utoipa::path(
    put,
    path = "/orders/quantity/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated successfully", body = MessageResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn update_quantity(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
    body: web::Json<UpdateQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let quantity = body.into_inner().quantity;
    web::block(move || service.update_quantity(id, quantity)).await??;
    Ok(HttpResponse::Ok().json(success("Quantity updated successfully")))
}

/// PUT /orders/bulk-deliver
///
/// Moves every "Shipped" order to "Delivered".
#[utoipa::path(
    put,
    path = "/orders/bulk-deliver",
    responses(
        (status = 200, description = "Number of orders delivered", body = BulkDeliverResponse),
        (status = 400, description = "Database failure", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn bulk_deliver(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let updated = web::block(move || service.deliver_shipped()).await??;
    log::info!("Bulk delivery moved {} orders to Delivered", updated);

    Ok(HttpResponse::Ok().json(BulkDeliverResponse {
        status: "success".to_string(),
        message: format!("{} orders updated", updated),
        updated,
    }))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted successfully", body = MessageResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || service.delete_order(id)).await??;
    log::info!("Deleted order {}", id);
    Ok(HttpResponse::Ok().json(success("Order deleted successfully")))
}
