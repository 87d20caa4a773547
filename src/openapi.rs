use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::handlers::orders::{
    BulkDeliverResponse, CreateOrderRequest, CreateOrderResponse, MessageResponse, OrderResponse,
    UpdateQuantityRequest, UpdateStatusRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Management API",
        description = "CRUD API over the orders table",
        version = "1.0.0"
    ),
    paths(
        crate::handlers::orders::list_orders,
        crate::handlers::orders::search_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::create_order,
        crate::handlers::orders::update_status,
        crate::handlers::orders::update_quantity,
        crate::handlers::orders::bulk_deliver,
        crate::handlers::orders::delete_order,
    ),
    components(schemas(
        OrderResponse,
        CreateOrderRequest,
        CreateOrderResponse,
        UpdateStatusRequest,
        UpdateQuantityRequest,
        MessageResponse,
        BulkDeliverResponse,
        ErrorResponse,
    )),
    tags((name = "orders", description = "Order management endpoints"))
)]
pub struct ApiDoc;
