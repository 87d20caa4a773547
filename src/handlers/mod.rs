pub mod orders;

use actix_web::web;

use crate::errors::AppError;

/// Register the `/orders` routes together with extractor configs that turn
/// malformed JSON, path and query input into structured 400 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/orders")
            .route("", web::get().to(orders::list_orders))
            .route("", web::post().to(orders::create_order))
            .route("/search", web::get().to(orders::search_orders))
            .route("/bulk-deliver", web::put().to(orders::bulk_deliver))
            .route("/status/{id}", web::put().to(orders::update_status))
            .route("/quantity/{id}", web::put().to(orders::update_quantity))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}", web::delete().to(orders::delete_order)),
    );
}
