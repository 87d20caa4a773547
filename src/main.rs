use dotenvy::dotenv;
use order_management::{build_server, create_pool, order_service, run_migrations, AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;

    let pool = create_pool(&config.db).map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e)
    })?;
    run_migrations(&pool).map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e)
    })?;

    log::info!(
        "Starting server at http://{}:{}",
        config.server.host,
        config.server.port
    );

    build_server(order_service(pool), &config.server)?.await
}
