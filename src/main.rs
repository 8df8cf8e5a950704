use axum::middleware as axum_middleware;
use media_gateway::{
    config::config_manager::{ConfigManager, DEFAULT_CONFIG_PATH},
    logging, metrics, middleware, routes,
    state::app_state::AppState,
};
use mimalloc::MiMalloc;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config_manager = ConfigManager::new(&config_path)?;
    let config = config_manager.get_config();

    // 配置自定义的日志系统 (File + Console)
    let _guards = logging::init_logging(&config.log)?;
    tracing::info!(
        "Loaded configuration from {}, analysis service at {}",
        config_manager.config_path(),
        config.analysis.base_url
    );

    let app_state = Arc::new(AppState::from_config(config)?);

    let app = routes::create_router(app_state)
        .layer(axum_middleware::from_fn(
            metrics::middleware::metrics_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(
            middleware::access_log::access_log_middleware,
        )); // Access Log 最外层

    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
