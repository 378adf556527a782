use log::{error, info};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let app_state = AppState::new(config.clone());

    let listen_addr = format!("{}:{}", config.interface, config.port);
    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {listen_addr}: {e}");
            std::process::exit(1);
        }
    };

    info!("Weather station listening on {listen_addr}");

    let routes = web::define_routes(app_state.clone());
    if let Err(e) = axum::serve(listener, routes)
        .with_graceful_shutdown(shutdown_signal(app_state))
        .await
    {
        error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Shutdown complete");
}

/// Completes when Ctrl+C arrives, after telling every open event stream to
/// close; long-lived connections would otherwise keep the server draining
/// indefinitely.
async fn shutdown_signal(app_state: AppState) {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("Received Ctrl+C, shutting down");
    app_state.begin_shutdown();
}
