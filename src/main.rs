//! SOS Beacon - A state-managed HTTP server for emergency alert sequencing
//!
//! This is the main entry point for the sos-beacon application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use sos_beacon::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::notification_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("sos_beacon={},tower_http=info", config.log_level()))
        .init();

    info!("Starting sos-beacon server v1.0.0");
    info!("Configuration: host={}, port={}, countdown={}s, confirm_delay={}s",
          config.host, config.port, config.countdown, config.confirm_delay);

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.countdown,
        config.confirm_delay,
    ));

    // Start the notification relay task
    let notifier_state = Arc::clone(&state);
    tokio::spawn(async move {
        notification_task(notifier_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /activate        - Arm the emergency countdown");
    info!("  POST /cancel          - Cancel an in-flight countdown");
    info!("  POST /action/:action  - Dispatch call/locate/photo");
    info!("  GET  /status          - Check phase and countdown");
    info!("  GET  /contacts        - Emergency contact table");
    info!("  GET  /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
