use catalog_gateway::catalog::AppState;
use catalog_gateway::config::Config;
use catalog_gateway::router::create_app_router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_gateway=info,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Load configuration; the toolbox URL is mandatory.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "configuration error");
            std::process::exit(1);
        }
    };
    let port = config.port;

    // Initialize application state
    let state = Arc::new(AppState::new(config));
    tracing::info!(toolbox_url = state.toolbox.base_url(), "toolbox client ready");

    // Warm the manifest cache so misconfigured tools surface at startup.
    // The server still comes up if the toolbox is briefly unreachable.
    for &tool in catalog_gateway::toolbox::models::ALL_TOOLS {
        if let Err(err) = state.toolbox.load_tool(tool).await {
            tracing::warn!(tool, error = %err, "toolbox manifest preload failed");
        }
    }

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "catalog gateway listening");

    // Start the server
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "failed to bind listener");
            std::process::exit(1);
        }
    };
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }
}
