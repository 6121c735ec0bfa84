use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wayfinder_core::create_navigation_graph;
use wayfinder_server::{AppState, Cli, ServerConfig, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::resolve(&cli)?;

    let source = config.data_source()?.clone();
    let graph = tokio::task::spawn_blocking(move || create_navigation_graph(&source)).await??;

    let address = (config.server.host.clone(), config.server.port);
    let app = create_router(AppState::new(graph, config.routing, config.server));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
