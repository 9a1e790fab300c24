use tracing::info;
use tracing_subscriber::EnvFilter;

use carpool_server::config::ServerConfig;
use carpool_server::graph::{GraphSnapshot, RoadGraph};
use carpool_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    info!(path = %config.graph_path.display(), "loading road network");
    let snapshot = GraphSnapshot::load(&config.graph_path)?;
    let graph = RoadGraph::from_snapshot(snapshot)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "road network loaded"
    );

    let state = AppState::new(
        graph,
        config.match_config.clone(),
        config.default_office,
        config.match_timeout,
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "carpool matcher listening");
    info!("  GET  /health  - Health check");
    info!("  POST /match   - Match drivers with a companion");

    axum::serve(listener, app).await?;
    Ok(())
}
