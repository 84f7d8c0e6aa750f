use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::cache::CacheConfig;
use transit_server::config::ServerConfig;
use transit_server::knowledge::{KnowledgeBase, NetworkFile, default_network};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Seed base facts from a file if one is configured
    let kb: KnowledgeBase = match &config.network_file {
        Some(path) => match NetworkFile::load(path).and_then(NetworkFile::into_knowledge_base) {
            Ok(kb) => kb,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => default_network(),
    };

    let state = AppState::new(kb, config.planner.clone(), &CacheConfig::default());
    {
        let kb = state.kb.read().await;
        info!(
            stations = kb.stations().len(),
            edges = kb.len(),
            transfer_walk_time = config.planner.transfer_walk_time,
            mode_switch_penalty = config.planner.mode_switch_penalty,
            "knowledge base ready"
        );
    }

    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Transit Route Planner listening on http://{}", config.addr);
    info!("  GET  /health       - Health check");
    info!("  GET  /api/stations - Registered stations");
    info!("  POST /api/edges    - Add a route");
    info!("  GET  /api/route    - Best route (from, to, metric)");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
