// main.rs only boots the gate context, router, and server

mod handlers;
mod router;
mod state;
mod templates;

use std::env;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};
use vigil_core::config::GateConfig;
use vigil_core::gate::{DuplicateOracle, SubmissionGate};
use vigil_core::index::HttpSearchIndex;
use vigil_core::ports::SearchIndex;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    vigil_core::observability::logging::init_logging("vigil-web");

    // Configuration errors are fatal before any submission is accepted
    let config = match GateConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration error, refusing to start");
            std::process::exit(1);
        }
    };

    let store = vigil_core::store::open_store(&config.storage, &config.raw_container);
    let search: Arc<dyn SearchIndex> = Arc::new(HttpSearchIndex::new(&config.search));
    let gate = Arc::new(SubmissionGate::new(DuplicateOracle::new(search), store));

    let metrics = PrometheusBuilder::new().install_recorder()?;

    let app = router::app_router(AppState { gate, metrics });

    let port: u16 = env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(3000);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!(addr = %bind_addr, "vigil web surface started");
    println!("Vigil web surface listening on {} (visit http://127.0.0.1:{})", bind_addr, port);
    axum::serve(listener, app).await?;
    Ok(())
}
