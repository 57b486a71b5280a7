use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::error;
use vigil_core::config::GateConfig;
use vigil_core::index::HttpSearchIndex;
use vigil_core::ports::SearchIndex;
use vigil_worker::indexer::Indexer;
use vigil_worker::skill;

#[derive(Parser)]
#[command(name = "vigil-worker")]
#[command(about = "Background indexing worker for the Vigil document pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index one stored artifact; this is the body of the storage-triggered
    /// function, invoked once per blob by the trigger runtime
    IndexBlob {
        /// Storage key of the artifact to index
        #[arg(long)]
        name: String,
    },
    /// Development substitute for the trigger runtime: poll the raw
    /// container and index keys not yet seen this process
    Watch {
        /// Seconds between container listings
        #[arg(long, default_value_t = 30)]
        interval_secs: u64,
    },
    /// Host the HTTP fingerprint skill used by the enrichment pipeline
    Serve {
        #[arg(long, default_value_t = 7071)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    vigil_core::observability::logging::init_logging("vigil-worker");

    match cli.command {
        Commands::IndexBlob { name } => {
            let indexer = build_indexer()?;
            let record = indexer.process_blob(&name).await?;
            println!("✅ Indexed {} as {}", name, record.id);
        }
        Commands::Watch { interval_secs } => {
            let indexer = build_indexer()?;
            println!("👁  Watching raw container every {}s", interval_secs);
            indexer.watch(Duration::from_secs(interval_secs)).await;
        }
        Commands::Serve { port } => {
            skill::serve(port).await?;
        }
    }

    Ok(())
}

fn build_indexer() -> anyhow::Result<Indexer> {
    let config = match GateConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration error, refusing to start");
            std::process::exit(1);
        }
    };
    let store = vigil_core::store::open_store(&config.storage, &config.raw_container);
    let search: Arc<dyn SearchIndex> = Arc::new(HttpSearchIndex::new(&config.search));
    Ok(Indexer::new(store, search))
}
