use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kwrank_core::config;
use kwrank_core::SearchEngine;
use kwrank_server::api::create_router;
use kwrank_server::api::handlers::AppState;
use kwrank_server::api::metrics;
use kwrank_server::catalog::CatalogStore;

#[derive(Parser)]
#[command(name = "kwrank", about = "Keyword search and ranking engine")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Data directory holding the catalog snapshot
    #[arg(short, long, default_value = config::DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Catalog snapshot file name inside the data directory
    #[arg(long, default_value = config::DEFAULT_CATALOG_FILE)]
    catalog_file: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    "kwrank_server=info"
                        .parse()
                        .expect("valid directive literal"),
                )
                .add_directive(
                    "kwrank_core=info"
                        .parse()
                        .expect("valid directive literal"),
                ),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    let data_path = std::path::Path::new(&args.data_dir);
    if data_path.exists() && !data_path.is_dir() {
        eprintln!(
            "Error: data_dir '{}' exists but is not a directory",
            args.data_dir
        );
        std::process::exit(1);
    }

    let catalog = Arc::new(CatalogStore::open(data_path.join(&args.catalog_file))?);

    // Build the relevance index before binding, so the first request never
    // sees a partial index.
    let engine = SearchEngine::with_catalog(&catalog.products());

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    let state = AppState {
        engine: engine.clone(),
        catalog: catalog.clone(),
        prometheus_handle,
        start_time: Instant::now(),
    };

    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", args.port);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        data_dir = %args.data_dir,
        products = catalog.len(),
        indexed_keywords = engine.indexed_keywords(),
        "kwrank ready"
    );

    // Spawn engine metrics background task
    let metrics_engine = engine.clone();
    let metrics_catalog = catalog.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(config::GAUGE_REFRESH_INTERVAL_SECS));
        loop {
            interval.tick().await;
            metrics::update_engine_metrics(&metrics_engine, &metrics_catalog);
        }
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    tracing::info!("All requests drained, shutdown complete");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
