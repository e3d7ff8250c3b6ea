//! # krx-ingestd
//!
//! Capture daemon: loads the symbol catalog, joins the configured multicast
//! groups, and archives every classified packet to per-day log files.
//!
//! ```bash
//! krx-ingestd config.json --log-level info
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use krx_core::config::AppConfig;
use krx_core::stats::IngestStats;
use krx_feed::{Bus, SymbolClassifier};

#[derive(Parser)]
#[command(name = "krx-ingestd", about = "KRX multicast capture daemon")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    krx_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref(), "krx-ingestd");

    info!("krx-ingestd starting — config={}", cli.config.display());

    let config: AppConfig = krx_core::config::load_config(&cli.config)?;
    info!("config loaded — {} multicast group(s)", config.ingest.groups.len());

    let classifier = Arc::new(SymbolClassifier::load(&config.catalog.database_url).await);
    let bus = Arc::new(Bus::new());
    let stats = Arc::new(IngestStats::new());

    let ingest_handles = krx_feed::ingestor::spawn_groups(
        config.ingest.groups,
        config.ingest.recv_timeout_secs,
        classifier,
        Arc::clone(&bus),
        Arc::clone(&stats),
    );
    let writer_handle = krx_feed::archiver::spawn(Arc::clone(&bus), config.archive);

    info!("ingestor and archiver started — press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    for handle in &ingest_handles {
        handle.abort();
    }
    drop(bus);

    if writer_handle.join().is_err() {
        tracing::error!("archiver writer thread panicked");
    }

    let snapshot = stats.snapshot();
    info!("final stats: accepted={:?} rejected_tr={} socket_errors={}", snapshot.accepted, snapshot.rejected_tr, snapshot.socket_errors);

    info!("krx-ingestd stopped — goodbye");
    Ok(())
}
