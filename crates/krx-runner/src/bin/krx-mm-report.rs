//! # krx-mm-report
//!
//! Batch CLI: runs the MM Analyzer over one day's archived call/put option
//! logs and prints the 72-row presence report.
//!
//! ```bash
//! krx-mm-report config.json --log-level info
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use krx_core::config::AnalysisConfig;
use krx_analysis::{duty, input, master};

#[derive(Parser)]
#[command(name = "krx-mm-report", about = "KRX market-maker presence batch report")]
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

fn main() -> Result<()> {
    let cli = Cli::parse();

    krx_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref(), "krx-mm-report");

    info!("krx-mm-report starting — config={}", cli.config.display());

    let config: AnalysisConfig = krx_core::config::load_config(&cli.config)?;

    let duty_requirements = duty::load(&config.duty_file)?;
    let options_master = master::load(&config.master_file)?;
    info!("loaded {} product(s) and {} master entries", duty_requirements.stock_options_duty.len(), options_master.len());

    let target_isins: HashSet<String> = options_master.keys().cloned().collect();

    let mut snapshots_by_isin = input::load_snapshots(&config.call_log, &target_isins)?;
    let put_snapshots = input::load_snapshots(&config.put_log, &target_isins)?;
    snapshots_by_isin.extend(put_snapshots);

    let report = krx_analysis::build_report(&duty_requirements, &options_master, &snapshots_by_isin);
    let rendered = report.render();

    print!("{rendered}");

    if let Some(output_file) = &config.output_file {
        std::fs::write(output_file, &rendered)?;
        info!("report written to {}", output_file.display());
    }

    Ok(())
}
