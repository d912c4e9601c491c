//! Command execution for the WOD reducer CLI
//!
//! Wires argument parsing, logging setup, and the processing engine
//! together, and owns the process-level reporting.

use crate::cli::args::Args;
use crate::error::Result;
use crate::models::RunStats;
use crate::processor::ProfileProcessor;
use tracing::{debug, info};

/// Run the reduction workflow described by the parsed arguments
pub async fn run(args: Args) -> Result<RunStats> {
    setup_logging(&args);

    info!("Starting WOD profile reduction");
    debug!("Command line arguments: {:?}", args);

    let config = args.into_config()?;
    debug!("Run configuration: {:?}", config);

    let processor = ProfileProcessor::new(config);
    processor.process().await
}

/// Set up structured logging from the verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wod_reducer={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();
}
