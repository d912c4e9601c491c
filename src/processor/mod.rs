//! Profile reduction engine.
//!
//! Orchestrates the complete run: discover cast files, reduce each file
//! on a blocking worker with bounded concurrency, merge the per-file
//! tables, deduplicate once over the merged set, and write the two
//! output tables.

pub mod discovery;
pub mod reduce_file;
pub mod writer;

use self::writer::TableWriter;

use crate::config::RunConfig;
use crate::error::Result;
use crate::models::{ReducedTables, RunStats};
use crate::reduction::sort_and_remove_neighbors;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tokio::task;
use tracing::error;

/// Main processor for a WOD reduction run
#[derive(Debug)]
pub struct ProfileProcessor {
    config: Arc<RunConfig>,
}

impl ProfileProcessor {
    /// Create a processor for a validated run configuration
    pub fn new(config: RunConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<RunStats> {
        let start_time = Instant::now();
        println!("{}", "Reducing WOD profile casts".bright_green().bold());
        println!(
            "  {} {}",
            "Data:".bright_cyan(),
            self.config.data_dir.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.config.out_dir.display()
        );

        // Step 1: Discover cast files
        let cast_files = discovery::discover_cast_files(&self.config.data_dir)?;
        println!(
            "  {} {} cast files",
            "Found".bright_green(),
            cast_files.len().to_string().bright_white().bold()
        );

        let mut stats = RunStats::default();

        // Step 2: Reduce files concurrently; each file is independent
        // until the final deduplication pass.
        let progress = create_progress_bar(cast_files.len() as u64, "Reducing casts");
        let results = stream::iter(cast_files)
            .map(|path| {
                let config = self.config.clone();
                let progress = progress.clone();
                async move {
                    let worker_path = path.clone();
                    let joined = task::spawn_blocking(move || {
                        reduce_file::reduce_file(&worker_path, &config)
                    })
                    .await;
                    progress.inc(1);
                    (path, joined)
                }
            })
            .buffer_unordered(self.config.max_concurrent_files)
            .collect::<Vec<_>>()
            .await;
        progress.finish_with_message("Reduction complete");

        let mut merged = ReducedTables::default();
        for (path, joined) in results {
            match joined {
                Ok(Ok((tables, file_stats))) => {
                    merged.merge(tables);
                    stats.absorb(&file_stats);
                    stats.files_processed += 1;
                }
                Ok(Err(e)) => {
                    error!("failed to reduce {}: {}", path.display(), e);
                    stats.files_failed += 1;
                }
                Err(e) => {
                    error!("worker for {} did not complete: {}", path.display(), e);
                    stats.files_failed += 1;
                }
            }
        }

        // Step 3: One global deduplication pass per table. Correctness of
        // the near-duplicate collapse depends on operating over the
        // complete merged set, so this runs only after every file is in.
        let merged_rows = merged.temperature.len() + merged.salinity.len();
        let temperature_rows = sort_and_remove_neighbors(merged.temperature);
        let salinity_rows = sort_and_remove_neighbors(merged.salinity);
        stats.temperature_rows = temperature_rows.len();
        stats.salinity_rows = salinity_rows.len();
        stats.duplicates_removed =
            merged_rows - stats.temperature_rows - stats.salinity_rows;

        // Step 4: Write both output tables
        fs::create_dir_all(&self.config.out_dir).await?;
        let table_writer = TableWriter::new(self.config.clone());
        let temperature_path =
            table_writer.write_table(&temperature_rows, &self.config.temperature_table_name())?;
        let salinity_path =
            table_writer.write_table(&salinity_rows, &self.config.salinity_table_name())?;

        stats.processing_time_ms = start_time.elapsed().as_millis();

        println!("\n{}", "Reduction Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {} processed, {} matched {}-{}",
            "Casts:".bright_cyan(),
            stats.casts_scanned.to_string().bright_white(),
            stats.casts_matched.to_string().bright_white(),
            self.config.year,
            self.config.month
        );
        println!(
            "  {} {} skipped (no data {}, out of range {}, degenerate {})",
            "Skips:".bright_cyan(),
            (stats.casts_no_data + stats.casts_out_of_range + stats.casts_degenerate)
                .to_string()
                .bright_white(),
            stats.casts_no_data,
            stats.casts_out_of_range,
            stats.casts_degenerate
        );
        if stats.files_failed > 0 {
            println!(
                "  {} {}",
                "Files failed:".bright_red(),
                stats.files_failed.to_string().bright_red().bold()
            );
        }
        if stats.reduction_failures > 0 {
            println!(
                "  {} {}",
                "Reduction failures:".bright_red(),
                stats.reduction_failures.to_string().bright_red().bold()
            );
        }
        println!(
            "  {} {} rows -> {}",
            "Temperature:".bright_cyan(),
            stats.temperature_rows.to_string().bright_white().bold(),
            temperature_path.display()
        );
        println!(
            "  {} {} rows -> {}",
            "Salinity:".bright_cyan(),
            stats.salinity_rows.to_string().bright_white().bold(),
            salinity_path.display()
        );

        Ok(stats)
    }
}

/// Create a progress bar with the standard styling
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
