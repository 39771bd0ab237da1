use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::PathBuf;

use quarry_config::QuarryConfig;

use crate::output::OutputFormat;

pub async fn execute(
    config: &QuarryConfig,
    files: Vec<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let pipeline = super::build_pipeline(config)?;
    let report = pipeline.load_files(&files);
    pipeline.close();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for table in &report.loaded {
            println!(
                "{} {} ({} rows, {} columns) from {}",
                "loaded".green().bold(),
                table.table_name,
                table.row_count,
                table.columns.len(),
                table.file_path,
            );
        }
        for error in &report.errors {
            println!("{} {}", "failed".red().bold(), error);
        }
        println!(
            "{} loaded, {} failed",
            report.success_count(),
            report.error_count()
        );
    }

    // Per-file failures are reported in-band; only a batch with nothing
    // loaded at all exits nonzero.
    if report.loaded.is_empty() && !report.errors.is_empty() {
        return Err(anyhow!("no files could be loaded"));
    }
    Ok(())
}
