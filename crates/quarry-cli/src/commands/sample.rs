use anyhow::{anyhow, Result};
use colored::Colorize;

use quarry_config::QuarryConfig;
use quarry_core::ExecutionOutcome;

use crate::output::{self, OutputFormat};

pub async fn execute(
    config: &QuarryConfig,
    table: String,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let pipeline = super::build_pipeline(config)?;
    let outcome = pipeline.sample(&table, limit);
    pipeline.close();

    match outcome {
        ExecutionOutcome::Success(result) => {
            output::emit(&output::render_result(&result, format)?, format);
            if format == OutputFormat::Table {
                println!("{}", format!("{} rows", result.row_count()).dimmed());
            }
            Ok(())
        }
        ExecutionOutcome::Failure(message) => Err(anyhow!("{message}")),
    }
}
