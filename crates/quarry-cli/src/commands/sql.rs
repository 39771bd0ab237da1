use anyhow::Result;

use quarry_config::QuarryConfig;

use crate::output::{self, OutputFormat};

pub async fn execute(
    config: &QuarryConfig,
    statement: String,
    format: OutputFormat,
) -> Result<()> {
    let pipeline = super::build_pipeline(config)?;
    let candidate = pipeline.run_sql(&statement);
    pipeline.close();
    output::report_candidate(&candidate, format)
}
