use anyhow::Result;

use quarry_config::QuarryConfig;

use crate::output::{self, OutputFormat};

pub async fn execute(
    config: &QuarryConfig,
    question: String,
    table: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let pipeline = super::build_pipeline(config)?;
    let candidate = pipeline.ask(&question, table.as_deref()).await;
    pipeline.close();
    output::report_candidate(&candidate?, format)
}
