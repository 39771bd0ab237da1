use anyhow::Result;

use quarry_config::QuarryConfig;

use crate::output::{self, OutputFormat};

pub async fn execute(config: &QuarryConfig, format: OutputFormat) -> Result<()> {
    let pipeline = super::build_pipeline(config)?;
    let tables = pipeline.tables();
    pipeline.close();

    if tables.is_empty() && format == OutputFormat::Table {
        println!("No tables loaded");
        return Ok(());
    }
    output::emit(&output::render_tables(&tables, format)?, format);
    Ok(())
}
