use anyhow::Result;
use clap::Parser;

use quarry_cli::{
    cli::{Cli, Commands},
    commands,
};
use quarry_config::QuarryConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table/json/csv output on stdout stays pipeable.
    let level = cli.effective_log_level();
    let env_filter = format!(
        "quarry_cli={level},quarry_pipeline={level},quarry_duckdb={level},quarry_llm={level},quarry_config={level}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    let config = QuarryConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Load { files } => commands::load::execute(&config, files, cli.format).await,
        Commands::Tables => commands::tables::execute(&config, cli.format).await,
        Commands::Ask { question, table } => {
            commands::ask::execute(&config, question, table, cli.format).await
        }
        Commands::Sql { statement } => commands::sql::execute(&config, statement, cli.format).await,
        Commands::Sample { table, limit } => {
            commands::sample::execute(&config, table, limit, cli.format).await
        }
        Commands::Feedback { command } => commands::feedback::execute(&config, command, cli.format),
    }
}
