use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

use quarry_config::QuarryConfig;
use quarry_pipeline::{FeedbackEntry, FeedbackKind, FeedbackLog};

use crate::cli::FeedbackCommands;
use crate::output::{self, OutputFormat};

pub fn execute(
    config: &QuarryConfig,
    command: FeedbackCommands,
    format: OutputFormat,
) -> Result<()> {
    let log = FeedbackLog::new(&config.feedback.path);
    match command {
        FeedbackCommands::Add {
            question,
            sql,
            negative,
            comment,
        } => {
            let kind = if negative {
                FeedbackKind::Negative
            } else {
                FeedbackKind::Positive
            };
            let entry = FeedbackEntry::new(question, sql, kind, comment);
            log.record(&entry)?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                println!(
                    "{} {} feedback recorded",
                    "ok".green().bold(),
                    kind_label(entry.kind)
                );
            }
        }
        FeedbackCommands::Stats => {
            let stats = log.stats()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(Vec::new());
                    writer.serialize(&stats)?;
                    output::emit(&output::into_csv_string(writer)?, format);
                }
                OutputFormat::Table => {
                    let mut table = Table::new();
                    table.set_header(vec!["Metric", "Value"]);
                    table.add_row(vec![
                        "Total".to_string(),
                        stats.total_feedback.to_string(),
                    ]);
                    table.add_row(vec![
                        "Positive".to_string(),
                        format!(
                            "{} ({:.0}%)",
                            stats.positive_count,
                            stats.positive_ratio * 100.0
                        ),
                    ]);
                    table.add_row(vec![
                        "Negative".to_string(),
                        format!(
                            "{} ({:.0}%)",
                            stats.negative_count,
                            stats.negative_ratio * 100.0
                        ),
                    ]);
                    println!("{table}");
                }
            }
        }
        FeedbackCommands::Recent { limit } => {
            let entries = log.recent(limit)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(Vec::new());
                    for entry in &entries {
                        writer.serialize(entry)?;
                    }
                    output::emit(&output::into_csv_string(writer)?, format);
                }
                OutputFormat::Table => {
                    if entries.is_empty() {
                        println!("No feedback recorded");
                        return Ok(());
                    }
                    let mut table = Table::new();
                    table.set_header(vec!["When", "Kind", "Question", "SQL", "Comment"]);
                    for entry in &entries {
                        table.add_row(vec![
                            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                            kind_cell(entry.kind),
                            Cell::new(&entry.question),
                            Cell::new(&entry.sql),
                            Cell::new(entry.comment.as_deref().unwrap_or("")),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
    }
    Ok(())
}

fn kind_label(kind: FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Positive => "positive",
        FeedbackKind::Negative => "negative",
    }
}

fn kind_cell(kind: FeedbackKind) -> Cell {
    match kind {
        FeedbackKind::Positive => Cell::new("positive").fg(Color::Green),
        FeedbackKind::Negative => Cell::new("negative").fg(Color::Red),
    }
}
