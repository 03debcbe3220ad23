//! Output formatters for session results

use anyhow::Result;
use colored::*;
use weekly_core::{Report, Session, Status, WeeklyConfig};

use crate::OutputFormat;

/// Print the outcome of a file load
pub fn print_load(session: &Session, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            print_status(session.status());
            if let Some(data) = session.data() {
                if !data.is_empty() {
                    println!();
                    println!("{}", "Sheets:".bold().underline());
                    for (name, rows) in data.iter() {
                        println!(
                            "  {} {}",
                            name.cyan().bold(),
                            format!("({} rows)", rows.len()).bright_black()
                        );
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": session.status(),
                "message": session.status().to_string(),
                "data": session.data(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Print the outcome of a connect attempt
pub fn print_run(session: &Session, report: Option<&Report>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if let Some(report) = report {
                println!(
                    "{} {} {}",
                    "Server:".bold(),
                    report.target.label.cyan().bold(),
                    format!("({})", report.target.target).bright_black()
                );
                for sheet in &report.sheets {
                    println!(
                        "  {} {} rows, {} handled",
                        sheet.name.cyan(),
                        sheet.rows,
                        sheet.handled
                    );
                }
                for name in &report.unrecognized {
                    println!("  {} {}", "Skipped:".yellow().bold(), name);
                }
                println!();
            }
            print_status(session.status());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": session.status(),
                "message": session.status().to_string(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Print the configured servers, marking the default selection
pub fn print_servers(config: &WeeklyConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            let default = config.default_server();
            for server in &config.servers {
                let marker = if Some(server.label.as_str()) == default { "*" } else { " " };
                println!(
                    "{} {} {}",
                    marker.green().bold(),
                    server.label.bold(),
                    server.target.bright_black()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config.servers)?);
        }
    }
    Ok(())
}

fn print_status(status: &Status) {
    let text = status.to_string();
    if status.is_error() {
        println!("{}", text.red().bold());
    } else if matches!(status, Status::Completed { .. }) {
        println!("{}", text.green().bold());
    } else {
        println!("{}", text);
    }
}
