//! sqlonce CLI
//!
//! Command-line tool for running SQL scripts idempotently.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use sqlonce::prelude::*;
use sqlonce::report::preview;

/// Apply SQL scripts so that re-running them is safe.
#[derive(Parser)]
#[command(name = "sqlonce")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script against a database.
    Apply {
        /// SQL script to execute.
        file: PathBuf,

        /// Decide and report without executing anything.
        #[arg(long)]
        dry_run: bool,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        connection: ConnectionConfig,
    },

    /// Split and classify scripts without connecting to a database.
    Validate {
        /// SQL scripts to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Apply {
            file,
            dry_run,
            json,
            connection,
        } => apply(&file, dry_run, json, &connection).await,
        Commands::Validate { files } => Ok(validate(&files)),
    }
}

async fn apply(
    file: &Path,
    dry_run: bool,
    json: bool,
    connection: &ConnectionConfig,
) -> anyhow::Result<ExitCode> {
    let script = std::fs::read_to_string(file)
        .with_context(|| format!("SQL file '{}' could not be read", file.display()))?;

    let mut gateway = connection
        .connect()
        .await
        .context("Failed to connect to database")?;
    info!(target_db = %connection.describe(), "Connected");

    if dry_run {
        info!(file = %file.display(), "Dry run mode - decisions will be reported but not executed.");
    }

    let report = execute_script(&mut gateway, &script, dry_run).await;

    if let Err(error) = gateway.close().await {
        tracing::warn!(error = %error, "Failed to close connection");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(file, &report);
    }

    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(file: &Path, report: &RunReport) {
    let mode = if report.dry_run { "Previewing" } else { "Executed" };
    println!("\n{mode} {}", file.display());
    println!("{:-<60}", "");

    for entry in &report.entries {
        let decision = entry
            .decision
            .map_or_else(|| "-".to_string(), |decision| decision.to_string());
        println!(
            " {:>3}. [{}] {:<7} {}",
            entry.index,
            entry.kind,
            decision,
            entry.preview()
        );
        for action in &entry.actions {
            println!("        -> {}", preview(action, 100));
        }
        match entry.outcome {
            Outcome::Failed { .. } | Outcome::NotAttempted => {
                println!("        {}", entry.outcome);
            }
            _ => {}
        }
    }

    println!("{:-<60}", "");
    println!("{}", report.counts());
    if report.aborted {
        println!("Run aborted: connection lost.");
    }
    if report.success() {
        println!("SQL file executed successfully");
    } else {
        println!("SQL file execution failed");
    }
}

fn validate(files: &[PathBuf]) -> ExitCode {
    let mut readable = 0;
    for file in files {
        println!("\n=== Validating {} ===", file.display());
        let script = match std::fs::read_to_string(file) {
            Ok(script) => script,
            Err(error) => {
                println!("Cannot read {}: {error}", file.display());
                continue;
            }
        };
        readable += 1;

        let statements = split(&script);
        println!("Parsed {} statements:", statements.len());
        for (offset, raw) in statements.iter().enumerate() {
            let (statement, ambiguity) = classify_with_diagnostic(raw);
            println!(
                "  {:2}. [{}] {}",
                offset + 1,
                statement.kind(),
                preview(raw.text(), 80)
            );
            match &statement {
                ClassifiedStatement::CreateTable { table_name, .. } => {
                    println!("      table: {table_name}");
                }
                ClassifiedStatement::AddColumn {
                    table_name,
                    column_name,
                    column_definition,
                    ..
                } => {
                    println!(
                        "      column: {table_name}.{column_name} ({})",
                        preview(column_definition, 50)
                    );
                }
                ClassifiedStatement::CreateIndex {
                    table_name,
                    index_name,
                    column_names,
                    ..
                } => {
                    println!(
                        "      index: {index_name} on {table_name}({})",
                        column_names.join(", ")
                    );
                }
                ClassifiedStatement::Other { .. } => {}
            }
            if let Some(ambiguity) = ambiguity {
                println!("      warning: {ambiguity}; will run verbatim");
            }
        }
    }

    println!("\nValidated {readable}/{} files", files.len());
    if readable == files.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
