// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sahayak - semantic ticket classification and triage for telecom support.
//!
//! This is the binary entry point: it wires config, the embedding model,
//! the classifier, and the ticket store together behind a small CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sahayak_classifier::{ClassifierSettings, ModelManager, OnnxEmbedder, TicketClassifier};
use sahayak_config::SahayakConfig;
use sahayak_core::SahayakError;
use sahayak_core::types::{GrievanceStatus, QueryStatus};
use sahayak_storage::{Database, RecordFilter};

/// Sahayak - semantic ticket classification and triage.
#[derive(Parser, Debug)]
#[command(name = "sahayak", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify one utterance; optionally persist it as a ticket.
    Classify {
        /// The customer utterance (text or speech transcript).
        text: String,
        /// User id for persistence (required with --save).
        #[arg(long)]
        user_id: Option<i64>,
        /// Phone number for persistence (required with --save).
        #[arg(long)]
        phone: Option<String>,
        /// Assistant response text to store alongside the query.
        #[arg(long, default_value = "")]
        response: String,
        /// Save the conversation and its query/grievance record.
        #[arg(long)]
        save: bool,
    },
    /// List query records, newest first.
    Queries {
        #[arg(long)]
        department: Option<String>,
        #[arg(long, value_parser = parse_query_status)]
        status: Option<QueryStatus>,
        /// Inclusive start date (YYYY-MM-DD or full ISO 8601).
        #[arg(long)]
        since: Option<String>,
        /// Inclusive end date (YYYY-MM-DD or full ISO 8601).
        #[arg(long)]
        until: Option<String>,
    },
    /// List grievances, newest first.
    Grievances {
        #[arg(long)]
        department: Option<String>,
        #[arg(long, value_parser = parse_grievance_status)]
        status: Option<GrievanceStatus>,
        #[arg(long)]
        since: Option<String>,
        #[arg(long)]
        until: Option<String>,
    },
    /// Aggregate ticket statistics by status and department.
    Stats {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        since: Option<String>,
        #[arg(long)]
        until: Option<String>,
    },
    /// Print the resolved configuration.
    Config,
}

fn parse_query_status(s: &str) -> Result<QueryStatus, String> {
    match s {
        "pending" => Ok(QueryStatus::Pending),
        "resolved" => Ok(QueryStatus::Resolved),
        other => Err(format!("unknown query status `{other}` (pending, resolved)")),
    }
}

fn parse_grievance_status(s: &str) -> Result<GrievanceStatus, String> {
    match s {
        "open" => Ok(GrievanceStatus::Open),
        "in_progress" => Ok(GrievanceStatus::InProgress),
        "resolved" => Ok(GrievanceStatus::Resolved),
        "closed" => Ok(GrievanceStatus::Closed),
        other => Err(format!(
            "unknown grievance status `{other}` (open, in_progress, resolved, closed)"
        )),
    }
}

/// Expand a bare date to the start of that day; pass datetimes through.
fn day_start(value: &str) -> String {
    match chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")),
        Err(_) => value.to_string(),
    }
}

/// Expand a bare date to the end of that day; pass datetimes through.
fn day_end(value: &str) -> String {
    match chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => format!("{}T23:59:59.999Z", date.format("%Y-%m-%d")),
        Err(_) => value.to_string(),
    }
}

fn record_filter(
    department: Option<String>,
    since: Option<String>,
    until: Option<String>,
) -> RecordFilter {
    RecordFilter {
        department,
        start_date: since.as_deref().map(day_start),
        end_date: until.as_deref().map(day_end),
    }
}

/// Resolve the directory holding model.onnx/tokenizer.json, downloading the
/// default model on first run when no explicit directory is configured.
async fn resolve_model_path(config: &SahayakConfig) -> Result<PathBuf, SahayakError> {
    if let Some(dir) = &config.classifier.model_dir {
        return Ok(PathBuf::from(dir).join("model.onnx"));
    }

    let data_dir = dirs::data_dir()
        .map(|d| d.join("sahayak"))
        .ok_or_else(|| SahayakError::Model("could not resolve a data directory".to_string()))?;
    let manager = ModelManager::new(data_dir, config.classifier.model_name.clone());
    manager.ensure_model().await
}

async fn build_classifier(config: &SahayakConfig) -> Result<Arc<TicketClassifier>, SahayakError> {
    let model_path = resolve_model_path(config).await?;
    let embedder = OnnxEmbedder::new(&model_path)?;
    let classifier = TicketClassifier::with_builtin_catalogs(
        Arc::new(embedder),
        ClassifierSettings::from(&config.classifier),
    )?;
    info!(model = %model_path.display(), "classifier ready");
    Ok(Arc::new(classifier))
}

async fn open_store(config: &SahayakConfig) -> Result<Database, SahayakError> {
    Database::open_with_options(&config.storage.database_path, config.storage.wal_mode).await
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), SahayakError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| SahayakError::Internal(format!("failed to render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

async fn run(cli: Cli, config: SahayakConfig) -> Result<(), SahayakError> {
    match cli.command {
        Commands::Classify {
            text,
            user_id,
            phone,
            response,
            save,
        } => {
            let classifier = build_classifier(&config).await?;

            // Embedding is CPU-bound; keep it off the async runtime threads.
            let worker = Arc::clone(&classifier);
            let query = text.clone();
            let classification = tokio::task::spawn_blocking(move || worker.classify(&query))
                .await
                .map_err(|e| SahayakError::Internal(format!("classification task failed: {e}")))??;

            print_json(&classification)?;

            if save {
                let user_id = user_id.ok_or_else(|| {
                    SahayakError::Config("--save requires --user-id".to_string())
                })?;
                let phone = phone.ok_or_else(|| {
                    SahayakError::Config("--save requires --phone".to_string())
                })?;

                let db = open_store(&config).await?;
                let conversation_id = sahayak_storage::save_conversation(
                    &db,
                    user_id,
                    &phone,
                    &text,
                    &response,
                    &classification,
                )
                .await?;
                let record = sahayak_storage::create_record(
                    &db,
                    conversation_id,
                    user_id,
                    &phone,
                    &classification,
                )
                .await?;
                db.close().await?;

                info!(conversation_id, record_id = record.id(), "ticket persisted");
                eprintln!(
                    "saved conversation {conversation_id}, {} record {}",
                    classification.category.as_str().to_lowercase(),
                    record.id()
                );
            }
        }
        Commands::Queries {
            department,
            status,
            since,
            until,
        } => {
            let db = open_store(&config).await?;
            let records = sahayak_storage::get_queries(
                &db,
                &record_filter(department, since, until),
                status,
            )
            .await?;
            print_json(&records)?;
        }
        Commands::Grievances {
            department,
            status,
            since,
            until,
        } => {
            let db = open_store(&config).await?;
            let records = sahayak_storage::get_grievances(
                &db,
                &record_filter(department, since, until),
                status,
            )
            .await?;
            print_json(&records)?;
        }
        Commands::Stats {
            department,
            since,
            until,
        } => {
            let db = open_store(&config).await?;
            let filter = record_filter(department, since, until);
            let queries = sahayak_storage::get_query_stats(&db, &filter).await?;
            let grievances = sahayak_storage::get_grievance_stats(&db, &filter).await?;
            let departments =
                sahayak_storage::get_grievance_department_counts(&db, &filter).await?;

            print_json(&serde_json::json!({
                "queries": queries,
                "grievances": grievances,
                "grievances_by_department": departments
                    .into_iter()
                    .map(|(department, count)| (department, serde_json::Value::from(count)))
                    .collect::<serde_json::Map<_, _>>(),
            }))?;
        }
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| SahayakError::Internal(format!("failed to render config: {e}")))?;
            print!("{rendered}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match sahayak_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            sahayak_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(cli, config).await {
        eprintln!("sahayak: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn status_parsers_accept_wire_strings() {
        assert_eq!(parse_query_status("pending").unwrap(), QueryStatus::Pending);
        assert_eq!(
            parse_grievance_status("in_progress").unwrap(),
            GrievanceStatus::InProgress
        );
        assert!(parse_query_status("open").is_err());
        assert!(parse_grievance_status("escalated").is_err());
    }

    #[test]
    fn bare_dates_expand_to_day_bounds() {
        assert_eq!(day_start("2026-08-07"), "2026-08-07T00:00:00.000Z");
        assert_eq!(day_end("2026-08-07"), "2026-08-07T23:59:59.999Z");

        // Full timestamps pass through untouched.
        assert_eq!(
            day_start("2026-08-07T12:30:00.000Z"),
            "2026-08-07T12:30:00.000Z"
        );
        assert_eq!(
            day_end("2026-08-07T12:30:00.000Z"),
            "2026-08-07T12:30:00.000Z"
        );
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = sahayak_config::load_and_validate_str("").expect("defaults should validate");
        assert_eq!(config.agent.name, "sahayak");
    }
}
