use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod classifier;
mod dataset;
mod keywords;
mod migration;
mod models;
mod normalizer;
mod report;
mod store;
mod taxonomy;

use models::ToolRecord;
use store::ToolStore;

#[derive(Parser)]
#[command(name = "aidex")]
#[command(about = "Classify, audit, and migrate AI tool catalog categories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single tool record
    Classify {
        /// Tool name
        #[arg(short, long)]
        name: Option<String>,

        /// Tool description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Stored legacy category label
        #[arg(short, long)]
        category: Option<String>,

        /// Record as a JSON object instead of flags
        #[arg(long)]
        json: Option<String>,

        /// Show the decision stage and per-category scores
        #[arg(long)]
        explain: bool,
    },

    /// Classify a whole corpus and report the category distribution
    Batch {
        /// Corpus file or directory (JSON, JSONL, YAML)
        input: PathBuf,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Include one row per record, not just the distribution
        #[arg(long)]
        records: bool,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plan (and optionally apply) re-categorization of the tools database
    Migrate {
        /// Tools database (default: the aidex data directory)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Execute the planned updates instead of dry-running
        #[arg(long)]
        apply: bool,

        /// Write the UPDATE statements to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (table, sql, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Before/after category distribution for a database or corpus
    Stats {
        /// Tools database to analyze
        #[arg(long)]
        db: Option<PathBuf>,

        /// Corpus file or directory to analyze instead of a database
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List the canonical category taxonomy
    Categories,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Classify {
            name,
            description,
            category,
            json,
            explain,
        } => {
            let record = match json {
                Some(raw) => {
                    serde_json::from_str(&raw).context("invalid record JSON passed to --json")?
                }
                None => {
                    let Some(name) = name else {
                        bail!("either --name or --json is required");
                    };
                    let mut record = ToolRecord::new(name, description);
                    record.category = category;
                    record
                }
            };

            let classification = classifier::classify(&record);
            report::print_classification(&record, &classification, explain);
            Ok(())
        }

        Commands::Batch {
            input,
            format,
            records,
            output,
        } => {
            info!("📦 Loading corpus from {}", input.display());
            let corpus = dataset::load(&input)
                .with_context(|| format!("failed to load corpus from {}", input.display()))?;
            info!("Classifying {} records", corpus.len());

            let results = classify_corpus(&corpus);
            let analysis = migration::analyze(&corpus);

            if records && format == "table" {
                report::print_records_table(&results);
            }
            report::print_analysis(&analysis, &format)?;

            if let Some(path) = output {
                let mut json = report::analysis_json(&analysis);
                if records {
                    json["records"] = results
                        .iter()
                        .map(|(record, c)| {
                            serde_json::json!({
                                "name": &record.name,
                                "stored": &record.category,
                                "resolved": c.category,
                                "stage": c.stage,
                            })
                        })
                        .collect();
                }
                fs::write(&path, serde_json::to_string_pretty(&json)?)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                info!("Report written to {}", path.display());
            }
            Ok(())
        }

        Commands::Migrate {
            db,
            apply,
            output,
            format,
        } => {
            let db_path = db.unwrap_or_else(store::default_db_path);
            info!("🗃️  Reading tools from {}", db_path.display());

            let mut tool_store = ToolStore::open(&db_path)?;
            let rows = tool_store.fetch_all()?;
            let plan = migration::plan(&rows);

            report::print_migration(&plan, &format)?;

            if let Some(path) = output {
                let mut sql = plan.sql_statements().join("\n");
                sql.push('\n');
                fs::write(&path, sql)
                    .with_context(|| format!("failed to write SQL to {}", path.display()))?;
                info!("SQL written to {}", path.display());
            }

            if apply && !plan.is_noop() {
                let changed = tool_store.apply(&plan.updates)?;
                println!("Updated {changed} rows.");
            } else if apply {
                println!("Nothing to apply.");
            }
            Ok(())
        }

        Commands::Stats { db, input, format } => {
            let rows = match (input, db) {
                (Some(_), Some(_)) => bail!("--input and --db are mutually exclusive"),
                (Some(path), None) => dataset::load(&path)
                    .with_context(|| format!("failed to load corpus from {}", path.display()))?,
                (None, db) => {
                    let db_path = db.unwrap_or_else(store::default_db_path);
                    ToolStore::open(&db_path)?.fetch_all()?
                }
            };

            info!("📊 Analyzing {} records", rows.len());
            report::print_analysis(&migration::analyze(&rows), &format)
        }

        Commands::Categories => {
            report::print_categories();
            Ok(())
        }
    }
}

/// Classify every record in parallel, with a progress bar on big corpora.
fn classify_corpus(corpus: &[ToolRecord]) -> Vec<(ToolRecord, classifier::Classification)> {
    use indicatif::ProgressBar;
    use rayon::prelude::*;

    let progress = if corpus.len() > 1000 {
        ProgressBar::new(corpus.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<_> = corpus
        .par_iter()
        .map(|record| {
            let classification = classifier::classify(record);
            progress.inc(1);
            (record.clone(), classification)
        })
        .collect();

    progress.finish_and_clear();
    results
}
