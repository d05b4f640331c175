// CLI rendering for classification, stats, and migration output

use crate::classifier::{Classification, Stage};
use crate::keywords::KEYWORD_TABLE;
use crate::migration::{CorpusAnalysis, MigrationPlan};
use crate::models::ToolRecord;
use crate::taxonomy::{icon_for_label, Category};
use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

fn stage_name(stage: Stage) -> &'static str {
    match stage {
        Stage::LegacyExact => "legacy label (exact)",
        Stage::LegacyFuzzy => "legacy label (fuzzy)",
        Stage::KeywordInference => "keyword inference",
        Stage::Fallback => "fallback",
    }
}

/// Print the result for a single record, optionally with the full
/// decision trail.
pub fn print_classification(record: &ToolRecord, classification: &Classification, explain: bool) {
    let category = classification.category;
    println!(
        "{} {} → {}",
        category.icon(),
        record.name,
        category.label().bold()
    );

    if !explain {
        return;
    }

    println!("  decided by: {}", stage_name(classification.stage));
    if let Some(key) = classification.matched_label {
        println!("  matched table entry: {:?}", key);
    }

    if !classification.scores.is_empty() {
        let mut hits: Vec<(Category, u32)> = classification
            .scores
            .iter()
            .filter(|(_, s)| *s > 0)
            .copied()
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1));

        if hits.is_empty() {
            println!("  no keyword hits");
        } else {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Category", "Score"]);
            for (category, score) in &hits {
                table.add_row(vec![category.label().to_string(), score.to_string()]);
            }
            println!("{table}");
        }
    }
}

/// Per-record results for `batch --records`.
pub fn print_records_table(results: &[(ToolRecord, Classification)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Tool", "Stored", "Resolved", "Stage"]);

    for (record, classification) in results {
        table.add_row(vec![
            record.name.clone(),
            record.category.clone().unwrap_or_else(|| "—".to_string()),
            format!(
                "{} {}",
                classification.category.icon(),
                classification.category.label()
            ),
            stage_name(classification.stage).to_string(),
        ]);
    }

    println!("{table}");
}

pub fn analysis_json(analysis: &CorpusAnalysis) -> serde_json::Value {
    let distribution = |d: &crate::models::Distribution| -> Vec<serde_json::Value> {
        d.entries()
            .iter()
            .map(|(category, count)| {
                serde_json::json!({
                    "category": category.label(),
                    "count": count,
                })
            })
            .collect()
    };

    serde_json::json!({
        "total": analysis.coverage.total,
        "before": distribution(&analysis.before),
        "after": distribution(&analysis.after),
        "coverage": analysis.coverage,
    })
}

/// Render the before/after distribution in the requested format.
pub fn print_analysis(analysis: &CorpusAnalysis, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&analysis_json(analysis))?);
        }
        "csv" => {
            println!("Category,Before,After,AfterPct");
            for (category, after) in analysis.after.entries() {
                println!(
                    "{},{},{},{:.1}",
                    category.label(),
                    analysis.before.count(category),
                    after,
                    analysis.after.percentage(category)
                );
            }
        }
        _ => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Category", "Before", "After", "Share"]);

            for (category, after) in analysis.after.entries() {
                table.add_row(vec![
                    format!("{} {}", category.icon(), category.label()),
                    analysis.before.count(category).to_string(),
                    after.to_string(),
                    format!("{:.1}%", analysis.after.percentage(category)),
                ]);
            }
            println!("{table}");

            let coverage = &analysis.coverage;
            println!(
                "\n{} {} records: {} legacy-exact, {} legacy-fuzzy, {} keyword-inferred, {} fallback",
                "Coverage:".bold(),
                coverage.total,
                coverage.legacy_exact,
                coverage.legacy_fuzzy,
                coverage.keyword_inferred,
                coverage.fallback
            );
        }
    }
    Ok(())
}

pub fn migration_json(plan: &MigrationPlan) -> serde_json::Value {
    serde_json::json!({
        "generated_at": plan.generated_at.to_rfc3339(),
        "total": plan.analysis.coverage.total,
        "updates": &plan.updates,
        "skipped_without_id": plan.skipped_without_id,
        "statements": plan.sql_statements(),
    })
}

/// Summarize a migration plan: affected rows plus the SQL itself.
pub fn print_migration(plan: &MigrationPlan, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&migration_json(plan))?);
        }
        "sql" => {
            for statement in plan.sql_statements() {
                println!("{statement}");
            }
        }
        _ => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Id", "Tool", "Stored", "Resolved"]);
            for update in &plan.updates {
                table.add_row(vec![
                    update.id.to_string(),
                    update.name.clone(),
                    update
                        .stored
                        .clone()
                        .map(|s| format!("{} {}", icon_for_label(&s), s))
                        .unwrap_or_else(|| "—".to_string()),
                    format!("{} {}", update.resolved.icon(), update.resolved.label()),
                ]);
            }
            println!("{table}");

            if plan.is_noop() {
                println!("{}", "Catalog is already fully migrated.".green());
            } else {
                println!(
                    "{} {} of {} rows would change ({} unaddressable without id)",
                    "Plan:".bold(),
                    plan.updates.len(),
                    plan.analysis.coverage.total,
                    plan.skipped_without_id
                );
            }
        }
    }
    Ok(())
}

/// `categories` command: the taxonomy as consumers see it.
pub fn print_categories() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["", "Category", "Slug", "Keywords"]);

    for category in Category::ALL {
        let keyword_count = KEYWORD_TABLE
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, keywords)| keywords.len())
            .unwrap_or(0);
        table.add_row(vec![
            category.icon().to_string(),
            category.label().to_string(),
            category.slug().to_string(),
            if keyword_count > 0 {
                keyword_count.to_string()
            } else {
                "—".to_string()
            },
        ]);
    }

    println!("{table}");
}
