// Catalog re-categorization analysis
//
// Resolves every stored row against the unified classifier, aggregates
// before/after category distributions, and plans UPDATE statements for the
// rows whose stored category disagrees with the resolved one. Planning is
// pure: running it twice over the same rows yields the same plan, and a
// plan over already-migrated rows is empty.

use crate::classifier::{self, Stage};
use crate::models::{Distribution, ToolRecord};
use crate::normalizer;
use crate::taxonomy::Category;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

/// How records were decided across the pipeline stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageStats {
    pub total: usize,
    pub legacy_exact: usize,
    pub legacy_fuzzy: usize,
    pub keyword_inferred: usize,
    pub fallback: usize,
}

impl CoverageStats {
    fn record(&mut self, stage: Stage) {
        self.total += 1;
        match stage {
            Stage::LegacyExact => self.legacy_exact += 1,
            Stage::LegacyFuzzy => self.legacy_fuzzy += 1,
            Stage::KeywordInference => self.keyword_inferred += 1,
            Stage::Fallback => self.fallback += 1,
        }
    }
}

/// Before/after view of a corpus.
///
/// "Before" is what plain normalization of the stored labels gives;
/// "after" is the full resolution including keyword inference.
#[derive(Debug, Clone, Default)]
pub struct CorpusAnalysis {
    pub before: Distribution,
    pub after: Distribution,
    pub coverage: CoverageStats,
}

/// One row the migration would rewrite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedUpdate {
    pub id: i64,
    pub name: String,
    pub stored: Option<String>,
    pub resolved: Category,
}

#[derive(Debug, Clone)]
pub struct MigrationPlan {
    pub generated_at: DateTime<Utc>,
    pub analysis: CorpusAnalysis,
    /// Rows that need rewriting, ordered by id.
    pub updates: Vec<PlannedUpdate>,
    /// Rows that could not be planned because they carry no id.
    pub skipped_without_id: usize,
}

impl MigrationPlan {
    pub fn is_noop(&self) -> bool {
        self.updates.is_empty()
    }

    /// The SQL the dry-run prints and `--apply` executes.
    ///
    /// Statement order follows row id, so two plans over the same rows are
    /// byte-identical and safe to diff.
    pub fn sql_statements(&self) -> Vec<String> {
        self.updates
            .iter()
            .map(|u| {
                format!(
                    "UPDATE tools SET category = '{}' WHERE id = {};",
                    sql_quote(u.resolved.label()),
                    u.id
                )
            })
            .collect()
    }
}

/// Aggregate distributions and stage coverage without planning updates.
pub fn analyze(records: &[ToolRecord]) -> CorpusAnalysis {
    let rows: Vec<(Category, Category, Stage)> = records
        .par_iter()
        .map(|record| {
            let before = normalizer::normalize(record.category.as_deref());
            let classification = classifier::classify(record);
            (before, classification.category, classification.stage)
        })
        .collect();

    let mut analysis = CorpusAnalysis::default();
    for (before, after, stage) in rows {
        analysis.before.record(before);
        analysis.after.record(after);
        analysis.coverage.record(stage);
    }
    analysis
}

/// Build a full migration plan over the given rows.
pub fn plan(records: &[ToolRecord]) -> MigrationPlan {
    info!("Planning migration over {} records", records.len());

    let resolved: Vec<(Option<PlannedUpdate>, bool, Category, Category, Stage)> = records
        .par_iter()
        .map(|record| {
            let before = normalizer::normalize(record.category.as_deref());
            let classification = classifier::classify(record);
            let diverges = !stored_matches(record.category.as_deref(), classification.category);
            let update = match record.id {
                Some(id) if diverges => Some(PlannedUpdate {
                    id,
                    name: record.name.clone(),
                    stored: record.category.clone(),
                    resolved: classification.category,
                }),
                _ => None,
            };
            // A divergent row without an id cannot be addressed by an
            // UPDATE; surface it instead of silently dropping it.
            let unaddressable = record.id.is_none() && diverges;
            (
                update,
                unaddressable,
                before,
                classification.category,
                classification.stage,
            )
        })
        .collect();

    let mut analysis = CorpusAnalysis::default();
    let mut updates = Vec::new();
    let mut skipped_without_id = 0;

    for (update, unaddressable, before, after, stage) in resolved {
        analysis.before.record(before);
        analysis.after.record(after);
        analysis.coverage.record(stage);
        if let Some(u) = update {
            updates.push(u);
        }
        if unaddressable {
            skipped_without_id += 1;
        }
    }

    updates.sort_by_key(|u| u.id);

    MigrationPlan {
        generated_at: Utc::now(),
        analysis,
        updates,
        skipped_without_id,
    }
}

/// A row is already migrated when its stored label is exactly the canonical
/// one (modulo surrounding whitespace).
fn stored_matches(stored: Option<&str>, resolved: Category) -> bool {
    stored.map(str::trim) == Some(resolved.label())
}

/// Double any single quotes for embedding in a SQL string literal.
fn sql_quote(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<ToolRecord> {
        vec![
            ToolRecord::new("ChatGPT Writer", "AI writing assistant for emails")
                .with_category("AI Writing")
                .with_id(1),
            ToolRecord::new("GitHub Copilot", "AI pair programmer for coding").with_id(2),
            ToolRecord::new("Random Tool", "Does things.")
                .with_category("Totally Unknown Legacy Label")
                .with_id(3),
            // Already canonical: must not appear in the plan.
            ToolRecord::new("Canva Magic", "Design templates")
                .with_category("Image Generation & Design")
                .with_id(4),
        ]
    }

    #[test]
    fn test_plan_targets_divergent_rows_only() {
        let plan = plan(&corpus());
        let ids: Vec<i64> = plan.updates.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert_eq!(plan.updates[0].resolved, Category::Writing);
        assert_eq!(plan.updates[1].resolved, Category::DeveloperTools);
        assert_eq!(plan.updates[2].resolved, Category::Other);
    }

    #[test]
    fn test_sql_statements() {
        let statements = plan(&corpus()).sql_statements();
        assert_eq!(
            statements[0],
            "UPDATE tools SET category = 'Writing & Content' WHERE id = 1;"
        );
        assert_eq!(
            statements[1],
            "UPDATE tools SET category = 'Developer Tools' WHERE id = 2;"
        );
    }

    #[test]
    fn test_dry_run_is_idempotent() {
        let records = corpus();
        assert_eq!(plan(&records).sql_statements(), plan(&records).sql_statements());
    }

    #[test]
    fn test_plan_after_apply_is_noop() {
        let mut records = corpus();
        let first = plan(&records);

        // Simulate applying the plan to storage.
        for update in &first.updates {
            let row = records
                .iter_mut()
                .find(|r| r.id == Some(update.id))
                .unwrap();
            row.category = Some(update.resolved.label().to_string());
        }

        let second = plan(&records);
        assert!(second.is_noop(), "updates remained: {:?}", second.updates);
    }

    #[test]
    fn test_rows_without_id_are_counted() {
        let records = vec![ToolRecord::new("GitHub Copilot", "coding assistant")];
        let plan = plan(&records);
        assert!(plan.updates.is_empty());
        assert_eq!(plan.skipped_without_id, 1);
    }

    #[test]
    fn test_analysis_distributions() {
        let analysis = analyze(&corpus());
        assert_eq!(analysis.before.total(), 4);
        assert_eq!(analysis.after.total(), 4);

        // Plain normalization cannot place the Copilot row.
        assert_eq!(analysis.before.count(Category::DeveloperTools), 0);
        assert_eq!(analysis.after.count(Category::DeveloperTools), 1);

        // Rows 1 and 4 carry table-exact labels; row 2 is keyword-inferred;
        // row 3 falls through everything.
        assert_eq!(analysis.coverage.legacy_exact, 2);
        assert_eq!(analysis.coverage.keyword_inferred, 1);
        assert_eq!(analysis.coverage.fallback, 1);
    }
}
