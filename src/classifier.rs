// Unified category resolution
//
// A legacy label that maps confidently onto the taxonomy always wins.
// Otherwise keyword scoring over name + description decides, gated by a
// minimum score before the inference is trusted.

use crate::keywords;
use crate::models::ToolRecord;
use crate::normalizer::{self, LabelMatch};
use crate::taxonomy::Category;
use serde::Serialize;

/// Minimum keyword score before inference beats the `Other` fallback.
/// A single short keyword hit is not enough evidence.
pub const SCORE_THRESHOLD: u32 = 2;

/// Which stage of the pipeline produced an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Legacy label was an exact normalization-table key.
    LegacyExact,
    /// Legacy label matched a table entry by containment.
    LegacyFuzzy,
    /// Keyword scoring over name + description.
    KeywordInference,
    /// No usable legacy label and no score above the threshold.
    Fallback,
}

/// A category assignment together with the evidence behind it.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub category: Category,
    pub stage: Stage,
    /// Normalization-table key that decided, when a legacy label won.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_label: Option<&'static str>,
    /// Per-category keyword scores in table order. Empty when the legacy
    /// label short-circuited scoring.
    pub scores: Vec<(Category, u32)>,
    pub best_score: u32,
}

/// Resolve a record to its canonical category.
pub fn resolve(record: &ToolRecord) -> Category {
    classify(record).category
}

/// Resolve a record, keeping the full decision trail for explain output.
pub fn classify(record: &ToolRecord) -> Classification {
    if record.category.is_some() {
        let (category, matched) = normalizer::lookup(record.category.as_deref());
        match matched {
            LabelMatch::Exact(key) => {
                return Classification {
                    category,
                    stage: Stage::LegacyExact,
                    matched_label: Some(key),
                    scores: Vec::new(),
                    best_score: 0,
                };
            }
            LabelMatch::Fuzzy(key) => {
                return Classification {
                    category,
                    stage: Stage::LegacyFuzzy,
                    matched_label: Some(key),
                    scores: Vec::new(),
                    best_score: 0,
                };
            }
            // Unknown label: fall through to keyword inference.
            LabelMatch::Miss => {}
        }
    }

    let text = format!("{} {}", record.name, record.description);
    let scores = keywords::score(&text);

    // Strictly-greater comparison so the first category reaching the
    // maximum in table order wins ties.
    let mut best = Category::Other;
    let mut best_score = 0;
    for (category, s) in &scores {
        if *s > best_score {
            best = *category;
            best_score = *s;
        }
    }

    if best_score < SCORE_THRESHOLD {
        Classification {
            category: Category::Other,
            stage: Stage::Fallback,
            matched_label: None,
            scores,
            best_score,
        }
    } else {
        Classification {
            category: best,
            stage: Stage::KeywordInference,
            matched_label: None,
            scores,
            best_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, description: &str, category: Option<&str>) -> ToolRecord {
        let mut r = ToolRecord::new(name, description);
        r.category = category.map(String::from);
        r
    }

    #[test]
    fn test_legacy_exact_match_wins() {
        let r = record(
            "ChatGPT Writer",
            "AI writing assistant for emails",
            Some("AI Writing"),
        );
        let c = classify(&r);
        assert_eq!(c.category, Category::Writing);
        assert_eq!(c.stage, Stage::LegacyExact);
        assert_eq!(c.matched_label, Some("ai writing"));
    }

    #[test]
    fn test_legacy_precedence_over_keywords() {
        // Description is all about video editing, but the mapped legacy
        // label must still decide.
        let r = record(
            "Whatever",
            "video editing with voice cloning and audio mastering",
            Some("AI Writing"),
        );
        assert_eq!(resolve(&r), Category::Writing);
    }

    #[test]
    fn test_keyword_inference_without_legacy_label() {
        let r = record("GitHub Copilot", "AI pair programmer for coding", None);
        let c = classify(&r);
        assert_eq!(c.category, Category::DeveloperTools);
        assert_eq!(c.stage, Stage::KeywordInference);
        assert!(c.best_score >= SCORE_THRESHOLD);
    }

    #[test]
    fn test_keyword_inference_after_unknown_legacy_label() {
        let r = record(
            "Notion AI",
            "Smart workspace for productivity and note-taking",
            Some("Totally Unknown Legacy Label"),
        );
        assert_eq!(resolve(&r), Category::Productivity);
    }

    #[test]
    fn test_fallback_for_unclassifiable_record() {
        let r = record("Random Tool", "Does things.", Some("Totally Unknown Legacy Label"));
        let c = classify(&r);
        assert_eq!(c.category, Category::Other);
        assert_eq!(c.stage, Stage::Fallback);
    }

    #[test]
    fn test_empty_record_falls_back() {
        let r = record("", "", None);
        assert_eq!(resolve(&r), Category::Other);
    }

    #[test]
    fn test_single_weight_one_hit_is_below_threshold() {
        // "sql" is a 3-character keyword, weight 1 — not enough on its own.
        let c = classify(&record("SQL", "", None));
        assert_eq!(c.best_score, 1);
        assert_eq!(c.category, Category::Other);
    }

    #[test]
    fn test_single_weight_two_hit_meets_threshold() {
        // "chat" weighs 2 and clears the threshold by itself.
        let c = classify(&record("chat", "", None));
        assert_eq!(c.best_score, 2);
        assert_eq!(c.category, Category::Chatbots);
    }

    #[test]
    fn test_design_legacy_label() {
        let r = record(
            "Canva Magic",
            "Design tool with AI-powered templates and graphics",
            Some("Design"),
        );
        assert_eq!(resolve(&r), Category::ImageDesign);
    }

    #[test]
    fn test_determinism() {
        let r = record("GitHub Copilot", "AI pair programmer for coding", None);
        assert_eq!(resolve(&r), resolve(&r));
    }

    #[test]
    fn test_output_is_always_in_closed_set() {
        let inputs = [
            record("", "", None),
            record("x", "y", Some("z")),
            record("video music art", "chat code health", None),
            record("ChatGPT Writer", "AI writing assistant", Some("AI Writing")),
        ];
        for r in &inputs {
            assert!(Category::ALL.contains(&resolve(r)));
        }
    }
}
