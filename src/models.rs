// Shared data model for catalog records and distributions

use crate::taxonomy::Category;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One tool listing as it arrives from storage or an import file.
///
/// `category` is the legacy free-text label of unknown quality; `id` is
/// only present for database rows. Unknown extra fields in import files
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ToolRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Category counts over a corpus.
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    counts: FxHashMap<Category, u64>,
    total: u64,
}

impl Distribution {
    pub fn record(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, category: Category) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Share of the corpus in `category`, as a percentage.
    pub fn percentage(&self, category: Category) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(category) as f64 * 100.0 / self.total as f64
        }
    }

    /// All counts in taxonomy order, zero entries included.
    pub fn entries(&self) -> Vec<(Category, u64)> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.count(category)))
            .collect()
    }
}

impl FromIterator<Category> for Distribution {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut dist = Distribution::default();
        for category in iter {
            dist.record(category);
        }
        dist
    }
}
