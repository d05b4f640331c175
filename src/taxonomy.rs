// Canonical category taxonomy for the AI tools catalog
// Every stored or displayed category comes from this closed set.

use serde::{Deserialize, Serialize};

/// Glyph shown for labels that do not map onto the taxonomy.
pub const DEFAULT_ICON: &str = "🤖";

/// The fixed taxonomy all UI and storage must agree on.
///
/// Ten concrete buckets plus the `Other` fallback. Keeping this a sum type
/// means a resolved category can never be an arbitrary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Writing & Content")]
    Writing,
    #[serde(rename = "Image Generation & Design")]
    ImageDesign,
    #[serde(rename = "Video & Audio")]
    VideoAudio,
    #[serde(rename = "Chatbots & Assistants")]
    Chatbots,
    #[serde(rename = "Productivity")]
    Productivity,
    #[serde(rename = "Developer Tools")]
    DeveloperTools,
    #[serde(rename = "Education & Learning")]
    Education,
    #[serde(rename = "Healthcare & Legal")]
    HealthcareLegal,
    #[serde(rename = "Research & Analysis")]
    Research,
    #[serde(rename = "Marketing & SEO")]
    Marketing,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Concrete categories in scoring order.
    ///
    /// Order is significant: keyword tie-breaks resolve to the earliest
    /// entry, so this array is the single place that fixes it.
    pub const CANONICAL: [Category; 10] = [
        Category::Writing,
        Category::ImageDesign,
        Category::VideoAudio,
        Category::Chatbots,
        Category::Productivity,
        Category::DeveloperTools,
        Category::Education,
        Category::HealthcareLegal,
        Category::Research,
        Category::Marketing,
    ];

    /// Full closed set, `Other` last.
    pub const ALL: [Category; 11] = [
        Category::Writing,
        Category::ImageDesign,
        Category::VideoAudio,
        Category::Chatbots,
        Category::Productivity,
        Category::DeveloperTools,
        Category::Education,
        Category::HealthcareLegal,
        Category::Research,
        Category::Marketing,
        Category::Other,
    ];

    /// Canonical display label, as persisted in the catalog.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Writing => "Writing & Content",
            Category::ImageDesign => "Image Generation & Design",
            Category::VideoAudio => "Video & Audio",
            Category::Chatbots => "Chatbots & Assistants",
            Category::Productivity => "Productivity",
            Category::DeveloperTools => "Developer Tools",
            Category::Education => "Education & Learning",
            Category::HealthcareLegal => "Healthcare & Legal",
            Category::Research => "Research & Analysis",
            Category::Marketing => "Marketing & SEO",
            Category::Other => "Other",
        }
    }

    /// URL-safe identifier used by filters and import files.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Writing => "writing-content",
            Category::ImageDesign => "image-design",
            Category::VideoAudio => "video-audio",
            Category::Chatbots => "chatbots-assistants",
            Category::Productivity => "productivity",
            Category::DeveloperTools => "developer-tools",
            Category::Education => "education-learning",
            Category::HealthcareLegal => "healthcare-legal",
            Category::Research => "research-analysis",
            Category::Marketing => "marketing-seo",
            Category::Other => "other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Writing => "✍️",
            Category::ImageDesign => "🎨",
            Category::VideoAudio => "🎬",
            Category::Chatbots => "💬",
            Category::Productivity => "⚡",
            Category::DeveloperTools => "💻",
            Category::Education => "📚",
            Category::HealthcareLegal => "⚖️",
            Category::Research => "🔬",
            Category::Marketing => "📈",
            Category::Other => "🔧",
        }
    }

    /// Parse a canonical label or slug, case-insensitively.
    pub fn from_label(s: &str) -> Option<Category> {
        let needle = s.trim();
        Category::ALL.iter().copied().find(|c| {
            c.label().eq_ignore_ascii_case(needle) || c.slug().eq_ignore_ascii_case(needle)
        })
    }
}

/// Icon for an arbitrary stored label, canonical or not.
///
/// Stats output renders raw legacy labels next to canonical ones, so this
/// has to tolerate strings from outside the closed set.
pub fn icon_for_label(label: &str) -> &'static str {
    Category::from_label(label)
        .map(|c| c.icon())
        .unwrap_or(DEFAULT_ICON)
}
