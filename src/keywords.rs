// Keyword relevance scoring
//
// Fallback classification signal for records with no usable legacy label:
// scan name + description for category-specific terms and weight each hit
// by keyword length.

use crate::taxonomy::Category;

/// Per-category keyword lists in scoring order.
///
/// Both the category order and the keyword order are significant: the
/// resolver breaks score ties in favor of the first category to reach the
/// maximum, and this table fixes that order in source rather than leaning
/// on map iteration.
pub const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Writing,
        &[
            "writing", "writer", "copywriting", "copywriter", "blog", "article", "essay",
            "paraphrase", "grammar", "summariz", "story", "script", "proofread", "rewrite",
            "headline", "newsletter", "text generation",
        ],
    ),
    (
        Category::ImageDesign,
        &[
            "image", "design", "art", "logo", "photo", "picture", "illustration", "drawing",
            "avatar", "graphic", "diffusion", "midjourney", "wallpaper", "sketch", "render",
            "portrait", "visual",
        ],
    ),
    (
        Category::VideoAudio,
        &[
            "video", "audio", "music", "voice", "speech", "podcast", "animation", "transcri",
            "dubbing", "sound", "song", "subtitle", "text to speech", "soundtrack", "lip sync",
        ],
    ),
    (
        Category::Chatbots,
        &[
            "chatbot", "chat", "assistant", "conversation", "companion", "gpt", "dialogue",
            "question", "answer", "customer support", "talk",
        ],
    ),
    (
        Category::Productivity,
        &[
            "productivity", "workflow", "automation", "task", "note", "meeting", "calendar",
            "schedule", "organize", "workspace", "notion", "todo", "reminder", "spreadsheet",
            "presentation", "slides", "email",
        ],
    ),
    (
        Category::DeveloperTools,
        &[
            "code", "coding", "developer", "programming", "programmer", "debug", "github",
            "copilot", "api", "sql", "terminal", "frontend", "backend", "deploy", "javascript",
            "python", "software", "autocomplete", "no-code",
        ],
    ),
    (
        Category::Education,
        &[
            "learn", "education", "study", "tutor", "course", "teacher", "student", "homework",
            "quiz", "flashcard", "lesson", "exam", "language learning",
        ],
    ),
    (
        Category::HealthcareLegal,
        &[
            "health", "medical", "doctor", "therapy", "fitness", "wellness", "mental", "legal",
            "law", "lawyer", "contract", "compliance", "patient", "diagnosis", "nutrition",
        ],
    ),
    (
        Category::Research,
        &[
            "research", "analysis", "analytics", "data", "insight", "finance", "financial",
            "statistic", "academic", "paper", "citation", "knowledge", "search engine",
            "intelligence", "trend", "dataset",
        ],
    ),
    (
        Category::Marketing,
        &[
            "marketing", "seo", "social media", "advertis", "campaign", "sales", "lead",
            "ecommerce", "e-commerce", "brand", "audience", "engagement", "instagram", "tiktok",
            "conversion", "growth",
        ],
    ),
];

/// Weight of a single keyword hit.
///
/// Longer keywords are intrinsically more specific and less likely to be
/// accidental substring matches, so they dominate the score.
pub fn weight(keyword: &str) -> u32 {
    match keyword.len() {
        len if len > 8 => 4,
        len if len > 5 => 3,
        len if len > 3 => 2,
        _ => 1,
    }
}

/// Score `text` against every concrete category, in table order.
///
/// Case-folds internally so callers can pass raw name/description text. A
/// keyword contributes its weight once no matter how often it occurs
/// (contains-once semantics).
pub fn score(text: &str) -> Vec<(Category, u32)> {
    let text = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .map(|(category, keywords)| {
            let total = keywords
                .iter()
                .filter(|keyword| text.contains(*keyword))
                .map(|keyword| weight(keyword))
                .sum();
            (*category, total)
        })
        .collect()
}
