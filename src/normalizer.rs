// Legacy category normalization
//
// Older catalog rows carry free-text category labels from an uncontrolled
// vocabulary ("AI Writing", "copywriting", "Chatbot", ...). This table maps
// the known ones onto the canonical taxonomy.

use crate::taxonomy::Category;
use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;

/// Known legacy labels in match order.
///
/// Order is significant: the containment fallback returns the first entry
/// whose key contains the input or is contained by it, so entries are
/// grouped by category and listed most-specific-first within a group.
/// The canonical labels themselves lead each group so an already-migrated
/// row always maps back to its own category.
pub const LEGACY_LABELS: &[(&str, Category)] = &[
    // Writing & Content
    ("writing & content", Category::Writing),
    ("ai writing", Category::Writing),
    ("writing assistant", Category::Writing),
    ("writing", Category::Writing),
    ("copywriting", Category::Writing),
    ("copywriter", Category::Writing),
    ("content creation", Category::Writing),
    ("content generation", Category::Writing),
    ("content writing", Category::Writing),
    ("blog writing", Category::Writing),
    ("text generation", Category::Writing),
    ("paraphrasing", Category::Writing),
    ("summarization", Category::Writing),
    ("grammar", Category::Writing),
    ("storytelling", Category::Writing),
    ("translation", Category::Writing),
    // Image Generation & Design
    ("image generation & design", Category::ImageDesign),
    ("image generation", Category::ImageDesign),
    ("image editing", Category::ImageDesign),
    ("graphic design", Category::ImageDesign),
    ("logo design", Category::ImageDesign),
    ("interior design", Category::ImageDesign),
    ("design", Category::ImageDesign),
    ("ai art", Category::ImageDesign),
    ("art generation", Category::ImageDesign),
    ("photo editing", Category::ImageDesign),
    ("illustration", Category::ImageDesign),
    ("drawing", Category::ImageDesign),
    ("avatar", Category::ImageDesign),
    ("logo", Category::ImageDesign),
    ("3d modeling", Category::ImageDesign),
    // Video & Audio
    ("video & audio", Category::VideoAudio),
    ("video generation", Category::VideoAudio),
    ("video editing", Category::VideoAudio),
    ("video", Category::VideoAudio),
    ("audio editing", Category::VideoAudio),
    ("audio", Category::VideoAudio),
    ("music generation", Category::VideoAudio),
    ("music", Category::VideoAudio),
    ("voice cloning", Category::VideoAudio),
    ("voice", Category::VideoAudio),
    ("text to speech", Category::VideoAudio),
    ("speech to text", Category::VideoAudio),
    ("transcription", Category::VideoAudio),
    ("podcast", Category::VideoAudio),
    ("animation", Category::VideoAudio),
    // Chatbots & Assistants
    ("chatbots & assistants", Category::Chatbots),
    ("conversational ai", Category::Chatbots),
    ("virtual assistant", Category::Chatbots),
    ("ai assistant", Category::Chatbots),
    ("assistant", Category::Chatbots),
    ("chatbots", Category::Chatbots),
    ("chatbot", Category::Chatbots),
    ("chat", Category::Chatbots),
    ("companion", Category::Chatbots),
    ("customer support", Category::Chatbots),
    ("customer service", Category::Chatbots),
    // Productivity
    ("productivity", Category::Productivity),
    ("note taking", Category::Productivity),
    ("notes", Category::Productivity),
    ("task management", Category::Productivity),
    ("project management", Category::Productivity),
    ("time management", Category::Productivity),
    ("workflow", Category::Productivity),
    ("automation", Category::Productivity),
    ("scheduling", Category::Productivity),
    ("calendar", Category::Productivity),
    ("meeting notes", Category::Productivity),
    ("presentations", Category::Productivity),
    ("spreadsheet", Category::Productivity),
    // Developer Tools
    ("developer tools", Category::DeveloperTools),
    ("developer", Category::DeveloperTools),
    ("development", Category::DeveloperTools),
    ("code assistant", Category::DeveloperTools),
    ("code review", Category::DeveloperTools),
    ("coding", Category::DeveloperTools),
    ("programming", Category::DeveloperTools),
    ("no code", Category::DeveloperTools),
    ("low code", Category::DeveloperTools),
    ("devops", Category::DeveloperTools),
    ("testing", Category::DeveloperTools),
    ("debugging", Category::DeveloperTools),
    ("website builder", Category::DeveloperTools),
    ("api tools", Category::DeveloperTools),
    // Education & Learning
    ("education & learning", Category::Education),
    ("education", Category::Education),
    ("e-learning", Category::Education),
    ("learning", Category::Education),
    ("language learning", Category::Education),
    ("tutoring", Category::Education),
    ("study", Category::Education),
    ("courses", Category::Education),
    ("homework", Category::Education),
    ("teaching", Category::Education),
    ("flashcards", Category::Education),
    // Healthcare & Legal
    ("healthcare & legal", Category::HealthcareLegal),
    ("healthcare", Category::HealthcareLegal),
    ("mental health", Category::HealthcareLegal),
    ("health", Category::HealthcareLegal),
    ("medical", Category::HealthcareLegal),
    ("fitness", Category::HealthcareLegal),
    ("wellness", Category::HealthcareLegal),
    ("therapy", Category::HealthcareLegal),
    ("legal assistant", Category::HealthcareLegal),
    ("legal", Category::HealthcareLegal),
    ("law", Category::HealthcareLegal),
    ("compliance", Category::HealthcareLegal),
    // Research & Analysis
    ("research & analysis", Category::Research),
    ("market research", Category::Research),
    ("academic research", Category::Research),
    ("research", Category::Research),
    ("data analysis", Category::Research),
    ("data science", Category::Research),
    ("analytics", Category::Research),
    ("finance", Category::Research),
    ("search engine", Category::Research),
    ("business intelligence", Category::Research),
    ("knowledge management", Category::Research),
    ("statistics", Category::Research),
    // Marketing & SEO
    ("marketing & seo", Category::Marketing),
    ("email marketing", Category::Marketing),
    ("marketing", Category::Marketing),
    ("seo", Category::Marketing),
    ("social media", Category::Marketing),
    ("advertising", Category::Marketing),
    ("ads", Category::Marketing),
    ("sales", Category::Marketing),
    ("lead generation", Category::Marketing),
    ("e-commerce", Category::Marketing),
    ("ecommerce", Category::Marketing),
    ("branding", Category::Marketing),
    ("growth hacking", Category::Marketing),
];

lazy_static! {
    /// Exact-match index over [`LEGACY_LABELS`].
    static ref EXACT: FxHashMap<&'static str, Category> =
        LEGACY_LABELS.iter().copied().collect();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// How a raw label matched the normalization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    /// The cleaned label is itself a table key.
    Exact(&'static str),
    /// The label contains a table key, or a table key contains the label.
    Fuzzy(&'static str),
    Miss,
}

/// Map a raw legacy category label onto the canonical taxonomy.
///
/// Total over all inputs: missing, empty, and unknown labels come back as
/// [`Category::Other`]. Exact table hits are tried before containment so a
/// label that is itself a known key can never be stolen by a shorter
/// overlapping entry.
pub fn normalize(raw: Option<&str>) -> Category {
    lookup(raw).0
}

/// Like [`normalize`] but also reports which table entry matched.
pub fn lookup(raw: Option<&str>) -> (Category, LabelMatch) {
    let Some(raw) = raw else {
        return (Category::Other, LabelMatch::Miss);
    };

    let label = clean(raw);
    if label.is_empty() {
        return (Category::Other, LabelMatch::Miss);
    }

    if let Some((key, category)) = EXACT.get_key_value(label.as_str()) {
        return (*category, LabelMatch::Exact(*key));
    }

    // Containment in both directions: verbose legacy labels contain a key
    // ("AI writing tools" ⊃ "ai writing"), abbreviated ones are contained
    // by a key ("chatb" ⊂ "chatbot"). First entry in table order wins.
    for (key, category) in LEGACY_LABELS {
        if label.contains(key) || key.contains(label.as_str()) {
            return (*category, LabelMatch::Fuzzy(*key));
        }
    }

    (Category::Other, LabelMatch::Miss)
}

/// Lower-case, trim, and collapse internal whitespace runs.
fn clean(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(normalize(Some("AI Writing")), Category::Writing);
        assert_eq!(normalize(Some("copywriting")), Category::Writing);
        assert_eq!(normalize(Some("Design")), Category::ImageDesign);
        assert_eq!(normalize(Some("chatbot")), Category::Chatbots);
        assert_eq!(normalize(Some("SEO")), Category::Marketing);
    }

    #[test]
    fn test_canonical_labels_normalize_to_themselves() {
        for category in Category::CANONICAL {
            assert_eq!(normalize(Some(category.label())), category);
        }
    }

    #[test]
    fn test_fuzzy_contains_key() {
        // Verbose labels that contain a table key
        assert_eq!(normalize(Some("AI Writing Tools")), Category::Writing);
        assert_eq!(normalize(Some("best chatbot platform")), Category::Chatbots);
        assert_eq!(normalize(Some("video editing suite")), Category::VideoAudio);
    }

    #[test]
    fn test_fuzzy_key_contains_input() {
        // Abbreviated labels contained by a table key
        assert_eq!(normalize(Some("copywrit")), Category::Writing);
        assert_eq!(normalize(Some("spreadshee")), Category::Productivity);
    }

    #[test]
    fn test_exact_wins_over_substring() {
        // "email marketing" is its own exact key; the containment scan must
        // never get the chance to match a shorter overlapping entry.
        assert_eq!(normalize(Some("email marketing")), Category::Marketing);
        // "legal assistant" contains "assistant" (Chatbots); exact hit first.
        assert_eq!(normalize(Some("Legal Assistant")), Category::HealthcareLegal);
    }

    #[test]
    fn test_whitespace_and_case_tolerance() {
        assert_eq!(normalize(Some("  AI   Writing  ")), Category::Writing);
        assert_eq!(normalize(Some("CHATBOT")), Category::Chatbots);
    }

    #[test]
    fn test_unmatched_inputs() {
        assert_eq!(normalize(None), Category::Other);
        assert_eq!(normalize(Some("")), Category::Other);
        assert_eq!(normalize(Some("   ")), Category::Other);
        assert_eq!(normalize(Some("Totally Unknown Legacy Label")), Category::Other);
    }

    #[test]
    fn test_lookup_reports_match_kind() {
        let (category, matched) = lookup(Some("ai writing"));
        assert_eq!(category, Category::Writing);
        assert_eq!(matched, LabelMatch::Exact("ai writing"));

        let (category, matched) = lookup(Some("ai writing platform"));
        assert_eq!(category, Category::Writing);
        assert!(matches!(matched, LabelMatch::Fuzzy(_)));

        let (_, matched) = lookup(Some("xyzzy"));
        assert_eq!(matched, LabelMatch::Miss);
    }

    #[test]
    fn test_determinism() {
        for raw in ["AI Writing", "video tools", "unknown stuff", ""] {
            assert_eq!(normalize(Some(raw)), normalize(Some(raw)));
        }
    }
}
