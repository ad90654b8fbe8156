use tracing::debug;

use crate::models::Category;

/// Keyword table scanned in declared order; the first substring hit wins.
/// Several keywords are substrings of one another ("assign" / "assignment",
/// "test" / "tests"), so entries must never be reordered or sorted.
pub const KEYWORDS: &[(&str, Category)] = &[
    ("homework", Category::Homework),
    ("assignment", Category::Homework),
    ("assignments", Category::Homework),
    ("assessments", Category::Quiz),
    ("assessment", Category::Quiz),
    ("final", Category::Test),
    ("test", Category::Test),
    ("tests", Category::Test),
    ("quiz", Category::Quiz),
    ("lab", Category::Lab),
    ("checks", Category::Classwork),
    ("audits", Category::Classwork),
    ("assign", Category::Homework),
    ("project", Category::Test),
];

pub fn classify(phrase: &str) -> Option<Category> {
    classify_with(phrase, KEYWORDS)
}

pub fn classify_with(phrase: &str, keywords: &[(&str, Category)]) -> Option<Category> {
    let lower = phrase.to_lowercase();
    keywords
        .iter()
        .find(|(keyword, _)| lower.contains(*keyword))
        .map(|&(keyword, category)| {
            debug!("Found {} for {}", category, keyword);
            category
        })
}

/// The token the gradebook appends to an item's link text, e.g. "quiz" in
/// "Chapter 4 quiz".
pub fn phrase_token(link: &str) -> &str {
    link.split_whitespace().last().unwrap_or("")
}
