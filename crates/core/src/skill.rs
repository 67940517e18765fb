//! Skill name normalization rules.
//!
//! Skill names are globally shared and compared case-insensitively, so they
//! are normalized once at creation time: surrounding whitespace trimmed,
//! words title-cased. Categories follow the same rule.

/// Normalize a skill name or category: trim, collapse to title case.
///
/// Title case here means the first letter of each whitespace-separated word
/// is uppercased and the rest lowercased (`"  guitar LESSONS "` becomes
/// `"Guitar Lessons"`). Intra-word punctuation is left alone.
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
