//! Keyword extraction for selected saved searches.
//!
//! The keyword set shown to the user is derived from the structured
//! `SavedSearch::keywords` field. The option label codec (`option_label` /
//! `label_keywords`) is kept for callers that only hold rendered labels; for
//! every keyword string without a `)` both routes produce the same tokens.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Text shown when the current selection contributes no keywords.
pub const NO_KEYWORDS_PLACEHOLDER: &str = "(No keywords selected.)";

const KEYWORDS_PREFIX: &str = "Keywords: ";

static LABEL_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)$").expect("label keyword pattern is valid"));

/// Splits a keyword string on single spaces.
///
/// Consecutive spaces yield empty tokens, which are kept. An empty string
/// yields no tokens at all.
pub fn keyword_tokens(keywords: &str) -> Vec<&str> {
    if keywords.is_empty() {
        return Vec::new();
    }
    keywords.split(' ').collect()
}

/// Display label for a saved search option: `"<name> (<keywords>)"`.
pub fn option_label(name: &str, keywords: Option<&str>) -> String {
    format!("{name} ({})", keywords.unwrap_or(""))
}

/// Recovers the keyword tokens from an option label.
///
/// Labels without a trailing parenthesised group contribute nothing.
pub fn label_keywords(label: &str) -> Vec<&str> {
    LABEL_KEYWORDS
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|group| keyword_tokens(group.as_str()))
        .unwrap_or_default()
}

/// Removes duplicate tokens by exact value, keeping the first occurrence.
pub fn dedupe_keywords<'a, I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(*token))
        .map(ToOwned::to_owned)
        .collect()
}

/// Formats the keyword line shown under the search list.
pub fn keyword_line(keywords: &[String]) -> String {
    if keywords.is_empty() {
        NO_KEYWORDS_PLACEHOLDER.to_string()
    } else {
        format!("{KEYWORDS_PREFIX}{}", keywords.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_keep_empty_entries_between_double_spaces() {
        assert_eq!(keyword_tokens("rust  tokio"), vec!["rust", "", "tokio"]);
        assert!(keyword_tokens("").is_empty());
    }

    #[test]
    fn label_uses_final_parenthesised_group() {
        assert_eq!(label_keywords("Jobs (eu) (rust remote)"), vec!["rust", "remote"]);
        assert!(label_keywords("Jobs ()").is_empty());
        assert!(label_keywords("no group here").is_empty());
        assert!(label_keywords("Jobs (rust) trailing").is_empty());
    }

    #[test]
    fn label_round_trips_null_keywords_as_empty_group() {
        assert_eq!(option_label("Backend", None), "Backend ()");
        assert_eq!(option_label("Backend", Some("go rust")), "Backend (go rust)");
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let deduped = dedupe_keywords(["b", "a", "b", "", "a", ""]);
        assert_eq!(deduped, vec!["b", "a", ""]);
    }

    #[test]
    fn keyword_line_placeholder_and_join() {
        assert_eq!(keyword_line(&[]), "(No keywords selected.)");
        assert_eq!(
            keyword_line(&["foo".to_string(), "bar".to_string()]),
            "Keywords: foo, bar"
        );
    }
}
