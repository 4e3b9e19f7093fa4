//! Tag and free-text matching over the catalog.

use crate::catalog::{Prompt, TAG_ALL};
use crate::state::AppState;

/// Trim and lowercase raw search input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether `prompt` passes the tag filter and contains every query token.
///
/// `normalized_query` must already be trimmed and lowercased (see
/// [`normalize_query`]). Tag comparison is exact and case-sensitive.
pub fn matches(prompt: &Prompt, normalized_query: &str, selected_tag: &str) -> bool {
    let tag_matches = selected_tag == TAG_ALL || prompt.tags.iter().any(|t| t == selected_tag);
    if normalized_query.is_empty() || !tag_matches {
        return tag_matches;
    }
    let haystack = format!("{} {} {}", prompt.title, prompt.text, prompt.tags.join(" "))
        .to_lowercase();
    normalized_query
        .split_whitespace()
        .all(|token| haystack.contains(token))
}

/// Indices of matching prompts, in catalog order.
pub fn filter_indices(prompts: &[Prompt], state: &AppState) -> Vec<usize> {
    let query = normalize_query(&state.search);
    prompts
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(p, &query, &state.tag))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::prompt;

    fn state(search: &str, tag: &str) -> AppState {
        AppState {
            search: search.to_string(),
            tag: tag.to_string(),
        }
    }

    #[test]
    fn empty_query_all_tag_matches_everything() {
        let p = prompt("a", "Title", "Body", &[]);
        assert!(matches(&p, "", TAG_ALL));
    }

    #[test]
    fn empty_query_uses_tag_membership() {
        let p = prompt("a", "Title", "Body", &["dev", "writing"]);
        assert!(matches(&p, "", "dev"));
        assert!(matches(&p, "", "writing"));
        assert!(!matches(&p, "", "art"));
    }

    #[test]
    fn tag_comparison_is_case_sensitive() {
        let p = prompt("a", "Title", "Body", &["Dev"]);
        assert!(!matches(&p, "", "dev"));
        assert!(matches(&p, "", "Dev"));
    }

    #[test]
    fn query_searches_title_text_and_tags() {
        let p = prompt("a", "Greeting", "Say hello to {name}", &["social"]);
        assert!(matches(&p, "greet", TAG_ALL));
        assert!(matches(&p, "hello", TAG_ALL));
        assert!(matches(&p, "soc", TAG_ALL));
        assert!(!matches(&p, "goodbye", TAG_ALL));
    }

    #[test]
    fn query_is_case_insensitive_against_content() {
        let p = prompt("a", "Code REVIEW", "Check the Diff", &[]);
        assert!(matches(&p, &normalize_query("  review DIFF "), TAG_ALL));
    }

    #[test]
    fn multi_token_query_is_conjunctive() {
        let p = prompt("a", "Foo", "some bar text", &[]);
        assert!(matches(&p, "foo bar", TAG_ALL));
        assert!(!matches(&p, "foo baz", TAG_ALL));
    }

    #[test]
    fn tokens_do_not_match_across_field_separator() {
        let p = prompt("a", "alpha", "beta", &["gamma"]);
        assert!(matches(&p, "alpha beta", TAG_ALL));
        assert!(!matches(&p, "alphabeta", TAG_ALL));
        assert!(matches(&p, "beta gamma", TAG_ALL));
    }

    #[test]
    fn repeated_whitespace_never_rejects() {
        let p = prompt("a", "Foo", "bar", &[]);
        assert!(matches(&p, "foo    bar", TAG_ALL));
        assert!(matches(&p, "foo \t\n bar", TAG_ALL));
    }

    #[test]
    fn query_requires_tag_rule_too() {
        let p = prompt("a", "Foo", "bar", &["dev"]);
        assert!(matches(&p, "foo", "dev"));
        assert!(!matches(&p, "foo", "art"));
    }

    #[test]
    fn stale_tag_matches_nothing() {
        let prompts = vec![prompt("a", "A", "", &["dev"])];
        assert!(filter_indices(&prompts, &state("", "removed")).is_empty());
    }

    #[test]
    fn filter_preserves_catalog_order() {
        let prompts = vec![
            prompt("a", "Fix navbar", "", &["frontend"]),
            prompt("b", "Fix API", "", &["backend"]),
            prompt("c", "Fix styles", "", &["frontend"]),
        ];
        assert_eq!(filter_indices(&prompts, &state("", "frontend")), vec![0, 2]);
        assert_eq!(filter_indices(&prompts, &state("fix", TAG_ALL)), vec![0, 1, 2]);
        assert_eq!(filter_indices(&prompts, &state("FIX api", TAG_ALL)), vec![1]);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  Hello World \n"), "hello world");
        assert_eq!(normalize_query("   "), "");
    }
}
