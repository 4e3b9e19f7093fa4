//! Share links: a base URL plus a `#fragment` naming a prompt id.

use std::path::Path;

const HASH: char = '#';

/// `base` with any existing fragment replaced by `#id`.
pub fn card_url(base: &str, id: &str) -> String {
    let base = base.split(HASH).next().unwrap_or(base);
    format!("{base}{HASH}{id}")
}

/// Base URL used when none is configured: the catalog file itself.
pub fn default_base_url(catalog: &Path) -> String {
    let absolute = std::path::absolute(catalog).unwrap_or_else(|_| catalog.to_path_buf());
    format!("file://{}", absolute.display())
}

/// Prompt id named by a deep link.
///
/// Accepts a full URL (`https://host/page#id`), a bare fragment (`#id`), or a
/// plain id. URLs without a fragment name nothing.
pub fn fragment(link: &str) -> Option<&str> {
    let id = match link.split_once(HASH) {
        Some((_, frag)) => frag,
        None if link.contains("://") => return None,
        None => link,
    };
    let id = id.trim();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
