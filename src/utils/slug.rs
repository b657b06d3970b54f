//! URL title generation for questions.

/// Maximum length of a URL title in characters.
const MAX_URL_TITLE_CHARS: usize = 150;

/// Fallback used when a title has no alphanumeric characters.
const EMPTY_URL_TITLE: &str = "topic";

/// Builds the URL title (slug) shown in question links.
///
/// # Rules
///
/// 1. Alphanumeric characters are lowercased and kept (including non-ASCII letters)
/// 2. Every other run of characters collapses into a single `-`
/// 3. Leading and trailing hyphens are removed
/// 4. The result is truncated to 150 characters
///
/// # Examples
///
/// ```ignore
/// assert_eq!(url_title("How do I use Axum?"), "how-do-i-use-axum");
/// assert_eq!(url_title("???"), "topic");
/// ```
pub fn url_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    let slug: String = slug.chars().take(MAX_URL_TITLE_CHARS).collect();
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        EMPTY_URL_TITLE.to_string()
    } else {
        slug.to_string()
    }
}
