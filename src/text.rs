//! Text sanitization for author-supplied strings.
//!
//! Hotspot labels and dialog titles come straight from content authors and
//! may contain markup. Everything that ends up in a visible label or an
//! accessible name goes through [`purify_html`] first.

use scraper::Html;

/// Strip all markup from an author-supplied string, returning plain text.
///
/// The input is parsed as an HTML fragment, so entities are decoded and
/// tags are dropped rather than escaped. Whitespace runs are collapsed
/// and the result is trimmed.
pub fn purify_html(input: &str) -> String {
    let fragment = Html::parse_fragment(input);

    let mut text = String::new();
    for piece in fragment.root_element().text() {
        if !text.is_empty() && !text.ends_with(' ') {
            text.push(' ');
        }
        text.push_str(piece.trim());
    }

    collapse_whitespace(&text)
}

/// Collapse any run of whitespace into a single space and trim the ends.
fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
