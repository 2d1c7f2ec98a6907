use std::sync::LazyLock;

use regex::Regex;

static PAREN_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

const HYBRID_SEPARATOR: &str = " x ";

/// Reduces an eBird common name to a title Wikipedia is likely to have.
///
/// Drops parenthesized qualifiers (morphs, subspecies groups), collapses
/// whitespace, and keeps only the first parent of a hybrid
/// (`"Mallard x American Black Duck"` becomes `"Mallard"`).
#[must_use]
pub fn clean_name(common_name: &str) -> String {
    let without_qualifiers = PAREN_SEGMENT_RE.replace_all(common_name, " ");
    let collapsed = without_qualifiers
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match collapsed.find(HYBRID_SEPARATOR) {
        Some(idx) => collapsed[..idx].trim().to_string(),
        None => collapsed,
    }
}
