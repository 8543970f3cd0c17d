//! Markup helpers.

/// Removes tags from rendered HTML, leaving the text a search index matches
/// against.
///
/// Only tags are removed. The grammars emit no entities, so none are decoded.
/// A `<` with no closing `>` is kept as text.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}
