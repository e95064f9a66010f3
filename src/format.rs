//! Inline run formatting.

use crate::{Paragraph, Run};

/// Escapes `<` and `>`. Ampersands are left untouched so entities already
/// present in slide text survive.
pub fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Formats a single run: escaped text, wrapped in `<strong>` when bold and then
/// in `<em>` when italic, so `<em>` is always the outer tag.
pub fn format_run(run: &Run) -> String {
    let mut text = escape_html(&run.text);
    if run.formatting.bold {
        text = format!("<strong>{}</strong>", text);
    }
    if run.formatting.italic {
        text = format!("<em>{}</em>", text);
    }
    text
}

/// Concatenates the formatted runs of a paragraph.
pub fn paragraph_html(paragraph: &Paragraph) -> String {
    paragraph.runs.iter().map(format_run).collect()
}
