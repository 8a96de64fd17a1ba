//! Grapheme width helpers used by the editor listing.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Columns a tab stop occupies in the editor listing.
pub const TAB_SIZE: usize = 4;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_SIZE;
    }

    grapheme
        .chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

pub fn visible_width(input: &str) -> usize {
    input.graphemes(true).map(grapheme_width).sum()
}

/// Expands tabs to the next multiple of [`TAB_SIZE`] columns.
pub fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + TAB_SIZE);
    let mut column = 0usize;
    for grapheme in line.graphemes(true) {
        if grapheme == "\t" {
            let pad = TAB_SIZE - (column % TAB_SIZE);
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push_str(grapheme);
            column += grapheme_width(grapheme);
        }
    }
    out
}

/// Splits a line into display rows no wider than `max_width` columns.
///
/// Wraps at grapheme boundaries. A grapheme wider than `max_width` still gets a
/// row of its own, so the result is never empty.
pub fn wrap_to_width(line: &str, max_width: usize) -> Vec<String> {
    if line.is_empty() || max_width == 0 || visible_width(line) <= max_width {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for grapheme in line.graphemes(true) {
        let width = grapheme_width(grapheme);
        if current_width + width > max_width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push_str(grapheme);
        current_width += width;
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
