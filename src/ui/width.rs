//! Cell-width arithmetic for aligning mixed ASCII/CJK text in a terminal.
//!
//! Only the CJK Unified Ideographs block is treated as double width.

const ELLIPSIS: &str = "...";

fn is_wide(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

fn char_width(ch: char) -> usize {
    if is_wide(ch) { 2 } else { 1 }
}

pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

pub fn count_wide_chars(s: &str) -> usize {
    s.chars().filter(|&c| is_wide(c)).count()
}

/// Shortens `s` so its display width is at most `max_width`, marking the cut
/// with `...`. Budgets too small for the ellipsis get a bare prefix.
pub fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let (budget, suffix) = match max_width.checked_sub(ELLIPSIS.len()) {
        Some(budget) => (budget, ELLIPSIS),
        None => (max_width, ""),
    };

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str(suffix);
    out
}

/// Character count to pad `name` to so it fills `max_name_width` cells.
/// `format!`'s width counts chars, so each wide char needs one fewer pad.
pub fn column_padding(name: &str, max_name_width: usize) -> usize {
    max_name_width.saturating_sub(count_wide_chars(name))
}
