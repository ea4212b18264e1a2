use crate::model::{Entry, Hit};
use crate::ui::width::{column_padding, display_width, truncate};

/// Cells taken by the index column, brackets and separating spaces.
const ROW_OVERHEAD: usize = 14;
const MIN_DESC_WIDTH: usize = 20;

/// Lays out search results as an aligned table sized to `terminal_width`.
pub fn render_table(hits: &[Hit<'_>], terminal_width: usize) -> Vec<String> {
    let type_width = hits
        .iter()
        .map(|h| display_width(h.category.as_str()))
        .max()
        .unwrap_or(0);
    let name_width = hits
        .iter()
        .map(|h| display_width(h.entry.name()))
        .max()
        .unwrap_or(0);

    let used = ROW_OVERHEAD + type_width + name_width;
    let desc_width = match terminal_width.checked_sub(used) {
        Some(w) if w > 0 => w,
        _ => MIN_DESC_WIDTH,
    };

    let mut lines = Vec::with_capacity(hits.len() + 2);
    lines.push(format!(
        "{:<5} [{:<type_width$}] {:<name_width$} {}",
        "Index", "type", "name", "desc"
    ));
    lines.push("-".repeat(used + desc_width));

    for (idx, hit) in hits.iter().enumerate() {
        let name = hit.entry.name();
        let desc = truncate(hit.entry.description(), desc_width - 1);
        let pad = column_padding(name, name_width);
        lines.push(format!(
            "{:<5} [{:<type_width$}] {:<pad$} {}",
            idx + 1,
            hit.category.as_str(),
            name,
            desc
        ));
    }
    lines
}

pub fn render_details(entry: &Entry) -> Vec<String> {
    entry
        .details()
        .into_iter()
        .map(|(key, value)| format!(" {}: {}", key, value))
        .collect()
}
