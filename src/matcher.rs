use crate::model::{Catalog, Category, Entry, Hit};
use log::debug;

/// Buckets in scope for a query. An unrecognised category name selects nothing.
fn scope<'a>(catalog: &'a Catalog, category: Option<&str>) -> Vec<(Category, &'a [Entry])> {
    match category {
        None => catalog.buckets().collect(),
        Some(name) => match name.parse::<Category>() {
            Ok(c) => vec![(c, catalog.bucket(c))],
            Err(_) => {
                debug!("Unknown category '{}', nothing in scope", name);
                Vec::new()
            }
        },
    }
}

/// Case-insensitive substring match against each entry's canonical text.
/// Results keep category order, then file order; no ranking.
pub fn search<'a>(catalog: &'a Catalog, keyword: &str, category: Option<&str>) -> Vec<Hit<'a>> {
    let needle = keyword.to_lowercase();
    let hits: Vec<Hit<'a>> = scope(catalog, category)
        .into_iter()
        .flat_map(|(category, entries)| entries.iter().map(move |entry| Hit { category, entry }))
        .filter(|hit| hit.entry.canonical_text().to_lowercase().contains(&needle))
        .collect();
    debug!("search: keyword='{}', category={:?}, hits={}", keyword, category, hits.len());
    hits
}

pub fn list<'a>(catalog: &'a Catalog, category: Option<&str>) -> Vec<Hit<'a>> {
    scope(catalog, category)
        .into_iter()
        .flat_map(|(category, entries)| entries.iter().map(move |entry| Hit { category, entry }))
        .collect()
}
