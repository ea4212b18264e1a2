use crate::error::CatalogError;
use crate::model::Catalog;

/// A catalog together with the files that were left out of it.
#[derive(Debug, Default)]
pub struct Loaded {
    pub catalog: Catalog,
    pub skipped: Vec<CatalogError>,
}

pub trait Source {
    fn scan(&self) -> Result<Loaded, CatalogError>;
}

pub mod json;
