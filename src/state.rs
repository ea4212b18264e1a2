use crate::command::Command;
use crate::config::Config;
use crate::locale::Locale;
use crate::matcher;
use crate::model::{Catalog, Hit};

/// Everything the shell reads; built once at startup and never mutated.
pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub locale: &'static Locale,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, locale: &'static Locale) -> Self {
        Self { config, catalog, locale }
    }

    /// Runs the query part of `command`. Commands that do not query give no hits.
    pub fn query(&self, command: &Command) -> Vec<Hit<'_>> {
        let hits = match command {
            Command::Find { keyword, category } => {
                matcher::search(&self.catalog, keyword, category.as_deref())
            }
            Command::List { category } => matcher::list(&self.catalog, category.as_deref()),
            Command::Help | Command::Version => Vec::new(),
        };
        log::info!("AppState: {:?} -> {} hits", command, hits.len());
        hits
    }
}
