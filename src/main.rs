mod command;
mod config;
mod error;
mod executor;
mod locale;
mod matcher;
mod model;
mod shell;
mod sources;
mod state;
mod ui;

use anyhow::Result;
use std::io;
use std::path::PathBuf;
use crate::config::load_config;
use crate::executor::SystemLauncher;
use crate::locale::{Language, Locale};
use crate::shell::Shell;
use crate::sources::{Source, json::JsonSource};
use crate::state::AppState;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse bookmarks and local tools collected in JSON files", long_about = None)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory scanned recursively for *.json files
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Language pack: en, zh or auto
    #[arg(short, long)]
    lang: Option<String>,

    /// Initial command, run as if typed at the prompt (e.g. `find -k python`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config, CLI flags win
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dir) = args.resources {
        config.general.resources_dir = dir;
    }
    if let Some(lang) = args.lang {
        config.general.language = lang;
    }

    let language = Language::from_setting(&config.general.language).unwrap_or_else(Language::detect);
    let locale = Locale::for_language(language);

    // 2. Load Catalog once for the whole session
    let source = JsonSource::new(&config.general.resources_dir, config.general.on_invalid_file);
    let loaded = source.scan()?;
    if loaded.catalog.is_empty() {
        log::warn!("No entries found under {:?}", source.root);
    } else {
        log::info!("Loaded {} entries from {:?}", loaded.catalog.len(), source.root);
    }
    for err in &loaded.skipped {
        eprintln!("warning: {}", err);
    }

    // 3. Run the shell until input ends
    let state = AppState::new(config, loaded.catalog, locale);
    let initial = (!args.command.is_empty()).then(|| args.command.join(" "));
    let mut shell = Shell::new(&state, io::stdin().lock(), io::stdout().lock(), SystemLauncher);
    shell.run(initial)?;

    Ok(())
}
