use std::io::{self, BufRead, Write};
use crate::command::{self, Command};
use crate::error::{CommandError, DispatchError};
use crate::executor::{self, Dispatched, Launcher};
use crate::model::Hit;
use crate::state::AppState;
use crate::ui::table::{render_details, render_table};
use log::{debug, warn};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The read-eval loop: one command, optionally one selection, at most one dispatch.
pub struct Shell<'a, R, W, L> {
    state: &'a AppState,
    input: R,
    out: W,
    launcher: L,
    width: Option<usize>,
}

impl<'a, R: BufRead, W: Write, L: Launcher> Shell<'a, R, W, L> {
    pub fn new(state: &'a AppState, input: R, out: W, launcher: L) -> Self {
        Self {
            state,
            input,
            out,
            launcher,
            width: None,
        }
    }

    /// Fixes the table width instead of asking the terminal.
    #[cfg(test)]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    fn terminal_width(&self) -> usize {
        self.width
            .or_else(|| terminal_size::terminal_size().map(|(w, _)| w.0 as usize))
            .unwrap_or(self.state.config.display.fallback_width)
    }

    /// `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.read_line()
    }

    /// Runs `initial` as if typed, then prompts until input ends.
    pub fn run(&mut self, initial: Option<String>) -> io::Result<()> {
        let mut pending = initial;
        loop {
            let line = match pending.take() {
                Some(line) => line,
                None => {
                    let tips = format!("\n{}", self.state.locale.input_tips);
                    match self.prompt(&tips)? {
                        Some(line) => line,
                        None => break,
                    }
                }
            };
            if !self.handle_line(&line)? {
                break;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Returns `false` if input ended while waiting for a selection.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let locale = self.state.locale;
        let command = match command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(e) => {
                debug!("Rejected '{}': {}", line, e);
                let message = match e {
                    CommandError::KeywordRequired => locale.keyword_required,
                    CommandError::Invalid(_) => locale.invalid_input,
                };
                writeln!(self.out, "{}", message)?;
                return Ok(true);
            }
        };
        debug!("Command: {:?}", command);

        match command {
            Command::Help => writeln!(self.out, "{}", locale.help)?,
            Command::Version => writeln!(self.out, "{}{}", locale.current_version, VERSION)?,
            Command::Find { .. } | Command::List { .. } => {
                let state = self.state;
                let hits = state.query(&command);
                if hits.is_empty() {
                    writeln!(self.out, "{}", locale.no_matches)?;
                    return Ok(true);
                }
                for row in render_table(&hits, self.terminal_width()) {
                    writeln!(self.out, "{}", row)?;
                }
                return self.select(&hits);
            }
        }
        Ok(true)
    }

    fn select(&mut self, hits: &[Hit<'_>]) -> io::Result<bool> {
        let locale = self.state.locale;
        let Some(line) = self.prompt(locale.enter_choice)? else {
            return Ok(false);
        };

        let Ok(choice) = line.parse::<i64>() else {
            writeln!(self.out, "{}", locale.invalid_input)?;
            return Ok(true);
        };
        if choice == 0 {
            return Ok(true);
        }

        let hit = usize::try_from(choice)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| hits.get(i));
        match hit {
            Some(hit) => self.open(hit)?,
            None => writeln!(self.out, "{}", locale.invalid_selection)?,
        }
        Ok(true)
    }

    fn open(&mut self, hit: &Hit<'_>) -> io::Result<()> {
        let locale = self.state.locale;
        writeln!(self.out, "\n{}\n", locale.details_header)?;
        for row in render_details(hit.entry) {
            writeln!(self.out, "{}", row)?;
        }
        writeln!(self.out)?;

        let action = executor::resolve(hit.category, hit.entry, hit.entry.source_dir());
        match executor::perform(&action, &mut self.launcher) {
            Ok(Dispatched::OpenedUrl(url)) => writeln!(self.out, "URL: {}", url),
            Ok(Dispatched::Launched(path)) => {
                writeln!(self.out, "{}{}", locale.executable_path, path.display())
            }
            Ok(Dispatched::ExtractedAndLaunched { dir, exe_path }) => {
                writeln!(self.out, "{}{}", locale.extracted_to, dir.display())?;
                writeln!(self.out, "{}{}", locale.executable_path, exe_path.display())
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, err: DispatchError) -> io::Result<()> {
        warn!("Dispatch failed: {}", err);
        let locale = self.state.locale;
        match err {
            DispatchError::NoUrl => writeln!(self.out, "{}", locale.no_url),
            DispatchError::Unavailable { download_url } => {
                writeln!(self.out, "{}", locale.file_not_found)?;
                match download_url {
                    Some(url) => writeln!(self.out, "\n {}{}", locale.download_url, url),
                    None => Ok(()),
                }
            }
            DispatchError::ExtractPermission { source, .. } => {
                writeln!(self.out, "{}{}", locale.extract_permission, source)
            }
            DispatchError::Extract { source, .. } => {
                writeln!(self.out, "{}{}", locale.extract_failed, source)
            }
            DispatchError::MissingAfterExtract { path } => {
                writeln!(self.out, "{}{}", locale.missing_after_extract, path.display())
            }
            DispatchError::Launch { source, .. } => {
                writeln!(self.out, "{}{}", locale.execution_failed, source)
            }
            DispatchError::OpenUrl { source, .. } => {
                writeln!(self.out, "{}{}", locale.open_url_failed, source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::executor::tests::RecordingLauncher;
    use crate::locale::EN;
    use crate::model::{Catalog, Category, Entry};
    use serde_json::{json, Value};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    fn state_with(entries: Vec<(Category, Value)>, source: &Path) -> AppState {
        let mut catalog = Catalog::new();
        for (category, value) in entries {
            let Value::Object(map) = value else { panic!("object expected") };
            catalog.push(category, Entry::new(map, source.to_path_buf()));
        }
        AppState::new(Config::default(), catalog, &EN)
    }

    fn three_sites() -> AppState {
        state_with(
            vec![
                (Category::Github, json!({"name": "serde", "url": "https://github.com/serde-rs/serde"})),
                (Category::Website, json!({"name": "docs", "url": "https://docs.rs", "desc": "crate docs"})),
                (Category::Website, json!({"name": "blog", "remarks": "no link here"})),
            ],
            &PathBuf::from("res/fav.json"),
        )
    }

    /// Feeds `command` plus `input` to a fresh shell and returns what it printed.
    fn drive(state: &AppState, command: &str, input: &str, launcher: &mut RecordingLauncher) -> String {
        let mut out = Vec::new();
        let mut shell = Shell::new(state, Cursor::new(input.to_string()), &mut out, launcher)
            .with_width(80);
        assert!(shell.handle_line(command).unwrap());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn zero_returns_without_dispatch() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "list", "0\n", &mut launcher);
        assert!(out.contains("serde"));
        assert!(!out.contains(EN.invalid_selection));
        assert!(!out.contains(EN.invalid_input));
        assert!(launcher.opened.is_empty() && launcher.spawned.is_empty());
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "list", "99\n", &mut launcher);
        assert!(out.contains(EN.invalid_selection));
        assert!(launcher.opened.is_empty() && launcher.spawned.is_empty());

        let out = drive(&state, "list", "-1\n", &mut launcher);
        assert!(out.contains(EN.invalid_selection));
        assert!(launcher.opened.is_empty());
    }

    #[test]
    fn non_integer_selection_is_invalid_input() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "list", "two\n", &mut launcher);
        assert!(out.contains(EN.invalid_input));
        assert!(launcher.opened.is_empty());
    }

    #[test]
    fn selecting_a_site_shows_details_and_opens_it() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "find -k DOCS -t website", "1\n", &mut launcher);
        assert!(out.contains(EN.details_header));
        assert!(out.contains(" desc: crate docs"));
        assert!(out.contains(" sourceFile: res/fav.json"));
        assert!(out.contains("URL: https://docs.rs"));
        assert_eq!(launcher.opened, vec!["https://docs.rs"]);
    }

    #[test]
    fn site_without_url_is_reported() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "find -k blog", "1\n", &mut launcher);
        assert!(out.contains(EN.no_url));
        assert!(launcher.opened.is_empty());
    }

    #[test]
    fn missing_tool_shows_download_url() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(
            vec![(
                Category::Tools,
                json!({"name": "7zip", "exePath": "7z.exe", "ZIPPath": "7z.zip", "downloadUrl": "http://x"}),
            )],
            &dir.path().join("tools.json"),
        );
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "list -t tools", "1\n", &mut launcher);
        assert!(out.contains(EN.file_not_found));
        assert!(out.contains("downloadUrl: http://x"));
        assert!(launcher.spawned.is_empty());
    }

    #[test]
    fn present_tool_is_launched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tool.exe"), b"bin").unwrap();
        let state = state_with(
            vec![(Category::Tools, json!({"name": "tool", "exePath": "tool.exe"}))],
            &dir.path().join("tools.json"),
        );
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "list", "1\n", &mut launcher);
        assert!(out.contains(EN.executable_path));
        assert_eq!(launcher.spawned, vec![dir.path().join("tool.exe")]);
    }

    #[test]
    fn no_matches_skips_the_selection_prompt() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "find -k nothing-like-this", "1\n", &mut launcher);
        assert!(out.contains(EN.no_matches));
        assert!(!out.contains(EN.enter_choice));
    }

    #[test]
    fn bad_commands_are_reported() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        assert!(drive(&state, "open 1", "", &mut launcher).contains(EN.invalid_input));
        assert!(drive(&state, "find", "", &mut launcher).contains(EN.keyword_required));
        assert_eq!(drive(&state, "   ", "", &mut launcher), "");
    }

    #[test]
    fn version_and_help() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let out = drive(&state, "v", "", &mut launcher);
        assert_eq!(out, format!("current version: {}\n", VERSION));
        assert!(drive(&state, "help", "", &mut launcher).contains("find -k <keyword>"));
    }

    #[test]
    fn run_executes_initial_command_then_stops_at_eof() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let mut out = Vec::new();
        let input = Cursor::new("2\nlist -t github\n0\n".to_string());
        let mut shell = Shell::new(&state, input, &mut out, &mut launcher).with_width(80);
        shell.run(Some("find -k docs".to_string())).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(EN.enter_choice).count(), 2);
        assert_eq!(out.matches(EN.input_tips).count(), 2);
        // "2" selects from a one-row result.
        assert!(out.contains(EN.invalid_selection));
        assert!(launcher.opened.is_empty());
    }

    #[test]
    fn eof_during_selection_ends_the_loop() {
        let state = three_sites();
        let mut launcher = RecordingLauncher::default();
        let mut out = Vec::new();
        let mut shell = Shell::new(&state, Cursor::new(String::new()), &mut out, &mut launcher);
        assert!(!shell.handle_line("list").unwrap());
    }
}
