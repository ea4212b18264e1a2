use crate::config::InvalidFilePolicy;
use crate::error::CatalogError;
use crate::model::{Category, Entry};
use crate::sources::{Loaded, Source};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use log::{info, debug, warn};

const EXTENSION: &str = ".json";

/// Aggregates every `*.json` file below `root` into one catalog.
///
/// Files are visited in name order within each directory, so the catalog's
/// insertion order is stable across platforms.
pub struct JsonSource {
    pub root: PathBuf,
    pub policy: InvalidFilePolicy,
}

impl JsonSource {
    pub fn new(root: impl Into<PathBuf>, policy: InvalidFilePolicy) -> Self {
        Self { root: root.into(), policy }
    }

    fn find_files(&self, skipped: &mut Vec<CatalogError>) -> Result<Vec<PathBuf>, CatalogError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    self.reject(CatalogError::Walk(e), skipped)?;
                    continue;
                }
            };
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(EXTENSION));
            if matches && path.is_file() {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    /// Applies the invalid-file policy to one failure.
    fn reject(&self, err: CatalogError, skipped: &mut Vec<CatalogError>) -> Result<(), CatalogError> {
        match self.policy {
            InvalidFilePolicy::Abort => Err(err),
            InvalidFilePolicy::Skip => {
                warn!("Skipping: {}", err);
                skipped.push(err);
                Ok(())
            }
        }
    }
}

impl Source for JsonSource {
    fn scan(&self) -> Result<Loaded, CatalogError> {
        let mut loaded = Loaded::default();

        if !self.root.exists() {
            warn!("Resources directory {:?} does not exist", self.root);
            return Ok(loaded);
        }

        debug!("Scanning JSON files in {:?}", self.root);
        let files = self.find_files(&mut loaded.skipped)?;
        for path in files {
            match load_file(&path) {
                Ok(entries) => {
                    debug!("{:?}: {} entries", path, entries.len());
                    for (category, entry) in entries {
                        loaded.catalog.push(category, entry);
                    }
                }
                Err(e) => self.reject(e, &mut loaded.skipped)?,
            }
        }

        for (category, entries) in loaded.catalog.buckets() {
            info!("JsonSource: {} entries in {}", entries.len(), category);
        }
        Ok(loaded)
    }
}

/// Parses one file; unrecognised top-level keys are dropped.
pub fn load_file(path: &Path) -> Result<Vec<(Category, Entry)>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Object(root) = value else {
        return Err(CatalogError::NotAnObject { path: path.to_path_buf() });
    };

    let mut entries = Vec::new();
    for (key, items) in root {
        let Ok(category) = key.parse::<Category>() else {
            debug!("{:?}: ignoring key '{}'", path, key);
            continue;
        };
        let Value::Array(items) = items else {
            warn!("{:?}: '{}' is not an array, ignoring", path, key);
            continue;
        };
        for item in items {
            match item {
                Value::Object(fields) => {
                    entries.push((category, Entry::new(fields, path.to_path_buf())));
                }
                other => warn!("{:?}: non-object item in '{}': {}", path, key, other),
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn two_files_each_add_a_tool() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("nested/deeper/b.json");
        write(&a, r#"{"tools": [{"name": "one", "exePath": "one.exe"}]}"#);
        write(&b, r#"{"tools": [{"name": "two", "exePath": "two.exe"}]}"#);

        let loaded = JsonSource::new(dir.path(), InvalidFilePolicy::Skip).scan().unwrap();
        let tools = loaded.catalog.bucket(Category::Tools);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name(), "one");
        assert_eq!(tools[0].source_file, a);
        assert_eq!(tools[1].name(), "two");
        assert_eq!(tools[1].source_file, b);
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn unknown_keys_and_suffixes_are_ignored() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join("mixed.json"),
            r#"{"github": [{"name": "g", "url": "https://github.com"}],
                "bookmarks": [{"name": "dropped"}],
                "website": [{"name": "w", "url": "https://w"}, "not-an-object"]}"#,
        );
        write(&dir.path().join("upper.JSON"), r#"{"github": [{"name": "nope"}]}"#);
        write(&dir.path().join("notes.txt"), "{}");

        let loaded = JsonSource::new(dir.path(), InvalidFilePolicy::Abort).scan().unwrap();
        assert_eq!(loaded.catalog.bucket(Category::Github).len(), 1);
        assert_eq!(loaded.catalog.bucket(Category::Website).len(), 1);
        assert!(loaded.catalog.bucket(Category::Tools).is_empty());
        assert_eq!(loaded.catalog.len(), 2);
    }

    #[test]
    fn walk_order_is_sorted_by_name() {
        let dir = tempdir().unwrap();
        for name in ["c.json", "a.json", "b/inner.json"] {
            write(
                &dir.path().join(name),
                &format!(r#"{{"website": [{{"name": "{}"}}]}}"#, name),
            );
        }
        let loaded = JsonSource::new(dir.path(), InvalidFilePolicy::Skip).scan().unwrap();
        let names: Vec<_> = loaded
            .catalog
            .bucket(Category::Website)
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b/inner.json", "c.json"]);
    }

    #[test]
    fn bad_file_is_skipped_under_skip_policy() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("a.json"), "{ not json");
        write(&dir.path().join("b.json"), r#"{"tools": [{"name": "ok"}]}"#);
        write(&dir.path().join("c.json"), r#"[1, 2]"#);

        let loaded = JsonSource::new(dir.path(), InvalidFilePolicy::Skip).scan().unwrap();
        assert_eq!(loaded.catalog.bucket(Category::Tools).len(), 1);
        assert_eq!(loaded.skipped.len(), 2);
        assert!(matches!(loaded.skipped[0], CatalogError::Parse { .. }));
        assert!(matches!(loaded.skipped[1], CatalogError::NotAnObject { .. }));
    }

    #[test]
    fn bad_file_aborts_under_abort_policy() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("a.json"), r#"{"tools": []}"#);
        write(&dir.path().join("b.json"), "{ not json");

        let err = JsonSource::new(dir.path(), InvalidFilePolicy::Abort).scan().unwrap_err();
        match err {
            CatalogError::Parse { path, .. } => assert_eq!(path, dir.path().join("b.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_root_gives_empty_catalog() {
        let dir = tempdir().unwrap();
        let loaded = JsonSource::new(dir.path().join("absent"), InvalidFilePolicy::Abort)
            .scan()
            .unwrap();
        assert_eq!(loaded.catalog.len(), 0);
        assert_eq!(loaded.catalog.buckets().count(), 3);
    }
}
