use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde_json::{Map, Value};

/// Fixed classification buckets. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Github,
    Tools,
    Website,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Github, Category::Tools, Category::Website];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Github => "github",
            Category::Tools => "tools",
            Category::Website => "website",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

pub const SOURCE_FILE_KEY: &str = "sourceFile";

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub fields: Map<String, Value>, // Raw JSON object, file order
    pub source_file: PathBuf,       // JSON file that contributed it
}

impl Entry {
    pub fn new(fields: Map<String, Value>, source_file: PathBuf) -> Self {
        Self { fields, source_file }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> &str {
        self.get_str("name").unwrap_or("")
    }

    /// `remarks` wins unless it is empty, then `desc`.
    pub fn description(&self) -> &str {
        match self.get_str("remarks") {
            Some(r) if !r.is_empty() => r,
            _ => self.get_str("desc").unwrap_or(""),
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.get_str("url").filter(|u| !u.is_empty())
    }

    pub fn exe_path(&self) -> Option<&str> {
        self.get_str("exePath").filter(|p| !p.is_empty())
    }

    pub fn zip_path(&self) -> Option<&str> {
        self.get_str("ZIPPath")
            .or_else(|| self.get_str("zipPath"))
            .filter(|p| !p.is_empty())
    }

    pub fn download_url(&self) -> Option<&str> {
        self.get_str("downloadUrl").filter(|u| !u.is_empty())
    }

    /// Directory holding the JSON file; relative tool paths resolve against it.
    pub fn source_dir(&self) -> &Path {
        self.source_file.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Deterministic rendering used for keyword matching: every field plus
    /// `sourceFile`, keys sorted, non-ASCII left unescaped.
    pub fn canonical_text(&self) -> String {
        let mut sorted: BTreeMap<&str, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        sorted.insert(
            SOURCE_FILE_KEY,
            Value::String(self.source_file.to_string_lossy().into_owned()),
        );
        serde_json::to_string(&sorted).unwrap_or_default()
    }

    /// Field/value pairs for the details view, file order, `sourceFile` last.
    pub fn details(&self) -> Vec<(String, String)> {
        let mut rows: Vec<(String, String)> = self
            .fields
            .iter()
            .filter(|(k, _)| k.as_str() != SOURCE_FILE_KEY)
            .map(|(k, v)| {
                let shown = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), shown)
            })
            .collect();
        rows.push((
            SOURCE_FILE_KEY.to_string(),
            self.source_file.to_string_lossy().into_owned(),
        ));
        rows
    }
}

/// Every recognised bucket is always present, possibly empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    buckets: BTreeMap<Category, Vec<Entry>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            buckets: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, category: Category, entry: Entry) {
        self.buckets.entry(category).or_default().push(entry);
    }

    pub fn bucket(&self, category: Category) -> &[Entry] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets in category order.
    pub fn buckets(&self) -> impl Iterator<Item = (Category, &[Entry])> {
        self.buckets.iter().map(|(c, entries)| (*c, entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One row of a search result; its 1-based position is the user's selector.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub category: Category,
    pub entry: &'a Entry,
}
