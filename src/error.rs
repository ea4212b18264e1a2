use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path:?} is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("failed to walk resources directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Everything that stops a selected entry from being opened. None of these are fatal.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("no URL found for the selected item")]
    NoUrl,

    #[error("neither executable nor archive found locally")]
    Unavailable { download_url: Option<String> },

    #[error("permission denied extracting {path:?}: {source}")]
    ExtractPermission {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to extract {path:?}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("executable {path:?} not found after extraction")]
    MissingAfterExtract { path: PathBuf },

    #[error("failed to start {path:?}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {url}: {source}")]
    OpenUrl {
        url: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unrecognised command '{0}'")]
    Invalid(String),

    #[error("find requires -k <keyword>")]
    KeywordRequired,
}
