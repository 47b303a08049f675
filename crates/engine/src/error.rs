// crates/engine/src/error.rs
use crate::report::FileFailure;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot traverse root directory '{root}': {source}")]
    Traversal {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open output file '{path}': {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{path}' is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Aborted on '{path}' (strict mode): {source}")]
    Strict {
        path: PathBuf,
        #[source]
        source: Box<EngineError>,
    },

    /// A fatal error that struck after some files had already failed.
    #[error("{source}")]
    Interrupted {
        #[source]
        source: Box<EngineError>,
        failures: Vec<FileFailure>,
    },
}

impl EngineError {
    /// Whether this error ends the whole invocation rather than a single file.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::FileRead { .. } | Self::Decode { .. } | Self::Walk(_)
        )
    }

    /// Attach per-file failures collected before this error.
    #[must_use]
    pub fn with_failures(self, failures: Vec<FileFailure>) -> Self {
        if failures.is_empty() {
            return self;
        }
        Self::Interrupted {
            source: Box::new(self),
            failures,
        }
    }

    /// Per-file failures recorded before the job was cut short.
    #[must_use]
    pub fn failures(&self) -> &[FileFailure] {
        match self {
            Self::Interrupted { failures, .. } => failures,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
