// crates/engine/src/config.rs
use crate::error::{EngineError, Result};
use derive_builder::Builder;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Suffixes accepted when no explicit set is configured.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    ".ts", ".js", ".json", ".tsx", ".jsx", ".html", ".css", ".scss",
];

/// Literal, case-sensitive filename suffixes that select files for inclusion.
///
/// Never empty; duplicates are dropped while insertion order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixSet(Vec<String>);

impl SuffixSet {
    /// Build a suffix set from arbitrary strings.
    ///
    /// # Errors
    /// Returns [`EngineError::Config`] when no non-empty suffix remains.
    pub fn new<I, S>(suffixes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for suffix in suffixes {
            let suffix = suffix.into();
            if suffix.is_empty() || out.contains(&suffix) {
                continue;
            }
            out.push(suffix);
        }

        if out.is_empty() {
            return Err(EngineError::Config("suffix set must not be empty".into()));
        }
        Ok(Self(out))
    }

    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.0.iter().any(|s| file_name.ends_with(s.as_str()))
    }

    /// Like [`matches`](Self::matches) for names that may not be valid UTF-8.
    #[must_use]
    pub fn matches_os(&self, file_name: &OsStr) -> bool {
        match file_name.to_str() {
            Some(name) => self.matches(name),
            None => self.matches(&file_name.to_string_lossy()),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for SuffixSet {
    fn default() -> Self {
        Self(DEFAULT_SUFFIXES.iter().map(|s| (*s).to_string()).collect())
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub follow_links: bool,
    /// Visit dot-files and dot-directories.
    #[builder(default = "true")]
    pub hidden: bool,
    #[builder(default)]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    /// Gitignore-style globs removed from the walk.
    #[builder(default)]
    pub exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_links: false,
            hidden: true,
            git_ignore: false,
            max_depth: None,
            exclude: vec![],
        }
    }
}

/// One (root directory, output file) pair plus the rules used to fill it.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct SnapshotJob {
    #[builder(default = "String::from(\"snapshot\")")]
    pub name: String,
    pub root: PathBuf,
    pub output: PathBuf,
    #[builder(default)]
    pub suffixes: SuffixSet,
    #[builder(default)]
    pub walk: WalkOptions,
    /// Treat the first per-file failure as fatal.
    #[builder(default)]
    pub strict: bool,
}

impl SnapshotJob {
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            output: output.into(),
            suffixes: SuffixSet::default(),
            walk: WalkOptions::default(),
            strict: false,
        }
    }

    /// The backend and frontend snapshots taken when nothing else is requested.
    #[must_use]
    pub fn default_jobs() -> Vec<Self> {
        vec![
            Self::new("backend", "backend/src", "backend.txt"),
            Self::new("frontend", "frontend/src", "frontend.txt"),
        ]
    }
}
