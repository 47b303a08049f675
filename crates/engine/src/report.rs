use crate::error::EngineError;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Read,
    Decode,
    Walk,
}

/// A file that matched but contributed nothing to the output.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub error: String,
}

impl FileFailure {
    #[must_use]
    pub fn new(path: PathBuf, error: &EngineError) -> Self {
        let kind = match error {
            EngineError::Decode { .. } => FailureKind::Decode,
            EngineError::Walk(_) => FailureKind::Walk,
            _ => FailureKind::Read,
        };
        Self {
            path,
            kind,
            error: error.to_string(),
        }
    }
}

/// Outcome of one successful aggregation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateReport {
    pub name: String,
    pub root: PathBuf,
    pub output: PathBuf,
    /// Paths written to the output, in write order.
    pub included: Vec<PathBuf>,
    /// Regular files rejected by the suffix set.
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
    pub bytes_written: u64,
}

impl AggregateReport {
    #[must_use]
    pub fn new(name: &str, root: &Path, output: &Path) -> Self {
        Self {
            name: name.to_string(),
            root: root.to_path_buf(),
            output: output.to_path_buf(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn included_count(&self) -> usize {
        self.included.len()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kind_follows_error_variant() {
        let decode = EngineError::Decode {
            path: "a.ts".into(),
            source: String::from_utf8(vec![0xc3]).unwrap_err(),
        };
        let failure = FileFailure::new("a.ts".into(), &decode);
        assert_eq!(failure.kind, FailureKind::Decode);
        assert!(failure.error.contains("a.ts"));

        let read = EngineError::FileRead {
            path: "b.ts".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(FileFailure::new("b.ts".into(), &read).kind, FailureKind::Read);
    }

    #[test]
    fn new_report_is_clean_and_empty() {
        let report = AggregateReport::new("backend", Path::new("/r"), Path::new("out.txt"));
        assert!(report.is_clean());
        assert_eq!(report.included_count(), 0);
        assert_eq!(report.failure_count(), 0);
        assert_eq!(report.name, "backend");
    }
}
