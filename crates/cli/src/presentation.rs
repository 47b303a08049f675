// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::ReportFormat;
use code_snapshot_engine::config::SnapshotJob;
use code_snapshot_engine::error::EngineError;
use code_snapshot_engine::report::{AggregateReport, FileFailure};
use serde::Serialize;
use std::fmt::Write;

/// Per-job line of the end-of-run summary.
#[derive(Debug, Serialize)]
pub struct JobSummary<'a> {
    pub name: &'a str,
    pub output: &'a std::path::Path,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<&'a AggregateReport>,
    /// Per-file failures of a job that later hit a fatal error.
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub failures: &'a [FileFailure],
}

impl<'a> JobSummary<'a> {
    pub fn new(
        job: &'a SnapshotJob,
        result: &'a std::result::Result<AggregateReport, EngineError>,
    ) -> Self {
        match result {
            Ok(report) => Self {
                name: &job.name,
                output: &job.output,
                ok: true,
                error: None,
                report: Some(report),
                failures: &[],
            },
            Err(err) => Self {
                name: &job.name,
                output: &job.output,
                ok: false,
                error: Some(err.to_string()),
                report: None,
                failures: err.failures(),
            },
        }
    }
}

#[must_use]
pub fn confirmation_line(report: &AggregateReport) -> String {
    let mut line = format!(
        "✅ {}: saved {} files from {} to {}",
        report.name,
        report.included_count(),
        report.root.display(),
        report.output.display()
    );
    if !report.is_clean() {
        let _ = write!(line, " ({} skipped due to errors)", report.failure_count());
    }
    line
}

pub fn print_confirmation(report: &AggregateReport) {
    println!("{}", confirmation_line(report));
}

#[must_use]
pub fn failure_line(failure: &FileFailure) -> String {
    format!("Error reading {}: {}", failure.path.display(), failure.error)
}

/// Per-file failures go to stderr, never into the snapshot.
pub fn print_failures(failures: &[FileFailure]) {
    for failure in failures {
        eprintln!("{}", failure_line(failure));
    }
}

/// Failures recorded before the fatal error are printed first.
pub fn print_fatal(name: &str, err: &EngineError) {
    print_failures(err.failures());
    eprintln!("❌ {name}: {err}");
}

/// Render the summary of every job.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_report(summaries: &[JobSummary<'_>], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(summaries)?),
        ReportFormat::Text => Ok(render_text(summaries)),
    }
}

fn render_text(summaries: &[JobSummary<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>8} {:>8} {:>8} {:>12}  OUTPUT",
        "JOB", "FILES", "FAILED", "SKIPPED", "BYTES"
    );
    let _ = writeln!(out, "{}", "-".repeat(64));

    let mut ok = 0usize;
    for summary in summaries {
        match (summary.report, &summary.error) {
            (Some(report), _) => {
                ok += 1;
                let _ = writeln!(
                    out,
                    "{:<16} {:>8} {:>8} {:>8} {:>12}  {}",
                    summary.name,
                    report.included_count(),
                    report.failure_count(),
                    report.skipped,
                    report.bytes_written,
                    summary.output.display()
                );
            }
            (None, error) => {
                let _ = writeln!(
                    out,
                    "{:<16} FAILED: {}",
                    summary.name,
                    error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    let _ = writeln!(out, "---");
    let _ = write!(
        out,
        "[code_snapshot] Completed: {ok}/{} jobs succeeded.",
        summaries.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_snapshot_engine::report::FileFailure;
    use std::path::{Path, PathBuf};

    fn report() -> AggregateReport {
        let mut report = AggregateReport::new(
            "backend",
            Path::new("/p/backend/src"),
            Path::new("backend.txt"),
        );
        report.included = vec![PathBuf::from("/p/backend/src/a.ts")];
        report.bytes_written = 120;
        report
    }

    #[test]
    fn confirmation_names_the_output() {
        let line = confirmation_line(&report());
        assert_eq!(line, "✅ backend: saved 1 files from /p/backend/src to backend.txt");
    }

    #[test]
    fn confirmation_mentions_failures() {
        let mut r = report();
        let err = EngineError::FileRead {
            path: "/p/backend/src/b.ts".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        r.failures.push(FileFailure::new("/p/backend/src/b.ts".into(), &err));
        assert!(confirmation_line(&r).ends_with("(1 skipped due to errors)"));
    }

    #[test]
    fn failure_line_names_the_file() {
        let err = EngineError::Decode {
            path: "/p/a_bad.ts".into(),
            source: String::from_utf8(vec![0xff]).unwrap_err(),
        };
        let line = failure_line(&FileFailure::new("/p/a_bad.ts".into(), &err));
        assert!(line.starts_with("Error reading /p/a_bad.ts: "));
    }

    #[test]
    fn text_report_lists_success_and_failure() {
        let ok_job = SnapshotJob::new("backend", "/p/backend/src", "backend.txt");
        let bad_job = SnapshotJob::new("frontend", "/p/frontend/src", "frontend.txt");
        let ok = Ok(report());
        let bad = Err(EngineError::Traversal {
            root: "/p/frontend/src".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        let summaries = vec![JobSummary::new(&ok_job, &ok), JobSummary::new(&bad_job, &bad)];

        let text = render_report(&summaries, ReportFormat::Text).unwrap();
        assert!(text.contains("backend"));
        assert!(text.contains("FAILED: Cannot traverse root directory"));
        assert!(text.ends_with("Completed: 1/2 jobs succeeded."));
    }

    #[test]
    fn json_report_is_an_array() {
        let job = SnapshotJob::new("backend", "/p/backend/src", "backend.txt");
        let ok = Ok(report());
        let summaries = vec![JobSummary::new(&job, &ok)];

        let json = render_report(&summaries, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "backend");
        assert_eq!(value[0]["ok"], true);
        assert_eq!(value[0]["report"]["included"][0], "/p/backend/src/a.ts");
        assert!(value[0].get("error").is_none());
    }
}
