// crates/engine/src/lib.rs
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

pub mod config;
pub mod entry;
pub mod error;
pub mod filesystem;
pub mod report;

use crate::config::SnapshotJob;
use crate::entry::EntryWriter;
use crate::error::{EngineError, Result};
use crate::filesystem::WalkItem;
use crate::report::{AggregateReport, FileFailure};

/// Concatenate every matching file under `job.root` into `job.output`.
///
/// The output is truncated on open and flushed once the walk ends, whether
/// or not individual files failed. Per-file failures are collected in
/// `AggregateReport::failures`.
///
/// # Errors
///
/// Returns an error if the root cannot be traversed (checked before the
/// output is created), if the output cannot be opened or written, or, with
/// `strict` set, on the first per-file failure. Failures recorded before a
/// fatal error are kept on it, see [`EngineError::failures`].
pub fn aggregate(job: &SnapshotJob) -> Result<AggregateReport> {
    let root = filesystem::validate_root(&job.root)?;

    let file = File::create(&job.output).map_err(|source| EngineError::OutputOpen {
        path: job.output.clone(),
        source,
    })?;
    let output_canonical = fs::canonicalize(&job.output).ok();
    let mut writer = EntryWriter::new(BufWriter::new(file), &job.output);
    let mut report = AggregateReport::new(&job.name, &root, &job.output);

    info!(
        job = %job.name,
        root = %root.display(),
        output = %job.output.display(),
        "aggregating"
    );

    let filled = fill(
        job,
        &root,
        output_canonical.as_deref(),
        &mut writer,
        &mut report,
    );
    let finished = writer.finish();
    match filled.and(finished) {
        Ok(bytes) => report.bytes_written = bytes,
        Err(err) => return Err(err.with_failures(report.failures)),
    }

    info!(
        job = %job.name,
        included = report.included_count(),
        failed = report.failure_count(),
        skipped = report.skipped,
        "done"
    );
    Ok(report)
}

fn fill<W: Write>(
    job: &SnapshotJob,
    root: &Path,
    output: Option<&Path>,
    writer: &mut EntryWriter<W>,
    report: &mut AggregateReport,
) -> Result<()> {
    for item in filesystem::walk(root, &job.walk, &job.suffixes)? {
        match item {
            WalkItem::Skipped(path) => {
                trace!(path = %path.display(), "no matching suffix");
                report.skipped += 1;
            }
            WalkItem::Candidate(path) if is_output_file(&path, output) => {
                debug!(path = %path.display(), "not including the output file itself");
            }
            WalkItem::Candidate(path) => match entry::read_entry(&path) {
                Ok(entry) => {
                    writer.write_entry(&entry)?;
                    debug!(path = %path.display(), bytes = entry.content.len(), "included");
                    report.included.push(entry.path);
                }
                Err(err) => record_failure(job, report, path, err)?,
            },
            WalkItem::Error(err) => {
                let path = filesystem::walk_error_path(&err, root);
                record_failure(job, report, path, EngineError::Walk(err))?;
            }
        }
    }
    Ok(())
}

fn record_failure(
    job: &SnapshotJob,
    report: &mut AggregateReport,
    path: PathBuf,
    err: EngineError,
) -> Result<()> {
    if job.strict {
        return Err(EngineError::Strict {
            path,
            source: Box::new(err),
        });
    }
    debug!(path = %path.display(), error = %err, "skipped after failure");
    report.failures.push(FileFailure::new(path, &err));
    Ok(())
}

fn is_output_file(path: &Path, output: Option<&Path>) -> bool {
    output.is_some_and(|out| {
        path.file_name() == out.file_name()
            && fs::canonicalize(path).is_ok_and(|p| p == out)
    })
}

/// Run every job in order. A fatal error in one job does not stop the rest.
pub fn aggregate_all(jobs: &[SnapshotJob]) -> Vec<(&SnapshotJob, Result<AggregateReport>)> {
    jobs.iter().map(|job| (job, aggregate(job))).collect()
}
