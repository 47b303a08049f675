// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::parsers::{default_job_name, normalize_suffix};
pub use code_snapshot_engine::config::{
    SnapshotJob, SnapshotJobBuilder, SuffixSet, WalkOptions, WalkOptionsBuilder,
};
use code_snapshot_engine::error::EngineError;
use std::path::PathBuf;

/// Resolve the jobs to run: manifest jobs first, then `--job` pairs.
///
/// Falls back to [`SnapshotJob::default_jobs`] when neither is given.
/// `--ext`, walk flags and `--strict` apply to every job.
///
/// # Errors
/// Returns an error for an unreadable manifest or an empty suffix list.
pub fn build_jobs(args: &Args) -> Result<Vec<SnapshotJob>> {
    let cli_suffixes = if args.ext.is_empty() {
        None
    } else {
        Some(suffix_set(&args.ext)?)
    };
    let walk = walk_options_from_args(args)?;

    let mut jobs = Vec::new();

    if let Some(path) = &args.config {
        let manifest = Manifest::load(path)?;
        let shared = manifest.suffixes.as_deref().map(suffix_set).transpose()?;

        for entry in manifest.jobs {
            let suffixes = match (&cli_suffixes, &entry.suffixes) {
                (Some(cli), _) => cli.clone(),
                (None, Some(own)) => suffix_set(own)?,
                (None, None) => shared.clone().unwrap_or_default(),
            };
            let mut job_walk = walk.clone();
            job_walk.exclude.extend(entry.exclude);
            let name = entry.name.unwrap_or_else(|| default_job_name(&entry.root));
            jobs.push(build_job(name, entry.root, entry.output, suffixes, job_walk, args.strict)?);
        }
    }

    for arg in &args.jobs {
        jobs.push(build_job(
            arg.name.clone(),
            arg.root.clone(),
            arg.output.clone(),
            cli_suffixes.clone().unwrap_or_default(),
            walk.clone(),
            args.strict,
        )?);
    }

    if jobs.is_empty() && args.config.is_none() {
        jobs = SnapshotJob::default_jobs()
            .into_iter()
            .map(|job| {
                build_job(
                    job.name,
                    job.root,
                    job.output,
                    cli_suffixes.clone().unwrap_or_default(),
                    walk.clone(),
                    args.strict,
                )
            })
            .collect::<Result<Vec<_>>>()?;
    }

    Ok(jobs)
}

fn build_job(
    name: String,
    root: PathBuf,
    output: PathBuf,
    suffixes: SuffixSet,
    walk: WalkOptions,
    strict: bool,
) -> Result<SnapshotJob> {
    Ok(SnapshotJobBuilder::default()
        .name(name)
        .root(root)
        .output(output)
        .suffixes(suffixes)
        .walk(walk)
        .strict(strict)
        .build()
        .map_err(|e| EngineError::Config(e.to_string()))?)
}

fn suffix_set(raw: &[String]) -> Result<SuffixSet> {
    let normalized = raw
        .iter()
        .map(|s| normalize_suffix(s))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(EngineError::Config)?;
    Ok(SuffixSet::new(normalized)?)
}

fn walk_options_from_args(args: &Args) -> Result<WalkOptions> {
    Ok(WalkOptionsBuilder::default()
        .follow_links(args.follow)
        .hidden(!args.no_hidden)
        .git_ignore(args.git_ignore)
        .max_depth(args.max_depth)
        .exclude(args.exclude.clone())
        .build()
        .map_err(|e| EngineError::Config(e.to_string()))?)
}
