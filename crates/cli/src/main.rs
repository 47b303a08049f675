use clap::Parser;
use code_snapshot_cli::args::Args;
use code_snapshot_cli::presentation::{self, JobSummary};
use code_snapshot_cli::{config, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    let jobs = match config::build_jobs(&args) {
        Ok(jobs) => jobs,
        Err(e) => {
            eprintln!("Configuration Error: {e}");
            return ExitCode::from(2);
        }
    };

    if jobs.is_empty() {
        tracing::warn!("no jobs to run");
        return ExitCode::SUCCESS;
    }

    let outcomes = code_snapshot_engine::aggregate_all(&jobs);

    let mut any_fatal = false;
    for (job, result) in &outcomes {
        match result {
            Ok(report) => {
                presentation::print_failures(&report.failures);
                presentation::print_confirmation(report);
            }
            Err(e) => {
                any_fatal = true;
                presentation::print_fatal(&job.name, e);
            }
        }
    }

    if let Some(format) = args.report {
        let summaries: Vec<_> = outcomes
            .iter()
            .map(|(job, result)| JobSummary::new(job, result))
            .collect();
        match presentation::render_report(&summaries, format) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Report Error: {e}");
                any_fatal = true;
            }
        }
    }

    if any_fatal {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
