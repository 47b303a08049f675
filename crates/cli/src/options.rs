use clap::ValueEnum;

/// Format of the summary printed after all jobs have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}
