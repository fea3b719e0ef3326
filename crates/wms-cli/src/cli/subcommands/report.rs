use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Report commands (permission 201).
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Pending, in-preparation and prepared counters for today.
    Today,
    /// Sheets, SKUs, bales and orders per picker.
    Pickers(PickersArgs),
    /// Write the picker report as CSV.
    Export(ExportArgs),
}

/// Inclusive date range, both ends defaulting to today.
#[derive(Clone, Debug, Default, Args)]
pub struct DateRangeArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Clone, Debug, Args)]
pub struct PickersArgs {
    #[command(flatten)]
    pub range: DateRangeArgs,
    /// Re-run on the configured interval until Ctrl-C
    #[arg(long)]
    pub watch: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub range: DateRangeArgs,
    /// Directory to write the CSV into (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}
