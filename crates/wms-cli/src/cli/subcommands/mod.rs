mod db;
mod orders;
mod pallets;
mod report;
mod sheets;

use clap::Args;

pub use db::DbCommands;
pub use orders::OrderCommands;
pub use pallets::{PalletCommands, PalletOrdersArgs};
pub use report::{DateRangeArgs, ExportArgs, PickersArgs, ReportCommands};
pub use sheets::SheetCommands;

/// `--watch` for listings that can poll.
#[derive(Clone, Debug, Default, Args)]
pub struct WatchArgs {
    /// Re-run on the configured interval until Ctrl-C
    #[arg(long)]
    pub watch: bool,
}
