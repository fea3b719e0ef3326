use clap::Subcommand;

use super::WatchArgs;

/// Order commands (permission 200).
#[derive(Clone, Debug, Subcommand)]
pub enum OrderCommands {
    /// Orders waiting for preparation.
    Pending(WatchArgs),
    /// Orders in preparation with line progress.
    Preparing(WatchArgs),
    /// Start preparing an order, splitting it into sheets on first start.
    Start { id: i64 },
}
