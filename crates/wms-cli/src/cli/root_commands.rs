use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    DbCommands, OrderCommands, PalletCommands, ReportCommands, SheetCommands, WatchArgs,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in and remember the session.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user and their module permissions.
    Whoami,
    /// Database diagnostics.
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },
    /// Headline counters, recent activity and picker workload.
    Dashboard(WatchArgs),
    /// Orders waiting for or in preparation.
    Orders {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Preparation sheets and picker assignment.
    Sheets {
        #[command(subcommand)]
        action: SheetCommands,
    },
    /// Pallets and checker assignment.
    Pallets {
        #[command(subcommand)]
        action: PalletCommands,
    },
    /// Order counters and picker productivity.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// Username
    #[arg(long, short = 'u')]
    pub user: String,
    /// Password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}
