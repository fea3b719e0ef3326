use clap::{Args, Subcommand};

/// Pallet commands (permission 202).
#[derive(Clone, Debug, Subcommand)]
pub enum PalletCommands {
    /// Orders with pallets, newest first.
    Orders(PalletOrdersArgs),
    /// Finalized pallets of an order still waiting for a complete check.
    List { order: i64 },
    /// Lines loaded on one pallet.
    Detail { order: i64, pallet: i64 },
    /// Search active checkers by name (at least two characters).
    Checkers { search: String },
    /// Assign a pallet to a checker.
    Assign {
        pallet: i64,
        #[arg(long)]
        checker: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct PalletOrdersArgs {
    /// Fuzzy filter on the company name
    #[arg(long)]
    pub search: Option<String>,
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Re-run on the configured interval until Ctrl-C
    #[arg(long)]
    pub watch: bool,
}
