use clap::Subcommand;

/// Sheet commands (permission 200).
#[derive(Clone, Debug, Subcommand)]
pub enum SheetCommands {
    /// Sheets of an order with their picker and state.
    List { order: i64 },
    /// Active pickers a sheet can be assigned to.
    Pickers {
        #[arg(long)]
        search: Option<String>,
    },
    /// Assign a sheet to a picker.
    Assign {
        sheet: i64,
        #[arg(long)]
        picker: i64,
    },
    /// Per-sheet progress of an order.
    Progress { order: i64 },
}
