use clap::Subcommand;

/// Database diagnostics.
#[derive(Clone, Debug, Subcommand)]
pub enum DbCommands {
    /// Check connectivity and the presence of every required table.
    Check,
}
