use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => commands::login::handle_login(&args, ctx, flags).await,
        Commands::Logout => commands::login::handle_logout(&ctx.sessions, flags),
        Commands::Whoami => commands::login::handle_whoami(ctx, flags).await,
        Commands::Db { action } => commands::db::handle(&action, ctx, flags).await,
        Commands::Dashboard(args) => commands::dashboard::handle(&args, ctx, flags).await,
        Commands::Orders { action } => commands::orders::handle(&action, ctx, flags).await,
        Commands::Sheets { action } => commands::sheets::handle(&action, ctx, flags).await,
        Commands::Pallets { action } => commands::pallets::handle(&action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
    }
}
