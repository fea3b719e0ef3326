use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DbCommands;
use crate::context::AppContext;
use crate::output::output_list;

/// Handle `wms db`.
pub async fn handle(action: &DbCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DbCommands::Check => check(ctx, flags).await,
    }
}

async fn check(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.service.db().check_connection().await?;
    let tables = ctx.service.db().table_status().await?;
    output_list(&tables, flags.format)?;

    let missing = tables
        .iter()
        .filter(|t| !t.exists)
        .map(|t| t.table.as_str())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!("missing tables: {}", missing.join(", "));
    }
    Ok(())
}
