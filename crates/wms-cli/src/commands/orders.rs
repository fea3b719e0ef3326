use wms_core::entities::StartOrderOutcome;
use wms_core::enums::Permission;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrderCommands;
use crate::commands::shared::watch;
use crate::context::AppContext;
use crate::output::{output_list, output_view, quantity, rows_table, section};

/// Handle `wms orders`.
pub async fn handle(
    action: &OrderCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_permission(Permission::AssignSheets).await?;
    let every = ctx.config.general.assignment_refresh();

    match action {
        OrderCommands::Pending(args) => {
            watch::run_or_watch(args.watch, every, || async move {
                output_list(&ctx.service.pending_orders().await?, flags.format)
            })
            .await
        }
        OrderCommands::Preparing(args) => {
            watch::run_or_watch(args.watch, every, || async move {
                output_list(&ctx.service.preparing_orders().await?, flags.format)
            })
            .await
        }
        OrderCommands::Start { id } => {
            let sheet_size = usize::try_from(ctx.config.general.sheet_size)?;
            let outcome = ctx.service.start_order(*id, sheet_size).await?;
            output_view(&outcome, flags.format, render_start)
        }
    }
}

fn render_start(outcome: &StartOrderOutcome) -> String {
    if outcome.already_paginated {
        return format!(
            "Order {} is in preparation; its sheets already exist.",
            outcome.order_id
        );
    }
    let rows = outcome
        .sheets
        .iter()
        .map(|sheet| {
            vec![
                sheet.sheet_no.to_string(),
                sheet.skus.to_string(),
                quantity(sheet.bales),
            ]
        })
        .collect::<Vec<_>>();
    section(
        &format!(
            "Order {} started with {} sheet(s)",
            outcome.order_id,
            outcome.sheets.len()
        ),
        &rows_table(&["sheet", "skus", "bales"], &rows),
    )
}
