use wms_core::entities::Operator;
use wms_core::enums::Permission;
use wms_core::search;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SheetCommands;
use crate::context::AppContext;
use crate::output::{output, output_list};

/// Handle `wms sheets`.
pub async fn handle(
    action: &SheetCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_permission(Permission::AssignSheets).await?;

    match action {
        SheetCommands::List { order } => {
            output_list(&ctx.service.order_sheets(*order).await?, flags.format)
        }
        SheetCommands::Pickers { search: term } => {
            let pickers = ctx.service.active_pickers_for_assignment().await?;
            output_list(&filter_pickers(pickers, term.as_deref()), flags.format)
        }
        SheetCommands::Assign { sheet, picker } => {
            let sheet = ctx.service.assign_sheet(*sheet, *picker).await?;
            output(&sheet, flags.format)
        }
        SheetCommands::Progress { order } => {
            output_list(&ctx.service.sheet_progress(*order).await?, flags.format)
        }
    }
}

fn filter_pickers(pickers: Vec<Operator>, term: Option<&str>) -> Vec<Operator> {
    match term {
        Some(term) => search::filter(pickers, term, |p| p.full_name.as_str()),
        None => pickers,
    }
}
