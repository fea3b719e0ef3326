use serde::Serialize;
use wms_core::entities::{PalletAssignmentView, PalletDetail, PalletOrder};
use wms_core::enums::Permission;
use wms_core::paging::{self, Page};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{PalletCommands, PalletOrdersArgs};
use crate::commands::shared::watch;
use crate::context::AppContext;
use crate::output::{list_table, output, output_list, output_view, pct, quantity, section};

#[derive(Serialize)]
struct PalletOrdersPage {
    #[serde(flatten)]
    page: Page<PalletOrder>,
    total_pallets: i64,
    total_quantity: f64,
}

/// Handle `wms pallets`.
pub async fn handle(
    action: &PalletCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_permission(Permission::AssignPallets).await?;

    match action {
        PalletCommands::Orders(args) => orders(args, ctx, flags).await,
        PalletCommands::List { order } => {
            let view = ctx.service.pending_pallets(*order).await?;
            output_view(&view, flags.format, render_assignment)
        }
        PalletCommands::Detail { order, pallet } => {
            let detail = ctx.service.pallet_lines(*order, *pallet).await?;
            output_view(&detail, flags.format, render_detail)
        }
        PalletCommands::Checkers { search } => {
            output_list(&ctx.service.checkers(search).await?, flags.format)
        }
        PalletCommands::Assign { pallet, checker } => {
            let pallet = ctx.service.assign_checker(*pallet, *checker).await?;
            output(&pallet, flags.format)
        }
    }
}

async fn orders(
    args: &PalletOrdersArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let page_size = usize::try_from(ctx.config.general.page_size)?;
    let every = ctx.config.general.assignment_refresh();

    watch::run_or_watch(args.watch, every, || async move {
        let list = ctx.service.pallet_orders(args.search.as_deref()).await?;
        let view = PalletOrdersPage {
            page: paging::paginate(&list.orders, args.page, page_size),
            total_pallets: list.total_pallets,
            total_quantity: list.total_quantity,
        };
        output_view(&view, flags.format, render_orders_page)
    })
    .await
}

fn render_orders_page(view: &PalletOrdersPage) -> String {
    let page = &view.page;
    let mut out = list_table(&page.items);
    if page.total_pages > 1 {
        let window = page
            .window
            .iter()
            .map(|item| match item {
                paging::PageItem::Page(n) if *n == page.page => format!("[{n}]"),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("\npages: {window}"));
    }
    out.push_str(&format!(
        "\nshowing {}-{} of {} orders, {} pallets, {} bales",
        page.from,
        page.to,
        page.total,
        view.total_pallets,
        quantity(view.total_quantity)
    ));
    out
}

fn render_assignment(view: &PalletAssignmentView) -> String {
    let title = format!(
        "Order {}: {} assigned, {} unassigned, {}/{} lines checked ({})",
        view.order_id,
        view.assigned,
        view.unassigned,
        view.order_checked_lines,
        view.order_total_lines,
        pct(view.order_percent)
    );
    let mut out = section(&title, &list_table(&view.pallets));
    out.push_str(&format!(
        "totals: {} bales, {} skus",
        quantity(view.total_bales),
        view.total_skus
    ));
    out
}

fn render_detail(detail: &PalletDetail) -> String {
    let mut out = section(
        &format!("Order {} pallet {}", detail.order_id, detail.pallet_no),
        &list_table(&detail.lines),
    );
    out.push_str(&format!(
        "totals: {} requested, {} confirmed",
        quantity(detail.total_quantity),
        quantity(detail.total_confirmed)
    ));
    out
}
