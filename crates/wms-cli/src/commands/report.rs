use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use serde::Serialize;
use wms_core::entities::{DayReport, PickerProductivity, ProductivityReport};
use wms_core::enums::Permission;
use wms_db::repos::reports::{csv_file_name, export_productivity_csv};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ExportArgs, PickersArgs, ReportCommands};
use crate::commands::shared::{dates, watch};
use crate::context::AppContext;
use crate::output::{list_table, output, output_view, quantity, section};

#[derive(Serialize)]
struct ExportResponse {
    path: String,
    rows: usize,
}

/// Handle `wms report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_permission(Permission::OrderReports).await?;

    match action {
        ReportCommands::Today => {
            let report = ctx.service.day_report(dates::today()).await?;
            output_view(&report, flags.format, render_day)
        }
        ReportCommands::Pickers(args) => pickers(args, ctx, flags).await,
        ReportCommands::Export(args) => export(args, ctx, flags).await,
    }
}

async fn pickers(args: &PickersArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (from, to) = dates::resolve_range(&args.range, dates::today());
    watch::run_or_watch(args.watch, ctx.config.general.report_refresh(), || async move {
        let report = ctx.service.picker_productivity(from, to).await?;
        output_view(&report, flags.format, render_productivity)
    })
    .await
}

async fn export(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (from, to) = dates::resolve_range(&args.range, dates::today());
    let report = ctx.service.picker_productivity(from, to).await?;

    let path = write_export(args.out.as_deref(), from, to, &report.rows)?;
    tracing::info!(path = %path.display(), rows = report.rows.len(), "productivity exported");

    output(
        &ExportResponse {
            path: path.display().to_string(),
            rows: report.rows.len(),
        },
        flags.format,
    )
}

/// Write the CSV for `rows`. An empty range writes nothing.
fn write_export(
    dir: Option<&Path>,
    from: NaiveDate,
    to: NaiveDate,
    rows: &[PickerProductivity],
) -> anyhow::Result<PathBuf> {
    if rows.is_empty() {
        bail!("no data to export: no sheets were prepared between {from} and {to}");
    }
    let path = export_path(dir, from, to);
    std::fs::write(&path, export_productivity_csv(rows))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn export_path(dir: Option<&Path>, from: NaiveDate, to: NaiveDate) -> PathBuf {
    dir.unwrap_or_else(|| Path::new("."))
        .join(csv_file_name(from, to))
}

fn render_day(report: &DayReport) -> String {
    section(
        &format!("Orders on {}", report.date),
        &format!(
            "pending today:   {}\nin preparation:  {}\nprepared today:  {}",
            report.pending_today, report.in_preparation, report.prepared_today
        ),
    )
}

fn render_productivity(report: &ProductivityReport) -> String {
    let totals = &report.totals;
    let mut out = section(
        &format!("Picker productivity {} to {}", report.from, report.to),
        &list_table(&report.rows),
    );
    out.push_str(&format!(
        "totals: {} pickers, {} sheets, {} skus, {} bales, {} orders",
        totals.pickers,
        totals.sheets,
        totals.skus,
        quantity(totals.bales),
        totals.orders
    ));
    out
}
