use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use wms_core::elapsed;
use wms_core::entities::{ActivityEntry, DashboardStats, PickerWorkload};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WatchArgs;
use crate::commands::shared::{dates, watch};
use crate::context::AppContext;
use crate::output::{list_table, output_view, rows_table, section};

#[derive(Serialize)]
struct DashboardView {
    stats: DashboardStats,
    recent_activity: Vec<ActivityEntry>,
    active_pickers: Vec<PickerWorkload>,
}

/// Handle `wms dashboard`. Any logged-in user may view it.
pub async fn handle(args: &WatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?;
    let limit = ctx.config.general.default_limit;

    watch::run_or_watch(args.watch, ctx.config.general.dashboard_refresh(), || async move {
        let view = DashboardView {
            stats: ctx.service.dashboard_stats(dates::today()).await?,
            recent_activity: ctx.service.recent_activity(limit).await?,
            active_pickers: ctx.service.active_pickers(limit).await?,
        };
        output_view(&view, flags.format, |view| {
            render_dashboard(view, Local::now().naive_local())
        })
    })
    .await
}

fn render_dashboard(view: &DashboardView, now: NaiveDateTime) -> String {
    let stats = &view.stats;
    let summary = rows_table(
        &["metric", "value"],
        &[
            vec![String::from("active orders"), stats.active_orders.to_string()],
            vec![
                String::from("completed today"),
                format!(
                    "{} ({} vs yesterday)",
                    stats.completed_today,
                    signed_pct(stats.completed_change_pct)
                ),
            ],
            vec![String::from("pending"), stats.pending.to_string()],
            vec![String::from("active pickers"), stats.active_pickers.to_string()],
        ],
    );

    let activity = view
        .recent_activity
        .iter()
        .map(|entry| activity_row(entry, now))
        .collect::<Vec<_>>();

    [
        section("Summary", &summary),
        section(
            "Recent activity",
            &rows_table(&["order", "status", "when"], &activity),
        ),
        section("Active pickers", &list_table(&view.active_pickers)),
    ]
    .join("\n")
}

fn activity_row(entry: &ActivityEntry, now: NaiveDateTime) -> Vec<String> {
    vec![
        format!("#{}", entry.order_id),
        entry.status_name.clone(),
        elapsed::since(entry.date, now),
    ]
}

fn signed_pct(value: i64) -> String {
    if value > 0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use wms_core::entities::{ActivityEntry, DashboardStats};
    use wms_core::enums::OrderStatus;

    use super::{DashboardView, render_dashboard, signed_pct};

    #[test]
    fn change_is_signed() {
        assert_eq!(signed_pct(25), "+25%");
        assert_eq!(signed_pct(0), "0%");
        assert_eq!(signed_pct(-50), "-50%");
    }

    #[test]
    fn dashboard_lists_sections_and_elapsed_activity() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let view = DashboardView {
            stats: DashboardStats {
                active_orders: 3,
                completed_today: 5,
                completed_yesterday: 4,
                pending: 2,
                active_pickers: 1,
                completed_change_pct: 25,
            },
            recent_activity: vec![ActivityEntry {
                order_id: 42,
                date: at,
                status: OrderStatus::InPreparation,
                status_name: String::from("En preparación"),
            }],
            active_pickers: Vec::new(),
        };

        let out = render_dashboard(&view, at + chrono::Duration::minutes(5));
        assert!(out.contains("Summary"));
        assert!(out.contains("5 (+25% vs yesterday)"));
        assert!(out.contains("#42"));
        assert!(out.contains(&wms_core::elapsed::humanize(300)));
        assert!(out.contains("Active pickers\n(no rows)"));
    }
}
