//! Home dashboard: headline counters, recent activity and picker workload.

use chrono::{Days, NaiveDate};
use tracing::debug;
use wms_core::entities::{ActivityEntry, DashboardStats, PickerWorkload};
use wms_core::enums::{OrderStatus, UserLevel};
use wms_core::progress::change_vs;

use crate::error::DatabaseError;
use crate::helpers::{format_date, get_datetime, query_count};
use crate::service::WmsService;

impl WmsService {
    /// Headline counters as of `today`.
    ///
    /// "Completed" here is status 7, matched on the order date.
    pub async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats, DatabaseError> {
        let conn = self.db().conn();
        let yesterday = today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| DatabaseError::validation(format!("no day before {today}")))?;
        let completed = OrderStatus::Completed.code();

        let active_orders = query_count(
            conn,
            "SELECT COUNT(*) FROM pedidostienda_bodega WHERE Estado IN (?1, ?2, ?3)",
            libsql::params![
                OrderStatus::ACTIVE[0].code(),
                OrderStatus::ACTIVE[1].code(),
                OrderStatus::ACTIVE[2].code()
            ],
        )
        .await?;
        let completed_today = query_count(
            conn,
            "SELECT COUNT(*) FROM pedidostienda_bodega WHERE Estado = ?1 AND date(Fecha) = ?2",
            libsql::params![completed, format_date(today)],
        )
        .await?;
        let completed_yesterday = query_count(
            conn,
            "SELECT COUNT(*) FROM pedidostienda_bodega WHERE Estado = ?1 AND date(Fecha) = ?2",
            libsql::params![completed, format_date(yesterday)],
        )
        .await?;
        let pending = query_count(
            conn,
            "SELECT COUNT(*) FROM pedidostienda_bodega WHERE Estado = ?1",
            [OrderStatus::Pending.code()],
        )
        .await?;
        let active_pickers = query_count(
            conn,
            "SELECT COUNT(*) FROM usuarios WHERE IdNivel = ?1 AND Activo = 1",
            [UserLevel::Picker.code()],
        )
        .await?;

        debug!(active_orders, completed_today, pending, "dashboard stats loaded");
        Ok(DashboardStats {
            active_orders,
            completed_today,
            completed_yesterday,
            pending,
            active_pickers,
            completed_change_pct: change_vs(completed_yesterday, completed_today),
        })
    }

    /// Latest orders in any workflow status, newest first.
    pub async fn recent_activity(&self, limit: u32) -> Result<Vec<ActivityEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.IdPedidos, p.Fecha, p.Estado, e.EstadoPedido
                 FROM pedidostienda_bodega p
                 LEFT JOIN estadopedidotiendabodega e ON p.Estado = e.IdEstado
                 WHERE p.Estado IN (4, 5, 6, 7)
                 ORDER BY p.Fecha DESC, p.IdPedidos DESC
                 LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            let status = OrderStatus::from_code(row.get(2)?)?;
            entries.push(ActivityEntry {
                order_id: row.get(0)?,
                date: get_datetime(&row, 1)?,
                status,
                status_name: row
                    .get::<Option<String>>(3)?
                    .unwrap_or_else(|| status.label().to_string()),
            });
        }
        Ok(entries)
    }

    /// Active pickers with the number of in-preparation/prepared orders
    /// attributed to their username, busiest first.
    pub async fn active_pickers(&self, limit: u32) -> Result<Vec<PickerWorkload>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT u.Id, COALESCE(u.NombreCompleto, ''), u.Usuario,
                        (SELECT COUNT(*) FROM pedidostienda_bodega p
                          WHERE p.Estado IN (5, 6) AND p.NombreUsuario = u.Usuario) AS active_orders
                 FROM usuarios u
                 WHERE u.IdNivel = ?1 AND u.Activo = 1
                 ORDER BY active_orders DESC, u.NombreCompleto ASC
                 LIMIT ?2",
                libsql::params![UserLevel::Picker.code(), i64::from(limit)],
            )
            .await?;

        let mut pickers = Vec::new();
        while let Some(row) = rows.next().await? {
            let active_orders: i64 = row.get(3)?;
            pickers.push(PickerWorkload {
                id: row.get(0)?,
                full_name: row.get(1)?,
                username: row.get(2)?,
                active_orders,
                working: active_orders > 0,
            });
        }
        Ok(pickers)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wms_core::entities::DashboardStats;
    use wms_core::enums::OrderStatus;

    use crate::test_support::helpers::{exec, seeded_service, test_service, today};

    #[tokio::test]
    async fn stats_match_seed() {
        let svc = seeded_service().await;
        let stats = svc.dashboard_stats(today()).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                active_orders: 5,
                completed_today: 1,
                completed_yesterday: 1,
                pending: 2,
                active_pickers: 4,
                completed_change_pct: 0,
            }
        );
    }

    #[tokio::test]
    async fn change_is_full_when_yesterday_was_empty() {
        let svc = seeded_service().await;
        exec(&svc, "UPDATE pedidostienda_bodega SET Estado = 6 WHERE IdPedidos = 105").await;
        let stats = svc.dashboard_stats(today()).await.unwrap();
        assert_eq!(stats.completed_yesterday, 0);
        assert_eq!(stats.completed_change_pct, 100);
    }

    #[tokio::test]
    async fn empty_database_is_all_zero() {
        let svc = test_service().await;
        let stats = svc.dashboard_stats(today()).await.unwrap();
        assert_eq!(stats.active_orders, 0);
        assert_eq!(stats.completed_change_pct, 0);
        assert!(svc.recent_activity(10).await.unwrap().is_empty());
        assert!(svc.active_pickers(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_activity_is_newest_first() {
        let svc = seeded_service().await;
        let entries = svc.recent_activity(3).await.unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.order_id).collect();
        assert_eq!(ids, vec![103, 100, 102]);
        assert_eq!(entries[0].status, OrderStatus::Prepared);
        assert_eq!(entries[0].status_name, "Preparado");
    }

    #[tokio::test]
    async fn busiest_picker_comes_first() {
        let svc = seeded_service().await;
        let pickers = svc.active_pickers(10).await.unwrap();
        assert_eq!(pickers.len(), 4);
        assert_eq!(pickers[0].username, "ana");
        assert_eq!(pickers[0].active_orders, 2);
        assert!(pickers[0].working);
        assert!(pickers[1..].iter().all(|p| !p.working));
    }
}
