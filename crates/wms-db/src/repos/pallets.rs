//! Pallet (tarima) assignment to checkers.

use tracing::{debug, info};
use wms_core::entities::{
    Operator, Pallet, PalletAssignmentView, PalletDetail, PalletLine, PalletOrder,
    PalletOrderList,
};
use wms_core::enums::{LINE_CHECKED, OrderStatus, UserLevel};
use wms_core::progress::percent;
use wms_core::search;

use crate::error::DatabaseError;
use crate::helpers::{get_datetime, get_number, get_opt_datetime, get_opt_id, get_opt_string};
use crate::service::WmsService;

/// Shortest checker search term that returns results.
pub const MIN_CHECKER_SEARCH: usize = 2;

const PALLET_COLS: &str = "t.IdTarima, t.IdPedido, t.NoTarima, t.FechaCreacion, \
    t.FechaFinalizacion, t.CantidadFardos, t.CantidadSkus, t.IdUsuarioChequeo, u.NombreCompleto, \
    t.FechaHoraInicio, t.FechaHoraFin, \
    (SELECT COUNT(*) FROM detallepedidostienda_bodega d \
      WHERE d.IdConsolidado = t.IdPedido AND d.NoTarima = t.NoTarima), \
    (SELECT COUNT(*) FROM detallepedidostienda_bodega d \
      WHERE d.IdConsolidado = t.IdPedido AND d.NoTarima = t.NoTarima \
        AND d.EstadoPreparacionproducto = ?1)";

const FROM_PALLETS: &str =
    "FROM TarimasInventario t LEFT JOIN usuarios u ON u.Id = t.IdUsuarioChequeo";

fn row_to_pallet(row: &libsql::Row) -> Result<Pallet, DatabaseError> {
    let total_lines = row.get::<Option<i64>>(11)?.unwrap_or(0);
    let checked_lines = row.get::<Option<i64>>(12)?.unwrap_or(0);
    Ok(Pallet {
        id: row.get(0)?,
        order_id: row.get(1)?,
        pallet_no: row.get(2)?,
        created_at: get_opt_datetime(row, 3)?,
        finalized_at: get_opt_datetime(row, 4)?,
        bales: get_number(row, 5)?,
        skus: row.get::<Option<i64>>(6)?.unwrap_or(0),
        checker_id: get_opt_id(row, 7)?,
        checker_name: get_opt_string(row, 8)?,
        check_started_at: get_opt_datetime(row, 9)?,
        check_finished_at: get_opt_datetime(row, 10)?,
        total_lines,
        checked_lines,
        percent: percent(checked_lines, total_lines),
    })
}

impl WmsService {
    /// Orders whose sheets are out, newest first, optionally narrowed by a
    /// fuzzy match on the company name.
    pub async fn pallet_orders(
        &self,
        search_term: Option<&str>,
    ) -> Result<PalletOrderList, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.IdPedidos, p.Fecha, p.Estado, e.EstadoPedido, p.NombreEmpresa,
                        p.TotalCantidad, p.CantTarimas,
                        (SELECT COUNT(*) FROM detallepedidostienda_bodega d
                          WHERE d.IdConsolidado = p.IdPedidos),
                        (SELECT COUNT(*) FROM detallepedidostienda_bodega d
                          WHERE d.IdConsolidado = p.IdPedidos AND d.EstadoPreparacionproducto = ?1)
                 FROM pedidostienda_bodega p
                 LEFT JOIN estadopedidotiendabodega e ON e.IdEstado = p.Estado
                 WHERE p.Estado IN (?2, ?3) AND p.Nohojas > 0
                 ORDER BY p.Fecha DESC, p.IdPedidos DESC",
                libsql::params![
                    LINE_CHECKED,
                    OrderStatus::InPreparation.code(),
                    OrderStatus::Prepared.code()
                ],
            )
            .await?;

        let mut orders = Vec::new();
        while let Some(row) = rows.next().await? {
            let status = OrderStatus::from_code(row.get(2)?)?;
            let total_lines = row.get::<Option<i64>>(7)?.unwrap_or(0);
            let checked_lines = row.get::<Option<i64>>(8)?.unwrap_or(0);
            orders.push(PalletOrder {
                id: row.get(0)?,
                date: get_datetime(&row, 1)?,
                status,
                status_name: get_opt_string(&row, 3)?
                    .unwrap_or_else(|| status.label().to_string()),
                company: row.get(4)?,
                total_quantity: get_number(&row, 5)?,
                pallet_count: row.get::<Option<i64>>(6)?.unwrap_or(0),
                total_lines,
                checked_lines,
                percent: percent(checked_lines, total_lines),
            });
        }

        if let Some(term) = search_term {
            orders = search::filter(orders, term, |o| o.company.as_str());
        }
        debug!(count = orders.len(), "loaded pallet orders");

        Ok(PalletOrderList {
            total_orders: orders.len(),
            total_pallets: orders.iter().map(|o| o.pallet_count).sum(),
            total_quantity: orders.iter().map(|o| o.total_quantity).sum(),
            orders,
        })
    }

    /// Finalized pallets of an order whose check is not complete, with the
    /// order-wide progress.
    pub async fn pending_pallets(
        &self,
        order_id: i64,
    ) -> Result<PalletAssignmentView, DatabaseError> {
        let sql = format!(
            "SELECT {PALLET_COLS} {FROM_PALLETS}
             WHERE t.IdPedido = ?2
               AND t.FechaCreacion IS NOT NULL AND t.FechaFinalizacion IS NOT NULL
               AND (t.FechaHoraInicio IS NULL OR t.FechaHoraFin IS NULL)
             ORDER BY t.NoTarima ASC"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params![LINE_CHECKED, order_id])
            .await?;
        let mut pallets = Vec::new();
        while let Some(row) = rows.next().await? {
            pallets.push(row_to_pallet(&row)?);
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*), COUNT(CASE WHEN EstadoPreparacionproducto = ?1 THEN 1 END)
                 FROM detallepedidostienda_bodega WHERE IdConsolidado = ?2",
                libsql::params![LINE_CHECKED, order_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let order_total_lines: i64 = row.get(0)?;
        let order_checked_lines: i64 = row.get(1)?;

        let assigned = pallets.iter().filter(|p| p.checker_id.is_some()).count();
        Ok(PalletAssignmentView {
            order_id,
            order_total_lines,
            order_checked_lines,
            order_percent: percent(order_checked_lines, order_total_lines),
            assigned,
            unassigned: pallets.len() - assigned,
            total_bales: pallets.iter().map(|p| p.bales).sum(),
            total_skus: pallets.iter().map(|p| p.skus).sum(),
            pallets,
        })
    }

    pub async fn get_pallet(&self, pallet_id: i64) -> Result<Pallet, DatabaseError> {
        let sql = format!("SELECT {PALLET_COLS} {FROM_PALLETS} WHERE t.IdTarima = ?2");
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params![LINE_CHECKED, pallet_id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("pallet", pallet_id))?;
        row_to_pallet(&row)
    }

    /// Prepared lines loaded on one pallet, by description. Lines no picker
    /// has touched are left out of the lines and the totals.
    pub async fn pallet_lines(
        &self,
        order_id: i64,
        pallet_no: i64,
    ) -> Result<PalletDetail, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT d.UPC, d.Descripcion, d.Cantidad, COALESCE(d.CantConfirmada, 0),
                        u.NombreCompleto, d.Fechahorapreparo
                 FROM detallepedidostienda_bodega d
                 INNER JOIN usuarios u ON u.Id = d.IdUsuariopreparo
                 WHERE d.IdConsolidado = ?1 AND d.NoTarima = ?2
                 ORDER BY d.Descripcion ASC, d.Id ASC",
                libsql::params![order_id, pallet_no],
            )
            .await?;

        let mut lines = Vec::new();
        while let Some(row) = rows.next().await? {
            let quantity = get_number(&row, 2)?;
            let confirmed = get_number(&row, 3)?;
            lines.push(PalletLine {
                upc: get_opt_string(&row, 0)?.unwrap_or_default(),
                description: get_opt_string(&row, 1)?.unwrap_or_default(),
                quantity,
                confirmed,
                picker_name: get_opt_string(&row, 4)?,
                prepared_at: get_opt_datetime(&row, 5)?,
                difference: confirmed - quantity,
            });
        }

        Ok(PalletDetail {
            order_id,
            pallet_no,
            total_quantity: lines.iter().map(|l| l.quantity).sum(),
            total_confirmed: lines.iter().map(|l| l.confirmed).sum(),
            lines,
        })
    }

    /// Active checkers whose name matches `term`. Terms shorter than
    /// [`MIN_CHECKER_SEARCH`] characters return nothing.
    pub async fn checkers(&self, term: &str) -> Result<Vec<Operator>, DatabaseError> {
        if term.trim().chars().count() < MIN_CHECKER_SEARCH {
            return Ok(Vec::new());
        }
        let all = self.operators(UserLevel::Checker).await?;
        Ok(search::filter(all, term, |c| c.full_name.as_str()))
    }

    /// Hand a pallet to a checker.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if the pallet or user does not exist
    /// - `CoreError::Validation` if the user is not an active checker
    pub async fn assign_checker(
        &self,
        pallet_id: i64,
        checker_id: i64,
    ) -> Result<Pallet, DatabaseError> {
        let pallet = self.get_pallet(pallet_id).await?;
        let checker = self.require_operator(checker_id, UserLevel::Checker).await?;

        self.db()
            .conn()
            .execute(
                "UPDATE TarimasInventario SET IdUsuarioChequeo = ?1 WHERE IdTarima = ?2",
                libsql::params![checker.id, pallet_id],
            )
            .await?;
        info!(
            pallet_id,
            order_id = pallet.order_id,
            checker = %checker.full_name,
            "pallet assigned"
        );
        self.get_pallet(pallet_id).await
    }
}
