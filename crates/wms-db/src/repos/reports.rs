//! Day counters and picker productivity, with CSV export.

use std::fmt::Write as _;

use chrono::NaiveDate;
use tracing::debug;
use wms_core::entities::{DayReport, PickerProductivity, ProductivityReport, ProductivityTotals};
use wms_core::enums::OrderStatus;

use crate::error::DatabaseError;
use crate::helpers::{format_date, get_number, query_count};
use crate::service::WmsService;

pub const CSV_HEADER: &str = "Preparador,Total Hojas,Total SKUs,Total Fardos,Total Pedidos";

/// Sheets each picker touched in the range, one row per (picker, order, sheet).
const PRODUCTIVITY_SQL: &str = "
SELECT g.picker,
       COALESCE(
           NULLIF(TRIM(u.NombreCompleto), ''),
           NULLIF(TRIM(COALESCE(u.Nombres, '') || ' ' || COALESCE(u.Apellidos, '')), ''),
           g.picker
       ) AS name,
       COUNT(*) AS sheets,
       SUM(g.skus) AS skus,
       TOTAL(g.bales) AS bales,
       SUM(g.orders) AS orders
FROM (
    SELECT CAST(d.IdUsuariopreparo AS TEXT) AS picker,
           d.IdConsolidado,
           d.NoHoja,
           COUNT(DISTINCT d.UPCProducto) AS skus,
           TOTAL(d.Cantidad) AS bales,
           1 AS orders
    FROM detallepedidostienda_bodega d
    WHERE date(d.Fechahorapreparo) BETWEEN ?1 AND ?2
      AND d.IdUsuariopreparo IS NOT NULL
      AND CAST(d.IdUsuariopreparo AS TEXT) NOT IN ('', '0')
    GROUP BY d.IdUsuariopreparo, d.IdConsolidado, d.NoHoja
) g
LEFT JOIN usuarios u ON CAST(u.Id AS TEXT) = g.picker
GROUP BY g.picker
ORDER BY sheets DESC, name ASC";

impl WmsService {
    /// Order counters for the reports header.
    pub async fn day_report(&self, today: NaiveDate) -> Result<DayReport, DatabaseError> {
        let conn = self.db().conn();
        let day = format_date(today);

        let pending_today = query_count(
            conn,
            "SELECT COUNT(*) FROM pedidostienda_bodega WHERE Estado = ?1 AND date(Fecha) = ?2",
            libsql::params![OrderStatus::Pending.code(), day.as_str()],
        )
        .await?;
        let in_preparation = query_count(
            conn,
            "SELECT COUNT(*) FROM pedidostienda_bodega WHERE Estado = ?1 AND Nohojas > 0",
            [OrderStatus::InPreparation.code()],
        )
        .await?;
        let prepared_today = query_count(
            conn,
            "SELECT COUNT(*) FROM pedidostienda_bodega WHERE Estado = ?1 AND date(Fecha) = ?2",
            libsql::params![OrderStatus::Prepared.code(), day.as_str()],
        )
        .await?;

        Ok(DayReport {
            date: today,
            pending_today,
            in_preparation,
            prepared_today,
        })
    }

    /// Sheets, SKUs, bales and orders prepared per picker between `from`
    /// and `to` inclusive.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when `from` is after `to`.
    pub async fn picker_productivity(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ProductivityReport, DatabaseError> {
        if from > to {
            return Err(DatabaseError::validation(format!(
                "start date {from} is after end date {to}"
            )));
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                PRODUCTIVITY_SQL,
                libsql::params![format_date(from), format_date(to)],
            )
            .await?;
        let mut report_rows = Vec::new();
        while let Some(row) = rows.next().await? {
            report_rows.push(PickerProductivity {
                picker_id: row.get(0)?,
                picker_name: row.get(1)?,
                sheets: row.get(2)?,
                skus: row.get(3)?,
                bales: get_number(&row, 4)?,
                orders: row.get(5)?,
            });
        }
        debug!(%from, %to, pickers = report_rows.len(), "computed picker productivity");

        Ok(ProductivityReport {
            from,
            to,
            totals: ProductivityTotals::from_rows(&report_rows),
            rows: report_rows,
        })
    }
}

/// Render productivity rows as CSV with a UTF-8 BOM so spreadsheet tools
/// pick up the accents in names.
#[must_use]
pub fn export_productivity_csv(rows: &[PickerProductivity]) -> String {
    let mut out = String::from('\u{feff}');
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let _ = writeln!(
            out,
            "\"{}\",{},{},{},{}",
            row.picker_name.replace('"', "\"\""),
            row.sheets,
            row.skus,
            row.bales,
            row.orders
        );
    }
    out
}

#[must_use]
pub fn csv_file_name(from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "Reporte_Preparadores_{}_{}.csv",
        format_date(from),
        format_date(to)
    )
}
