//! Preparation sheets: listing, picker assignment and progress.

use std::collections::HashMap;

use tracing::info;
use wms_core::entities::{Operator, PreparationSheet, SheetProgress};
use wms_core::enums::{SheetState, UserLevel};
use wms_core::progress::percent;

use crate::error::DatabaseError;
use crate::helpers::{get_number, get_opt_datetime, get_opt_id, get_opt_string};
use crate::service::WmsService;

const SELECT_COLS: &str = "s.Idpreparo, s.IdPedido, s.NoHoja, s.Sucursal, s.TotalSKUs, \
    s.TotalFardos, s.IdUsuario, u.NombreCompleto, s.FechaHoraInicio, s.FechaHorafinalizo";

const FROM_SHEETS: &str = "FROM PreparacionPedidos s LEFT JOIN usuarios u ON u.Id = s.IdUsuario";

fn row_to_sheet(row: &libsql::Row) -> Result<PreparationSheet, DatabaseError> {
    let picker_id = get_opt_id(row, 6)?;
    let started_at = get_opt_datetime(row, 8)?;
    let finished_at = get_opt_datetime(row, 9)?;
    Ok(PreparationSheet {
        id: row.get(0)?,
        order_id: row.get(1)?,
        sheet_no: row.get(2)?,
        branch: get_opt_string(row, 3)?.unwrap_or_default(),
        total_skus: row.get::<Option<i64>>(4)?.unwrap_or(0),
        total_bales: get_number(row, 5)?,
        picker_id,
        picker_name: get_opt_string(row, 7)?,
        started_at,
        finished_at,
        state: SheetState::derive(
            picker_id.is_some(),
            started_at.is_some(),
            finished_at.is_some(),
        ),
    })
}

impl WmsService {
    /// Sheets of an order, ordered by sheet number.
    pub async fn order_sheets(&self, order_id: i64) -> Result<Vec<PreparationSheet>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS} {FROM_SHEETS} WHERE s.IdPedido = ?1 ORDER BY s.NoHoja ASC"
        );
        let mut rows = self.db().conn().query(&sql, [order_id]).await?;
        let mut sheets = Vec::new();
        while let Some(row) = rows.next().await? {
            sheets.push(row_to_sheet(&row)?);
        }
        Ok(sheets)
    }

    pub async fn get_sheet(&self, sheet_id: i64) -> Result<PreparationSheet, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} {FROM_SHEETS} WHERE s.Idpreparo = ?1");
        let mut rows = self.db().conn().query(&sql, [sheet_id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("sheet", sheet_id))?;
        row_to_sheet(&row)
    }

    /// Pickers a sheet can be handed to.
    pub async fn active_pickers_for_assignment(&self) -> Result<Vec<Operator>, DatabaseError> {
        self.operators(UserLevel::Picker).await
    }

    /// Give a sheet to a picker, resetting its start and finish times.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if the sheet or user does not exist
    /// - `DatabaseError::InvalidState` if the sheet is already finished
    /// - `CoreError::Validation` if the user is not an active picker
    pub async fn assign_sheet(
        &self,
        sheet_id: i64,
        picker_id: i64,
    ) -> Result<PreparationSheet, DatabaseError> {
        let sheet = self.get_sheet(sheet_id).await?;
        if !sheet.state.can_reassign() {
            return Err(DatabaseError::InvalidState(format!(
                "sheet {} of order {} is finished and cannot be reassigned",
                sheet.sheet_no, sheet.order_id
            )));
        }
        let picker = self.require_operator(picker_id, UserLevel::Picker).await?;

        self.db()
            .conn()
            .execute(
                "UPDATE PreparacionPedidos
                 SET IdUsuario = ?1, FechaHoraInicio = NULL, FechaHorafinalizo = NULL
                 WHERE Idpreparo = ?2",
                libsql::params![picker.id, sheet_id],
            )
            .await?;
        info!(
            sheet_id,
            order_id = sheet.order_id,
            picker = %picker.full_name,
            "sheet assigned"
        );
        self.get_sheet(sheet_id).await
    }

    /// Per-sheet progress of an order.
    ///
    /// Prepared lines only count while the sheet has a picker.
    pub async fn sheet_progress(&self, order_id: i64) -> Result<Vec<SheetProgress>, DatabaseError> {
        let sheets = self.order_sheets(order_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT NoHoja, COUNT(*) FROM detallepedidostienda_bodega
                 WHERE IdConsolidado = ?1 AND EstadoPreparacionproducto > 0 AND NoHoja IS NOT NULL
                 GROUP BY NoHoja",
                [order_id],
            )
            .await?;
        let mut prepared_by_sheet = HashMap::new();
        while let Some(row) = rows.next().await? {
            prepared_by_sheet.insert(row.get::<i64>(0)?, row.get::<i64>(1)?);
        }

        Ok(sheets
            .into_iter()
            .map(|sheet| {
                let prepared_lines = if sheet.picker_id.is_some() {
                    prepared_by_sheet.get(&sheet.sheet_no).copied().unwrap_or(0)
                } else {
                    0
                };
                SheetProgress {
                    sheet_no: sheet.sheet_no,
                    picker_name: sheet.picker_name,
                    prepared_lines,
                    total_skus: sheet.total_skus,
                    total_bales: sheet.total_bales,
                    percent: percent(prepared_lines, sheet.total_skus),
                    state: sheet.state,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wms_core::enums::SheetState;
    use wms_core::errors::CoreError;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::seeded_service;

    #[tokio::test]
    async fn order_sheets_derive_state() {
        let svc = seeded_service().await;
        let sheets = svc.order_sheets(102).await.unwrap();
        assert_eq!(sheets.len(), 2);

        assert_eq!(sheets[0].id, 500);
        assert_eq!(sheets[0].picker_name.as_deref(), Some("Ana López"));
        assert_eq!(sheets[0].state, SheetState::InProgress);
        assert_eq!(sheets[0].branch, "Tienda Norte");

        assert_eq!(sheets[1].id, 501);
        assert_eq!(sheets[1].picker_id, None);
        assert_eq!(sheets[1].state, SheetState::Unassigned);

        let done = svc.order_sheets(103).await.unwrap();
        assert_eq!(done[0].state, SheetState::Finished);
    }

    #[tokio::test]
    async fn pickers_for_assignment_skip_blank_and_inactive() {
        let svc = seeded_service().await;
        let names: Vec<String> = svc
            .active_pickers_for_assignment()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.full_name)
            .collect();
        assert_eq!(names, vec!["Ana López", "Luis Ramos"]);
    }

    #[tokio::test]
    async fn assign_unassigned_sheet() {
        let svc = seeded_service().await;
        let sheet = svc.assign_sheet(501, 3).await.unwrap();
        assert_eq!(sheet.picker_id, Some(3));
        assert_eq!(sheet.picker_name.as_deref(), Some("Luis Ramos"));
        assert_eq!(sheet.state, SheetState::Assigned);
    }

    #[tokio::test]
    async fn reassigning_clears_timestamps() {
        let svc = seeded_service().await;
        let sheet = svc.assign_sheet(500, 3).await.unwrap();
        assert_eq!(sheet.started_at, None);
        assert_eq!(sheet.finished_at, None);
        assert_eq!(sheet.state, SheetState::Assigned);
    }

    #[tokio::test]
    async fn finished_sheet_cannot_be_reassigned() {
        let svc = seeded_service().await;
        let err = svc.assign_sheet(502, 2).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)), "{err}");
        let sheet = svc.get_sheet(502).await.unwrap();
        assert_eq!(sheet.picker_id, Some(9));
    }

    #[tokio::test]
    async fn only_active_pickers_can_take_sheets() {
        let svc = seeded_service().await;
        for user in [4, 5] {
            assert!(matches!(
                svc.assign_sheet(501, user).await,
                Err(DatabaseError::Core(CoreError::Validation(_)))
            ));
        }
        assert!(matches!(
            svc.assign_sheet(501, 999).await,
            Err(DatabaseError::Core(CoreError::NotFound { .. }))
        ));
        assert!(matches!(
            svc.assign_sheet(9999, 2).await,
            Err(DatabaseError::Core(CoreError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn progress_counts_lines_of_assigned_sheets() {
        let svc = seeded_service().await;
        let progress = svc.sheet_progress(102).await.unwrap();
        assert_eq!(progress.len(), 2);

        assert_eq!(progress[0].prepared_lines, 2);
        assert_eq!(progress[0].percent, 100);
        assert_eq!(progress[0].state, SheetState::InProgress);

        // Line 1004 is prepared but sheet 2 has no picker.
        assert_eq!(progress[1].prepared_lines, 0);
        assert_eq!(progress[1].percent, 0);
    }
}
