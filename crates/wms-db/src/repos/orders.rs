//! Order listings for sheet assignment and the start-preparation workflow.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use wms_core::entities::{PendingOrder, PreparingOrder, StartOrderOutcome};
use wms_core::enums::OrderStatus;
use wms_core::errors::CoreError;
use wms_core::progress::percent;
use wms_core::sheets::{self, LineLocation, OrderLine};

use crate::error::DatabaseError;
use crate::helpers::{get_datetime, get_number, get_opt_id, get_opt_string};
use crate::service::WmsService;

impl WmsService {
    /// Orders waiting for preparation, oldest first.
    pub async fn pending_orders(&self) -> Result<Vec<PendingOrder>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT IdPedidos, Fecha, NombreEmpresa, TotalCantidad, Departamento
                 FROM pedidostienda_bodega
                 WHERE Estado = ?1
                 ORDER BY Fecha ASC, IdPedidos ASC",
                [OrderStatus::Pending.code()],
            )
            .await?;

        let mut orders = Vec::new();
        while let Some(row) = rows.next().await? {
            orders.push(PendingOrder {
                id: row.get(0)?,
                date: get_datetime(&row, 1)?,
                company: row.get(2)?,
                total_quantity: get_number(&row, 3)?,
                department_id: get_opt_id(&row, 4)?,
            });
        }
        Ok(orders)
    }

    /// Orders in preparation with line and sheet progress, newest first.
    pub async fn preparing_orders(&self) -> Result<Vec<PreparingOrder>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.IdPedidos, p.Fecha, p.NombreEmpresa, p.TotalCantidad, d.Nombre, p.Nohojas,
                        (SELECT COUNT(*) FROM detallepedidostienda_bodega x
                          WHERE x.IdConsolidado = p.IdPedidos),
                        (SELECT COUNT(*) FROM detallepedidostienda_bodega x
                          WHERE x.IdConsolidado = p.IdPedidos AND x.EstadoPreparacionproducto > 0),
                        (SELECT COUNT(*) FROM PreparacionPedidos s
                          WHERE s.IdPedido = p.IdPedidos
                            AND s.FechaHoraInicio IS NOT NULL AND s.FechaHorafinalizo IS NULL)
                 FROM pedidostienda_bodega p
                 LEFT JOIN departamentos d ON p.Departamento = d.Id
                 WHERE p.Estado = ?1
                 ORDER BY p.Fecha DESC, p.IdPedidos DESC",
                [OrderStatus::InPreparation.code()],
            )
            .await?;

        let mut orders = Vec::new();
        while let Some(row) = rows.next().await? {
            let total_lines = row.get::<Option<i64>>(6)?.unwrap_or(0);
            let prepared_lines = row.get::<Option<i64>>(7)?.unwrap_or(0);
            orders.push(PreparingOrder {
                id: row.get(0)?,
                date: get_datetime(&row, 1)?,
                company: row.get(2)?,
                total_quantity: get_number(&row, 3)?,
                department: get_opt_string(&row, 4)?.unwrap_or_default(),
                sheet_count: row.get::<Option<i64>>(5)?.unwrap_or(0),
                total_lines,
                prepared_lines,
                sheets_in_progress: row.get::<Option<i64>>(8)?.unwrap_or(0),
                percent: percent(prepared_lines, total_lines),
            });
        }
        Ok(orders)
    }

    /// Move an order into preparation and, on first start, split its lines
    /// into sheets.
    ///
    /// Runs as one transaction: status change, line numbering, sheet rows
    /// and the paginated flag commit together or not at all. Starting an
    /// order that is already in preparation only re-asserts the status.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if the order does not exist
    /// - `CoreError::InvalidTransition` if it is prepared or completed
    /// - `CoreError::Validation` if `sheet_size` is zero
    pub async fn start_order(
        &self,
        order_id: i64,
        sheet_size: usize,
    ) -> Result<StartOrderOutcome, DatabaseError> {
        if sheet_size == 0 {
            return Err(DatabaseError::validation("sheet size must be greater than zero"));
        }

        let tx = self.db().conn().transaction().await?;
        match start_order_in(&tx, order_id, sheet_size).await {
            Ok(outcome) => {
                tx.commit().await?;
                info!(
                    order_id,
                    sheets = outcome.sheets.len(),
                    already_paginated = outcome.already_paginated,
                    "order started"
                );
                Ok(outcome)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(order_id, %rollback_err, "rollback after failed start");
                }
                warn!(order_id, %err, "order start rolled back");
                Err(err)
            }
        }
    }
}

async fn start_order_in(
    conn: &libsql::Connection,
    order_id: i64,
    sheet_size: usize,
) -> Result<StartOrderOutcome, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT Estado, Paginado, NombreEmpresa FROM pedidostienda_bodega WHERE IdPedidos = ?1",
            [order_id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("order", order_id))?;
    let status = OrderStatus::from_code(row.get(0)?)?;
    let paginated = row.get::<Option<i64>>(1)?.unwrap_or(0) != 0;
    let company: String = row.get(2)?;
    drop(rows);

    if !matches!(status, OrderStatus::Pending | OrderStatus::InPreparation) {
        return Err(CoreError::InvalidTransition {
            entity_type: "order".to_string(),
            id: order_id.to_string(),
            from: status.to_string(),
            to: OrderStatus::InPreparation.to_string(),
        }
        .into());
    }

    conn.execute(
        "UPDATE pedidostienda_bodega SET Estado = ?1 WHERE IdPedidos = ?2",
        libsql::params![OrderStatus::InPreparation.code(), order_id],
    )
    .await?;

    if paginated {
        debug!(order_id, "order already paginated");
        return Ok(StartOrderOutcome {
            order_id,
            sheets: Vec::new(),
            already_paginated: true,
        });
    }

    let lines = load_order_lines(conn, order_id).await?;
    let planned = sheets::plan_sheets(&lines, sheet_size)?;
    let summary = sheets::summarize(&planned, &lines);

    for line in &planned {
        conn.execute(
            "UPDATE detallepedidostienda_bodega
             SET NoHoja = ?1, IdUbicacionBodega = COALESCE(?2, IdUbicacionBodega)
             WHERE Id = ?3",
            libsql::params![line.sheet_no, line.location_id, line.line_id],
        )
        .await?;
    }

    for sheet in &summary {
        conn.execute(
            "INSERT INTO PreparacionPedidos (IdPedido, NoHoja, Sucursal, TotalSKUs, TotalFardos)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![order_id, sheet.sheet_no, company.as_str(), sheet.skus, sheet.bales],
        )
        .await?;
    }

    conn.execute(
        "UPDATE pedidostienda_bodega SET Paginado = 1, Nohojas = ?1 WHERE IdPedidos = ?2",
        libsql::params![sheets::sheet_count(&planned), order_id],
    )
    .await?;

    Ok(StartOrderOutcome {
        order_id,
        sheets: summary,
        already_paginated: false,
    })
}

/// Lines of an order with the warehouse location of their product.
///
/// A package that maps to several products yields several rows; the
/// lowest (level, location id) wins.
async fn load_order_lines(
    conn: &libsql::Connection,
    order_id: i64,
) -> Result<Vec<OrderLine>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT d.Id, d.Cantidad, u.Id, u.Nivel
             FROM detallepedidostienda_bodega d
             LEFT JOIN productospaquetes pp ON pp.UPCPaquete = d.UPC
             LEFT JOIN productos pr ON pr.Upc = pp.Upc
             LEFT JOIN ubicacionesbodega u ON u.Id = pr.IdUbicacionBodega
             WHERE d.IdConsolidado = ?1
             ORDER BY d.Id ASC, u.Id IS NULL, u.Nivel ASC, u.Id ASC",
            [order_id],
        )
        .await?;

    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    while let Some(row) = rows.next().await? {
        let id: i64 = row.get(0)?;
        if !seen.insert(id) {
            continue;
        }
        let location = match (row.get::<Option<i64>>(2)?, row.get::<Option<i64>>(3)?) {
            (Some(loc_id), level) => Some(LineLocation {
                id: loc_id,
                level: level.unwrap_or(0),
            }),
            (None, _) => None,
        };
        lines.push(OrderLine {
            id,
            quantity: get_number(&row, 1)?,
            location,
        });
    }
    debug!(order_id, lines = lines.len(), "loaded order lines for planning");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wms_core::errors::CoreError;
    use wms_core::sheets::SheetSummary;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::{exec, scalar_i64, seeded_service};

    #[tokio::test]
    async fn pending_orders_oldest_first() {
        let svc = seeded_service().await;
        let ids: Vec<i64> = svc
            .pending_orders()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![101, 100]);
    }

    #[tokio::test]
    async fn preparing_orders_carry_progress() {
        let svc = seeded_service().await;
        let orders = svc.preparing_orders().await.unwrap();
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![102, 107]);

        let norte = &orders[0];
        assert_eq!(norte.department, "Abarrotes");
        assert_eq!(norte.sheet_count, 2);
        assert_eq!(norte.total_lines, 4);
        assert_eq!(norte.prepared_lines, 3);
        assert_eq!(norte.sheets_in_progress, 1);
        assert_eq!(norte.percent, 75);

        let paiz = &orders[1];
        assert_eq!(paiz.department, "");
        assert_eq!(paiz.total_lines, 0);
        assert_eq!(paiz.percent, 0);
    }

    #[tokio::test]
    async fn preparing_orders_tolerate_null_sheet_count() {
        let svc = seeded_service().await;
        exec(&svc, "UPDATE pedidostienda_bodega SET Nohojas = NULL WHERE IdPedidos = 107;").await;
        let orders = svc.preparing_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].id, 107);
        assert_eq!(orders[1].sheet_count, 0);
    }

    #[tokio::test]
    async fn start_order_paginates_lines_into_sheets() {
        let svc = seeded_service().await;
        let outcome = svc.start_order(100, 2).await.unwrap();

        assert!(!outcome.already_paginated);
        assert_eq!(
            outcome.sheets,
            vec![
                SheetSummary {
                    sheet_no: 1,
                    skus: 2,
                    bales: 25.0,
                },
                SheetSummary {
                    sheet_no: 2,
                    skus: 2,
                    bales: 15.0,
                },
                SheetSummary {
                    sheet_no: 3,
                    skus: 1,
                    bales: 1.0,
                },
            ]
        );

        let sheet_of = |id: i64| {
            format!("SELECT NoHoja FROM detallepedidostienda_bodega WHERE Id = {id}")
        };
        assert_eq!(scalar_i64(&svc, &sheet_of(1011)).await, 1);
        assert_eq!(scalar_i64(&svc, &sheet_of(1012)).await, 1);
        assert_eq!(scalar_i64(&svc, &sheet_of(1010)).await, 2);
        assert_eq!(scalar_i64(&svc, &sheet_of(1013)).await, 2);
        assert_eq!(scalar_i64(&svc, &sheet_of(1014)).await, 3);
        assert_eq!(
            scalar_i64(
                &svc,
                "SELECT IdUbicacionBodega FROM detallepedidostienda_bodega WHERE Id = 1010"
            )
            .await,
            2
        );

        assert_eq!(
            scalar_i64(
                &svc,
                "SELECT Estado * 100 + Paginado * 10 + Nohojas FROM pedidostienda_bodega WHERE IdPedidos = 100"
            )
            .await,
            513
        );
        assert_eq!(
            scalar_i64(&svc, "SELECT COUNT(*) FROM PreparacionPedidos WHERE IdPedido = 100").await,
            3
        );
    }

    #[tokio::test]
    async fn default_sheet_size_keeps_small_order_on_one_sheet() {
        let svc = seeded_service().await;
        let outcome = svc.start_order(100, 25).await.unwrap();
        assert_eq!(outcome.sheets.len(), 1);
        assert_eq!(outcome.sheets[0].skus, 5);
        assert!((outcome.sheets[0].bales - 41.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn order_without_lines_is_paginated_with_zero_sheets() {
        let svc = seeded_service().await;
        let outcome = svc.start_order(101, 25).await.unwrap();
        assert!(outcome.sheets.is_empty());
        assert_eq!(
            scalar_i64(
                &svc,
                "SELECT Estado * 100 + Paginado * 10 + Nohojas FROM pedidostienda_bodega WHERE IdPedidos = 101"
            )
            .await,
            510
        );
    }

    #[tokio::test]
    async fn restarting_is_idempotent() {
        let svc = seeded_service().await;
        svc.start_order(100, 25).await.unwrap();
        let again = svc.start_order(100, 25).await.unwrap();
        assert!(again.already_paginated);
        assert!(again.sheets.is_empty());
        assert_eq!(
            scalar_i64(&svc, "SELECT COUNT(*) FROM PreparacionPedidos WHERE IdPedido = 100").await,
            1
        );
    }

    #[tokio::test]
    async fn prepared_and_completed_orders_cannot_start() {
        let svc = seeded_service().await;
        for id in [103, 104] {
            let err = svc.start_order(id, 25).await.unwrap_err();
            assert!(
                matches!(err, DatabaseError::Core(CoreError::InvalidTransition { .. })),
                "order {id}: {err}"
            );
        }
        assert_eq!(
            scalar_i64(&svc, "SELECT Estado FROM pedidostienda_bodega WHERE IdPedidos = 103").await,
            6
        );
    }

    #[tokio::test]
    async fn package_in_two_locations_plans_one_line() {
        let svc = seeded_service().await;
        // PK1 now also maps to a product stored at B-1 (level 1).
        exec(
            &svc,
            "INSERT INTO productos (Upc, Descripcion, IdUbicacionBodega) VALUES ('P5', 'Arroz 5kg', 3);
             INSERT INTO productospaquetes (UPCPaquete, Upc) VALUES ('PK1', 'P5');",
        )
        .await;

        let outcome = svc.start_order(100, 2).await.unwrap();
        assert_eq!(outcome.sheets.len(), 3);
        assert_eq!(outcome.sheets.iter().map(|s| s.skus).sum::<i64>(), 5);
        assert!((outcome.sheets.iter().map(|s| s.bales).sum::<f64>() - 41.0).abs() < f64::EPSILON);
        assert_eq!(
            scalar_i64(
                &svc,
                "SELECT IdUbicacionBodega FROM detallepedidostienda_bodega WHERE Id = 1010"
            )
            .await,
            3
        );
        assert_eq!(
            scalar_i64(&svc, "SELECT Nohojas FROM pedidostienda_bodega WHERE IdPedidos = 100").await,
            3
        );
    }

    #[tokio::test]
    async fn status_outside_workflow_cannot_start() {
        let svc = seeded_service().await;
        exec(&svc, "UPDATE pedidostienda_bodega SET Estado = 3 WHERE IdPedidos = 100;").await;
        assert!(matches!(
            svc.start_order(100, 25).await,
            Err(DatabaseError::Core(CoreError::Validation(_)))
        ));
        assert_eq!(
            scalar_i64(&svc, "SELECT Estado FROM pedidostienda_bodega WHERE IdPedidos = 100").await,
            3
        );
        assert_eq!(
            scalar_i64(&svc, "SELECT COUNT(*) FROM PreparacionPedidos WHERE IdPedido = 100").await,
            0
        );
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let svc = seeded_service().await;
        assert!(matches!(
            svc.start_order(999, 25).await,
            Err(DatabaseError::Core(CoreError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn zero_sheet_size_is_rejected_before_touching_rows() {
        let svc = seeded_service().await;
        assert!(matches!(
            svc.start_order(100, 0).await,
            Err(DatabaseError::Core(CoreError::Validation(_)))
        ));
        assert_eq!(
            scalar_i64(&svc, "SELECT Estado FROM pedidostienda_bodega WHERE IdPedidos = 100").await,
            4
        );
    }

    #[tokio::test]
    async fn failure_mid_start_rolls_everything_back() {
        let svc = seeded_service().await;
        // A stale sheet row makes the sheet insert hit UNIQUE (IdPedido, NoHoja).
        exec(
            &svc,
            "INSERT INTO PreparacionPedidos (IdPedido, NoHoja, Sucursal) VALUES (100, 1, 'stale')",
        )
        .await;

        assert!(svc.start_order(100, 25).await.is_err());

        assert_eq!(
            scalar_i64(&svc, "SELECT Estado FROM pedidostienda_bodega WHERE IdPedidos = 100").await,
            4
        );
        assert_eq!(
            scalar_i64(
                &svc,
                "SELECT COUNT(*) FROM detallepedidostienda_bodega WHERE IdConsolidado = 100 AND NoHoja IS NOT NULL"
            )
            .await,
            0
        );
        assert_eq!(
            scalar_i64(&svc, "SELECT Paginado FROM pedidostienda_bodega WHERE IdPedidos = 100").await,
            0
        );
    }
}
