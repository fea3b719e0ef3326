//! # wms-db
//!
//! libSQL access layer for the warehouse client.
//!
//! The schema is owned by the warehouse system; this crate only reads and
//! updates it. For local databases and tests an SQLite-dialect copy of the
//! tables is embedded and applied on open (`database.apply_schema`).
//!
//! Each view of the client maps to one repository module implemented on
//! [`service::WmsService`]:
//! - `auth`: credential checks and module permissions
//! - `dashboard`: headline counters, recent activity, picker workload
//! - `orders` / `sheets`: starting orders and assigning sheets to pickers
//! - `pallets`: handing pallets to checkers
//! - `reports`: day counters and picker productivity

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use serde::Serialize;
use tracing::{debug, info};
use wms_config::DatabaseConfig;

/// Tables every repository expects to exist.
pub const REQUIRED_TABLES: [&str; 11] = [
    "usuarios",
    "transacciones_sistema",
    "estadopedidotiendabodega",
    "departamentos",
    "pedidostienda_bodega",
    "detallepedidostienda_bodega",
    "productospaquetes",
    "productos",
    "ubicacionesbodega",
    "PreparacionPedidos",
    "TarimasInventario",
];

/// Presence and size of one required table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub table: String,
    pub exists: bool,
    pub rows: Option<i64>,
}

/// Central database handle.
///
/// Wraps a libSQL database and a single connection. Every repository call
/// goes through [`WmsDb::conn`].
pub struct WmsDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl WmsDb {
    /// Open a local database file (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// schema fails to apply.
    pub async fn open_local(path: &str, apply_schema: bool) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let wms_db = Self {
            db,
            conn,
            remote: false,
        };
        if apply_schema {
            wms_db.run_migrations().await?;
        }
        info!(path, "opened local database");
        Ok(wms_db)
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// the schema fails to apply.
    pub async fn open_remote(
        url: &str,
        auth_token: &str,
        apply_schema: bool,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let wms_db = Self {
            db,
            conn,
            remote: true,
        };
        if apply_schema {
            wms_db.run_migrations().await?;
        }
        info!(url, "opened remote database");
        Ok(wms_db)
    }

    /// Open whichever database the configuration points at. Remote wins when
    /// both a URL and a token are set.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::open_local`] / [`Self::open_remote`].
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token, config.apply_schema).await
        } else {
            Self::open_local(&config.path, config.apply_schema).await
        }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Round-trip a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn check_connection(&self) -> Result<(), DatabaseError> {
        let mut rows = self.conn.query("SELECT 1", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let one: i64 = row.get(0)?;
        if one != 1 {
            return Err(DatabaseError::Query(format!(
                "SELECT 1 returned {one}"
            )));
        }
        debug!("connection check ok");
        Ok(())
    }

    /// Existence and row count of every table in [`REQUIRED_TABLES`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the catalog or a count query fails.
    pub async fn table_status(&self) -> Result<Vec<TableStatus>, DatabaseError> {
        let mut out = Vec::with_capacity(REQUIRED_TABLES.len());
        for table in REQUIRED_TABLES {
            let exists = helpers::query_count(
                &self.conn,
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
            )
            .await?
                > 0;
            let rows = if exists {
                Some(
                    helpers::query_count(&self.conn, &format!("SELECT COUNT(*) FROM {table}"), ())
                        .await?,
                )
            } else {
                None
            };
            out.push(TableStatus {
                table: table.to_string(),
                exists,
                rows,
            });
        }
        Ok(out)
    }
}
