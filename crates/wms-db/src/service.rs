//! Service layer the CLI talks to.
//!
//! `WmsService` wraps `WmsDb`. All repository methods are implemented as
//! `impl WmsService` blocks under `repos/`.

use wms_config::DatabaseConfig;

use crate::WmsDb;
use crate::error::DatabaseError;

pub struct WmsService {
    db: WmsDb,
}

impl WmsService {
    /// Open the configured database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: WmsDb::open(config).await?,
        })
    }

    /// Create a service over a local database (`":memory:"` for tests).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: WmsDb::open_local(db_path, true).await?,
        })
    }

    #[must_use]
    pub const fn from_db(db: WmsDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &WmsDb {
        &self.db
    }
}
