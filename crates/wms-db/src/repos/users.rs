//! Operator lookups shared by sheet and pallet assignment.

use tracing::debug;
use wms_core::entities::Operator;
use wms_core::enums::UserLevel;

use crate::error::DatabaseError;
use crate::service::WmsService;

impl WmsService {
    /// Active users of `level` with a non-blank full name, ordered by name.
    pub async fn operators(&self, level: UserLevel) -> Result<Vec<Operator>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT Id, NombreCompleto FROM usuarios
                 WHERE IdNivel = ?1 AND Activo = 1
                   AND NombreCompleto IS NOT NULL AND TRIM(NombreCompleto) <> ''
                 ORDER BY NombreCompleto ASC",
                [level.code()],
            )
            .await?;

        let mut operators = Vec::new();
        while let Some(row) = rows.next().await? {
            operators.push(Operator {
                id: row.get(0)?,
                full_name: row.get(1)?,
            });
        }
        debug!(level = level.code(), count = operators.len(), "loaded operators");
        Ok(operators)
    }

    /// Fetch `user_id` and fail unless it is an active user of `level`.
    pub async fn require_operator(
        &self,
        user_id: i64,
        level: UserLevel,
    ) -> Result<Operator, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT Id, COALESCE(NombreCompleto, ''), IdNivel, Activo FROM usuarios WHERE Id = ?1",
                [user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", user_id))?;

        let actual = UserLevel::from_code(row.get(2)?);
        let active: i64 = row.get(3)?;
        if actual != level || active != 1 {
            let role = match level {
                UserLevel::Picker => "picker",
                UserLevel::Checker => "checker",
                UserLevel::Other(_) => "operator",
            };
            return Err(DatabaseError::validation(format!(
                "user {user_id} is not an active {role}"
            )));
        }
        Ok(Operator {
            id: row.get(0)?,
            full_name: row.get(1)?,
        })
    }
}
