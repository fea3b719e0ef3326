//! Login and module permissions.
//!
//! Passwords are compared as stored: the warehouse schema keeps them in
//! plain text in `usuarios.Password`.

use chrono::Utc;
use tracing::{debug, info, warn};
use wms_core::entities::{LoginOutcome, UserSession};
use wms_core::enums::Permission;

use crate::error::DatabaseError;
use crate::helpers::query_count;
use crate::service::WmsService;

impl WmsService {
    /// Check a username/password pair against active users allowed to log in.
    ///
    /// The username is trimmed; the password is taken verbatim.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` when either field is empty, `DatabaseError`
    /// on query failure.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, DatabaseError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DatabaseError::validation(
                "username and password are required",
            ));
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT Id, COALESCE(NombreCompleto, ''), Usuario, Password
                 FROM usuarios
                 WHERE Activo = 1 AND Entrada = 1 AND Usuario = ?1",
                [username],
            )
            .await?;

        let Some(row) = rows.next().await? else {
            info!(username, "login rejected: unknown user");
            return Ok(LoginOutcome::UnknownUser);
        };

        let stored: String = row.get(3)?;
        if stored != password {
            warn!(username, "login rejected: wrong password");
            return Ok(LoginOutcome::WrongPassword);
        }

        let session = UserSession {
            user_id: row.get(0)?,
            full_name: row.get(1)?,
            username: row.get(2)?,
            logged_in_at: Utc::now(),
        };
        info!(user_id = session.user_id, "login accepted");
        Ok(LoginOutcome::Success(session))
    }

    /// Whether `user_id` holds an active grant for `permission`.
    pub async fn has_permission(
        &self,
        user_id: i64,
        permission: Permission,
    ) -> Result<bool, DatabaseError> {
        let granted = query_count(
            self.db().conn(),
            "SELECT COUNT(*) FROM transacciones_sistema
             WHERE IdUsuario = ?1 AND Codigo = ?2 AND Estado = 1",
            libsql::params![user_id, permission.code()],
        )
        .await?
            > 0;
        debug!(user_id, code = permission.code(), granted, "permission check");
        Ok(granted)
    }

    /// Fail with `PermissionDenied` unless [`Self::has_permission`] holds.
    pub async fn require_permission(
        &self,
        user_id: i64,
        permission: Permission,
    ) -> Result<(), DatabaseError> {
        if self.has_permission(user_id, permission).await? {
            Ok(())
        } else {
            warn!(user_id, code = permission.code(), "permission denied");
            Err(DatabaseError::PermissionDenied {
                code: permission.code(),
            })
        }
    }

    /// Every known module permission the user holds.
    pub async fn permissions(&self, user_id: i64) -> Result<Vec<Permission>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT Codigo FROM transacciones_sistema
                 WHERE IdUsuario = ?1 AND Estado = 1
                 ORDER BY Codigo",
                [user_id],
            )
            .await?;

        let mut granted = Vec::new();
        while let Some(row) = rows.next().await? {
            let code: i64 = row.get(0)?;
            if let Some(p) = Permission::ALL.into_iter().find(|p| p.code() == code) {
                granted.push(p);
            }
        }
        Ok(granted)
    }
}
