use anyhow::Context;
use wms_config::WmsConfig;
use wms_core::entities::UserSession;
use wms_core::enums::Permission;
use wms_db::service::WmsService;

use crate::session::SessionStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: WmsService,
    pub config: WmsConfig,
    pub sessions: SessionStore,
}

impl AppContext {
    /// Open the configured database.
    pub async fn init(config: WmsConfig, sessions: SessionStore) -> anyhow::Result<Self> {
        let service = WmsService::open(&config.database)
            .await
            .with_context(|| {
                if config.database.is_remote() {
                    format!("failed to connect to {}", config.database.url)
                } else {
                    format!("failed to open database at {}", config.database.path)
                }
            })?;

        if service.db().is_remote() {
            tracing::debug!(url = %config.database.url, "using remote database");
        }

        Ok(Self {
            service,
            config,
            sessions,
        })
    }

    /// The logged-in user, or an error telling how to log in.
    pub fn require_session(&self) -> anyhow::Result<UserSession> {
        self.sessions
            .load()
            .ok_or_else(|| anyhow::anyhow!("Not logged in. Run 'wms login --user <name>' first."))
    }

    /// The logged-in user, provided they hold `permission`.
    pub async fn require_permission(&self, permission: Permission) -> anyhow::Result<UserSession> {
        let session = self.require_session()?;
        self.service
            .require_permission(session.user_id, permission)
            .await
            .with_context(|| format!("{} may not use this module", session.username))?;
        Ok(session)
    }
}
