//! Persisted login session.
//!
//! The session is a small JSON file next to the global config
//! (`~/.config/wms/session.json`, or `<--config-dir>/session.json`).
//! `WMS_SESSION_FILE` overrides the location outright.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use wms_core::entities::UserSession;

const SESSION_FILE_NAME: &str = "session.json";
const SESSION_ENV: &str = "WMS_SESSION_FILE";

#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Pick the session file: env override, then `config_dir`, then the
    /// platform config directory.
    pub fn resolve(config_dir: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = std::env::var_os(SESSION_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::at(PathBuf::from(path)));
        }
        let dir = config_dir
            .map(Path::to_path_buf)
            .or_else(wms_config::WmsConfig::global_dir)
            .context("config directory not found; pass --config-dir or set WMS_SESSION_FILE")?;
        Ok(Self::at(dir.join(SESSION_FILE_NAME)))
    }

    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or `None` when logged out.
    ///
    /// An unreadable file is treated as logged out.
    #[must_use]
    pub fn load(&self) -> Option<UserSession> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "ignoring corrupt session file");
                None
            }
        }
    }

    pub fn save(&self, session: &UserSession) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("mkdir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
            .with_context(|| format!("write {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .with_context(|| format!("chmod {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Remove the session file. Returns whether one existed.
    pub fn clear(&self) -> anyhow::Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("failed to delete {}", self.path.display()))?;
        Ok(true)
    }
}
