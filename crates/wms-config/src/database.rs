//! Database connection configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> String {
    "wms.db".to_string()
}

const fn default_apply_schema() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local libSQL database file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote libSQL URL (e.g., `libsql://warehouse.example.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Run the embedded schema (`CREATE TABLE IF NOT EXISTS ...`) on open.
    #[serde(default = "default_apply_schema")]
    pub apply_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
            apply_schema: default_apply_schema(),
        }
    }
}

impl DatabaseConfig {
    /// Remote access needs both a URL and a token.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_file() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.local_path(), PathBuf::from("wms.db"));
        assert!(config.apply_schema);
    }

    #[test]
    fn remote_needs_url_and_token() {
        let mut config = DatabaseConfig {
            url: "libsql://warehouse.example.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());

        config.auth_token = "tok".into();
        assert!(config.is_remote());
    }
}
