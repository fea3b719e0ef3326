//! Errors raised while loading `wms` settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `config.toml` layer or a `WMS_*` variable could not be read into
    /// the settings struct.
    #[error("failed to read wms settings from config.toml / WMS_* env: {0}")]
    Load(#[from] figment::Error),

    /// Neither a local database file nor a remote url + token is set.
    #[error(
        "no warehouse database configured: set database.path, or database.url and \
         database.auth_token (WMS_DATABASE__PATH, WMS_DATABASE__URL, WMS_DATABASE__AUTH_TOKEN)"
    )]
    NoDatabase,

    /// A sheet size, page size or refresh interval of zero.
    #[error("{field} must be greater than zero (set it in .wms/config.toml or {})", env_key(.field))]
    ZeroSetting { field: &'static str },
}

/// Environment variable that overrides a dotted settings key.
#[must_use]
pub fn env_key(field: &str) -> String {
    format!("WMS_{}", field.replace('.', "__").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, env_key};

    #[test]
    fn env_key_uses_double_underscore_sections() {
        assert_eq!(env_key("general.sheet_size"), "WMS_GENERAL__SHEET_SIZE");
    }

    #[test]
    fn zero_setting_names_file_and_variable() {
        let message = ConfigError::ZeroSetting {
            field: "general.page_size",
        }
        .to_string();
        assert_eq!(
            message,
            "general.page_size must be greater than zero (set it in .wms/config.toml or WMS_GENERAL__PAGE_SIZE)"
        );
    }

    #[test]
    fn missing_database_mentions_env_overrides() {
        assert!(ConfigError::NoDatabase.to_string().contains("WMS_DATABASE__URL"));
    }
}
