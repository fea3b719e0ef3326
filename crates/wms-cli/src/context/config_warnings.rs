use wms_config::WmsConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &WmsConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &WmsConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.database.is_remote() && has_single_underscore_key(&env_keys, "WMS_DATABASE") {
        warnings.push(
            "Database config appears local while WMS_DATABASE_* env vars exist. Use double underscores (example: WMS_DATABASE__URL)."
                .to_string(),
        );
    }

    if config.database.url.is_empty() != config.database.auth_token.is_empty() {
        warnings.push(
            "Only one of database.url and database.auth_token is set; using the local database."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "WMS_GENERAL") {
        warnings.push(
            "WMS_GENERAL_* env vars are ignored. Use double underscores (example: WMS_GENERAL__SHEET_SIZE)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use wms_config::WmsConfig;

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn single_underscore_database_keys_warn() {
        let warnings =
            collect_unconfigured_warnings(&WmsConfig::default(), env(&["WMS_DATABASE_URL"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("WMS_DATABASE__URL"));
    }

    #[test]
    fn double_underscore_keys_are_fine() {
        let warnings = collect_unconfigured_warnings(
            &WmsConfig::default(),
            env(&["WMS_DATABASE__PATH", "WMS_GENERAL__SHEET_SIZE", "WMS_LOG"]),
        );
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn half_configured_remote_warns() {
        let mut config = WmsConfig::default();
        config.database.url = "libsql://wms.example.io".into();
        let warnings = collect_unconfigured_warnings(&config, env(&[]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("auth_token"));
    }
}
