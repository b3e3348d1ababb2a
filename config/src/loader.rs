// Settings Loader
// Builds the layered settings stack from the environment and CLI overrides

use crate::layered::{LayeredSettings, SettingsLayerSource};
use crate::types::{ConfigError, EnvSettings, MapSettings, DEFAULT_ENV_PREFIX};

/// Settings loader with layered support
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    /// Environment variable prefix, `None` disables the environment layer
    env_prefix: Option<String>,
    /// Built-in defaults
    defaults: MapSettings,
}

impl SettingsLoader {
    /// Create a new settings loader
    pub fn new() -> Self {
        Self {
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            defaults: MapSettings::new(),
        }
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Do not consult the environment
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Set built-in defaults
    pub fn with_defaults(mut self, defaults: MapSettings) -> Self {
        self.defaults = defaults;
        self
    }

    /// Load settings with CLI overrides
    pub fn load_with_cli_overrides(
        &self,
        cli_overrides: &[String],
    ) -> Result<LayeredSettings, ConfigError> {
        // Layers in order:
        // 1. Built-in defaults
        // 2. Environment (SCRATCH_<key>)
        // 3. CLI overrides
        let overrides = MapSettings::from_overrides(cli_overrides)?;

        let mut settings = LayeredSettings::new();
        if !self.defaults.is_empty() {
            settings.add_layer(SettingsLayerSource::Default, self.defaults.clone());
        }
        if let Some(prefix) = &self.env_prefix {
            settings.add_layer(SettingsLayerSource::Environment, EnvSettings::new(prefix));
        }
        if !overrides.is_empty() {
            tracing::debug!(count = overrides.len(), "applying CLI setting overrides");
            settings.add_layer(SettingsLayerSource::CliOverride, overrides);
        }

        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a single `KEY=VALUE` override
pub fn parse_override(raw: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidOverride(raw.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

impl MapSettings {
    /// Build settings from `KEY=VALUE` overrides, later entries win
    pub fn from_overrides(overrides: &[String]) -> Result<Self, ConfigError> {
        overrides
            .iter()
            .map(|raw| parse_override(raw))
            .collect::<Result<Vec<_>, _>>()
            .map(|pairs| pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Settings, TMP_FILE_DIR, TMP_FILE_PREFIX};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_key_value() {
        assert_eq!(
            parse_override("TmpFileDir=/tmp/work").expect("valid override"),
            ("TmpFileDir".to_string(), "/tmp/work".to_string())
        );
        assert_eq!(
            parse_override("TmpFilePrefix=a=b").expect("value may contain ="),
            ("TmpFilePrefix".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_override("TmpFilePrefix=").expect("empty value"),
            ("TmpFilePrefix".to_string(), String::new())
        );
    }

    #[test]
    fn rejects_malformed_overrides() {
        assert!(matches!(
            parse_override("TmpFileDir"),
            Err(ConfigError::InvalidOverride(raw)) if raw == "TmpFileDir"
        ));
        assert!(matches!(
            parse_override(" =value"),
            Err(ConfigError::InvalidOverride(_))
        ));
    }

    #[test]
    fn cli_overrides_sit_above_defaults() {
        let loader = SettingsLoader::new()
            .without_env()
            .with_defaults(MapSettings::new().with(TMP_FILE_DIR, "/var/tmp"));
        let settings = loader
            .load_with_cli_overrides(&[
                "TmpFileDir=/tmp/one".to_string(),
                "TmpFileDir=/tmp/two".to_string(),
            ])
            .expect("load settings");

        assert_eq!(
            settings.sources(),
            vec![SettingsLayerSource::Default, SettingsLayerSource::CliOverride]
        );
        assert_eq!(settings.read_setting(TMP_FILE_DIR).as_deref(), Some("/tmp/two"));
        assert_eq!(settings.read_setting(TMP_FILE_PREFIX), None);
    }

    #[test]
    fn environment_sits_between_defaults_and_cli_overrides() {
        let env_path = std::env::var("PATH").expect("PATH is set");
        let loader = SettingsLoader::new()
            .with_env_prefix("")
            .with_defaults(MapSettings::new().with("PATH", "/from/defaults"));

        let from_env = loader.load_with_cli_overrides(&[]).expect("load settings");
        assert_eq!(
            from_env.resolve("PATH"),
            Some((SettingsLayerSource::Environment, env_path))
        );

        let overridden = loader
            .load_with_cli_overrides(&["PATH=/from/cli".to_string()])
            .expect("load settings");
        assert_eq!(
            overridden.sources(),
            vec![
                SettingsLayerSource::Default,
                SettingsLayerSource::Environment,
                SettingsLayerSource::CliOverride,
            ]
        );
        assert_eq!(overridden.read_setting("PATH").as_deref(), Some("/from/cli"));
    }

    #[test]
    fn bad_override_fails_load() {
        let result = SettingsLoader::new()
            .without_env()
            .load_with_cli_overrides(&["nope".to_string()]);
        assert!(result.is_err());
    }
}
