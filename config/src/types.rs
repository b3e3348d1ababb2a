// Settings Types
// Setting keys, the settings trait and the simple sources

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Base directory under which temporary directories are created
pub const TMP_FILE_DIR: &str = "TmpFileDir";

/// Filename prefix for temporary directories
pub const TMP_FILE_PREFIX: &str = "TmpFilePrefix";

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// Override was not of the form KEY=VALUE
  #[error("invalid setting override `{0}`, expected KEY=VALUE")]
  InvalidOverride(String),
}

/// A source of named settings.
///
/// Sources only report whether a value is present. Missing files, parse
/// failures and missing keys all look the same to callers: `None`.
pub trait Settings {
  fn read_setting(&self, key: &str) -> Option<String>;
}

impl<T: Settings + ?Sized> Settings for &T {
  fn read_setting(&self, key: &str) -> Option<String> {
    (**self).read_setting(key)
  }
}

impl<T: Settings + ?Sized> Settings for Box<T> {
  fn read_setting(&self, key: &str) -> Option<String> {
    (**self).read_setting(key)
  }
}

impl<T: Settings + ?Sized> Settings for Arc<T> {
  fn read_setting(&self, key: &str) -> Option<String> {
    (**self).read_setting(key)
  }
}

/// Read a setting, treating an empty value the same as an absent one.
pub fn read_non_empty<S: Settings + ?Sized>(settings: &S, key: &str) -> Option<String> {
  settings.read_setting(key).filter(|value| !value.is_empty())
}

// ============================================================================
// IN-MEMORY SETTINGS
// ============================================================================

/// In-memory settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
  values: BTreeMap<String, String>,
}

impl MapSettings {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set a value, replacing any previous one
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.values.insert(key.into(), value.into());
    self
  }

  /// Builder form of [`MapSettings::set`]
  pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.set(key, value);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }
}

impl Settings for MapSettings {
  fn read_setting(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSettings {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      values: iter
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }
}

// ============================================================================
// ENVIRONMENT SETTINGS
// ============================================================================

/// Default prefix for settings read from the environment
pub const DEFAULT_ENV_PREFIX: &str = "SCRATCH_";

/// Settings read from environment variables named `<prefix><key>`
#[derive(Debug, Clone)]
pub struct EnvSettings {
  prefix: String,
}

impl EnvSettings {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self {
      prefix: prefix.into(),
    }
  }

  /// Environment variable consulted for `key`
  pub fn var_name(&self, key: &str) -> String {
    format!("{}{}", self.prefix, key)
  }
}

impl Default for EnvSettings {
  fn default() -> Self {
    Self::new(DEFAULT_ENV_PREFIX)
  }
}

impl Settings for EnvSettings {
  fn read_setting(&self, key: &str) -> Option<String> {
    scratch_env::get_var(&self.var_name(key))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn empty_value_reads_as_absent() {
    let settings = MapSettings::new()
      .with(TMP_FILE_DIR, "")
      .with(TMP_FILE_PREFIX, "job_");

    assert_eq!(settings.read_setting(TMP_FILE_DIR), Some(String::new()));
    assert_eq!(read_non_empty(&settings, TMP_FILE_DIR), None);
    assert_eq!(read_non_empty(&settings, TMP_FILE_PREFIX), Some("job_".to_string()));
    assert_eq!(read_non_empty(&settings, "Missing"), None);
  }

  #[test]
  fn map_settings_collects_pairs() {
    let settings: MapSettings = [(TMP_FILE_DIR, "/tmp/work"), (TMP_FILE_DIR, "/srv/scratch")]
      .into_iter()
      .collect();

    assert_eq!(settings.len(), 1);
    assert_eq!(settings.read_setting(TMP_FILE_DIR).as_deref(), Some("/srv/scratch"));
  }

  #[test]
  fn trait_objects_forward_reads() {
    let boxed: Box<dyn Settings> = Box::new(MapSettings::new().with(TMP_FILE_PREFIX, "p-"));
    let shared: Arc<dyn Settings> = Arc::new(MapSettings::new().with(TMP_FILE_PREFIX, "q-"));

    assert_eq!(read_non_empty(&boxed, TMP_FILE_PREFIX).as_deref(), Some("p-"));
    assert_eq!(read_non_empty(&shared, TMP_FILE_PREFIX).as_deref(), Some("q-"));
  }

  #[test]
  fn env_settings_prefix_variable_names() {
    let env = EnvSettings::default();
    assert_eq!(env.var_name(TMP_FILE_DIR), "SCRATCH_TmpFileDir");

    let custom = EnvSettings::new("SCRATCH_TEST_UNSET_");
    assert_eq!(custom.read_setting(TMP_FILE_PREFIX), None);
  }

  #[test]
  fn env_settings_read_set_variables() {
    let unprefixed = EnvSettings::new("");
    let path = unprefixed.read_setting("PATH").expect("PATH is set");

    assert_eq!(Some(path), std::env::var("PATH").ok());
  }
}
