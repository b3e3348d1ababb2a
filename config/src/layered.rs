// Layered Settings
// Support for layered settings with precedence

use std::fmt;

use crate::types::Settings;

/// Layered settings, later layers take precedence
#[derive(Default)]
pub struct LayeredSettings {
  /// Settings layers, lowest precedence first
  layers: Vec<SettingsLayer>,
}

/// Settings layer with source tracking
pub struct SettingsLayer {
  /// Layer source
  pub source: SettingsLayerSource,
  /// Settings values
  pub settings: Box<dyn Settings>,
}

/// Settings layer source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsLayerSource {
  /// Built-in defaults
  Default,
  /// Process environment
  Environment,
  /// CLI override
  CliOverride,
}

impl LayeredSettings {
  /// Create an empty layered settings stack
  pub fn new() -> Self {
    Self { layers: Vec::new() }
  }

  /// Add a layer above all existing ones
  pub fn add_layer(&mut self, source: SettingsLayerSource, settings: impl Settings + 'static) {
    self.layers.push(SettingsLayer {
      source,
      settings: Box::new(settings),
    });
  }

  /// Builder form of [`LayeredSettings::add_layer`]
  pub fn with_layer(
    mut self,
    source: SettingsLayerSource,
    settings: impl Settings + 'static,
  ) -> Self {
    self.add_layer(source, settings);
    self
  }

  /// Sources of all layers, lowest precedence first
  pub fn sources(&self) -> Vec<SettingsLayerSource> {
    self.layers.iter().map(|layer| layer.source).collect()
  }

  /// Resolve `key` and report which layer supplied it
  pub fn resolve(&self, key: &str) -> Option<(SettingsLayerSource, String)> {
    self.layers.iter().rev().find_map(|layer| {
      layer
        .settings
        .read_setting(key)
        .filter(|value| !value.is_empty())
        .map(|value| (layer.source, value))
    })
  }
}

impl Settings for LayeredSettings {
  fn read_setting(&self, key: &str) -> Option<String> {
    let (source, value) = self.resolve(key)?;
    tracing::trace!(key, ?source, "setting resolved");
    Some(value)
  }
}

impl fmt::Debug for LayeredSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LayeredSettings")
      .field("layers", &self.sources())
      .finish()
  }
}
