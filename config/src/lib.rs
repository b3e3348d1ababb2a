// Scratch Configuration System
// Layered settings sources

pub mod types;
pub mod loader;
pub mod layered;

pub use types::*;
pub use loader::{parse_override, SettingsLoader};
pub use layered::{LayeredSettings, SettingsLayerSource};
