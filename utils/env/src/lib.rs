// Utils - Env
// Environment and process utilities

use std::path::Path;

/// Name used when the invoking executable cannot be determined
pub const FALLBACK_PROGRAM_NAME: &str = "scratch";

/// Get environment variable
pub fn get_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Final component of `path`, if it has one
pub fn base_name(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Base name of the invoking executable (`argv[0]`)
pub fn program_name() -> String {
    match std::env::args_os().next().and_then(base_name) {
        Some(name) if !name.is_empty() => name,
        _ => {
            tracing::debug!("argv[0] unavailable, using {FALLBACK_PROGRAM_NAME}");
            FALLBACK_PROGRAM_NAME.to_string()
        }
    }
}
