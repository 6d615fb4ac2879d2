use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::JuliaError;

/// Name of the parameter file without its directory or extension, used to
/// label a run in the logs. Falls back to the full path if there is no stem.
pub fn extract_base_name(path: &str) -> &str {
    Path::new(path)
        .file_stem() // Get the base name component of the path
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/**
 * Read a JSON parameter file and deserialize it into the requested type.
 */
pub fn load_params<T: DeserializeOwned>(path: &str) -> Result<T, JuliaError> {
    let contents = std::fs::read_to_string(path).map_err(|source| JuliaError::ReadParams {
        path: path.into(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| JuliaError::ParseParams {
        path: path.into(),
        source,
    })
}
