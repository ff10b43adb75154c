use super::should_write;
use crate::error::{PipekitError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Export serializable data to a pretty-printed JSON file.
///
/// Returns `Ok(false)` without touching the file when it already exists
/// and `overwrite` is off.
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, data: &T, overwrite: bool) -> Result<bool> {
    let path = path.as_ref();
    if !should_write(path, overwrite) {
        return Ok(false);
    }
    let content = serde_json::to_string_pretty(data).map_err(PipekitError::Json)?;
    fs::write(path, content).map_err(PipekitError::Io)?;
    Ok(true)
}

/// Import data from a JSON file, or `None` if the file does not exist.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Option<T>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(PipekitError::Io)?;
    Ok(Some(serde_json::from_str(&content)?))
}
