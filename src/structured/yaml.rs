use super::should_write;
use crate::error::{PipekitError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Export serializable data to a YAML file.
///
/// Returns `Ok(false)` without touching the file when it already exists
/// and `overwrite` is off.
pub fn write_yaml<T: Serialize, P: AsRef<Path>>(path: P, data: &T, overwrite: bool) -> Result<bool> {
    let path = path.as_ref();
    if !should_write(path, overwrite) {
        return Ok(false);
    }
    let content = serde_yaml::to_string(data).map_err(PipekitError::Yaml)?;
    fs::write(path, content).map_err(PipekitError::Io)?;
    Ok(true)
}

/// Import data from a YAML file, or `None` if the file does not exist.
pub fn read_yaml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Option<T>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(PipekitError::Io)?;
    Ok(Some(serde_yaml::from_str(&content)?))
}
