//! # Structured-data file I/O
//!
//! One import/export pair per interchange format the pipeline speaks:
//! JSON and YAML for configs and manifests, XML for tool metadata, CSV
//! for shot lists and spreadsheet handoffs.
//!
//! ## Shared semantics
//!
//! Writers take an `overwrite` flag and return `Ok(false)` when the
//! target already exists and `overwrite` is off, leaving the file
//! untouched (a debug log records the skip). Readers return `Ok(None)`
//! for a missing file, so callers can treat "no file yet" as a normal
//! state rather than an error.
//!
//! JSON and YAML go through `serde` and work with any serializable type.
//! XML has no serde data model here; it converts to and from
//! [`serde_json::Value`] trees instead.

use std::path::Path;

pub mod csv;
pub mod json;
pub mod xml;
pub mod yaml;

pub use self::csv::{read_csv_maps, read_csv_rows, write_csv};
pub use self::json::{read_json, write_json};
pub use self::xml::{read_xml, write_xml};
pub use self::yaml::{read_yaml, write_yaml};

/// Shared overwrite gate: `false` means leave the existing file alone.
pub(crate) fn should_write(path: &Path, overwrite: bool) -> bool {
    if !overwrite && path.exists() {
        tracing::debug!(path = %path.display(), "skipping write, file exists");
        false
    } else {
        true
    }
}
