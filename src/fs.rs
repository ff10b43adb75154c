//! Filesystem scaffolding and hygiene helpers.
//!
//! The shapes here come from day-to-day pipeline work: standing up a
//! project's folder skeleton, clearing render scratch directories, and
//! validating artist-supplied paths before anything touches disk.

use crate::error::{PipekitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Device names Windows refuses as file or directory names, with or
/// without an extension.
const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const WINDOWS_MAX_PATH: usize = 260;

/// A recursive outline of a directory tree.
///
/// Serializes transparently as a nested map, so outlines can live in JSON
/// or YAML project templates:
///
/// ```json
/// {
///     "assets": { "model": {}, "texture": {}, "anim": {} },
///     "config": {}
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirOutline(pub BTreeMap<String, DirOutline>);

impl DirOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty child directory.
    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into(), DirOutline::new());
        self
    }

    /// Add a child directory with its own outline.
    pub fn with_tree(mut self, name: impl Into<String>, outline: DirOutline) -> Self {
        self.0.insert(name.into(), outline);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Create a directory structure from an outline under `destination`.
///
/// The destination itself (and any missing parents) is created first.
/// Existing directories are left alone, so re-running over a partially
/// built tree fills in the gaps.
pub fn create_structure<P: AsRef<Path>>(outline: &DirOutline, destination: P) -> Result<()> {
    let destination = destination.as_ref();
    create_recursive(outline, destination)?;
    tracing::debug!(path = %destination.display(), "directory structure created");
    Ok(())
}

fn create_recursive(outline: &DirOutline, destination: &Path) -> Result<()> {
    if !destination.exists() {
        fs::create_dir_all(destination).map_err(PipekitError::Io)?;
    }
    for (name, sub) in &outline.0 {
        create_recursive(sub, &destination.join(name))?;
    }
    Ok(())
}

/// Alphanumerically sort paths in place.
///
/// Digit runs compare numerically, so `file2.txt` sorts before
/// `file10.txt` and `asset_v2.ma` before `asset_v10.ma`.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|p| natural_key(&p.to_string_lossy().replace('\\', "/")));
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalSegment {
    Number(u128),
    Text(String),
}

fn natural_key(s: &str) -> Vec<NaturalSegment> {
    let mut key = Vec::new();
    let mut buf = String::new();
    let mut in_digits = false;

    for ch in s.chars() {
        if ch.is_ascii_digit() != in_digits && !buf.is_empty() {
            key.push(flush_segment(&mut buf, in_digits));
        }
        in_digits = ch.is_ascii_digit();
        buf.push(ch);
    }
    if !buf.is_empty() {
        key.push(flush_segment(&mut buf, in_digits));
    }

    key
}

fn flush_segment(buf: &mut String, in_digits: bool) -> NaturalSegment {
    let segment = if in_digits {
        buf.parse()
            .map(NaturalSegment::Number)
            .unwrap_or_else(|_| NaturalSegment::Text(buf.clone()))
    } else {
        NaturalSegment::Text(buf.clone())
    };
    buf.clear();
    segment
}

/// Delete every regular file directly inside `dir`, leaving
/// subdirectories (and their contents) untouched.
///
/// Returns the number of files removed.
pub fn delete_files_in<P: AsRef<Path>>(dir: P) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir.as_ref()).map_err(PipekitError::Io)? {
        let path = entry.map_err(PipekitError::Io)?.path();
        if path.is_file() {
            fs::remove_file(&path).map_err(PipekitError::Io)?;
            removed += 1;
        }
    }
    tracing::debug!(removed, dir = %dir.as_ref().display(), "deleted files");
    Ok(removed)
}

/// Check whether a path could be created on Windows.
///
/// Validates the path against Windows naming rules (invalid characters,
/// reserved device names, the 260-character limit unless `\\?\`-prefixed),
/// then walks up to the nearest existing ancestor and requires it to be a
/// writable directory.
pub fn can_create_path<P: AsRef<Path>>(path: P) -> bool {
    let path = absolutize(path.as_ref());
    let path_str = path.to_string_lossy();

    // Skip the drive letter so C:\ does not trip the colon check.
    let check_str = if path_str.len() > 1 && path_str.as_bytes()[1] == b':' {
        &path_str[2..]
    } else {
        &path_str[..]
    };
    if check_str
        .chars()
        .any(|c| matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*'))
    {
        return false;
    }

    for component in path.components() {
        if let Component::Normal(name) = component {
            let name = name.to_string_lossy();
            let stem = name.split('.').next().unwrap_or("").to_uppercase();
            if WINDOWS_RESERVED_NAMES.contains(&stem.as_str()) {
                return false;
            }
        }
    }

    if path_str.len() > WINDOWS_MAX_PATH && !path_str.starts_with(r"\\?\") {
        return false;
    }

    // Walk up until something exists, then check it can hold new entries.
    let mut current = path.as_path();
    while !current.exists() {
        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => return false,
        }
    }

    current.is_dir()
        && fs::metadata(current)
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false)
}

/// Heuristically decide whether a string looks like a file or directory
/// path (Windows conventions included).
pub fn is_path_like(value: &str) -> bool {
    let bytes = value.as_bytes();

    // Drive-letter root: C:\ or D:/
    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        return true;
    }

    // UNC path: \\server\share
    if value.starts_with("\\\\") {
        return true;
    }

    // Relative Windows-style path
    if value.starts_with(".\\") || value.starts_with("..\\") {
        return true;
    }

    if value.contains('\\') || value.contains('/') {
        return true;
    }

    // Bare filename with a short extension
    if let Some(dot) = value.rfind('.') {
        let ext = &value[dot..];
        if ext.len() > 1 && ext.len() <= 7 && !ext[1..].contains('.') {
            return true;
        }
    }

    false
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
