//! Versioned-file conventions.
//!
//! Pipeline output follows a trailing-version naming scheme: `shot_v001.ma`,
//! `render_042.exr`. These helpers find the newest take in a directory and
//! hand out the next version number to write.

use crate::error::{PipekitError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static FILE_VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_v(\d+)\..*$").unwrap());
static TRAILING_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

/// Extract the version digits from a filename with a standard `_v###.ext`
/// suffix. Padding can be any length: `GhostA_anim_v001.ma` -> `"001"`.
pub fn file_version_number(file_name: &str) -> Option<&str> {
    FILE_VERSION_RE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The run of digits at the very end of a string, padding preserved.
/// `shot_0042` -> `"0042"`; `shot_100_final` -> `None`.
pub fn trailing_digits(value: &str) -> Option<&str> {
    TRAILING_DIGITS_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The trailing digit run parsed as a number. `render001` -> `1`.
pub fn trailing_number(value: &str) -> Option<u64> {
    trailing_digits(value)?.parse().ok()
}

/// Find the highest-versioned file in a directory.
///
/// Filters by extension (leading dot optional) and, when given, a substring
/// the filename must contain. The version is the digit run at the end of
/// the file stem. Returns `None` when nothing matches.
pub fn latest_versioned_file<P: AsRef<Path>>(
    dir: P,
    extension: &str,
    substring: Option<&str>,
) -> Result<Option<PathBuf>> {
    let ext = extension.trim_start_matches('.');
    let mut best: Option<(PathBuf, u64)> = None;

    for entry in fs::read_dir(dir.as_ref()).map_err(PipekitError::Io)? {
        let path = entry.map_err(PipekitError::Io)?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        if let Some(needle) = substring {
            if !path.to_string_lossy().replace('\\', "/").contains(needle) {
                continue;
            }
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if let Some(version) = trailing_number(stem) {
            if best.as_ref().map(|(_, v)| version > *v).unwrap_or(true) {
                best = Some((path, version));
            }
        }
    }

    Ok(best.map(|(path, _)| path))
}

/// The next version number for versioned files in a directory, as a
/// zero-padded string (`"004"` when `003` is the highest on disk).
///
/// Only the last `padding` characters of each stem are considered, so the
/// scheme tolerates stems that merely end in digits. A missing directory
/// or an empty match set yields version one.
pub fn next_version<P: AsRef<Path>>(
    dir: P,
    extension: &str,
    substring: Option<&str>,
    padding: usize,
) -> Result<String> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(format!("{:0>width$}", 1, width = padding));
    }

    let ext = extension.trim_start_matches('.');
    let mut highest: Option<u64> = None;

    for entry in fs::read_dir(dir).map_err(PipekitError::Io)? {
        let path = entry.map_err(PipekitError::Io)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        if let Some(needle) = substring {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !name.contains(needle) {
                continue;
            }
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let tail: String = stem
            .chars()
            .rev()
            .take(padding)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if tail.len() == padding && tail.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(version) = tail.parse::<u64>() {
                highest = Some(highest.map_or(version, |h| h.max(version)));
            }
        }
    }

    let next = highest.map_or(1, |h| h + 1);
    Ok(format!("{:0>width$}", next, width = padding))
}
