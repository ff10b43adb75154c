//! Host facts: timestamp strings for filenames and logs, and a
//! best-effort OS description.

use chrono::{Local, Timelike};
use std::process::Command;

/// The local date as `MM-DD-YYYY`.
pub fn date_stamp() -> String {
    Local::now().format("%m-%d-%Y").to_string()
}

/// The local time as `HH:MM:SS.hh` (hundredths of a second).
pub fn time_stamp() -> String {
    let now = Local::now();
    let hundredths = (now.nanosecond() / 10_000_000) % 100;
    format!("{}.{:02}", now.format("%H:%M:%S"), hundredths)
}

/// Operating system name, release, and version.
///
/// `release` and `version` are filled best-effort from `uname` (Unix) or
/// `cmd /c ver` (Windows) and are empty when the probe fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsInfo {
    pub system: String,
    pub release: String,
    pub version: String,
}

pub fn os_info() -> OsInfo {
    let (release, version) = probe_release_version();
    OsInfo {
        system: system_name().to_string(),
        release,
        version,
    }
}

fn system_name() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "macos" => "Darwin",
        "linux" => "Linux",
        other => other,
    }
}

#[cfg(unix)]
fn probe_release_version() -> (String, String) {
    (
        command_output("uname", &["-r"]),
        command_output("uname", &["-v"]),
    )
}

#[cfg(windows)]
fn probe_release_version() -> (String, String) {
    // "Microsoft Windows [Version 10.0.22631.3007]" -> ("10", "10.0.22631.3007")
    let raw = command_output("cmd", &["/c", "ver"]);
    let version = match raw.split_once('[').and_then(|(_, rest)| rest.strip_suffix(']')) {
        Some(inner) => inner.trim_start_matches("Version").trim().to_string(),
        None => raw,
    };
    let release = version.split('.').next().unwrap_or("").to_string();
    (release, version)
}

#[cfg(not(any(unix, windows)))]
fn probe_release_version() -> (String, String) {
    (String::new(), String::new())
}

/// Run a command and capture trimmed stdout, swallowing every failure
/// into an empty string.
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
