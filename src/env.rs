//! Typed access to environment variables, plus `.env` file loading.
//!
//! Pipeline scripts lean heavily on the environment for configuration
//! (tool paths, project roots, feature toggles). These helpers turn the
//! stringly-typed environment into the types call sites actually want,
//! returning `None` instead of panicking on bad values so callers can
//! chain `unwrap_or` for defaults.

use crate::error::{PipekitError, Result};
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Get an environment variable as a string. An empty value is still a value.
pub fn get_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Get an environment variable as an integer.
/// Returns `None` when the variable is unset or cannot be parsed.
pub fn get_int(key: &str) -> Option<i64> {
    env::var(key).ok()?.trim().parse().ok()
}

/// Get an environment variable as a boolean.
///
/// Truthy values: `1`, `true`, `yes`, `on`. Falsy values: `0`, `false`,
/// `no`, `off` (all case-insensitive). Anything else returns `None`.
pub fn get_bool(key: &str) -> Option<bool> {
    let value = env::var(key).ok()?;
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get an environment variable as an absolute, lexically normalized path.
///
/// Relative values are resolved against the current working directory.
/// The path does not need to exist.
pub fn get_path(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    let path = PathBuf::from(value);
    let absolute = if path.is_absolute() {
        path
    } else {
        env::current_dir().ok()?.join(path)
    };
    Some(normalize(&absolute))
}

/// Get an environment variable as a list of strings, split on `delimiter`.
/// Each item is trimmed; empty segments are dropped.
pub fn get_list(key: &str, delimiter: char) -> Option<Vec<String>> {
    let value = env::var(key).ok()?;
    Some(
        value
            .split(delimiter)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Assert that every given environment variable is set and non-empty.
///
/// Collects all missing names into a single [`PipekitError::MissingEnv`]
/// rather than failing one at a time, so the caller can fix every missing
/// variable in one pass.
pub fn require(keys: &[&str]) -> Result<()> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|k| env::var(k).map(|v| v.is_empty()).unwrap_or(true))
        .map(|k| k.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipekitError::MissingEnv(missing))
    }
}

/// Load a `.env` file into the process environment.
///
/// Supports `KEY=VALUE` pairs, single- or double-quoted values, full-line
/// and quote-aware inline `#` comments, and `$VAR`/`${VAR}` expansion
/// against the current environment. Lines without `=` are skipped.
/// Existing variables are preserved unless `overwrite` is set.
///
/// Returns the number of variables that were set.
pub fn load_env_file<P: AsRef<Path>>(path: P, overwrite: bool) -> Result<usize> {
    let content = fs::read_to_string(path.as_ref()).map_err(PipekitError::Io)?;
    let mut loaded = 0;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, raw_value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let mut raw_value = strip_inline_comment(raw_value.trim()).trim_end();

        if (raw_value.starts_with('"') && raw_value.ends_with('"') && raw_value.len() >= 2)
            || (raw_value.starts_with('\'') && raw_value.ends_with('\'') && raw_value.len() >= 2)
        {
            raw_value = &raw_value[1..raw_value.len() - 1];
        }

        let value = expand_vars(raw_value);

        if overwrite || env::var_os(key).is_none() {
            env::set_var(key, &value);
            loaded += 1;
        }
    }

    tracing::debug!(loaded, "loaded env file");
    Ok(loaded)
}

/// Strip an inline `#` comment, respecting quoted regions.
/// `hello  # world` -> `hello`, `"hello # world"` stays intact.
fn strip_inline_comment(value: &str) -> &str {
    let mut in_quote: Option<char> = None;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' | '\'' => match in_quote {
                None => in_quote = Some(ch),
                Some(q) if q == ch => in_quote = None,
                _ => {}
            },
            '#' if in_quote.is_none() => return value[..i].trim_end(),
            _ => {}
        }
    }
    value
}

/// Expand `$VAR` and `${VAR}` references against the current environment.
/// Unknown variables are left verbatim.
fn expand_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        match chars.peek() {
            Some((_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                match env::var(&name) {
                    Ok(v) if closed => out.push_str(&v),
                    _ => {
                        out.push_str("${");
                        out.push_str(&name);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            Some((_, c)) if c.is_ascii_alphabetic() || *c == '_' => {
                let mut name = String::new();
                while let Some((_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || *c == '_' {
                        name.push(*c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match env::var(&name) {
                    Ok(v) => out.push_str(&v),
                    Err(_) => {
                        out.push('$');
                        out.push_str(&name);
                    }
                }
            }
            _ => out.push('$'),
        }
    }

    out
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_get_str_returns_value_when_set() {
        env::set_var("PIPEKIT_TEST_STR", "hello");
        assert_eq!(get_str("PIPEKIT_TEST_STR").as_deref(), Some("hello"));
        env::remove_var("PIPEKIT_TEST_STR");
    }

    #[test]
    fn test_get_str_returns_none_when_missing() {
        assert_eq!(get_str("PIPEKIT_TEST_STR_MISSING"), None);
    }

    #[test]
    fn test_get_str_empty_string_is_a_value() {
        env::set_var("PIPEKIT_TEST_STR_EMPTY", "");
        assert_eq!(get_str("PIPEKIT_TEST_STR_EMPTY").as_deref(), Some(""));
        env::remove_var("PIPEKIT_TEST_STR_EMPTY");
    }

    #[test]
    fn test_get_int_parses_value() {
        env::set_var("PIPEKIT_TEST_INT", "42");
        assert_eq!(get_int("PIPEKIT_TEST_INT"), Some(42));
        env::remove_var("PIPEKIT_TEST_INT");
    }

    #[test]
    fn test_get_int_negative_and_zero() {
        env::set_var("PIPEKIT_TEST_INT_NEG", "-10");
        assert_eq!(get_int("PIPEKIT_TEST_INT_NEG"), Some(-10));
        env::remove_var("PIPEKIT_TEST_INT_NEG");

        env::set_var("PIPEKIT_TEST_INT_ZERO", "0");
        assert_eq!(get_int("PIPEKIT_TEST_INT_ZERO"), Some(0));
        env::remove_var("PIPEKIT_TEST_INT_ZERO");
    }

    #[test]
    fn test_get_int_invalid_value_is_none() {
        env::set_var("PIPEKIT_TEST_INT_BAD", "not_a_number");
        assert_eq!(get_int("PIPEKIT_TEST_INT_BAD"), None);
        env::remove_var("PIPEKIT_TEST_INT_BAD");
    }

    #[test]
    fn test_get_bool_truthy_values() {
        for value in ["1", "true", "True", "TRUE", "yes", "YES", "on", "ON"] {
            env::set_var("PIPEKIT_TEST_BOOL_T", value);
            assert_eq!(get_bool("PIPEKIT_TEST_BOOL_T"), Some(true), "{}", value);
        }
        env::remove_var("PIPEKIT_TEST_BOOL_T");
    }

    #[test]
    fn test_get_bool_falsy_values() {
        for value in ["0", "false", "False", "FALSE", "no", "NO", "off", "OFF"] {
            env::set_var("PIPEKIT_TEST_BOOL_F", value);
            assert_eq!(get_bool("PIPEKIT_TEST_BOOL_F"), Some(false), "{}", value);
        }
        env::remove_var("PIPEKIT_TEST_BOOL_F");
    }

    #[test]
    fn test_get_bool_unrecognised_value_is_none() {
        env::set_var("PIPEKIT_TEST_BOOL_BAD", "maybe");
        assert_eq!(get_bool("PIPEKIT_TEST_BOOL_BAD"), None);
        env::remove_var("PIPEKIT_TEST_BOOL_BAD");
    }

    #[test]
    fn test_get_path_is_absolute_and_normalized() {
        env::set_var("PIPEKIT_TEST_PATH", "/some/../some/path");
        let result = get_path("PIPEKIT_TEST_PATH").unwrap();
        assert!(result.is_absolute());
        assert!(!result.components().any(|c| c == Component::ParentDir));
        assert!(result.ends_with("some/path"));
        env::remove_var("PIPEKIT_TEST_PATH");
    }

    #[test]
    fn test_get_path_resolves_relative_against_cwd() {
        env::set_var("PIPEKIT_TEST_PATH_REL", "relative/dir");
        let result = get_path("PIPEKIT_TEST_PATH_REL").unwrap();
        assert!(result.is_absolute());
        env::remove_var("PIPEKIT_TEST_PATH_REL");
    }

    #[test]
    fn test_get_list_splits_and_trims() {
        env::set_var("PIPEKIT_TEST_LIST", "maya; nuke ;houdini");
        assert_eq!(
            get_list("PIPEKIT_TEST_LIST", ';').unwrap(),
            vec!["maya", "nuke", "houdini"]
        );
        env::remove_var("PIPEKIT_TEST_LIST");
    }

    #[test]
    fn test_get_list_drops_empty_segments() {
        env::set_var("PIPEKIT_TEST_LIST_EMPTY", "maya,,nuke");
        assert_eq!(
            get_list("PIPEKIT_TEST_LIST_EMPTY", ',').unwrap(),
            vec!["maya", "nuke"]
        );
        env::remove_var("PIPEKIT_TEST_LIST_EMPTY");
    }

    #[test]
    fn test_require_passes_when_all_set() {
        env::set_var("PIPEKIT_TEST_REQ_A", "1");
        env::set_var("PIPEKIT_TEST_REQ_B", "2");
        assert!(require(&["PIPEKIT_TEST_REQ_A", "PIPEKIT_TEST_REQ_B"]).is_ok());
        env::remove_var("PIPEKIT_TEST_REQ_A");
        env::remove_var("PIPEKIT_TEST_REQ_B");
    }

    #[test]
    fn test_require_lists_every_missing_var() {
        let err = require(&["PIPEKIT_TEST_REQ_X", "PIPEKIT_TEST_REQ_Y"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("PIPEKIT_TEST_REQ_X"));
        assert!(message.contains("PIPEKIT_TEST_REQ_Y"));
    }

    #[test]
    fn test_require_rejects_empty_value() {
        env::set_var("PIPEKIT_TEST_REQ_EMPTY", "");
        assert!(require(&["PIPEKIT_TEST_REQ_EMPTY"]).is_err());
        env::remove_var("PIPEKIT_TEST_REQ_EMPTY");
    }

    #[test]
    fn test_require_empty_key_list_is_ok() {
        assert!(require(&[]).is_ok());
    }

    #[test]
    fn test_load_env_file_basic_pair() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(&file, "PIPEKIT_TEST_LOAD_A=hello\n").unwrap();

        let loaded = load_env_file(&file, true).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(env::var("PIPEKIT_TEST_LOAD_A").unwrap(), "hello");
        env::remove_var("PIPEKIT_TEST_LOAD_A");
    }

    #[test]
    fn test_load_env_file_quoted_values() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(
            &file,
            "PIPEKIT_TEST_LOAD_DQ=\"quoted value\"\nPIPEKIT_TEST_LOAD_SQ='single quoted'\n",
        )
        .unwrap();

        load_env_file(&file, true).unwrap();
        assert_eq!(env::var("PIPEKIT_TEST_LOAD_DQ").unwrap(), "quoted value");
        assert_eq!(env::var("PIPEKIT_TEST_LOAD_SQ").unwrap(), "single quoted");
        env::remove_var("PIPEKIT_TEST_LOAD_DQ");
        env::remove_var("PIPEKIT_TEST_LOAD_SQ");
    }

    #[test]
    fn test_load_env_file_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(
            &file,
            "# full line comment\n\nPIPEKIT_TEST_LOAD_C=value  # trailing comment\n",
        )
        .unwrap();

        load_env_file(&file, true).unwrap();
        assert_eq!(env::var("PIPEKIT_TEST_LOAD_C").unwrap(), "value");
        env::remove_var("PIPEKIT_TEST_LOAD_C");
    }

    #[test]
    fn test_load_env_file_hash_inside_quotes_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(&file, "PIPEKIT_TEST_LOAD_H=\"hello # world\"\n").unwrap();

        load_env_file(&file, true).unwrap();
        assert_eq!(env::var("PIPEKIT_TEST_LOAD_H").unwrap(), "hello # world");
        env::remove_var("PIPEKIT_TEST_LOAD_H");
    }

    #[test]
    fn test_load_env_file_respects_existing_without_overwrite() {
        env::set_var("PIPEKIT_TEST_LOAD_KEEP", "original");
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(&file, "PIPEKIT_TEST_LOAD_KEEP=new_value\n").unwrap();

        load_env_file(&file, false).unwrap();
        assert_eq!(env::var("PIPEKIT_TEST_LOAD_KEEP").unwrap(), "original");

        load_env_file(&file, true).unwrap();
        assert_eq!(env::var("PIPEKIT_TEST_LOAD_KEEP").unwrap(), "new_value");
        env::remove_var("PIPEKIT_TEST_LOAD_KEEP");
    }

    #[test]
    fn test_load_env_file_expands_variables() {
        env::set_var("PIPEKIT_TEST_LOAD_BASE", "/projects");
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(
            &file,
            "PIPEKIT_TEST_LOAD_EXP=${PIPEKIT_TEST_LOAD_BASE}/shots\n",
        )
        .unwrap();

        load_env_file(&file, true).unwrap();
        assert_eq!(
            env::var("PIPEKIT_TEST_LOAD_EXP").unwrap(),
            "/projects/shots"
        );
        env::remove_var("PIPEKIT_TEST_LOAD_BASE");
        env::remove_var("PIPEKIT_TEST_LOAD_EXP");
    }

    #[test]
    fn test_load_env_file_expansion_sees_earlier_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(
            &file,
            "PIPEKIT_TEST_CHAIN_A=root\nPIPEKIT_TEST_CHAIN_B=$PIPEKIT_TEST_CHAIN_A/sub\n",
        )
        .unwrap();

        load_env_file(&file, true).unwrap();
        assert_eq!(env::var("PIPEKIT_TEST_CHAIN_B").unwrap(), "root/sub");
        env::remove_var("PIPEKIT_TEST_CHAIN_A");
        env::remove_var("PIPEKIT_TEST_CHAIN_B");
    }

    #[test]
    fn test_load_env_file_unknown_var_left_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(&file, "PIPEKIT_TEST_LOAD_UNK=$PIPEKIT_NO_SUCH_VAR\n").unwrap();

        load_env_file(&file, true).unwrap();
        assert_eq!(
            env::var("PIPEKIT_TEST_LOAD_UNK").unwrap(),
            "$PIPEKIT_NO_SUCH_VAR"
        );
        env::remove_var("PIPEKIT_TEST_LOAD_UNK");
    }

    #[test]
    fn test_load_env_file_skips_lines_without_equals() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(&file, "NOTAVALIDLINE\nPIPEKIT_TEST_LOAD_V=valid\n").unwrap();

        let loaded = load_env_file(&file, true).unwrap();
        assert_eq!(loaded, 1);
        assert!(env::var("NOTAVALIDLINE").is_err());
        env::remove_var("PIPEKIT_TEST_LOAD_V");
    }

    #[test]
    fn test_load_env_file_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(dir.path().join("nonexistent.env"), true).is_err());
    }

    #[test]
    fn test_strip_inline_comment() {
        assert_eq!(strip_inline_comment("hello  # world"), "hello");
        assert_eq!(strip_inline_comment("\"hello # world\""), "\"hello # world\"");
        assert_eq!(strip_inline_comment("no comment"), "no comment");
    }
}
