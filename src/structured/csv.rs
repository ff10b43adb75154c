use super::should_write;
use crate::error::{PipekitError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Export rows to a CSV file, optionally preceded by a header row.
///
/// An empty row set writes nothing and reports `Ok(false)`. Returns
/// `Ok(false)` without touching the file when it already exists and
/// `overwrite` is off.
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    headers: Option<&[&str]>,
    rows: &[Vec<String>],
    overwrite: bool,
) -> Result<bool> {
    let path = path.as_ref();
    if rows.is_empty() {
        tracing::debug!(path = %path.display(), "no rows to write");
        return Ok(false);
    }
    if !should_write(path, overwrite) {
        return Ok(false);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(PipekitError::Csv)?;
    if let Some(headers) = headers {
        writer.write_record(headers).map_err(PipekitError::Csv)?;
    }
    for row in rows {
        writer.write_record(row).map_err(PipekitError::Csv)?;
    }
    writer.flush().map_err(PipekitError::Io)?;
    Ok(true)
}

/// Import a CSV file as raw rows, header row included.
/// Returns `None` if the file does not exist.
pub fn read_csv_rows<P: AsRef<Path>>(path: P) -> Result<Option<Vec<Vec<String>>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(PipekitError::Csv)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(PipekitError::Csv)?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Some(rows))
}

/// Import a CSV file as one map per data row, keyed by the header row.
/// Returns `None` if the file does not exist.
pub fn read_csv_maps<P: AsRef<Path>>(path: P) -> Result<Option<Vec<BTreeMap<String, String>>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = csv::Reader::from_path(path).map_err(PipekitError::Csv)?;
    let headers = reader.headers().map_err(PipekitError::Csv)?.clone();

    let mut maps = Vec::new();
    for record in reader.records() {
        let record = record.map_err(PipekitError::Csv)?;
        maps.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        );
    }
    Ok(Some(maps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["sh0100".into(), "1001".into()],
            vec!["sh0200".into(), "1024".into()],
        ]
    }

    #[test]
    fn test_write_with_headers_and_read_maps() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("shots.csv");

        assert!(write_csv(&file, Some(&["shot", "start"]), &rows(), false).unwrap());

        let maps = read_csv_maps(&file).unwrap().unwrap();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0]["shot"], "sh0100");
        assert_eq!(maps[1]["start"], "1024");
    }

    #[test]
    fn test_read_rows_includes_header() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("shots.csv");
        write_csv(&file, Some(&["shot", "start"]), &rows(), false).unwrap();

        let raw = read_csv_rows(&file).unwrap().unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0], vec!["shot", "start"]);
        assert_eq!(raw[2], vec!["sh0200", "1024"]);
    }

    #[test]
    fn test_write_without_headers() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bare.csv");
        write_csv(&file, None, &rows(), false).unwrap();

        let raw = read_csv_rows(&file).unwrap().unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0], vec!["sh0100", "1001"]);
    }

    #[test]
    fn test_empty_rows_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.csv");

        assert!(!write_csv(&file, Some(&["a"]), &[], false).unwrap());
        assert!(!file.exists());
    }

    #[test]
    fn test_write_does_not_overwrite_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("shots.csv");
        fs::write(&file, "existing").unwrap();

        assert!(!write_csv(&file, None, &rows(), false).unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), "existing");

        assert!(write_csv(&file, None, &rows(), true).unwrap());
        assert_ne!(fs::read_to_string(&file).unwrap(), "existing");
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_csv_rows(dir.path().join("nope.csv")).unwrap().is_none());
        assert!(read_csv_maps(dir.path().join("nope.csv")).unwrap().is_none());
    }
}
