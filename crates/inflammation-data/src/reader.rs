//! File discovery and matrix loading for inflammation datasets.
//!
//! CSV files hold one patient per line with comma-separated daily readings
//! and no header. JSON files hold either an array of reading arrays or an
//! array of patient records carrying an `observations` array.

use std::path::{Path, PathBuf};

use inflammation_core::models::{parse_cell, Matrix};
use inflammation_core::{InflammationError, Result};
use serde::Deserialize;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find files directly inside `dir` named `{prefix}*.{extension}`, sorted by
/// path.
///
/// A missing or unreadable directory yields an empty list; callers decide
/// whether that is an error.
pub fn find_matching_files(dir: &Path, prefix: &str, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!("Data path is not a directory: {}", dir.display());
        return Vec::new();
    }

    let suffix = format!(".{extension}");
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| name.starts_with(prefix) && name.ends_with(&suffix))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load a headerless, comma-separated matrix.
pub fn load_csv(path: &Path) -> Result<Matrix> {
    let file = std::fs::File::open(path).map_err(|source| InflammationError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (r, record) in reader.records().enumerate() {
        let record = record.map_err(|source| InflammationError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let row = record
            .iter()
            .enumerate()
            .map(|(c, field)| parse_cell(field, r, c))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    ensure_rectangular(path, rows.iter().map(Vec::len))?;
    let matrix = Matrix::from_rows(rows)?;
    debug!(
        "Loaded {} ({} patients x {} days)",
        path.display(),
        matrix.rows(),
        matrix.columns()
    );
    Ok(matrix)
}

/// Load a matrix from a JSON document.
pub fn load_json(path: &Path) -> Result<Matrix> {
    let content = std::fs::read_to_string(path).map_err(|source| InflammationError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Vec<JsonPatient> =
        serde_json::from_str(&content).map_err(|source| InflammationError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let rows: Vec<Vec<serde_json::Value>> =
        document.into_iter().map(JsonPatient::into_readings).collect();

    ensure_rectangular(path, rows.iter().map(Vec::len))?;
    let matrix = Matrix::from_values(&rows)?;
    debug!(
        "Loaded {} ({} patients x {} days)",
        path.display(),
        matrix.rows(),
        matrix.columns()
    );
    Ok(matrix)
}

/// Load a single file, choosing the parser from its extension.
pub fn load_file(path: &Path) -> Result<Matrix> {
    use inflammation_core::settings::DataFormat;

    match DataFormat::from_path(path) {
        Some(DataFormat::Csv) => load_csv(path),
        Some(DataFormat::Json) => load_json(path),
        None => Err(InflammationError::Config(format!(
            "cannot tell the format of {} (expected .csv or .json)",
            path.display()
        ))),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// One JSON patient: a bare array of readings or a record with observations.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonPatient {
    Readings(Vec<serde_json::Value>),
    Record { observations: Vec<serde_json::Value> },
}

impl JsonPatient {
    fn into_readings(self) -> Vec<serde_json::Value> {
        match self {
            JsonPatient::Readings(values) => values,
            JsonPatient::Record { observations } => observations,
        }
    }
}

/// Every row must have as many days as the first one.
fn ensure_rectangular(path: &Path, mut widths: impl Iterator<Item = usize>) -> Result<()> {
    let Some(expected) = widths.next() else {
        return Ok(());
    };
    for (index, found) in widths.enumerate() {
        if found != expected {
            return Err(InflammationError::ShapeMismatch {
                expected,
                found,
                context: format!("{} row {}", path.display(), index + 1),
            });
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    // ── find_matching_files ───────────────────────────────────────────────────

    #[test]
    fn test_find_matching_files_filters_by_prefix_and_extension() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "inflammation-01.csv", "0,1\n");
        write_file(dir.path(), "inflammation-02.csv", "0,1\n");
        write_file(dir.path(), "inflammation-03.json", "[[0,1]]");
        write_file(dir.path(), "small-01.csv", "0,1\n");
        write_file(dir.path(), "inflammation.csv.bak", "0,1\n");

        let files = find_matching_files(dir.path(), "inflammation", "csv");
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["inflammation-01.csv", "inflammation-02.csv"]);
    }

    #[test]
    fn test_find_matching_files_not_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir_all(&sub).unwrap();
        write_file(&sub, "inflammation-01.csv", "0\n");

        assert!(find_matching_files(dir.path(), "inflammation", "csv").is_empty());
    }

    #[test]
    fn test_find_matching_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "inflammation-c.json", "[]");
        write_file(dir.path(), "inflammation-a.json", "[]");
        write_file(dir.path(), "inflammation-b.json", "[]");

        let files = find_matching_files(dir.path(), "inflammation", "json");
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "inflammation-a.json",
                "inflammation-b.json",
                "inflammation-c.json"
            ]
        );
    }

    #[test]
    fn test_find_matching_files_nonexistent_path() {
        let files = find_matching_files(
            Path::new("/tmp/does-not-exist-inflammation-test-xyz"),
            "inflammation",
            "csv",
        );
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_matching_files_skips_broken_entries() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "inflammation-01.csv", "0,1\n");
        std::os::unix::fs::symlink(
            dir.path().join("missing-target.csv"),
            dir.path().join("inflammation-02.csv"),
        )
        .unwrap();

        let files = find_matching_files(dir.path(), "inflammation", "csv");
        assert_eq!(files, vec![dir.path().join("inflammation-01.csv")]);
    }

    // ── load_csv ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_csv_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "inflammation-01.csv", "0,0,1\n0,1,2\n");
        let m = load_csv(&path).unwrap();
        assert_eq!(m.to_rows(), vec![vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 2.0]]);
    }

    #[test]
    fn test_load_csv_trims_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "inflammation-01.csv", " 1 , 2\n\n3,4 \n");
        let m = load_csv(&path).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.get(1, 1), Some(4.0));
    }

    #[test]
    fn test_load_csv_text_is_type_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "inflammation-01.csv", "1,2\n3,abc\n");
        match load_csv(&path).unwrap_err() {
            InflammationError::TypeMismatch { row, column, value } => {
                assert_eq!((row, column), (1, 1));
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_csv_ragged_is_shape_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "inflammation-01.csv", "1,2,3\n4,5\n");
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(
            err,
            InflammationError::ShapeMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert!(err.to_string().contains("inflammation-01.csv"));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/tmp/no-such-inflammation-file.csv")).unwrap_err();
        assert!(matches!(err, InflammationError::FileRead { .. }));
    }

    // ── load_json ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_json_nested_arrays() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "inflammation-01.json", "[[0, 1, 2], [3, 4, 5]]");
        let m = load_json(&path).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.columns(), 3);
        assert_eq!(m.get(1, 2), Some(5.0));
    }

    #[test]
    fn test_load_json_patient_records() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "inflammation-01.json",
            r#"[{"observations": [0, 1]}, {"observations": [2, 3], "name": "Alice"}]"#,
        );
        let m = load_json(&path).unwrap();
        assert_eq!(m.to_rows(), vec![vec![0.0, 1.0], vec![2.0, 3.0]]);
    }

    #[test]
    fn test_load_json_text_is_type_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "inflammation-01.json",
            r#"[["Hello", "there"], ["General", "Kenobi"]]"#,
        );
        assert!(matches!(
            load_json(&path),
            Err(InflammationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_load_json_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "inflammation-01.json", "{not json");
        assert!(matches!(
            load_json(&path),
            Err(InflammationError::JsonParse { .. })
        ));
    }

    #[test]
    fn test_load_json_ragged_is_shape_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "inflammation-01.json", "[[1, 2], [3]]");
        assert!(matches!(
            load_json(&path),
            Err(InflammationError::ShapeMismatch { .. })
        ));
    }

    // ── load_file ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_file_dispatches_on_extension() {
        let dir = TempDir::new().unwrap();
        let csv = write_file(dir.path(), "a.csv", "1,2\n");
        let json = write_file(dir.path(), "b.json", "[[1, 2]]");
        assert_eq!(load_file(&csv).unwrap(), load_file(&json).unwrap());
    }

    #[test]
    fn test_load_file_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let txt = write_file(dir.path(), "a.txt", "1,2\n");
        assert!(matches!(
            load_file(&txt),
            Err(InflammationError::Config(_))
        ));
    }
}
