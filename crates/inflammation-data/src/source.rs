//! Data sources: where a dataset collection comes from.
//!
//! Both variants scan one directory for `inflammation*.<ext>` files and load
//! each with the matching parser. They differ only in extension and parser.

use std::path::{Path, PathBuf};

use inflammation_core::models::Matrix;
use inflammation_core::settings::DataFormat;
use inflammation_core::{InflammationError, Result};
use tracing::info;

use crate::reader::{find_matching_files, load_csv, load_json};

/// File-name prefix shared by every dataset file.
pub const FILE_PREFIX: &str = "inflammation";

/// Anything that can produce a collection of measurement matrices.
pub trait DataSource {
    /// Load every dataset, one matrix per file, in discovery order.
    fn load_inflammation_data(&self) -> Result<Vec<Matrix>>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

// ── CsvDataSource ─────────────────────────────────────────────────────────────

/// Loads `inflammation*.csv` files from a directory.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    data_path: PathBuf,
}

impl CsvDataSource {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl DataSource for CsvDataSource {
    fn load_inflammation_data(&self) -> Result<Vec<Matrix>> {
        load_matching(&self.data_path, DataFormat::Csv, load_csv)
    }

    fn describe(&self) -> String {
        format!("CSV files in {}", self.data_path.display())
    }
}

// ── JsonDataSource ────────────────────────────────────────────────────────────

/// Loads `inflammation*.json` files from a directory.
#[derive(Debug, Clone)]
pub struct JsonDataSource {
    data_path: PathBuf,
}

impl JsonDataSource {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl DataSource for JsonDataSource {
    fn load_inflammation_data(&self) -> Result<Vec<Matrix>> {
        load_matching(&self.data_path, DataFormat::Json, load_json)
    }

    fn describe(&self) -> String {
        format!("JSON files in {}", self.data_path.display())
    }
}

/// Build the source variant for `format` rooted at `data_path`.
pub fn source_for(format: DataFormat, data_path: impl Into<PathBuf>) -> Box<dyn DataSource> {
    match format {
        DataFormat::Csv => Box::new(CsvDataSource::new(data_path)),
        DataFormat::Json => Box::new(JsonDataSource::new(data_path)),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Discover `inflammation*.<ext>` in `dir` and load each with `loader`.
///
/// Fails with [`InflammationError::NoMatchingFiles`] before any parsing when
/// nothing matches.
fn load_matching(
    dir: &Path,
    format: DataFormat,
    loader: fn(&Path) -> Result<Matrix>,
) -> Result<Vec<Matrix>> {
    let files = find_matching_files(dir, FILE_PREFIX, format.extension());
    if files.is_empty() {
        return Err(InflammationError::NoMatchingFiles {
            path: dir.to_path_buf(),
            pattern: format!("{FILE_PREFIX}*.{}", format.extension()),
        });
    }

    info!("Loading {} {} file(s) from {}", files.len(), format, dir.display());
    files.iter().map(|path| loader(path)).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
