use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory used by `analyse` when neither the CLI, the environment nor the
/// last-used file names one.
pub const DEFAULT_DATA_DIR: &str = "data";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Patient inflammation statistics and plots
#[derive(Parser, Debug, Clone)]
#[command(
    name = "inflammation",
    about = "Patient inflammation statistics and plots",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Display theme
    #[arg(long, global = true, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Print values as plain text instead of drawing charts
    #[arg(long, global = true)]
    pub plain: bool,

    /// Logging level
    #[arg(long, global = true, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long, global = true)]
    pub clear: bool,
}

/// What to do with the data.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Plot the standard deviation of daily means across every dataset in a directory
    Analyse {
        /// Directory holding inflammation*.csv or inflammation*.json files
        #[arg(long, env = "INFLAMMATION_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Input file format
        #[arg(long, value_enum)]
        format: Option<DataFormat>,
    },

    /// Plot daily average, max and min for each file
    Visualize {
        /// Inflammation data files (.csv or .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show readings normalised by each patient's maximum
    Normalise {
        /// Inflammation data file (.csv or .json)
        file: PathBuf,

        /// Only show this patient (zero-based row index)
        #[arg(long)]
        patient: Option<usize>,
    },
}

/// On-disk encoding of a measurement matrix.
#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Csv,
    Json,
}

impl DataFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
        }
    }

    /// Guess the format from a file's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(DataFormat::Csv),
            "json" => Some(DataFormat::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.inflammation/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,
}

impl LastUsedParams {
    /// `~/.inflammation/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".inflammation").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    ///
    /// Problems reading or writing the last-used file never abort the run.
    /// They are returned as warnings for the caller to log once logging is
    /// installed.
    pub fn load_with_last_used() -> (Self, Vec<String>) {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] but with explicit arguments
    /// and config path, so tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> (Self, Vec<String>) {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);
        let mut warnings = Vec::new();

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                warnings.push(format!("Could not clear {}: {}", config_path.display(), e));
            }
            return (Self::apply_debug(settings), warnings);
        }

        let mut last = LastUsedParams::load_from(config_path);

        // CLI (and environment) always win over persisted values.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme.clone() {
                settings.theme = v;
            }
        }
        if let Command::Analyse { data_dir, format } = &mut settings.command {
            if data_dir.is_none() {
                *data_dir = last.data_dir.clone();
            }
            if format.is_none() {
                *format = last.format;
            }
        }

        settings = Self::apply_debug(settings);

        last.update_from(&settings);
        if let Err(e) = last.save_to(config_path) {
            warnings.push(format!(
                "Could not persist settings to {}: {}",
                config_path.display(),
                e
            ));
        }

        (settings, warnings)
    }

    /// Data directory for `analyse`, falling back to [`DEFAULT_DATA_DIR`].
    pub fn data_dir(&self) -> Option<PathBuf> {
        match &self.command {
            Command::Analyse { data_dir, .. } => Some(
                data_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            ),
            _ => None,
        }
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl LastUsedParams {
    /// Record the values `settings` carries. Fields the current command does
    /// not use keep their saved value.
    pub fn update_from(&mut self, settings: &Settings) {
        self.theme = Some(settings.theme.clone());
        if let Command::Analyse { data_dir, format } = &settings.command {
            if data_dir.is_some() {
                self.data_dir = data_dir.clone();
            }
            if format.is_some() {
                self.format = *format;
            }
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line,
/// either before or after the subcommand.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    let explicit = |m: &clap::ArgMatches| {
        m.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
    };
    explicit(matches) || matches.subcommand().is_some_and(|(_, sub)| explicit(sub))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
