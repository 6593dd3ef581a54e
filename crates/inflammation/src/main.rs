mod bootstrap;

use anyhow::{Context, Result};
use inflammation_core::graph::{GraphData, Visualizer};
use inflammation_core::models::Matrix;
use inflammation_core::settings::{Command, Settings};
use inflammation_core::statistics::{patient_normalise, DailySummary};
use inflammation_core::InflammationError;
use inflammation_data::analysis::analyse_data;
use inflammation_data::reader::load_file;
use inflammation_data::source::source_for;
use inflammation_ui::app::TerminalVisualizer;
use inflammation_ui::text::TextVisualizer;

/// Decimal places used for plain-text output.
const PLAIN_DECIMALS: usize = 3;

fn main() -> Result<()> {
    let (settings, warnings) = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("inflammation v{} starting", env!("CARGO_PKG_VERSION"));
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    match &settings.command {
        Command::Analyse { format, .. } => {
            let data_dir = settings
                .data_dir()
                .context("analyse requires a data directory")?;
            let source = source_for(format.unwrap_or_default(), data_dir);
            tracing::info!("Analysing {}", source.describe());

            let mut renderer = renderer(&settings);
            let result = analyse_data(source.as_ref(), renderer.as_mut())?;
            tracing::info!(
                "Standard deviation computed over {} dataset(s), {} day(s) in {:.3}s",
                result.metadata.datasets_loaded,
                result.metadata.days,
                result.metadata.load_time_seconds
            );
        }

        Command::Visualize { files } => {
            let mut renderer = renderer(&settings);
            for file in files {
                let matrix = load_file(file)?;
                let summary = DailySummary::from_matrix(&matrix)?;
                let graph = GraphData::from_summary(&summary).with_title(file.display().to_string());
                renderer.visualize(&graph)?;
            }
        }

        Command::Normalise { file, patient } => {
            let normalised = patient_normalise(&load_file(file)?)?;
            let (view, first_patient) = select_patient(normalised, *patient)?;
            let title = format!("{} (normalised)", file.display());
            show_matrix(&settings, &title, &view, first_patient)?;
        }
    }

    Ok(())
}

/// Pick the renderer requested by the global flags.
fn renderer(settings: &Settings) -> Box<dyn Visualizer> {
    if settings.plain {
        Box::new(TextVisualizer::new(std::io::stdout(), PLAIN_DECIMALS))
    } else {
        Box::new(TerminalVisualizer::new(&settings.theme))
    }
}

fn show_matrix(settings: &Settings, title: &str, matrix: &Matrix, first_patient: usize) -> Result<()> {
    if settings.plain {
        TextVisualizer::new(std::io::stdout(), PLAIN_DECIMALS).write_matrix(
            title,
            matrix,
            first_patient,
        )?;
    } else {
        TerminalVisualizer::new(&settings.theme).show_matrix(
            title,
            matrix,
            first_patient,
            2,
        )?;
    }
    Ok(())
}

/// Narrow `matrix` to a single patient when one is requested.
///
/// Returns the view together with the index of its first row.
fn select_patient(
    matrix: Matrix,
    patient: Option<usize>,
) -> std::result::Result<(Matrix, usize), InflammationError> {
    let Some(index) = patient else {
        return Ok((matrix, 0));
    };
    let row = matrix.row(index).ok_or_else(|| {
        InflammationError::Config(format!(
            "patient {index} out of range (dataset has {} patients)",
            matrix.rows()
        ))
    })?;
    Ok((Matrix::from_rows(vec![row.to_vec()])?, index))
}
