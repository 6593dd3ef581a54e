//! Cross-dataset analysis pipeline.
//!
//! Loads every dataset from a [`DataSource`], reduces each to its daily mean,
//! and measures how much those means vary between datasets day by day.

use chrono::Utc;
use inflammation_core::graph::{GraphData, Visualizer, STD_BY_DAY_KEY};
use inflammation_core::models::Matrix;
use inflammation_core::statistics::{daily_mean, daily_std};
use inflammation_core::Result;
use tracing::info;

use crate::source::DataSource;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this result was generated.
    pub generated_at: String,
    /// Where the datasets came from.
    pub source: String,
    /// Number of datasets (files) loaded.
    pub datasets_loaded: usize,
    /// Number of days in every dataset.
    pub days: usize,
    /// Wall-clock seconds spent loading the files.
    pub load_time_seconds: f64,
}

/// The output of [`analyse_data`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Standard deviation of the per-dataset daily means, one value per day.
    pub standard_deviation_by_day: Vec<f64>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Compute the standard deviation by day between datasets.
///
/// 1. Load every dataset from `data_source`.
/// 2. Take the daily mean of each.
/// 3. Stack the means into a datasets × days matrix. Datasets with a
///    different number of days fail with a shape mismatch.
/// 4. Take the population standard deviation of each column.
/// 5. Hand the result to `renderer` under [`STD_BY_DAY_KEY`] and return it.
///
/// Errors from loading propagate unchanged; nothing is rendered on error.
pub fn analyse_data(
    data_source: &dyn DataSource,
    renderer: &mut dyn Visualizer,
) -> Result<AnalysisResult> {
    let load_start = std::time::Instant::now();
    let data = data_source.load_inflammation_data()?;
    let load_time = load_start.elapsed().as_secs_f64();

    let means_by_day = data.iter().map(daily_mean).collect::<Result<Vec<_>>>()?;
    let means_by_day_matrix = Matrix::stack(&means_by_day, "daily means across datasets")?;
    let daily_standard_deviation = daily_std(&means_by_day_matrix)?;

    info!(
        "Analysed {} dataset(s) over {} day(s) from {}",
        data.len(),
        means_by_day_matrix.columns(),
        data_source.describe()
    );

    let mut graph_data = GraphData::new().with_title(data_source.describe());
    graph_data.insert(STD_BY_DAY_KEY, daily_standard_deviation.clone());
    renderer.visualize(&graph_data)?;

    Ok(AnalysisResult {
        standard_deviation_by_day: daily_standard_deviation,
        metadata: AnalysisMetadata {
            generated_at: Utc::now().to_rfc3339(),
            source: data_source.describe(),
            datasets_loaded: data.len(),
            days: means_by_day_matrix.columns(),
            load_time_seconds: load_time,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use inflammation_core::graph::RecordingVisualizer;
    use inflammation_core::InflammationError;

    /// In-memory source for exercising the pipeline without files.
    struct FixedSource(Vec<Vec<Vec<f64>>>);

    impl DataSource for FixedSource {
        fn load_inflammation_data(&self) -> Result<Vec<Matrix>> {
            self.0.iter().cloned().map(Matrix::from_rows).collect()
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    struct FailingSource;

    impl DataSource for FailingSource {
        fn load_inflammation_data(&self) -> Result<Vec<Matrix>> {
            Err(InflammationError::NoMatchingFiles {
                path: "/nowhere".into(),
                pattern: "inflammation*.csv".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_analyse_data_std_of_daily_means() {
        // Daily means: dataset A → [1, 2], dataset B → [3, 2].
        let source = FixedSource(vec![
            vec![vec![0.0, 2.0], vec![2.0, 2.0]],
            vec![vec![3.0, 1.0], vec![3.0, 3.0]],
        ]);
        let mut recorder = RecordingVisualizer::default();

        let result = analyse_data(&source, &mut recorder).unwrap();

        // Column 0: [1, 3] → std 1. Column 1: [2, 2] → std 0.
        assert_eq!(result.standard_deviation_by_day, vec![1.0, 0.0]);
        assert_eq!(result.metadata.datasets_loaded, 2);
        assert_eq!(result.metadata.days, 2);
    }

    #[test]
    fn test_analyse_data_renders_named_series() {
        let source = FixedSource(vec![vec![vec![1.0, 2.0, 3.0]]]);
        let mut recorder = RecordingVisualizer::default();

        let result = analyse_data(&source, &mut recorder).unwrap();

        assert_eq!(recorder.graphs.len(), 1);
        let graph = &recorder.graphs[0];
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.series[0].label, "standard deviation by day");
        assert_eq!(
            graph.get(STD_BY_DAY_KEY).unwrap(),
            result.standard_deviation_by_day.as_slice()
        );
    }

    #[test]
    fn test_analysis_metadata_serializes() {
        let source = FixedSource(vec![vec![vec![1.0, 2.0, 3.0]]]);
        let mut recorder = RecordingVisualizer::default();
        let result = analyse_data(&source, &mut recorder).unwrap();

        let json = serde_json::to_value(&result.metadata).unwrap();
        assert_eq!(json["source"], "fixed");
        assert_eq!(json["datasets_loaded"], 1);
        assert_eq!(json["days"], 3);
        assert!(json["generated_at"].as_str().is_some());
    }

    #[test]
    fn test_analyse_data_single_dataset_is_zero() {
        let source = FixedSource(vec![vec![vec![4.0, 8.0], vec![6.0, 2.0]]]);
        let mut recorder = RecordingVisualizer::default();
        let result = analyse_data(&source, &mut recorder).unwrap();
        assert_eq!(result.standard_deviation_by_day, vec![0.0, 0.0]);
    }

    #[test]
    fn test_analyse_data_propagates_source_error() {
        let mut recorder = RecordingVisualizer::default();
        let err = analyse_data(&FailingSource, &mut recorder).unwrap_err();
        assert!(matches!(err, InflammationError::NoMatchingFiles { .. }));
        assert!(recorder.graphs.is_empty());
    }

    #[test]
    fn test_analyse_data_mismatched_days_is_shape_mismatch() {
        let source = FixedSource(vec![
            vec![vec![1.0, 2.0, 3.0]],
            vec![vec![1.0, 2.0]],
        ]);
        let mut recorder = RecordingVisualizer::default();
        match analyse_data(&source, &mut recorder).unwrap_err() {
            InflammationError::ShapeMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(recorder.graphs.is_empty());
    }

    #[test]
    fn test_analyse_data_empty_dataset_is_error() {
        let source = FixedSource(vec![vec![]]);
        let mut recorder = RecordingVisualizer::default();
        assert!(matches!(
            analyse_data(&source, &mut recorder),
            Err(InflammationError::EmptyMatrix)
        ));
    }
}
