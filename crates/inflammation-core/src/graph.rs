//! Named series handed from the analysis layer to a renderer.

use serde::Serialize;

use crate::error::Result;
use crate::statistics::DailySummary;

/// Key under which the cross-dataset standard deviation is published.
pub const STD_BY_DAY_KEY: &str = "standard deviation by day";

/// One labelled per-day series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// An ordered collection of labelled series, plotted one panel per series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphData {
    pub title: Option<String>,
    pub series: Vec<Series>,
}

impl GraphData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a series. Insertion order is the panel order.
    pub fn insert(&mut self, label: impl Into<String>, values: Vec<f64>) {
        self.series.push(Series {
            label: label.into(),
            values,
        });
    }

    /// Look up a series by its label.
    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Build the "average / max / min" graph for a single dataset.
    pub fn from_summary(summary: &DailySummary) -> Self {
        let mut data = Self::new();
        data.insert("average", summary.mean.clone());
        data.insert("max", summary.max.clone());
        data.insert("min", summary.min.clone());
        data
    }
}

/// A rendering collaborator that displays [`GraphData`].
pub trait Visualizer {
    fn visualize(&mut self, data: &GraphData) -> Result<()>;
}

/// Collects every graph it is asked to display. Handy for callers that want
/// the data without drawing anything.
#[derive(Debug, Default)]
pub struct RecordingVisualizer {
    pub graphs: Vec<GraphData>,
}

impl Visualizer for RecordingVisualizer {
    fn visualize(&mut self, data: &GraphData) -> Result<()> {
        self.graphs.push(data.clone());
        Ok(())
    }
}
