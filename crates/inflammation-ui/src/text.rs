//! Plain-text output for pipes, scripts and `--plain`.

use std::io::Write;

use inflammation_core::formatting::{day_label, format_reading, format_row};
use inflammation_core::graph::{GraphData, Visualizer};
use inflammation_core::models::Matrix;
use inflammation_core::Result;

/// Writes each series as a block of `day<TAB>value` lines.
pub struct TextVisualizer<W: Write> {
    writer: W,
    decimals: usize,
}

impl<W: Write> TextVisualizer<W> {
    pub fn new(writer: W, decimals: usize) -> Self {
        Self { writer, decimals }
    }

    /// Write a matrix as one tab-separated line per patient, prefixed by the
    /// patient index.
    pub fn write_matrix(&mut self, title: &str, matrix: &Matrix, first_patient: usize) -> Result<()> {
        writeln!(self.writer, "# {title}")?;
        for (i, row) in matrix.iter_rows().enumerate() {
            writeln!(
                self.writer,
                "{}\t{}",
                first_patient + i,
                format_row(row, self.decimals, "\t")
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Visualizer for TextVisualizer<W> {
    fn visualize(&mut self, data: &GraphData) -> Result<()> {
        if let Some(title) = &data.title {
            writeln!(self.writer, "# {title}")?;
        }
        for series in &data.series {
            writeln!(self.writer, "## {}", series.label)?;
            for (day, value) in series.values.iter().enumerate() {
                writeln!(
                    self.writer,
                    "{}\t{}",
                    day_label(day),
                    format_reading(*value, self.decimals)
                )?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
