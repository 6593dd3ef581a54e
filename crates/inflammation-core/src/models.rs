//! Core data model: the patients × days measurement matrix.

use serde::Serialize;

use crate::error::{InflammationError, Result};

// ── Matrix ────────────────────────────────────────────────────────────────────

/// A rectangular matrix of inflammation readings.
///
/// Rows are patients, columns are days. Values are stored row-major and the
/// matrix is always rectangular: every constructor rejects ragged input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from nested rows.
    ///
    /// Fails with [`InflammationError::ShapeMismatch`] when a row has a
    /// different length from the first one.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * columns);

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(InflammationError::ShapeMismatch {
                    expected: columns,
                    found: row.len(),
                    context: format!("row {index}"),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            data,
        })
    }

    /// Build a matrix from untyped JSON values.
    ///
    /// Numbers are accepted as-is and strings are accepted when they parse
    /// as a number. Anything else fails with
    /// [`InflammationError::TypeMismatch`] naming the offending cell.
    pub fn from_values(rows: &[Vec<serde_json::Value>]) -> Result<Self> {
        let mut numeric = Vec::with_capacity(rows.len());
        for (r, row) in rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(row.len());
            for (c, cell) in row.iter().enumerate() {
                parsed.push(value_to_f64(cell, r, c)?);
            }
            numeric.push(parsed);
        }
        Self::from_rows(numeric)
    }

    /// Build a matrix where every cell holds `value`.
    pub fn filled(rows: usize, columns: usize, value: f64) -> Self {
        Self {
            rows,
            columns,
            data: vec![value; rows * columns],
        }
    }

    /// Stack equally long vectors as the rows of a new matrix.
    ///
    /// `context` names what is being stacked for the shape-mismatch message.
    pub fn stack(vectors: &[Vec<f64>], context: &str) -> Result<Self> {
        let columns = vectors.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = vectors.iter().find(|v| v.len() != columns) {
            return Err(InflammationError::ShapeMismatch {
                expected: columns,
                found: bad.len(),
                context: context.to_string(),
            });
        }
        Self::from_rows(vectors.to_vec())
    }

    /// Number of patients.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of days.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Reading for `row`, `column`, or `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.rows && column < self.columns {
            Some(self.data[row * self.columns + column])
        } else {
            None
        }
    }

    /// Borrow one patient's readings.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.columns;
            Some(&self.data[start..start + self.columns])
        } else {
            None
        }
    }

    /// Iterate over patient rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |r| &self.data[r * self.columns..(r + 1) * self.columns])
    }

    /// Copy one day's readings across all patients.
    pub fn column(&self, column: usize) -> Option<Vec<f64>> {
        if column < self.columns {
            Some(self.iter_rows().map(|row| row[column]).collect())
        } else {
            None
        }
    }

    /// Convert back into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn value_to_f64(cell: &serde_json::Value, row: usize, column: usize) -> Result<f64> {
    let mismatch = || InflammationError::TypeMismatch {
        row,
        column,
        value: match cell {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    };

    match cell {
        serde_json::Value::Number(n) => n.as_f64().ok_or_else(mismatch),
        serde_json::Value::String(s) => parse_cell(s, row, column),
        _ => Err(mismatch()),
    }
}

/// Parse a single text cell as a finite number.
///
/// Used by the CSV loader and by [`Matrix::from_values`] for numeric strings.
pub fn parse_cell(text: &str, row: usize, column: usize) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InflammationError::TypeMismatch {
            row,
            column,
            value: text.to_string(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
