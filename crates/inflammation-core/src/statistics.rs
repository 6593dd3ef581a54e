//! Daily statistics over a patients × days [`Matrix`].
//!
//! Every daily statistic reduces the matrix column by column, producing one
//! value per day. All of them refuse an empty matrix with
//! [`InflammationError::EmptyMatrix`] instead of returning NaN or ±∞.

use serde::Serialize;

use crate::error::{InflammationError, Result};
use crate::models::Matrix;

// ── Daily statistics ──────────────────────────────────────────────────────────

/// Column-wise arithmetic mean.
pub fn daily_mean(data: &Matrix) -> Result<Vec<f64>> {
    let sums = reduce_columns(data, 0.0, |acc, v| acc + v)?;
    let n = data.rows() as f64;
    Ok(sums.into_iter().map(|s| s / n).collect())
}

/// Column-wise maximum.
pub fn daily_max(data: &Matrix) -> Result<Vec<f64>> {
    reduce_columns(data, f64::NEG_INFINITY, f64::max)
}

/// Column-wise minimum.
pub fn daily_min(data: &Matrix) -> Result<Vec<f64>> {
    reduce_columns(data, f64::INFINITY, f64::min)
}

/// Column-wise population standard deviation (divisor `N`).
pub fn daily_std(data: &Matrix) -> Result<Vec<f64>> {
    let means = daily_mean(data)?;
    let squares = data.iter_rows().fold(vec![0.0; data.columns()], |mut acc, row| {
        for ((slot, value), mean) in acc.iter_mut().zip(row).zip(&means) {
            *slot += (value - mean).powi(2);
        }
        acc
    });
    let n = data.rows() as f64;
    Ok(squares.into_iter().map(|s| (s / n).sqrt()).collect())
}

// ── Normalisation ─────────────────────────────────────────────────────────────

/// Rescale each patient's readings by that patient's maximum.
///
/// Every value becomes `value / row_max`, so the largest reading in a row
/// maps to exactly 1. A row whose maximum is 0 maps to all zeros.
///
/// Fails with [`InflammationError::NegativeValue`] before computing anything
/// if any reading is negative.
pub fn patient_normalise(data: &Matrix) -> Result<Matrix> {
    for (r, row) in data.iter_rows().enumerate() {
        if let Some((c, &value)) = row.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(InflammationError::NegativeValue {
                row: r,
                column: c,
                value,
            });
        }
    }

    let rows = data
        .iter_rows()
        .map(|row| {
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            row.iter()
                .map(|&v| {
                    let scaled = v / max;
                    // 0 / 0 on an all-zero row.
                    if scaled.is_nan() {
                        0.0
                    } else {
                        scaled.max(0.0)
                    }
                })
                .collect()
        })
        .collect();

    Matrix::from_rows(rows)
}

// ── DailySummary ──────────────────────────────────────────────────────────────

/// Mean, maximum and minimum per day for a single dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub mean: Vec<f64>,
    pub max: Vec<f64>,
    pub min: Vec<f64>,
}

impl DailySummary {
    pub fn from_matrix(data: &Matrix) -> Result<Self> {
        Ok(Self {
            mean: daily_mean(data)?,
            max: daily_max(data)?,
            min: daily_min(data)?,
        })
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn reduce_columns(data: &Matrix, init: f64, f: impl Fn(f64, f64) -> f64) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(InflammationError::EmptyMatrix);
    }
    Ok(data
        .iter_rows()
        .fold(vec![init; data.columns()], |mut acc, row| {
            for (slot, &value) in acc.iter_mut().zip(row) {
                *slot = f(*slot, value);
            }
            acc
        }))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
