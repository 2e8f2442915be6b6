// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Time series data model.
//!
//! A series is an ordered sequence of `(timestamp_ms, value)` pairs with
//! strictly increasing timestamps. Missing data is represented by NaN.

use crate::error::{InjectError, Result};
use serde::{Deserialize, Serialize};

/// An ordered numeric series indexed by millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    timestamps: Vec<u64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from parallel timestamp and value vectors.
    ///
    /// Timestamps must be strictly increasing and both vectors must have
    /// the same length. An empty series is representable but cannot be
    /// injected.
    pub fn new(timestamps: Vec<u64>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(InjectError::InvalidSeries(format!(
                "{} timestamps for {} values",
                timestamps.len(),
                values.len()
            )));
        }
        if let Some(pos) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InjectError::InvalidSeries(format!(
                "timestamps not strictly increasing at position {}",
                pos + 1
            )));
        }
        Ok(Self { timestamps, values })
    }

    /// Create an evenly spaced series starting at `start_ms`.
    pub fn regular(start_ms: u64, interval_ms: u64, values: Vec<f64>) -> Result<Self> {
        if interval_ms == 0 && values.len() > 1 {
            return Err(InjectError::InvalidSeries(
                "sample interval must be positive".to_string(),
            ));
        }
        let timestamps = (0..values.len() as u64)
            .map(|i| i.checked_mul(interval_ms)?.checked_add(start_ms))
            .collect::<Option<Vec<u64>>>()
            .ok_or_else(|| InjectError::InvalidSeries("timestamp overflows u64".to_string()))?;
        Ok(Self { timestamps, values })
    }

    /// Create a series indexed by position (timestamps `0, 1, 2, ...`).
    pub fn from_values(values: Vec<f64>) -> Self {
        let timestamps = (0..values.len() as u64).collect();
        Self { timestamps, values }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Timestamps in milliseconds.
    pub fn timestamps(&self) -> &[u64] {
        &self.timestamps
    }

    /// Values, NaN marking missing data.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Point at a position.
    pub fn get(&self, idx: usize) -> Option<(u64, f64)> {
        Some((*self.timestamps.get(idx)?, *self.values.get(idx)?))
    }

    /// Iterate over `(timestamp_ms, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Number of missing (NaN) points.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// A new series sharing these timestamps with replacement values.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        Self {
            timestamps: self.timestamps.clone(),
            values,
        }
    }
}
