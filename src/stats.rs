// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Series statistics used as scales by the transforms.
//!
//! Statistics skip NaN (missing) points and use the population standard
//! deviation. They are always computed from the original series.

use crate::window::Region;
use serde::{Deserialize, Serialize};

/// Summary statistics over a slice of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Number of non-missing values.
    pub count: usize,
    /// Mean of non-missing values (NaN when `count == 0`).
    pub mean: f64,
    /// Population standard deviation (0 when `count == 0`).
    pub std: f64,
    /// Minimum (NaN when `count == 0`).
    pub min: f64,
    /// Maximum (NaN when `count == 0`).
    pub max: f64,
}

impl SeriesStats {
    /// Compute statistics over `values`, ignoring NaN.
    pub fn of(values: &[f64]) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values.iter().filter(|v| !v.is_nan()) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: 0.0,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = sum / count as f64;
        let var = values
            .iter()
            .filter(|v| !v.is_nan())
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / count as f64;

        Self {
            count,
            mean,
            std: var.sqrt(),
            min,
            max,
        }
    }

    /// Statistics over a region widened by `radius` points on each side.
    pub fn around(values: &[f64], region: &Region, radius: usize) -> Self {
        let lo = region.start.saturating_sub(radius);
        let hi = region.end.saturating_add(radius).min(values.len());
        Self::of(&values[lo..hi])
    }
}

/// Statistics computed once per injection from the original series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    /// Whole-series statistics.
    pub global: SeriesStats,
    /// Statistics over the affected region plus its neighbourhood.
    pub local: SeriesStats,
    /// Statistics over the affected region alone.
    pub window: SeriesStats,
}

impl Context {
    /// Compute all statistics for an injection.
    pub fn compute(values: &[f64], region: &Region, radius: usize) -> Self {
        Self::with_global(SeriesStats::of(values), values, region, radius)
    }

    /// Same as [`Context::compute`] with whole-series statistics already known.
    pub fn with_global(global: SeriesStats, values: &[f64], region: &Region, radius: usize) -> Self {
        Self {
            global,
            local: SeriesStats::around(values, region, radius),
            window: SeriesStats::of(&values[region.range()]),
        }
    }
}

/// Mean of the centred window of width `width` around `idx`, ignoring NaN.
///
/// The window covers `width / 2` points on each side of `idx`, so `width`
/// is expected to be odd; an even width reads `width + 1` points. Edges use
/// a truncated window. A window holding only NaN gives NaN.
pub fn centred_mean(values: &[f64], idx: usize, width: usize) -> f64 {
    let half = width / 2;
    let lo = idx.saturating_sub(half);
    let hi = idx.saturating_add(half).saturating_add(1).min(values.len());
    let (sum, n) = values[lo..hi]
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Centred rolling mean over the whole series.
pub fn rolling_mean(values: &[f64], width: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| centred_mean(values, i, width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_stats() {
        let s = SeriesStats::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count, 8);
        assert_relative_eq!(s.mean, 5.0);
        assert_relative_eq!(s.std, 2.0);
        assert_relative_eq!(s.min, 2.0);
        assert_relative_eq!(s.max, 9.0);
    }

    #[test]
    fn test_nan_ignored() {
        let s = SeriesStats::of(&[1.0, f64::NAN, 3.0]);
        assert_eq!(s.count, 2);
        assert_relative_eq!(s.mean, 2.0);
        assert_relative_eq!(s.std, 1.0);
    }

    #[test]
    fn test_all_missing() {
        let s = SeriesStats::of(&[f64::NAN, f64::NAN]);
        assert_eq!(s.count, 0);
        assert_eq!(s.std, 0.0);
        assert!(s.mean.is_nan());
        assert!(s.max.is_nan());
    }

    #[test]
    fn test_constant_has_zero_std() {
        let s = SeriesStats::of(&[100.0; 50]);
        assert_eq!(s.std, 0.0);
    }

    #[test]
    fn test_around_clamps() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let region = Region::checked(1, 3, 10).unwrap();
        let s = SeriesStats::around(&values, &region, 5);
        // [0, 8)
        assert_eq!(s.count, 8);
        assert_relative_eq!(s.mean, 3.5);

        let region = Region::checked(8, 10, 10).unwrap();
        let s = SeriesStats::around(&values, &region, 1);
        assert_eq!(s.count, 3);
        assert_relative_eq!(s.min, 7.0);
    }

    #[test]
    fn test_around_unbounded_radius() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let region = Region::checked(4, 6, 10).unwrap();
        let s = SeriesStats::around(&values, &region, usize::MAX);
        assert_eq!(s.count, 10);
        assert_relative_eq!(s.mean, 4.5);
        assert_relative_eq!(centred_mean(&values, 9, usize::MAX), 4.5);
    }

    #[test]
    fn test_rolling_mean() {
        let rm = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_relative_eq!(rm[0], 1.5);
        assert_relative_eq!(rm[2], 3.0);
        assert_relative_eq!(rm[4], 4.5);

        let rm = rolling_mean(&[f64::NAN, f64::NAN, 1.0], 1);
        assert!(rm[0].is_nan());
        assert_relative_eq!(rm[2], 1.0);
    }
}
