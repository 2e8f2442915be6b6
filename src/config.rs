// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Injector configuration.
//!
//! Holds the seed and the defaults table the parameter resolver falls back
//! to when a caller omits an option.

use crate::error::{InjectError, Result};
use crate::kind::AnomalyKind;
use serde::{Deserialize, Serialize};

/// Master configuration for an injector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed of the random stream.
    pub seed: u64,

    /// Default span for point kinds (SPIKE, DROP).
    pub point_count: usize,

    /// Default span for window kinds, as a fraction of series length.
    pub window_fraction: f64,

    /// Neighbourhood radius around the region for local statistics.
    /// At least 1.
    pub context_radius: usize,

    /// Width of the centred rolling mean used by SEASON_AMP_CHANGE. Odd.
    pub rolling_window: usize,

    /// Constant written by BLACKOUT.
    pub blackout_value: f64,

    /// Default severity per kind.
    pub severity: SeverityDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: crate::DEFAULT_SEED,
            point_count: 3,
            window_fraction: 0.1,
            context_radius: 25,
            rolling_window: 51,
            blackout_value: 0.0,
            severity: SeverityDefaults::default(),
        }
    }
}

/// Default severity for each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityDefaults {
    pub spike: f64,
    pub drop: f64,
    pub level_shift: f64,
    pub variance_change: f64,
    pub trend_drift: f64,
    pub season_amp_change: f64,
    /// Shared by the value-replacing kinds (flatline, missing, stuck, blackout).
    pub replacement: f64,
}

impl Default for SeverityDefaults {
    fn default() -> Self {
        Self {
            spike: 2.0,
            drop: 2.0,
            level_shift: 1.5,
            variance_change: 1.0,
            trend_drift: 1.0,
            season_amp_change: 1.0,
            replacement: 1.0,
        }
    }
}

impl SeverityDefaults {
    /// Default severity for a kind.
    pub fn for_kind(&self, kind: AnomalyKind) -> f64 {
        match kind {
            AnomalyKind::Spike => self.spike,
            AnomalyKind::Drop => self.drop,
            AnomalyKind::LevelShift => self.level_shift,
            AnomalyKind::VarianceChange => self.variance_change,
            AnomalyKind::TrendDrift => self.trend_drift,
            AnomalyKind::SeasonAmpChange => self.season_amp_change,
            AnomalyKind::Flatline
            | AnomalyKind::Missing
            | AnomalyKind::StuckHigh
            | AnomalyKind::StuckLow
            | AnomalyKind::Blackout => self.replacement,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("severity.spike", self.spike),
            ("severity.drop", self.drop),
            ("severity.level_shift", self.level_shift),
            ("severity.variance_change", self.variance_change),
            ("severity.trend_drift", self.trend_drift),
            ("severity.season_amp_change", self.season_amp_change),
            ("severity.replacement", self.replacement),
        ]
        .into_iter()
    }
}

impl EngineConfig {
    /// Create a default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the default span for point kinds.
    pub fn with_point_count(mut self, n: usize) -> Self {
        self.point_count = n;
        self
    }

    /// Set the default window span as a fraction of series length.
    pub fn with_window_fraction(mut self, fraction: f64) -> Self {
        self.window_fraction = fraction;
        self
    }

    /// Set the local statistics radius.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    /// Set the rolling mean width.
    pub fn with_rolling_window(mut self, width: usize) -> Self {
        self.rolling_window = width;
        self
    }

    /// Set the blackout constant.
    pub fn with_blackout_value(mut self, value: f64) -> Self {
        self.blackout_value = value;
        self
    }

    /// Set the default severities.
    pub fn with_severity(mut self, severity: SeverityDefaults) -> Self {
        self.severity = severity;
        self
    }

    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default span for a window kind on a series of `len` points.
    ///
    /// At least one point, at most `len`.
    pub fn default_window(&self, len: usize) -> usize {
        ((len as f64 * self.window_fraction).round() as usize).clamp(1, len.max(1))
    }

    /// Check the defaults table is usable.
    pub fn validate(&self) -> Result<()> {
        if self.point_count == 0 {
            return Err(InjectError::invalid("point_count", "must be at least 1"));
        }
        if !(self.window_fraction > 0.0 && self.window_fraction <= 1.0) {
            return Err(InjectError::invalid(
                "window_fraction",
                format!("must be in (0, 1], got {}", self.window_fraction),
            ));
        }
        if self.context_radius == 0 {
            return Err(InjectError::invalid("context_radius", "must be at least 1"));
        }
        if self.rolling_window % 2 == 0 {
            return Err(InjectError::invalid(
                "rolling_window",
                format!("must be odd, got {}", self.rolling_window),
            ));
        }
        if !self.blackout_value.is_finite() {
            return Err(InjectError::invalid("blackout_value", "must be finite"));
        }
        for (name, value) in self.severity.iter() {
            if !(value.is_finite() && value > 0.0) {
                return Err(InjectError::invalid(
                    name,
                    format!("must be positive, got {}", value),
                ));
            }
        }
        Ok(())
    }
}
