// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Parameter overrides and resolution.
//!
//! Callers pass an [`Overrides`] bag; the resolver merges it with the
//! defaults table in [`EngineConfig`], rejects options the kind does not
//! use, validates ranges and produces [`ResolvedParams`]. The resolved set
//! lists every parameter the transform reads, defaults included.

use crate::config::EngineConfig;
use crate::error::{InjectError, Result};
use crate::kind::{AnomalyKind, RegionShape};
use crate::stats::SeriesStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied options. Unset fields fall back to defaults.
///
/// Deserialization reads counts as plain numbers so that a malformed count
/// is reported as an invalid parameter, the same as [`Overrides::set`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOverrides")]
pub struct Overrides {
    /// Magnitude multiplier, must be positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<f64>,
    /// Span of the affected region in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_points: Option<usize>,
    /// Ramp increment per point for TREND_DRIFT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope_unit: Option<f64>,
    /// Rolling mean width for SEASON_AMP_CHANGE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_window: Option<usize>,
    /// Neighbourhood radius for local statistics (SPIKE, DROP).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_radius: Option<usize>,
    /// Constant written by BLACKOUT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_value: Option<f64>,
}

/// Wire form of [`Overrides`]: counts arrive as plain numbers and are
/// checked by name.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawOverrides {
    severity: Option<f64>,
    #[serde(alias = "window")]
    n_points: Option<f64>,
    slope_unit: Option<f64>,
    rolling_window: Option<f64>,
    context_radius: Option<f64>,
    fill_value: Option<f64>,
}

impl TryFrom<RawOverrides> for Overrides {
    type Error = InjectError;

    fn try_from(raw: RawOverrides) -> Result<Self> {
        let count = |name: &str, value: Option<f64>| value.map(|v| as_count(name, v)).transpose();
        Ok(Self {
            severity: raw.severity,
            n_points: count("n_points", raw.n_points)?,
            slope_unit: raw.slope_unit,
            rolling_window: count("rolling_window", raw.rolling_window)?,
            context_radius: count("context_radius", raw.context_radius)?,
            fill_value: raw.fill_value,
        })
    }
}

impl Overrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the magnitude multiplier.
    pub fn with_severity(mut self, severity: f64) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set the region span in points.
    pub fn with_n_points(mut self, n: usize) -> Self {
        self.n_points = Some(n);
        self
    }

    /// Same as [`Overrides::with_n_points`], named for window kinds.
    pub fn with_window(self, n: usize) -> Self {
        self.with_n_points(n)
    }

    /// Set the TREND_DRIFT ramp increment.
    pub fn with_slope_unit(mut self, slope: f64) -> Self {
        self.slope_unit = Some(slope);
        self
    }

    /// Set the rolling mean width (odd).
    pub fn with_rolling_window(mut self, width: usize) -> Self {
        self.rolling_window = Some(width);
        self
    }

    /// Set the local statistics radius.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = Some(radius);
        self
    }

    /// Set the BLACKOUT constant.
    pub fn with_fill_value(mut self, value: f64) -> Self {
        self.fill_value = Some(value);
        self
    }

    /// Parse a keyword bag from JSON, e.g. `{"severity": 1.5, "n_points": 5}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawOverrides = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Set an option by name.
    ///
    /// Count options (`n_points`, `window`, `rolling_window`,
    /// `context_radius`) must be non-negative integers.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "severity" => self.severity = Some(value),
            "slope_unit" => self.slope_unit = Some(value),
            "fill_value" => self.fill_value = Some(value),
            "n_points" | "window" => self.n_points = Some(as_count(name, value)?),
            "rolling_window" => self.rolling_window = Some(as_count(name, value)?),
            "context_radius" => self.context_radius = Some(as_count(name, value)?),
            other => return Err(InjectError::UnknownParameter(other.to_string())),
        }
        Ok(())
    }

    /// Names of the options that were set.
    pub fn provided(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.severity.is_some() {
            names.push("severity");
        }
        if self.n_points.is_some() {
            names.push("n_points");
        }
        if self.slope_unit.is_some() {
            names.push("slope_unit");
        }
        if self.rolling_window.is_some() {
            names.push("rolling_window");
        }
        if self.context_radius.is_some() {
            names.push("context_radius");
        }
        if self.fill_value.is_some() {
            names.push("fill_value");
        }
        names
    }
}

fn as_count(name: &str, value: f64) -> Result<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Ok(value as usize)
    } else {
        Err(InjectError::invalid(
            name,
            format!("must be a non-negative integer, got {}", value),
        ))
    }
}

/// Options each kind reads.
pub fn recognized_options(kind: AnomalyKind) -> &'static [&'static str] {
    match kind {
        AnomalyKind::Spike | AnomalyKind::Drop => &["severity", "n_points", "context_radius"],
        AnomalyKind::LevelShift => &["severity"],
        AnomalyKind::TrendDrift => &["severity", "slope_unit"],
        AnomalyKind::SeasonAmpChange => &["severity", "n_points", "rolling_window"],
        AnomalyKind::Blackout => &["severity", "n_points", "fill_value"],
        AnomalyKind::VarianceChange
        | AnomalyKind::Flatline
        | AnomalyKind::Missing
        | AnomalyKind::StuckHigh
        | AnomalyKind::StuckLow => &["severity", "n_points"],
    }
}

/// A resolved parameter value as recorded in reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Count(usize),
    Real(f64),
}

impl ParamValue {
    /// Numeric value as `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            ParamValue::Count(n) => *n as f64,
            ParamValue::Real(x) => *x,
        }
    }

    /// Count value, if this is one.
    pub fn as_count(&self) -> Option<usize> {
        match self {
            ParamValue::Count(n) => Some(*n),
            ParamValue::Real(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Count(n) => write!(f, "{}", n),
            ParamValue::Real(x) => write!(f, "{}", x),
        }
    }
}

/// Fully resolved parameters for one injection.
///
/// Optional fields are `Some` exactly when the kind reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub kind: AnomalyKind,
    pub severity: f64,
    /// Region span; `None` for split-to-end kinds.
    pub span: Option<usize>,
    pub context_radius: Option<usize>,
    pub slope_unit: Option<f64>,
    pub rolling_window: Option<usize>,
    pub fill_value: Option<f64>,
}

impl ResolvedParams {
    /// Name the span is recorded under.
    pub fn span_name(&self) -> &'static str {
        match self.kind.region_shape() {
            RegionShape::Point => "n_points",
            RegionShape::Window | RegionShape::SplitToEnd => "window",
        }
    }

    /// Parameter mapping as recorded in the report.
    pub fn to_map(&self) -> BTreeMap<String, ParamValue> {
        let mut map = BTreeMap::new();
        map.insert("severity".to_string(), ParamValue::Real(self.severity));
        if let Some(span) = self.span {
            map.insert(self.span_name().to_string(), ParamValue::Count(span));
        }
        if let Some(radius) = self.context_radius {
            map.insert("context_radius".to_string(), ParamValue::Count(radius));
        }
        if let Some(slope) = self.slope_unit {
            map.insert("slope_unit".to_string(), ParamValue::Real(slope));
        }
        if let Some(width) = self.rolling_window {
            map.insert("rolling_window".to_string(), ParamValue::Count(width));
        }
        if let Some(fill) = self.fill_value {
            map.insert("fill_value".to_string(), ParamValue::Real(fill));
        }
        map
    }
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InjectError::invalid(
            name,
            format!("must be a positive real, got {}", value),
        ))
    }
}

/// Resolve overrides for `kind` on a series of `len` points.
///
/// `global` supplies the scale for defaults derived from the series
/// (`slope_unit`).
pub fn resolve(
    kind: AnomalyKind,
    overrides: &Overrides,
    config: &EngineConfig,
    len: usize,
    global: &SeriesStats,
) -> Result<ResolvedParams> {
    let recognized = recognized_options(kind);
    if let Some(name) = overrides
        .provided()
        .into_iter()
        .find(|name| !recognized.contains(name))
    {
        return Err(InjectError::invalid(
            name,
            format!("not applicable to {}", kind),
        ));
    }

    let severity = positive(
        "severity",
        overrides
            .severity
            .unwrap_or_else(|| config.severity.for_kind(kind)),
    )?;

    let span = match kind.region_shape() {
        RegionShape::SplitToEnd => None,
        shape => Some(match overrides.n_points {
            Some(n) if n == 0 || n > len => {
                return Err(InjectError::invalid(
                    if shape == RegionShape::Point {
                        "n_points"
                    } else {
                        "window"
                    },
                    format!("must be in [1, {}], got {}", len, n),
                ));
            }
            Some(n) => n,
            None if shape == RegionShape::Point => config.point_count.min(len),
            None => config.default_window(len),
        }),
    };

    let mut params = ResolvedParams {
        kind,
        severity,
        span,
        context_radius: None,
        slope_unit: None,
        rolling_window: None,
        fill_value: None,
    };

    match kind {
        AnomalyKind::Spike | AnomalyKind::Drop => {
            let radius = overrides.context_radius.unwrap_or(config.context_radius);
            if radius == 0 {
                return Err(InjectError::invalid("context_radius", "must be at least 1"));
            }
            params.context_radius = Some(radius);
        }
        AnomalyKind::TrendDrift => {
            params.slope_unit = Some(match overrides.slope_unit {
                Some(slope) => positive("slope_unit", slope)?,
                // ramp reaches severity * std after `len` points
                None => global.std / len as f64,
            });
        }
        AnomalyKind::SeasonAmpChange => {
            let width = overrides.rolling_window.unwrap_or(config.rolling_window);
            if width % 2 == 0 {
                return Err(InjectError::invalid(
                    "rolling_window",
                    format!("must be odd, got {}", width),
                ));
            }
            params.rolling_window = Some(width);
        }
        AnomalyKind::Blackout => {
            let fill = overrides.fill_value.unwrap_or(config.blackout_value);
            if !fill.is_finite() {
                return Err(InjectError::invalid(
                    "fill_value",
                    format!("must be finite, got {}", fill),
                ));
            }
            params.fill_value = Some(fill);
        }
        AnomalyKind::LevelShift
        | AnomalyKind::VarianceChange
        | AnomalyKind::Flatline
        | AnomalyKind::Missing
        | AnomalyKind::StuckHigh
        | AnomalyKind::StuckLow => {}
    }

    Ok(params)
}
