// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Anomaly kinds.
//!
//! The set of kinds is closed. Each kind declares the shape of region it
//! operates on, which drives window selection and parameter defaults.

use crate::error::InjectError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of anomaly to inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Short positive excursion scaled by the local standard deviation.
    Spike,
    /// Short negative excursion scaled by the local standard deviation.
    Drop,
    /// Constant offset from a split point to the end of the series.
    LevelShift,
    /// Inflated deviation around the window mean.
    VarianceChange,
    /// Linear ramp from a split point to the end of the series.
    TrendDrift,
    /// Inflated deviation around a rolling mean.
    SeasonAmpChange,
    /// Value frozen at the first point of the window.
    Flatline,
    /// Values replaced by NaN.
    Missing,
    /// Values pinned to the series maximum.
    StuckHigh,
    /// Values pinned to the series minimum.
    StuckLow,
    /// Values replaced by a fixed constant.
    Blackout,
}

/// Shape of the region a kind modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionShape {
    /// A few contiguous points.
    Point,
    /// A contiguous window sized relative to the series.
    Window,
    /// Everything from a split index to the end.
    SplitToEnd,
}

const ALL_KINDS: [AnomalyKind; 11] = [
    AnomalyKind::Spike,
    AnomalyKind::Drop,
    AnomalyKind::LevelShift,
    AnomalyKind::VarianceChange,
    AnomalyKind::TrendDrift,
    AnomalyKind::SeasonAmpChange,
    AnomalyKind::Flatline,
    AnomalyKind::Missing,
    AnomalyKind::StuckHigh,
    AnomalyKind::StuckLow,
    AnomalyKind::Blackout,
];

impl AnomalyKind {
    /// All kinds in declaration order.
    pub fn all() -> &'static [AnomalyKind] {
        &ALL_KINDS
    }

    /// Stable string identifier, used for labels and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::Spike => "spike",
            AnomalyKind::Drop => "drop",
            AnomalyKind::LevelShift => "level_shift",
            AnomalyKind::VarianceChange => "variance_change",
            AnomalyKind::TrendDrift => "trend_drift",
            AnomalyKind::SeasonAmpChange => "season_amp_change",
            AnomalyKind::Flatline => "flatline",
            AnomalyKind::Missing => "missing",
            AnomalyKind::StuckHigh => "stuck_high",
            AnomalyKind::StuckLow => "stuck_low",
            AnomalyKind::Blackout => "blackout",
        }
    }

    /// Region shape this kind operates on.
    pub fn region_shape(&self) -> RegionShape {
        match self {
            AnomalyKind::Spike | AnomalyKind::Drop => RegionShape::Point,
            AnomalyKind::LevelShift | AnomalyKind::TrendDrift => RegionShape::SplitToEnd,
            AnomalyKind::VarianceChange
            | AnomalyKind::SeasonAmpChange
            | AnomalyKind::Flatline
            | AnomalyKind::Missing
            | AnomalyKind::StuckHigh
            | AnomalyKind::StuckLow
            | AnomalyKind::Blackout => RegionShape::Window,
        }
    }

    /// Minimum series length the kind can be injected into.
    pub fn min_len(&self) -> usize {
        match self.region_shape() {
            // split index is drawn from [1, N-1]
            RegionShape::SplitToEnd => 2,
            RegionShape::Point | RegionShape::Window => 1,
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnomalyKind {
    type Err = InjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ALL_KINDS
            .iter()
            .copied()
            .find(|k| k.as_str() == needle)
            .ok_or_else(|| InjectError::UnknownKind(s.to_string()))
    }
}
