// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Anomaly transforms.
//!
//! One pure function per kind. Each receives the original values, the
//! affected region, the resolved parameters and the statistics of the
//! original series, and returns the replacement values for the region.

use crate::kind::AnomalyKind;
use crate::params::ResolvedParams;
use crate::stats::{centred_mean, Context};
use crate::window::Region;

/// Replacement values for `region`, dispatched on the kind.
pub fn apply(params: &ResolvedParams, values: &[f64], region: &Region, ctx: &Context) -> Vec<f64> {
    let original = &values[region.range()];
    let severity = params.severity;
    match params.kind {
        AnomalyKind::Spike => offset(original, severity * ctx.local.std),
        AnomalyKind::Drop => offset(original, -severity * ctx.local.std),
        AnomalyKind::LevelShift => offset(original, severity * ctx.global.std),
        AnomalyKind::VarianceChange => scale_around(original, ctx.window.mean, severity),
        AnomalyKind::TrendDrift => ramp(original, severity * params.slope_unit.unwrap_or(0.0)),
        AnomalyKind::SeasonAmpChange => {
            let width = params.rolling_window.unwrap_or(1);
            season_amplify(values, region, width, severity)
        }
        AnomalyKind::Flatline => fill(original.len(), original[0]),
        AnomalyKind::Missing => fill(original.len(), f64::NAN),
        AnomalyKind::StuckHigh => fill(original.len(), ctx.global.max),
        AnomalyKind::StuckLow => fill(original.len(), ctx.global.min),
        AnomalyKind::Blackout => fill(original.len(), params.fill_value.unwrap_or(0.0)),
    }
}

/// Add a constant to every value.
pub fn offset(values: &[f64], delta: f64) -> Vec<f64> {
    values.iter().map(|v| v + delta).collect()
}

/// Scale deviations from `center` by `1 + severity`.
pub fn scale_around(values: &[f64], center: f64, severity: f64) -> Vec<f64> {
    let factor = 1.0 + severity;
    values.iter().map(|v| center + (v - center) * factor).collect()
}

/// Add `step * k` to the k-th value of the region.
pub fn ramp(values: &[f64], step: f64) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(k, v)| v + step * k as f64)
        .collect()
}

/// Scale deviations from a centred rolling mean by `1 + severity`.
///
/// The rolling mean reads the original series around each position, so
/// the window edges see their true neighbourhood.
pub fn season_amplify(values: &[f64], region: &Region, width: usize, severity: f64) -> Vec<f64> {
    let factor = 1.0 + severity;
    region
        .range()
        .map(|i| {
            let baseline = centred_mean(values, i, width);
            baseline + (values[i] - baseline) * factor
        })
        .collect()
}

/// A constant run.
pub fn fill(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}
