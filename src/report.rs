// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Injection reports and masks.
//!
//! The report is the ground-truth label of an injection: the kind, every
//! parameter used and the positions that were selected. The mask is the
//! same information as one flag per series position.

use crate::error::Result;
use crate::kind::AnomalyKind;
use crate::params::ParamValue;
use crate::series::TimeSeries;
use crate::window::Region;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xxhash_rust::xxh64::Xxh64;

/// Immutable record of one injection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionReport {
    kind: AnomalyKind,
    params: BTreeMap<String, ParamValue>,
    indices: Vec<usize>,
}

impl InjectionReport {
    pub(crate) fn new(
        kind: AnomalyKind,
        params: BTreeMap<String, ParamValue>,
        region: &Region,
    ) -> Self {
        Self {
            kind,
            params,
            indices: region.indices(),
        }
    }

    /// Injected kind.
    pub fn kind(&self) -> AnomalyKind {
        self.kind
    }

    /// Every parameter used, defaults included.
    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    /// One parameter by name.
    pub fn param(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).copied()
    }

    /// Affected positions in ascending order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Affected positions as a region.
    ///
    /// Indices are always one contiguous run.
    pub fn region(&self) -> Option<Region> {
        let start = *self.indices.first()?;
        let end = *self.indices.last()? + 1;
        Some(Region { start, end })
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One flag per series position, true where the series was injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask(Vec<bool>);

impl Mask {
    /// Build a mask of `len` positions with `indices` set.
    ///
    /// Indices past `len` are ignored.
    pub fn from_indices(len: usize, indices: &[usize]) -> Self {
        let mut flags = vec![false; len];
        for &i in indices {
            if let Some(flag) = flags.get_mut(i) {
                *flag = true;
            }
        }
        Mask(flags)
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flag at a position.
    pub fn get(&self, idx: usize) -> Option<bool> {
        self.0.get(idx).copied()
    }

    /// Positions that are set.
    pub fn positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect()
    }

    /// Number of positions set.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }

    /// Flags as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Result of one injection: the new series, its report and optional mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Injection {
    pub series: TimeSeries,
    pub report: InjectionReport,
    pub mask: Option<Mask>,
}

impl Injection {
    /// Split into the `(series, report, mask)` triple.
    pub fn into_parts(self) -> (TimeSeries, InjectionReport, Option<Mask>) {
        (self.series, self.report, self.mask)
    }

    /// Hash of the injected values, kind and indices.
    ///
    /// Values are hashed by bit pattern, so two injections with the same
    /// fingerprint are bit-identical (NaN markers included).
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        hasher.update(self.report.kind.as_str().as_bytes());
        for &ts in self.series.timestamps() {
            hasher.update(&ts.to_le_bytes());
        }
        for v in self.series.values() {
            hasher.update(&v.to_bits().to_le_bytes());
        }
        for &i in &self.report.indices {
            hasher.update(&(i as u64).to_le_bytes());
        }
        hasher.digest()
    }
}
