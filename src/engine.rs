// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Injection orchestrator.
//!
//! [`Injector`] is the public entry point. Each call resolves parameters,
//! draws a region from the injector's random stream, applies the transform
//! for the kind and assembles the report. The input series is never
//! modified; the only state that changes is the random stream.
//!
//! An injector is not meant to be shared between threads without a lock:
//! interleaved calls would reorder draws and break reproducibility.
//! Independent injectors never interact.

use crate::config::EngineConfig;
use crate::error::{InjectError, Result};
use crate::kind::AnomalyKind;
use crate::params::{self, Overrides};
use crate::report::{Injection, InjectionReport, Mask};
use crate::rng::RandomSource;
use crate::series::TimeSeries;
use crate::stats::{Context, SeriesStats};
use crate::transforms;
use crate::window;

/// Deterministic anomaly injector.
#[derive(Debug, Clone)]
pub struct Injector {
    config: EngineConfig,
    rng: RandomSource,
    injections: u64,
}

impl Injector {
    /// Create an injector with default settings and the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RandomSource::new(seed),
            config: EngineConfig::default().with_seed(seed),
            injections: 0,
        }
    }

    /// Create an injector from a config.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng: RandomSource::new(config.seed),
            config,
            injections: 0,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed of the random stream.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Number of successful injections so far.
    pub fn injections(&self) -> u64 {
        self.injections
    }

    /// Inject one anomaly of `kind` into `series`.
    ///
    /// Returns a new series with the same timestamps, the report, and a
    /// mask when `return_mask` is set. Input and parameter errors are
    /// raised before any random draw, so such a failed call leaves the
    /// stream untouched.
    pub fn inject(
        &mut self,
        series: &TimeSeries,
        kind: AnomalyKind,
        overrides: &Overrides,
        return_mask: bool,
    ) -> Result<Injection> {
        if series.is_empty() {
            return Err(InjectError::EmptyInput);
        }
        let len = series.len();
        if len < kind.min_len() {
            return Err(InjectError::SeriesTooShort {
                kind: kind.to_string(),
                len,
                min: kind.min_len(),
            });
        }

        let values = series.values();
        let global = SeriesStats::of(values);
        let resolved = params::resolve(kind, overrides, &self.config, len, &global)?;

        let span = resolved.span.unwrap_or(len);
        let region = window::select(&mut self.rng, kind.region_shape(), len, span)?;

        let radius = resolved.context_radius.unwrap_or(0);
        let ctx = Context::with_global(global, values, &region, radius);
        let replacement = transforms::apply(&resolved, values, &region, &ctx);
        if replacement.len() != region.len() {
            return Err(InjectError::WindowOutOfBounds {
                start: region.start,
                end: region.start + replacement.len(),
                len,
            });
        }

        let mut out = values.to_vec();
        out[region.range()].copy_from_slice(&replacement);

        let report = InjectionReport::new(kind, resolved.to_map(), &region);
        let mask = return_mask.then(|| Mask::from_indices(len, report.indices()));
        self.injections += 1;

        #[cfg(feature = "logging")]
        log::debug!(
            "injected {} at [{}, {}) params={:?}",
            kind,
            region.start,
            region.end,
            report.params()
        );

        Ok(Injection {
            series: series.with_values(out),
            report,
            mask,
        })
    }

    /// Inject with default parameters.
    pub fn inject_default(&mut self, series: &TimeSeries, kind: AnomalyKind) -> Result<Injection> {
        self.inject(series, kind, &Overrides::default(), false)
    }

    /// Inject every kind once into the same base series, in
    /// [`AnomalyKind::all`] order, with default parameters and masks.
    ///
    /// Stops at the first failure.
    pub fn inject_all(&mut self, series: &TimeSeries) -> Result<Vec<Injection>> {
        AnomalyKind::all()
            .iter()
            .map(|&kind| self.inject(series, kind, &Overrides::default(), true))
            .collect()
    }
}
