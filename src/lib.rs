// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Sanin
//!
//! Deterministic anomaly injection for time series.
//!
//! Given a clean series, the injector introduces one controlled synthetic
//! fault and returns the perturbed series together with a report of exactly
//! what changed. The output is labeled ground truth for testing anomaly
//! detection and monitoring systems.
//!
//! - **Eleven kinds**: spikes, drops, level shifts, variance changes, trend
//!   drift, seasonal amplitude changes, flatlines, missing data, stuck
//!   high/low and blackouts
//! - **Reproducible**: every random decision draws from one seeded stream
//! - **Self-describing reports**: all parameters used, defaults included,
//!   plus the exact affected positions
//!
//! ## Quick Start
//!
//! ```rust
//! use sanin::{AnomalyKind, Injector, Overrides, TimeSeries};
//!
//! let series = TimeSeries::regular(0, 60_000, vec![100.0; 1000]).unwrap();
//! let mut injector = Injector::new(42);
//!
//! let result = injector
//!     .inject(&series, AnomalyKind::Blackout, &Overrides::new(), true)
//!     .unwrap();
//!
//! assert_eq!(result.series.len(), series.len());
//! for &i in result.report.indices() {
//!     assert_eq!(result.series.values()[i], 0.0);
//! }
//! assert_eq!(result.mask.unwrap().positions(), result.report.indices());
//! ```
//!
//! ## Overrides
//!
//! Options left unset take the defaults in [`EngineConfig`]. Keyword bags
//! can be parsed from JSON; unknown keys are rejected:
//!
//! ```rust
//! use sanin::Overrides;
//!
//! let o = Overrides::from_json_str(r#"{"severity": 1.5, "n_points": 5}"#).unwrap();
//! assert_eq!(o.n_points, Some(5));
//! assert!(Overrides::from_json_str(r#"{"magnitude": 2}"#).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: The injector (public entry point)
//! - [`kind`]: Anomaly kinds
//! - [`params`]: Overrides and parameter resolution
//! - [`window`]: Region selection
//! - [`transforms`]: Per-kind value transforms
//! - [`report`]: Reports, masks and fingerprints
//! - [`stats`]: Series statistics
//! - [`config`]: Defaults table

pub mod config;
pub mod engine;
pub mod error;
pub mod kind;
pub mod params;
pub mod report;
pub mod rng;
pub mod series;
pub mod stats;
pub mod transforms;
pub mod window;

// Re-exports for convenient access
pub use config::{EngineConfig, SeverityDefaults};
pub use engine::Injector;
pub use error::{InjectError, Result};
pub use kind::{AnomalyKind, RegionShape};
pub use params::{Overrides, ParamValue, ResolvedParams};
pub use report::{Injection, InjectionReport, Mask};
pub use rng::RandomSource;
pub use series::TimeSeries;
pub use stats::SeriesStats;
pub use window::Region;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;
