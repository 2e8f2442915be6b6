//! Example: inject every anomaly kind into a synthetic base series.
//!
//! Run with: cargo run --example inject_all

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use sanin::{AnomalyKind, Injector, Overrides, TimeSeries};
use std::f64::consts::PI;

/// Level 100, slow trend, period-50 season and unit gaussian noise.
fn make_base_series(n: usize, seed: u64, period: f64) -> TimeSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).expect("unit normal");
    let values = (0..n)
        .map(|t| {
            let t = t as f64;
            100.0 + 0.01 * t + 5.0 * (2.0 * PI * t / period).sin() + noise.sample(&mut rng)
        })
        .collect();

    let start_ms = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis() as u64)
        .unwrap_or(0);

    TimeSeries::regular(start_ms, 60_000, values).expect("one-minute spacing")
}

fn main() {
    println!("Sanin anomaly injection demo");
    println!("============================\n");

    let series = make_base_series(1000, 123, 50.0);
    let mut injector = Injector::new(42);

    let cases = [
        (AnomalyKind::Spike, Overrides::new().with_severity(1.5).with_n_points(5), "Spike (5 points)"),
        (AnomalyKind::Drop, Overrides::new().with_severity(1.5).with_n_points(5), "Drop (5 points)"),
        (AnomalyKind::LevelShift, Overrides::new().with_severity(2.0), "Level shift"),
        (AnomalyKind::VarianceChange, Overrides::new().with_severity(2.0), "Variance change (window)"),
        (AnomalyKind::TrendDrift, Overrides::new().with_severity(1.5), "Trend drift"),
        (AnomalyKind::SeasonAmpChange, Overrides::new().with_severity(1.0), "Seasonal amplitude change"),
        (AnomalyKind::Flatline, Overrides::new(), "Flatline (stuck sensor)"),
        (AnomalyKind::Missing, Overrides::new(), "Missing (NaNs in window)"),
        (AnomalyKind::StuckHigh, Overrides::new(), "Stuck high"),
        (AnomalyKind::StuckLow, Overrides::new(), "Stuck low"),
        (AnomalyKind::Blackout, Overrides::new(), "Blackout (zeros / fixed value)"),
    ];

    for (kind, overrides, title) in cases {
        match injector.inject(&series, kind, &overrides, true) {
            Ok(result) => {
                let params: Vec<String> = result
                    .report
                    .params()
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                println!(
                    "[{}] {}: params={{{}}}  n_indices={}",
                    Local::now().format("%H:%M:%S"),
                    kind,
                    params.join(", "),
                    result.report.indices().len()
                );
                println!("  {} - fingerprint {:016x}", title, result.fingerprint());
            }
            Err(e) => eprintln!("  Warning: {} failed: {}", title, e),
        }
    }
}
