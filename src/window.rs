// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Window selection.
//!
//! Picks the affected region from the injector's random stream. Contiguous
//! windows start uniformly in `[0, N - w]`; split regions start uniformly in
//! `[1, N - 1]` and run to the end of the series.

use crate::error::{InjectError, Result};
use crate::kind::RegionShape;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Closed-open range of affected positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// First affected position.
    pub start: usize,
    /// One past the last affected position.
    pub end: usize,
}

impl Region {
    /// Create a region, checking it lies within a series of `len` points.
    pub fn checked(start: usize, end: usize, len: usize) -> Result<Self> {
        if start >= end || end > len {
            return Err(InjectError::WindowOutOfBounds { start, end, len });
        }
        Ok(Self { start, end })
    }

    /// Number of affected positions.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false for a checked region.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether a position is affected.
    pub fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }

    /// Affected positions as a range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Affected positions in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.range().collect()
    }
}

/// Draw a contiguous window of `span` points from a series of `len` points.
pub fn select_window(rng: &mut RandomSource, len: usize, span: usize) -> Result<Region> {
    if span == 0 || span > len {
        return Err(InjectError::WindowOutOfBounds {
            start: 0,
            end: span,
            len,
        });
    }
    let start = rng.uniform_inclusive(0, len - span);
    Region::checked(start, start + span, len)
}

/// Draw a split index and return the region from it to the end.
pub fn select_split(rng: &mut RandomSource, len: usize) -> Result<Region> {
    if len < 2 {
        return Err(InjectError::WindowOutOfBounds {
            start: 1,
            end: len,
            len,
        });
    }
    let split = rng.uniform_inclusive(1, len - 1);
    Region::checked(split, len, len)
}

/// Select a region of the given shape.
///
/// `span` is ignored for split regions.
pub fn select(
    rng: &mut RandomSource,
    shape: RegionShape,
    len: usize,
    span: usize,
) -> Result<Region> {
    match shape {
        RegionShape::Point | RegionShape::Window => select_window(rng, len, span),
        RegionShape::SplitToEnd => select_split(rng, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_within_bounds() {
        let mut rng = RandomSource::new(42);
        for _ in 0..500 {
            let r = select_window(&mut rng, 100, 10).unwrap();
            assert_eq!(r.len(), 10);
            assert!(r.end <= 100);
        }
    }

    #[test]
    fn test_full_length_window() {
        let mut rng = RandomSource::new(42);
        let r = select_window(&mut rng, 50, 50).unwrap();
        assert_eq!(r, Region { start: 0, end: 50 });
    }

    #[test]
    fn test_window_too_large_is_defect() {
        let mut rng = RandomSource::new(42);
        let err = select_window(&mut rng, 5, 6).unwrap_err();
        assert!(matches!(err, InjectError::WindowOutOfBounds { .. }));
        assert!(select_window(&mut rng, 5, 0).is_err());
        // no draw was consumed by the failed selections
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_split_region() {
        let mut rng = RandomSource::new(3);
        for _ in 0..500 {
            let r = select_split(&mut rng, 20).unwrap();
            assert!(r.start >= 1 && r.start <= 19);
            assert_eq!(r.end, 20);
        }
        let r = select_split(&mut rng, 2).unwrap();
        assert_eq!(r, Region { start: 1, end: 2 });
        assert!(select_split(&mut rng, 1).is_err());
    }

    #[test]
    fn test_deterministic_selection() {
        let mut a = RandomSource::new(99);
        let mut b = RandomSource::new(99);
        for shape in [RegionShape::Point, RegionShape::Window, RegionShape::SplitToEnd] {
            assert_eq!(
                select(&mut a, shape, 1000, 25).unwrap(),
                select(&mut b, shape, 1000, 25).unwrap()
            );
        }
    }

    #[test]
    fn test_region_helpers() {
        let r = Region::checked(2, 5, 10).unwrap();
        assert_eq!(r.indices(), vec![2, 3, 4]);
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert!(!r.is_empty());
        assert!(Region::checked(5, 5, 10).is_err());
        assert!(Region::checked(5, 11, 10).is_err());
    }
}
