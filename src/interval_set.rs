// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sets of intervals on a circular domain.

use smallvec::SmallVec;

/// A set of disjoint, sorted intervals inside a circular domain
/// `[start, end]`, typically `[0, 2π]`.
///
/// The set starts out covering the whole domain and can only shrink. A
/// query range `[a, b]` with `a > b` wraps around the domain and stands for
/// `[a, end] ∪ [start, b]`.
///
/// ```
/// use core::f64::consts::{PI, TAU};
/// use vgkit::CircularIntervalSet;
///
/// let mut set = CircularIntervalSet::new(0.0, TAU);
/// set.intersect(PI, PI / 2.0);
/// assert_eq!(set.intervals(), &[[0.0, PI / 2.0], [PI, TAU]]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CircularIntervalSet {
    start: f64,
    end: f64,
    intervals: SmallVec<[[f64; 2]; 4]>,
}

impl CircularIntervalSet {
    /// A set covering the whole domain `[start, end]`.
    pub fn new(start: f64, end: f64) -> CircularIntervalSet {
        let mut intervals = SmallVec::new();
        intervals.push([start, end]);
        CircularIntervalSet {
            start,
            end,
            intervals,
        }
    }

    /// A set covering the full circle `[0, 2π]`.
    pub fn full_circle() -> CircularIntervalSet {
        CircularIntervalSet::new(0.0, core::f64::consts::TAU)
    }

    /// Lower bound of the domain.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound of the domain.
    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// The intervals, sorted and disjoint.
    #[inline]
    pub fn intervals(&self) -> &[[f64; 2]] {
        &self.intervals
    }

    /// The number of intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if no interval is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Remove all intervals.
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Keep only the parts of the set inside `[a, b]`.
    ///
    /// If `a > b` the range wraps around: the parts inside
    /// `[a, end] ∪ [start, b]` are kept. Zero-length pieces are dropped.
    pub fn intersect(&mut self, a: f64, b: f64) {
        let mut result: SmallVec<[[f64; 2]; 4]> = SmallVec::new();
        for &[s, e] in &self.intervals {
            if a <= b {
                if e <= a || s >= b {
                    // Disjoint from the range.
                } else if s >= a && e <= b {
                    result.push([s, e]);
                } else if s < a && e > b {
                    result.push([a, b]);
                } else if s < a {
                    result.push([a, e]);
                } else {
                    result.push([s, b]);
                }
            } else if s >= b && e <= a {
                // Entirely inside the gap [b, a].
            } else if e <= b || s >= a {
                result.push([s, e]);
            } else if s < b && e > a {
                // Spans the gap.
                result.push([s, b]);
                result.push([a, e]);
            } else if s < b {
                result.push([s, b]);
            } else {
                result.push([a, e]);
            }
        }
        result.retain(|[s, e]| e > s);
        self.intervals = result;
    }
}
