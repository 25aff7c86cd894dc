// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use core::ops::Range;

use crate::{Nearest, ParamCurve, ParamCurveDeriv, ParamCurveNearest, Point, Vec2};

/// Tolerance of the in-segment test in [`Line::has_point`].
const ON_SEGMENT_EPSILON: f64 = 1e-7;

/// A single line.
///
/// Depending on the operation a line is read as the segment between its
/// points or as the infinite line through them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Returns a copy of this `Line` with the end points swapped so that it
    /// points in the opposite direction.
    #[must_use]
    #[inline(always)]
    pub fn reversed(&self) -> Line {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// The vector from start to end.
    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.p1 - self.p0
    }

    /// The length of the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().hypot()
    }

    /// The midpoint of the line.
    #[must_use]
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// The direction angle of the line in radians, in `(-π, π]`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.vector().atan2()
    }

    /// Computes the point where two lines, if extended to infinity, would cross.
    ///
    /// Returns `None` for parallel (or degenerate) lines.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let ab = self.vector();
        let cd = other.vector();
        let pcd = ab.cross(cd);
        if pcd == 0.0 {
            return None;
        }
        let h = ab.cross(self.p0 - other.p0) / pcd;
        let p = other.p0 + cd * h;
        p.is_finite().then_some(p)
    }

    /// Whether `p` lies on this segment, within a small tolerance.
    ///
    /// Used to check whether an infinite-line intersection falls inside
    /// both segments' bounds.
    pub fn has_point(&self, p: Point) -> bool {
        let d = self.vector();
        let len2 = d.hypot2();
        if len2 == 0.0 {
            return p.is_near(self.p0, ON_SEGMENT_EPSILON);
        }
        let t = (p - self.p0).dot(d) / len2;
        if !(-ON_SEGMENT_EPSILON..=1.0 + ON_SEGMENT_EPSILON).contains(&t) {
            return false;
        }
        let off_line = d.cross(p - self.p0).abs() / len2.sqrt();
        off_line <= ON_SEGMENT_EPSILON * len2.sqrt().max(1.0)
    }

    /// Is this line finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.p0.is_finite() && self.p1.is_finite()
    }
}

impl From<(Point, Point)> for Line {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Self {
        Line::new(from, to)
    }
}

impl From<(Point, Vec2)> for Line {
    #[inline(always)]
    fn from((origin, displacement): (Point, Vec2)) -> Self {
        Line::new(origin, origin + displacement)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    #[inline]
    fn deriv_at(&self, _t: f64) -> Vec2 {
        self.vector()
    }
}

impl ParamCurveNearest for Line {
    fn nearest(&self, p: Point) -> Nearest {
        let d = self.p1 - self.p0;
        let dotp = d.dot(p - self.p0);
        let d_squared = d.dot(d);
        let (t, distance_sq) = if dotp <= 0.0 {
            (0.0, (p - self.p0).hypot2())
        } else if dotp >= d_squared {
            (1.0, (p - self.p1).hypot2())
        } else {
            let t = dotp / d_squared;
            let dist = (p - self.eval(t)).hypot2();
            (t, dist)
        };
        Nearest { distance_sq, t }
    }
}
