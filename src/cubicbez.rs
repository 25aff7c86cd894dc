// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments with a cached arc-length table.

use core::ops::Range;

use smallvec::SmallVec;

use crate::common::solve_quadratic;
use crate::{
    Nearest, ParamCurve, ParamCurveDeriv, ParamCurveNearest, Point, Rect, Vec2,
    ARC_LENGTH_SEGMENTS,
};

/// Number of refinement rounds in [`CubicBez::closest_t`].
const CLOSEST_T_ROUNDS: usize = 24;
/// Samples per refinement round in [`CubicBez::closest_t`].
const CLOSEST_T_SAMPLES: usize = 10;

/// One of the four points addressing a cubic curve.
///
/// Editors identify a dragged handle by its role; see
/// [`BezPath::move_curve_point`](crate::BezPath::move_curve_point).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurvePointRole {
    /// The point the curve starts at.
    StartPoint,
    /// The control point attached to the start point.
    StartControlPoint,
    /// The control point attached to the end point.
    EndControlPoint,
    /// The point the curve ends at.
    EndPoint,
}

impl CurvePointRole {
    /// All roles, in storage order (`p0` to `p3`).
    pub const ALL: [CurvePointRole; 4] = [
        CurvePointRole::StartPoint,
        CurvePointRole::StartControlPoint,
        CurvePointRole::EndControlPoint,
        CurvePointRole::EndPoint,
    ];

    /// Storage slot of this role, `0` for `p0` up to `3` for `p3`.
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            CurvePointRole::StartPoint => 0,
            CurvePointRole::StartControlPoint => 1,
            CurvePointRole::EndControlPoint => 2,
            CurvePointRole::EndPoint => 3,
        }
    }
}

/// Cumulative arc lengths over a uniform subdivision of a cubic.
///
/// Entry `k` holds the polyline length from `t = 0` to `t = k / n`, so the
/// last entry is the length of the whole curve. The table converts between
/// the curve parameter `t` and the distance `u` travelled along the curve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcLengthTable {
    cumulative: SmallVec<[f64; ARC_LENGTH_SEGMENTS + 1]>,
}

impl ArcLengthTable {
    /// Build the table for the cubic with the given points.
    pub fn new(points: [Point; 4], segments: usize) -> ArcLengthTable {
        let segments = segments.max(1);
        let step = (segments as f64).recip();
        let mut cumulative = SmallVec::with_capacity(segments + 1);
        cumulative.push(0.0);
        let mut last = points[0];
        let mut length = 0.0;
        for i in 1..=segments {
            let p = eval_cubic(&points, i as f64 * step);
            length += last.distance(p);
            cumulative.push(length);
            last = p;
        }
        ArcLengthTable { cumulative }
    }

    /// The number of segments the curve was subdivided into.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.cumulative.len().saturating_sub(1)
    }

    /// The length of the whole curve.
    #[inline]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Convert a distance along the curve into a curve parameter.
    ///
    /// `u` is clamped into `[0, total]`.
    pub fn t_at(&self, u: f64) -> f64 {
        let n = self.segment_count();
        if n == 0 {
            return 0.0;
        }
        let total = self.total();
        if total <= 0.0 || u <= 0.0 {
            return 0.0;
        }
        if u >= total {
            return 1.0;
        }
        // First entry strictly beyond u; u > 0 so this is at least 1.
        let k = self.cumulative.partition_point(|&l| l <= u).clamp(1, n);
        let (l0, l1) = (self.cumulative[k - 1], self.cumulative[k]);
        let frac = if l1 > l0 { (u - l0) / (l1 - l0) } else { 0.0 };
        ((k - 1) as f64 + frac) / n as f64
    }

    /// Convert a curve parameter into a distance along the curve.
    ///
    /// `t` is clamped into `[0, 1]`.
    pub fn u_at(&self, t: f64) -> f64 {
        let n = self.segment_count();
        if n == 0 {
            return 0.0;
        }
        let scaled = t.clamp(0.0, 1.0) * n as f64;
        let k = (scaled.floor() as usize).min(n - 1);
        let frac = scaled - k as f64;
        let (l0, l1) = (self.cumulative[k], self.cumulative[k + 1]);
        l0 + frac * (l1 - l0)
    }
}

/// A single cubic Bézier segment.
///
/// The points are public. Mutating them directly leaves the cached
/// arc-length table stale until [`CubicBez::update_arc_lengths`] is called;
/// all mutating methods on this type refresh it themselves.
#[derive(Clone, Debug)]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The start control point.
    pub p1: Point,
    /// The end control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
    table: ArcLengthTable,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    ///
    /// The arguments are in curve order: start point, start control point,
    /// end control point, end point.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        let points = [p0.into(), p1.into(), p2.into(), p3.into()];
        Self::from_parts(points, ArcLengthTable::new(points, ARC_LENGTH_SEGMENTS))
    }

    pub(crate) fn from_parts(points: [Point; 4], table: ArcLengthTable) -> CubicBez {
        let [p0, p1, p2, p3] = points;
        CubicBez {
            p0,
            p1,
            p2,
            p3,
            table,
        }
    }

    /// The four points in storage order.
    #[inline]
    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// The point playing the given role.
    #[inline]
    pub fn point_of(&self, role: CurvePointRole) -> Point {
        self.points()[role.slot()]
    }

    /// Recompute the arc-length table from the current points.
    pub fn update_arc_lengths(&mut self) {
        self.table = ArcLengthTable::new(self.points(), self.table.segment_count().max(1));
    }

    /// The cached arc-length table.
    #[inline]
    pub fn arc_length_table(&self) -> &ArcLengthTable {
        &self.table
    }

    /// The arc length of the curve, read from the cached table.
    #[inline]
    pub fn length(&self) -> f64 {
        self.table.total()
    }

    /// Convert a distance along the curve to a curve parameter.
    #[inline]
    pub fn t_at_u(&self, u: f64) -> f64 {
        self.table.t_at(u)
    }

    /// Convert a curve parameter to a distance along the curve.
    #[inline]
    pub fn u_at_t(&self, t: f64) -> f64 {
        self.table.u_at(t)
    }

    /// The point at distance `u` along the curve.
    #[inline]
    pub fn point(&self, u: f64) -> Point {
        self.eval(self.t_at_u(u))
    }

    /// The tangent at distance `u` along the curve.
    #[inline]
    pub fn tangent(&self, u: f64) -> Vec2 {
        self.tangent_at(self.t_at_u(u))
    }

    /// The perpendicular at distance `u` along the curve.
    #[inline]
    pub fn perpendicular(&self, u: f64) -> Vec2 {
        self.perpendicular_at(self.t_at_u(u))
    }

    /// The tangent (first derivative, not normalized) at parameter `t`.
    pub fn tangent_at(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        (d0 * (mt * mt) + d1 * (2.0 * mt * t) + d2 * (t * t)) * 3.0
    }

    /// The tangent rotated a quarter turn, at parameter `t`.
    #[inline]
    pub fn perpendicular_at(&self, t: f64) -> Vec2 {
        self.tangent_at(t).perp()
    }

    /// The tangent at the start point.
    #[inline]
    pub fn start_tangent(&self) -> Vec2 {
        self.tangent_at(0.0)
    }

    /// The tangent at the end point.
    #[inline]
    pub fn end_tangent(&self) -> Vec2 {
        self.tangent_at(1.0)
    }

    /// Find the parameter of the point on the curve closest to `p`.
    ///
    /// The curve is sampled at the resolution of its arc-length table and
    /// the bracket around the nearest sample is refined a fixed number of
    /// times. The result is approximate and may settle on a local minimum.
    pub fn closest_t(&self, p: Point) -> f64 {
        let n = self.table.segment_count().max(1);
        let (mut best_t, mut best_d) = (0.0, f64::INFINITY);
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let d = self.eval(t).distance_squared(p);
            if d < best_d {
                best_t = t;
                best_d = d;
            }
        }
        let mut half_width = (n as f64).recip();
        for _ in 0..CLOSEST_T_ROUNDS {
            let lo = (best_t - half_width).max(0.0);
            let hi = (best_t + half_width).min(1.0);
            let step = (hi - lo) / CLOSEST_T_SAMPLES as f64;
            for i in 0..=CLOSEST_T_SAMPLES {
                let t = lo + step * i as f64;
                let d = self.eval(t).distance_squared(p);
                if d < best_d {
                    best_t = t;
                    best_d = d;
                }
            }
            half_width = step;
        }
        best_t
    }

    /// Split the curve at parameter `t` with De Casteljau's algorithm.
    pub fn split_at(&self, t: f64) -> (CubicBez, CubicBez) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let p0123 = p012.lerp(p123, t);
        (
            CubicBez::new(self.p0, p01, p012, p0123),
            CubicBez::new(p0123, p123, p23, self.p3),
        )
    }

    /// The exact sub-curve between parameters `t0` and `t1`.
    ///
    /// If `t0 > t1` the sub-curve runs backwards, from `eval(t0)` to
    /// `eval(t1)`.
    pub fn sub_curve_at(&self, t0: f64, t1: f64) -> CubicBez {
        if t0 > t1 {
            return self.sub_curve_at(t1, t0).reversed();
        }
        let t0 = t0.clamp(0.0, 1.0);
        let t1 = t1.clamp(0.0, 1.0);
        if t0 >= 1.0 {
            return CubicBez::new(self.p3, self.p3, self.p3, self.p3);
        }
        let (_, right) = self.split_at(t0);
        let (sub, _) = right.split_at((t1 - t0) / (1.0 - t0));
        sub
    }

    /// The sub-curve between the distances `u0` and `u1` along the curve.
    pub fn sub_curve(&self, u0: f64, u1: f64) -> CubicBez {
        self.sub_curve_at(self.t_at_u(u0), self.t_at_u(u1))
    }

    /// Cut `u` off the start of the curve.
    pub fn trim_start(&mut self, u: f64) {
        *self = self.sub_curve_at(self.t_at_u(u), 1.0);
    }

    /// Cut `u` off the end of the curve.
    pub fn trim_end(&mut self, u: f64) {
        *self = self.sub_curve_at(0.0, self.t_at_u(self.length() - u));
    }

    /// The same curve traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> CubicBez {
        CubicBez::new(self.p3, self.p2, self.p1, self.p0)
    }

    /// Move every point by `delta`.
    ///
    /// Translation keeps all lengths, so the table is kept as is.
    pub fn translate(&mut self, delta: Vec2) {
        self.p0 += delta;
        self.p1 += delta;
        self.p2 += delta;
        self.p3 += delta;
    }

    /// Scale the curve about `center`.
    pub fn scale(&mut self, factor: f64, center: Point) {
        self.map_points(|p| p.scale(factor, center));
    }

    /// Rotate the curve by `angle` radians about `center`.
    pub fn rotate(&mut self, angle: f64, center: Point) {
        self.map_points(|p| p.rotate(angle, center));
    }

    fn map_points(&mut self, mut f: impl FnMut(Point) -> Point) {
        self.p0 = f(self.p0);
        self.p1 = f(self.p1);
        self.p2 = f(self.p2);
        self.p3 = f(self.p3);
        self.update_arc_lengths();
    }

    /// Move one point of the curve by `delta`.
    ///
    /// With `move_control_point` set, moving an end point also moves the
    /// control point attached to it so the handle keeps its shape.
    pub fn move_curve_point(&mut self, role: CurvePointRole, delta: Vec2, move_control_point: bool) {
        match role {
            CurvePointRole::StartPoint => {
                self.p0 += delta;
                if move_control_point {
                    self.p1 += delta;
                }
            }
            CurvePointRole::StartControlPoint => self.p1 += delta,
            CurvePointRole::EndControlPoint => self.p2 += delta,
            CurvePointRole::EndPoint => {
                self.p3 += delta;
                if move_control_point {
                    self.p2 += delta;
                }
            }
        }
        self.update_arc_lengths();
    }

    /// The tight axis-aligned bounding box of the curve.
    pub fn bounding_box(&self) -> Rect {
        let mut bbox = Rect::from_points(self.p0, self.p3);
        for t in self.extrema() {
            bbox = bbox.union_pt(self.eval(t));
        }
        bbox
    }

    /// Parameters in `(0, 1)` where either coordinate has an extremum.
    fn extrema(&self) -> impl Iterator<Item = f64> {
        fn one_coord(d0: f64, d1: f64, d2: f64) -> arrayvec::ArrayVec<f64, 2> {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            solve_quadratic(c, b, a)
        }
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(d0.x, d1.x, d2.x)
            .into_iter()
            .chain(one_coord(d0.y, d1.y, d2.y))
            .filter(|&t| t > 0.0 && t < 1.0)
    }
}

/// Evaluate the cubic polynomial with the given control points.
#[inline]
pub(crate) fn eval_cubic(points: &[Point; 4], t: f64) -> Point {
    let [p0, p1, p2, p3] = points.map(Point::to_vec2);
    let mt = 1.0 - t;
    (p0 * (mt * mt * mt) + (p1 * (mt * mt * 3.0) + (p2 * (mt * 3.0) + p3 * t) * t) * t).to_point()
}

impl PartialEq for CubicBez {
    /// Curves are equal when their points are; the cached table is derived
    /// data and does not take part.
    fn eq(&self, other: &Self) -> bool {
        self.points() == other.points()
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        eval_cubic(&self.points(), t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        self.sub_curve_at(range.start, range.end)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveDeriv for CubicBez {
    #[inline]
    fn deriv_at(&self, t: f64) -> Vec2 {
        self.tangent_at(t)
    }
}

impl ParamCurveNearest for CubicBez {
    fn nearest(&self, p: Point) -> Nearest {
        let t = self.closest_t(p);
        Nearest {
            distance_sq: self.eval(t).distance_squared(p),
            t,
        }
    }
}
