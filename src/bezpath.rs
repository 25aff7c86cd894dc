// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editable paths of connected cubic Bézier curves.
//!
//! Connectivity is expressed through a point arena: every curve stores the
//! arena indices of its four points, and two curves joined at a vertex
//! hold the *same* index for it. Moving that vertex therefore moves it for
//! both curves in a single step.

use crate::{
    ArcLengthTable, CubicBez, CurvePointRole, Error, ParamCurve, Point, Rect, Result, Vec2,
    ARC_LENGTH_SEGMENTS, HANDLE_EPSILON,
};

/// Distance below which a slice boundary counts as lying on a joint.
const JOINT_EPSILON: f64 = 1e-9;

/// Location of a distance along a path: the curve it falls on, the
/// remaining distance inside that curve, and the length of all curves
/// before it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UIndex {
    /// Index of the curve containing the location.
    pub i: usize,
    /// Distance from the start of curve `i`.
    pub u_part: f64,
    /// Summed length of curves `0..i`.
    pub u_before: f64,
}

#[derive(Clone, Debug)]
struct PathCurve {
    ix: [usize; 4],
    table: ArcLengthTable,
}

/// A sequence of cubic Bézier curves, each starting where the previous
/// one ends.
///
/// Positions along the path can be addressed by distance `u` in
/// `[0, length]` or by the normalized parameter `t` in `[0, 1]`.
#[derive(Clone, Debug, Default)]
pub struct BezPath {
    points: Vec<Point>,
    curves: Vec<PathCurve>,
    total_arc_length: f64,
    /// Treat the path as closed when adjusting neighbouring control
    /// points, so the first and last curve are neighbours.
    pub adjust_circular: bool,
}

/// Mirror a handle across a joint to make the join smooth.
///
/// Given the main curve's handle (`main_control - main_point`), returns the
/// new position for the neighbour's control point so that its handle points
/// in the opposite direction. With `obtain_handle_length` the neighbour
/// keeps its handle length, otherwise it takes the main handle's length.
///
/// Returns `None` when the main handle is not longer than
/// [`HANDLE_EPSILON`], as it has no reliable direction then.
pub fn adjust_neighbour_control_point(
    main_point: Point,
    main_control: Point,
    neighbour_point: Point,
    neighbour_control: Point,
    obtain_handle_length: bool,
) -> Option<Point> {
    let main_handle = main_control - main_point;
    let main_handle_length = main_handle.hypot();
    if main_handle_length <= HANDLE_EPSILON {
        return None;
    }
    if obtain_handle_length {
        let neighbour_handle_length = (neighbour_control - neighbour_point).hypot();
        Some(neighbour_point - main_handle * (neighbour_handle_length / main_handle_length))
    } else {
        Some(neighbour_point - main_handle)
    }
}

impl BezPath {
    /// Create a new, empty path.
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Build a path from curves, connecting each curve to its predecessor.
    ///
    /// The start point of every curve after the first is replaced by the
    /// end point of the curve before it. Control points are taken as given;
    /// no smoothing is applied.
    pub fn from_curves(curves: impl IntoIterator<Item = CubicBez>) -> BezPath {
        let mut path = BezPath::new();
        for curve in curves {
            path.push_connected(&curve);
        }
        path.update_arc_lengths();
        path
    }

    fn push_point(&mut self, p: Point) -> usize {
        self.points.push(p);
        self.points.len() - 1
    }

    fn push_connected(&mut self, curve: &CubicBez) {
        let start = match self.curves.last() {
            Some(prev) => prev.ix[3],
            None => self.push_point(curve.p0),
        };
        let ix = [
            start,
            self.push_point(curve.p1),
            self.push_point(curve.p2),
            self.push_point(curve.p3),
        ];
        let table = ArcLengthTable::new(self.resolve(ix), ARC_LENGTH_SEGMENTS);
        self.curves.push(PathCurve { ix, table });
    }

    /// Append a curve.
    ///
    /// If the path already has curves, the new curve's start point becomes
    /// the previous curve's end point and its start control point is
    /// mirrored from the previous end handle to keep the joint smooth.
    pub fn add_curve(&mut self, curve: CubicBez) {
        let first = self.curves.is_empty();
        self.push_connected(&curve);
        if first {
            self.total_arc_length = self.curves[0].table.total();
        } else if !self.adjust_successor_control_point(self.curves.len() - 2, true) {
            self.update_arc_lengths();
        }
    }

    fn resolve(&self, ix: [usize; 4]) -> [Point; 4] {
        ix.map(|i| self.points[i])
    }

    /// The number of curves.
    #[inline]
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Returns `true` if the path has no curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// A copy of the curve at `index`.
    pub fn curve(&self, index: usize) -> Option<CubicBez> {
        let c = self.curves.get(index)?;
        Some(CubicBez::from_parts(self.resolve(c.ix), c.table.clone()))
    }

    fn curve_unchecked(&self, index: usize) -> CubicBez {
        let c = &self.curves[index];
        CubicBez::from_parts(self.resolve(c.ix), c.table.clone())
    }

    /// Iterate over copies of all curves.
    pub fn curves(&self) -> impl DoubleEndedIterator<Item = CubicBez> + '_ {
        (0..self.curves.len()).map(|i| self.curve_unchecked(i))
    }

    /// The arena index of a curve's point.
    ///
    /// Curves joined at a vertex report the same index for it.
    pub fn point_index(&self, curve_index: usize, role: CurvePointRole) -> Option<usize> {
        self.curves.get(curve_index).map(|c| c.ix[role.slot()])
    }

    /// The point stored at an arena index.
    pub fn point_at_index(&self, point_index: usize) -> Option<Point> {
        self.points.get(point_index).copied()
    }

    /// All `(curve, role)` pairs referring to the given arena index.
    pub fn locate_curves_by_point(&self, point_index: usize) -> Vec<(usize, CurvePointRole)> {
        let mut result = Vec::new();
        for (i, c) in self.curves.iter().enumerate() {
            for role in CurvePointRole::ALL {
                if c.ix[role.slot()] == point_index {
                    result.push((i, role));
                }
            }
        }
        result
    }

    /// The total arc length of the path.
    #[inline]
    pub fn length(&self) -> f64 {
        self.total_arc_length
    }

    /// Recompute every curve's arc-length table and the total length.
    pub fn update_arc_lengths(&mut self) {
        let mut total = 0.0;
        for i in 0..self.curves.len() {
            let table = ArcLengthTable::new(self.resolve(self.curves[i].ix), ARC_LENGTH_SEGMENTS);
            total += table.total();
            self.curves[i].table = table;
        }
        self.total_arc_length = total;
    }

    fn clamp_u(&self, u: f64) -> f64 {
        if u < 0.0 || u > self.total_arc_length {
            log::warn!(
                "path position {u} outside [0, {}], clamping",
                self.total_arc_length
            );
            u.clamp(0.0, self.total_arc_length)
        } else {
            u
        }
    }

    /// Find the curve containing the distance `u`.
    ///
    /// `u` is expected to lie in `[0, length]`; a `u` at a joint resolves
    /// to the earlier curve, and `u` past the end to the last curve.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    pub fn locate_u_index(&self, u: f64) -> UIndex {
        assert!(!self.curves.is_empty(), "locating a position on an empty path");
        let mut i = 0;
        let mut u_before = 0.0;
        while i + 1 < self.curves.len() && u_before + self.curves[i].table.total() < u {
            u_before += self.curves[i].table.total();
            i += 1;
        }
        UIndex {
            i,
            u_part: u - u_before,
            u_before,
        }
    }

    /// The point at distance `u` along the path.
    ///
    /// Out-of-range values are clamped into `[0, length]` with a warning.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    pub fn point(&self, u: f64) -> Point {
        let loc = self.locate_u_index(self.clamp_u(u));
        self.curve_unchecked(loc.i).point(loc.u_part)
    }

    /// The tangent at distance `u` along the path.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    pub fn tangent(&self, u: f64) -> Vec2 {
        let loc = self.locate_u_index(self.clamp_u(u));
        self.curve_unchecked(loc.i).tangent(loc.u_part)
    }

    /// The perpendicular at distance `u` along the path.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    pub fn perpendicular(&self, u: f64) -> Vec2 {
        let loc = self.locate_u_index(self.clamp_u(u));
        self.curve_unchecked(loc.i).perpendicular(loc.u_part)
    }

    /// The point at relative position `t` in `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.point(t * self.total_arc_length)
    }

    /// The tangent at relative position `t` in `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    #[inline]
    pub fn tangent_at(&self, t: f64) -> Vec2 {
        self.tangent(t * self.total_arc_length)
    }

    /// The perpendicular at relative position `t` in `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    #[inline]
    pub fn perpendicular_at(&self, t: f64) -> Vec2 {
        self.perpendicular(t * self.total_arc_length)
    }

    /// The relative position `t` of the path point closest to `p`.
    ///
    /// Each curve contributes its own approximate closest point; the best
    /// one is converted into a distance along the whole path and
    /// normalized. An empty or zero-length path yields `0.0`.
    pub fn closest_t(&self, p: Point) -> f64 {
        let mut best: Option<(f64, f64)> = None;
        let mut u_before_current = 0.0;
        for curve in self.curves() {
            let curve_t = curve.closest_t(p);
            let dist = curve.eval(curve_t).distance(p);
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((u_before_current + curve.u_at_t(curve_t), dist));
            }
            u_before_current += curve.length();
        }
        match best {
            Some((u, _)) if self.total_arc_length > 0.0 => {
                (u / self.total_arc_length).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Extract the part of the path between relative positions `start_t`
    /// and `end_t`.
    ///
    /// If `start_t > end_t` the result runs in the opposite direction of
    /// this path.
    ///
    /// # Panics
    ///
    /// Panics if the path has no curves.
    pub fn sub_path_at(&self, start_t: f64, end_t: f64) -> BezPath {
        let start_t = start_t.clamp(0.0, 1.0);
        let end_t = end_t.clamp(0.0, 1.0);
        let start = self.locate_u_index(start_t * self.total_arc_length);
        let end = self.locate_u_index(end_t * self.total_arc_length);
        let first = self.curve_unchecked(start.i);
        let last = self.curve_unchecked(end.i);
        let first_t = first.t_at_u(start.u_part);
        let last_t = last.t_at_u(end.u_part);

        if start.i == end.i {
            return BezPath::from_curves([first.sub_curve_at(first_t, last_t)]);
        }
        // Positions on a joint resolve to the earlier curve, which leaves an
        // empty piece at that boundary.
        let at_start = |loc: &UIndex| loc.u_part <= JOINT_EPSILON;
        let at_end = |loc: &UIndex, c: &CubicBez| loc.u_part >= c.length() - JOINT_EPSILON;
        let mut curves = Vec::with_capacity(start.i.abs_diff(end.i) + 1);
        if start.i > end.i {
            if !at_start(&start) {
                curves.push(first.sub_curve_at(first_t, 0.0));
            }
            for i in (end.i + 1..start.i).rev() {
                curves.push(self.curve_unchecked(i).reversed());
            }
            if !at_end(&end, &last) || curves.is_empty() {
                curves.push(last.sub_curve_at(1.0, last_t));
            }
        } else {
            if !at_end(&start, &first) {
                curves.push(first.sub_curve_at(first_t, 1.0));
            }
            for i in start.i + 1..end.i {
                curves.push(self.curve_unchecked(i));
            }
            if !at_start(&end) || curves.is_empty() {
                curves.push(last.sub_curve_at(0.0, last_t));
            }
        }
        BezPath::from_curves(curves)
    }

    /// Move one point of a curve by `delta`, keeping the path connected
    /// and its joints smooth.
    ///
    /// Moving an end point also moves its attached control point, and the
    /// neighbouring curve's control point at that joint follows by the same
    /// delta. Moving a control point mirrors the new handle onto the
    /// neighbouring curve. Arc lengths are refreshed afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CurveIndexOutOfRange`] if `curve_index` does not
    /// address a curve.
    pub fn move_curve_point(
        &mut self,
        curve_index: usize,
        role: CurvePointRole,
        delta: Vec2,
    ) -> Result<()> {
        let count = self.curves.len();
        if curve_index >= count {
            return Err(Error::CurveIndexOutOfRange {
                index: curve_index,
                count,
            });
        }
        let ix = self.curves[curve_index].ix;
        match role {
            CurvePointRole::StartPoint => {
                self.points[ix[0]] += delta;
                self.points[ix[1]] += delta;
                if let Some(pred) = self.predecessor(curve_index) {
                    let pred_control = self.curves[pred].ix[2];
                    self.points[pred_control] += delta;
                }
            }
            CurvePointRole::EndPoint => {
                self.points[ix[3]] += delta;
                self.points[ix[2]] += delta;
                if let Some(succ) = self.successor(curve_index) {
                    let succ_control = self.curves[succ].ix[1];
                    self.points[succ_control] += delta;
                }
            }
            CurvePointRole::StartControlPoint => {
                self.points[ix[1]] += delta;
                self.adjust_predecessor_control_point(curve_index, true);
            }
            CurvePointRole::EndControlPoint => {
                self.points[ix[2]] += delta;
                self.adjust_successor_control_point(curve_index, true);
            }
        }
        self.update_arc_lengths();
        Ok(())
    }

    fn predecessor(&self, curve_index: usize) -> Option<usize> {
        let count = self.curves.len();
        let pred = if curve_index > 0 {
            curve_index - 1
        } else if self.adjust_circular {
            count - 1
        } else {
            return None;
        };
        (pred != curve_index).then_some(pred)
    }

    fn successor(&self, curve_index: usize) -> Option<usize> {
        let count = self.curves.len();
        let succ = if curve_index + 1 < count {
            curve_index + 1
        } else if self.adjust_circular {
            0
        } else {
            return None;
        };
        (succ != curve_index).then_some(succ)
    }

    /// Mirror the start handle of curve `curve_index` onto the end handle
    /// of its predecessor.
    ///
    /// Returns `false` if there is no predecessor or the handle is too
    /// short to give a direction.
    pub fn adjust_predecessor_control_point(
        &mut self,
        curve_index: usize,
        obtain_handle_length: bool,
    ) -> bool {
        if curve_index >= self.curves.len() {
            return false;
        }
        let Some(pred) = self.predecessor(curve_index) else {
            return false;
        };
        let main = self.curves[curve_index].ix;
        let neighbour = self.curves[pred].ix;
        self.apply_adjustment(
            [main[0], main[1]],
            [neighbour[3], neighbour[2]],
            obtain_handle_length,
        )
    }

    /// Mirror the end handle of curve `curve_index` onto the start handle
    /// of its successor.
    ///
    /// Returns `false` if there is no successor or the handle is too short
    /// to give a direction.
    pub fn adjust_successor_control_point(
        &mut self,
        curve_index: usize,
        obtain_handle_length: bool,
    ) -> bool {
        if curve_index >= self.curves.len() {
            return false;
        }
        let Some(succ) = self.successor(curve_index) else {
            return false;
        };
        let main = self.curves[curve_index].ix;
        let neighbour = self.curves[succ].ix;
        self.apply_adjustment(
            [main[3], main[2]],
            [neighbour[0], neighbour[1]],
            obtain_handle_length,
        )
    }

    fn apply_adjustment(
        &mut self,
        [main_point, main_control]: [usize; 2],
        [neighbour_point, neighbour_control]: [usize; 2],
        obtain_handle_length: bool,
    ) -> bool {
        let adjusted = adjust_neighbour_control_point(
            self.points[main_point],
            self.points[main_control],
            self.points[neighbour_point],
            self.points[neighbour_control],
            obtain_handle_length,
        );
        match adjusted {
            Some(control) => {
                self.points[neighbour_control] = control;
                self.update_arc_lengths();
                true
            }
            None => false,
        }
    }

    /// Remove the last curve.
    ///
    /// Returns `false` if the path was empty.
    pub fn remove_end_point(&mut self) -> bool {
        if self.curves.pop().is_none() {
            return false;
        }
        self.compact();
        true
    }

    /// Remove the first curve.
    ///
    /// Returns `false` if the path was empty.
    pub fn remove_start_point(&mut self) -> bool {
        if self.curves.is_empty() {
            return false;
        }
        self.curves.remove(0);
        self.compact();
        true
    }

    /// Drop arena points no curve refers to any more.
    fn compact(&mut self) {
        let curves: Vec<CubicBez> = self.curves().collect();
        let adjust_circular = self.adjust_circular;
        *self = BezPath::from_curves(curves);
        self.adjust_circular = adjust_circular;
    }

    /// Split the curve at relative position `t` into two curves joined at a
    /// new vertex, without changing the shape of the path.
    ///
    /// Returns the index of the curve starting at the new vertex, or `None`
    /// for an empty path or a position that already is a vertex.
    pub fn insert_vertex_at(&mut self, t: f64) -> Option<usize> {
        if self.curves.is_empty() {
            return None;
        }
        let loc = self.locate_u_index(t.clamp(0.0, 1.0) * self.total_arc_length);
        let curve = self.curve_unchecked(loc.i);
        let curve_t = curve.t_at_u(loc.u_part);
        if curve_t <= 0.0 || curve_t >= 1.0 {
            return None;
        }
        let (left, right) = curve.split_at(curve_t);
        let ix = self.curves[loc.i].ix;
        self.points[ix[1]] = left.p1;
        self.points[ix[2]] = right.p2;
        let left_control = self.push_point(left.p2);
        let vertex = self.push_point(left.p3);
        let right_control = self.push_point(right.p1);
        self.curves[loc.i].ix = [ix[0], ix[1], left_control, vertex];
        self.curves.insert(
            loc.i + 1,
            PathCurve {
                ix: [vertex, right_control, ix[2], ix[3]],
                table: ArcLengthTable::default(),
            },
        );
        self.update_arc_lengths();
        Some(loc.i + 1)
    }

    /// Sample `point_count` points evenly spaced by arc length, including
    /// both end points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPointCount`] if `point_count` is zero.
    pub fn even_distribution_vertices(&self, point_count: usize) -> Result<Vec<Point>> {
        if point_count == 0 {
            return Err(Error::InvalidPointCount);
        }
        let (Some(first), Some(last)) = (self.curves.first(), self.curves.last()) else {
            return Ok(Vec::new());
        };
        let start = self.points[first.ix[0]];
        if point_count == 1 {
            return Ok(vec![start]);
        }
        let step = self.total_arc_length / (point_count - 1) as f64;
        let mut result = Vec::with_capacity(point_count);
        result.push(start);
        for i in 1..point_count - 1 {
            result.push(self.point(i as f64 * step));
        }
        result.push(self.points[last.ix[3]]);
        Ok(result)
    }

    /// The same path traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> BezPath {
        let mut path = BezPath::from_curves(self.curves().rev().map(|c| c.reversed()));
        path.adjust_circular = self.adjust_circular;
        path
    }

    /// Move every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    /// Scale the path about `center`.
    pub fn scale(&mut self, factor: f64, center: Point) {
        for p in &mut self.points {
            *p = p.scale(factor, center);
        }
        self.update_arc_lengths();
    }

    /// Rotate the path by `angle` radians about `center`.
    pub fn rotate(&mut self, angle: f64, center: Point) {
        for p in &mut self.points {
            *p = p.rotate(angle, center);
        }
        self.update_arc_lengths();
    }

    /// The bounding box of all curves, or `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.curves()
            .map(|c| c.bounding_box())
            .reduce(|a, b| a.union(b))
    }
}

impl PartialEq for BezPath {
    /// Paths are equal when they consist of equal curves in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.curves.len() == other.curves.len()
            && self.curves().zip(other.curves()).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::adjust_neighbour_control_point;
    use crate::{BezPath, CubicBez, CurvePointRole, Error, ParamCurve, Point, Vec2};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!(p0.distance(p1) <= epsilon, "{p0:?} != {p1:?}");
    }

    /// Two curves forming an S, smooth at (100, 0).
    fn s_path() -> BezPath {
        BezPath::from_curves([
            CubicBez::new((0.0, 0.0), (30.0, -60.0), (70.0, -60.0), (100.0, 0.0)),
            CubicBez::new((100.0, 0.0), (130.0, 60.0), (170.0, 60.0), (200.0, 0.0)),
        ])
    }

    /// Three straight curves along the x axis, each 10 long.
    fn straight_path() -> BezPath {
        BezPath::from_curves((0..3).map(|i| {
            let x = 10.0 * i as f64;
            CubicBez::new((x, 0.0), (x + 10.0 / 3.0, 0.0), (x + 20.0 / 3.0, 0.0), (x + 10.0, 0.0))
        }))
    }

    #[test]
    fn endpoints_are_shared() {
        let path = s_path();
        assert_eq!(path.curve_count(), 2);
        assert_eq!(
            path.point_index(0, CurvePointRole::EndPoint),
            path.point_index(1, CurvePointRole::StartPoint)
        );
        let shared = path.point_index(0, CurvePointRole::EndPoint).unwrap();
        assert_eq!(
            path.locate_curves_by_point(shared),
            vec![(0, CurvePointRole::EndPoint), (1, CurvePointRole::StartPoint)]
        );
    }

    #[test]
    fn total_length_is_sum_of_curves() {
        let path = s_path();
        let sum: f64 = path.curves().map(|c| c.length()).sum();
        assert_abs_diff_eq!(path.length(), sum, epsilon = 1e-12);
        assert_abs_diff_eq!(straight_path().length(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn point_at_endpoints() {
        let path = s_path();
        assert_eq!(path.point(0.0), Point::new(0.0, 0.0));
        assert_near(path.point(path.length()), Point::new(200.0, 0.0), 1e-9);
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_near(path.point_at(t), path.point(t * path.length()), 1e-12);
        }
    }

    #[test]
    fn point_along_straight_path() {
        let path = straight_path();
        assert_near(path.point(15.0), Point::new(15.0, 0.0), 1e-9);
        assert_near(path.point_at(0.5), Point::new(15.0, 0.0), 1e-9);
        let tangent = path.tangent(25.0);
        assert!(tangent.x > 0.0 && tangent.y.abs() < 1e-12, "{tangent:?}");
        assert!(path.perpendicular_at(0.9).dot(tangent).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_u_is_clamped() {
        let path = straight_path();
        assert_eq!(path.point(-5.0), Point::new(0.0, 0.0));
        assert_near(path.point(1000.0), Point::new(30.0, 0.0), 1e-9);
    }

    #[test]
    fn locate_u_index_resolves_joints() {
        let path = straight_path();
        let loc = path.locate_u_index(5.0);
        assert_eq!(loc.i, 0);
        assert_abs_diff_eq!(loc.u_before, 0.0);
        let loc = path.locate_u_index(12.5);
        assert_eq!(loc.i, 1);
        assert_abs_diff_eq!(loc.u_part, 2.5, epsilon = 1e-9);
        assert_abs_diff_eq!(loc.u_before, 10.0, epsilon = 1e-9);
        assert_eq!(path.locate_u_index(path.length()).i, 2);
    }

    #[test]
    fn closest_t_on_straight_path() {
        let path = straight_path();
        assert_abs_diff_eq!(path.closest_t(Point::new(15.0, 4.0)), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(path.closest_t(Point::new(-3.0, 0.0)), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(path.closest_t(Point::new(40.0, 1.0)), 1.0, epsilon = 1e-9);
        assert_eq!(BezPath::new().closest_t(Point::ZERO), 0.0);
    }

    #[test]
    fn sub_path_within_one_curve() {
        let path = straight_path();
        let sub = path.sub_path_at(0.1, 0.2);
        assert_eq!(sub.curve_count(), 1);
        assert_near(sub.point(0.0), Point::new(3.0, 0.0), 1e-9);
        assert_near(sub.point(sub.length()), Point::new(6.0, 0.0), 1e-9);
    }

    #[test]
    fn sub_path_across_curves() {
        let path = straight_path();
        let sub = path.sub_path_at(0.25, 0.9);
        assert_eq!(sub.curve_count(), 3);
        assert_near(sub.point(0.0), Point::new(7.5, 0.0), 1e-9);
        assert_near(sub.point(sub.length()), Point::new(27.0, 0.0), 1e-9);
        assert_abs_diff_eq!(sub.length(), 19.5, epsilon = 1e-9);
    }

    #[test]
    fn reversed_sub_path() {
        let path = s_path();
        let sub = path.sub_path_at(0.9, 0.1);
        assert_eq!(sub.curve_count(), 2);
        assert_near(sub.point(0.0), path.point_at(0.9), 1e-6);
        assert_near(sub.point(sub.length()), path.point_at(0.1), 1e-6);

        let straight = straight_path();
        let sub = straight.sub_path_at(1.0, 0.0);
        assert_eq!(sub.curve_count(), 3);
        assert_near(sub.point(0.0), Point::new(30.0, 0.0), 1e-9);
        assert_near(sub.point_at(0.5), Point::new(15.0, 0.0), 1e-9);
        assert_near(sub.point(sub.length()), Point::new(0.0, 0.0), 1e-9);
    }

    #[test]
    fn sub_path_between_joints() {
        let path = straight_path();
        let (a, b) = (1.0 / 3.0, 2.0 / 3.0);

        let sub = path.sub_path_at(a, b);
        assert_eq!(sub.curve_count(), 1);
        assert_near(sub.curve(0).unwrap().p0, Point::new(10.0, 0.0), 1e-9);
        assert_near(sub.curve(0).unwrap().p3, Point::new(20.0, 0.0), 1e-9);
        assert_abs_diff_eq!(sub.length(), 10.0, epsilon = 1e-9);

        let back = path.sub_path_at(b, a);
        assert_eq!(back.curve_count(), 1);
        assert_near(back.curve(0).unwrap().p0, Point::new(20.0, 0.0), 1e-9);
        assert_near(back.curve(0).unwrap().p3, Point::new(10.0, 0.0), 1e-9);

        assert_eq!(path.sub_path_at(a, 1.0).curve_count(), 2);
        assert_eq!(path.sub_path_at(1.0, a).curve_count(), 2);
        assert_eq!(path.sub_path_at(0.0, b).curve_count(), 2);
        for c in path.sub_path_at(1.0, a).curves() {
            assert!(c.length() > 1.0);
        }
    }

    #[test]
    fn first_curve_length_comes_from_its_points() {
        let mut curve = CubicBez::new((0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0));
        // Leaves the curve's own cached length at 30.
        curve.p3 = Point::new(300.0, 0.0);
        let mut path = BezPath::new();
        path.add_curve(curve);
        let sum: f64 = path.curves().map(|c| c.length()).sum();
        assert_abs_diff_eq!(path.length(), sum, epsilon = 1e-9);
        assert_abs_diff_eq!(path.length(), 300.0, epsilon = 1e-6);
    }

    #[test]
    fn smooth_join_mirrors_handle() {
        let main_point = Point::new(10.0, 10.0);
        let main_control = Point::new(13.0, 14.0);
        let neighbour_control = Point::new(10.0, 0.0);
        let keep = adjust_neighbour_control_point(
            main_point,
            main_control,
            main_point,
            neighbour_control,
            true,
        )
        .unwrap();
        assert_near(keep, Point::new(4.0, 2.0), 1e-12);
        let equal = adjust_neighbour_control_point(
            main_point,
            main_control,
            main_point,
            neighbour_control,
            false,
        )
        .unwrap();
        assert_near(equal, Point::new(7.0, 6.0), 1e-12);
        let degenerate = adjust_neighbour_control_point(
            main_point,
            Point::new(10.05, 10.05),
            main_point,
            neighbour_control,
            true,
        );
        assert!(degenerate.is_none());
    }

    #[test]
    fn add_curve_smooths_joint() {
        let mut path = BezPath::new();
        path.add_curve(CubicBez::new((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)));
        assert_abs_diff_eq!(path.length(), path.curve(0).unwrap().length(), epsilon = 1e-12);
        // The new start point is ignored and its handle is mirrored.
        path.add_curve(CubicBez::new((99.0, 99.0), (15.0, 0.0), (20.0, -10.0), (20.0, 0.0)));
        let second = path.curve(1).unwrap();
        assert_eq!(second.p0, Point::new(10.0, 0.0));
        // Handle length 5 kept, pointing away from the incoming (0, 10) handle.
        assert_near(second.p1, Point::new(10.0, -5.0), 1e-12);
        let sum: f64 = path.curves().map(|c| c.length()).sum();
        assert_abs_diff_eq!(path.length(), sum, epsilon = 1e-12);
    }

    #[test]
    fn moving_shared_end_point_moves_both_curves() {
        let mut path = s_path();
        path.move_curve_point(0, CurvePointRole::EndPoint, Vec2::new(0.0, 10.0))
            .unwrap();
        let a = path.curve(0).unwrap();
        let b = path.curve(1).unwrap();
        assert_eq!(a.p3, Point::new(100.0, 10.0));
        assert_eq!(b.p0, Point::new(100.0, 10.0));
        assert_eq!(a.p2, Point::new(70.0, -50.0));
        assert_eq!(b.p1, Point::new(130.0, 70.0));
        let sum: f64 = path.curves().map(|c| c.length()).sum();
        assert_abs_diff_eq!(path.length(), sum, epsilon = 1e-12);
    }

    #[test]
    fn moving_control_point_keeps_joint_smooth() {
        let mut path = s_path();
        path.move_curve_point(1, CurvePointRole::StartControlPoint, Vec2::new(10.0, 0.0))
            .unwrap();
        let a = path.curve(0).unwrap();
        let b = path.curve(1).unwrap();
        let out = b.p1 - b.p0;
        let inc = a.p3 - a.p2;
        assert!(out.cross(inc).abs() < 1e-9, "handles not collinear");
        assert!(out.dot(inc) > 0.0);
        // The predecessor keeps its handle length.
        assert_abs_diff_eq!(inc.hypot(), Vec2::new(30.0, 60.0).hypot(), epsilon = 1e-9);
    }

    #[test]
    fn circular_adjustment() {
        let mut path = straight_path();
        path.move_curve_point(0, CurvePointRole::StartPoint, Vec2::new(0.0, 1.0))
            .unwrap();
        // Open path: the last curve is not a neighbour.
        assert_eq!(path.curve(2).unwrap().p2, Point::new(20.0 + 20.0 / 3.0, 0.0));
        assert!(!path.adjust_predecessor_control_point(0, true));

        path.adjust_circular = true;
        path.move_curve_point(0, CurvePointRole::StartPoint, Vec2::new(0.0, 1.0))
            .unwrap();
        assert_eq!(path.curve(2).unwrap().p2, Point::new(20.0 + 20.0 / 3.0, 1.0));
    }

    #[test]
    fn move_out_of_range_is_an_error() {
        let mut path = s_path();
        let err = path
            .move_curve_point(5, CurvePointRole::EndPoint, Vec2::ZERO)
            .unwrap_err();
        assert!(matches!(err, Error::CurveIndexOutOfRange { index: 5, count: 2 }));
    }

    #[test]
    fn remove_curves() {
        let mut path = straight_path();
        assert!(path.remove_end_point());
        assert_eq!(path.curve_count(), 2);
        assert!(path.remove_start_point());
        assert_eq!(path.curve_count(), 1);
        assert_eq!(path.curve(0).unwrap().p0, Point::new(10.0, 0.0));
        assert_abs_diff_eq!(path.length(), 10.0, epsilon = 1e-9);
        assert!(path.remove_end_point());
        assert!(!path.remove_end_point());
        assert!(path.is_empty());
    }

    #[test]
    fn insert_vertex_keeps_shape() {
        let mut path = s_path();
        let before: Vec<Point> = (0..=10).map(|i| path.point_at(i as f64 / 10.0)).collect();
        let split_at = path.point_at(0.3);
        let index = path.insert_vertex_at(0.3).unwrap();
        assert_eq!(index, 1);
        assert_eq!(path.curve_count(), 3);
        assert_near(path.curve(1).unwrap().p0, split_at, 1e-9);
        assert_eq!(
            path.point_index(0, CurvePointRole::EndPoint),
            path.point_index(1, CurvePointRole::StartPoint)
        );
        for (i, p) in before.iter().enumerate() {
            let t = i as f64 / 10.0;
            assert_near(path.point_at(t), *p, 0.5);
        }
        assert_eq!(path.insert_vertex_at(0.0), None);
    }

    #[test]
    fn even_distribution() {
        let path = straight_path();
        let points = path.even_distribution_vertices(4).unwrap();
        assert_eq!(points.len(), 4);
        for (p, x) in points.iter().zip([0.0, 10.0, 20.0, 30.0]) {
            assert_near(*p, Point::new(x, 0.0), 1e-9);
        }
        assert_eq!(path.even_distribution_vertices(1).unwrap(), vec![Point::ZERO]);
        assert!(matches!(
            path.even_distribution_vertices(0),
            Err(Error::InvalidPointCount)
        ));
    }

    #[test]
    fn reversed_path() {
        let path = s_path();
        let rev = path.reversed();
        assert_eq!(rev.curve_count(), 2);
        assert_eq!(rev.curve(0).unwrap().start(), Point::new(200.0, 0.0));
        assert_abs_diff_eq!(rev.length(), path.length(), epsilon = 1e-9);
        assert_eq!(rev.reversed(), path);
    }

    #[test]
    fn transforms() {
        let mut path = straight_path();
        path.translate(Vec2::new(0.0, 5.0));
        assert_eq!(path.point(0.0), Point::new(0.0, 5.0));
        path.scale(2.0, Point::new(0.0, 5.0));
        assert_abs_diff_eq!(path.length(), 60.0, epsilon = 1e-9);
        path.rotate(core::f64::consts::FRAC_PI_2, Point::new(0.0, 5.0));
        assert_near(path.point(path.length()), Point::new(0.0, 65.0), 1e-9);
        let bbox = path.bounding_box().unwrap();
        assert_abs_diff_eq!(bbox.height(), 60.0, epsilon = 1e-9);
        assert!(BezPath::new().bounding_box().is_none());
    }
}
