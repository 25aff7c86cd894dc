// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circles.

use core::f64::consts::PI;

use crate::{Line, Point, Vec2};

/// A circle.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// The center.
    pub center: Point,
    /// The radius.
    pub radius: f64,
}

impl Circle {
    /// A new circle from center and radius.
    #[inline]
    pub fn new(center: impl Into<Point>, radius: f64) -> Circle {
        Circle {
            center: center.into(),
            radius,
        }
    }

    /// The same circle with the radius grown by `addon`.
    #[inline]
    #[must_use]
    pub fn inflate(&self, addon: f64) -> Circle {
        Circle::new(self.center, self.radius + addon)
    }

    /// The area of the circle.
    #[inline]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// The circumference of the circle.
    #[inline]
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// The point on the circle at `angle` radians.
    #[inline]
    pub fn point_at(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    /// The tangent direction at `angle` radians, scaled by the radius.
    ///
    /// This is the derivative of [`Circle::point_at`] with respect to the
    /// angle.
    #[inline]
    pub fn tangent_at(&self, angle: f64) -> Vec2 {
        Vec2::from_angle(angle).rotate(PI / 2.0) * self.radius
    }

    /// Whether `p` lies strictly inside the circle.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        self.center.distance_squared(p) < self.radius * self.radius
    }

    /// Whether `other` lies strictly inside this circle.
    ///
    /// Internally tangent circles are not contained.
    #[inline]
    pub fn contains_circle(&self, other: &Circle) -> bool {
        self.center.distance(other.center) + other.radius < self.radius
    }

    /// The point on the circle closest to `p`.
    ///
    /// Returns `None` when `p` is the center, where every point on the
    /// circle is equally close.
    pub fn closest_point(&self, p: Point) -> Option<Point> {
        let d = p - self.center;
        let len = d.hypot();
        if len == 0.0 {
            return None;
        }
        Some(self.center + d * (self.radius / len))
    }

    /// The radical line of two intersecting circles.
    ///
    /// The result connects the two intersection points. Walking the line
    /// from `p0` to `p1` on this circle sweeps the arc that lies inside
    /// `other` in the direction of increasing angle; swapping the circles
    /// reverses the line.
    ///
    /// Returns `None` for separate circles, for a circle contained in the
    /// other, and for concentric circles.
    pub fn circle_intersection(&self, other: &Circle) -> Option<Line> {
        let r1 = self.radius;
        let r2 = other.radius;
        let delta = other.center - self.center;
        let d = delta.hypot();
        if d > r1 + r2 || d < (r1 - r2).abs() || d == 0.0 {
            return None;
        }
        let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
        // Clamp for tangent circles, where rounding can push this below zero.
        let h = (r1 * r1 - a * a).max(0.0).sqrt();
        let dir = delta / d;
        let base = self.center + dir * a;
        let offset = dir.perp() * h;
        Some(Line::new(base + offset, base - offset))
    }

    /// The intersection points of this circle with the infinite line through
    /// `line`.
    ///
    /// Returns `None` if the line misses the circle or is degenerate. A
    /// tangent line yields a line with two equal points.
    pub fn line_intersection(&self, line: &Line) -> Option<Line> {
        let a = line.p0 - self.center;
        let b = line.p1 - self.center;
        let dx = b.x - a.x;
        let mut dy = b.y - a.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        // Horizontal lines break the sign term below.
        if dy == 0.0 {
            dy = f64::EPSILON;
        }
        let dr2 = dx * dx + dy * dy;
        let det = a.x * b.y - b.x * a.y;
        let disc = self.radius * self.radius * dr2 - det * det;
        if disc < 0.0 {
            return None;
        }
        let sign = if dy < 0.0 { -1.0 } else { 1.0 };
        let root = disc.sqrt();
        let p0 = Vec2::new(
            (det * dy + sign * dx * root) / dr2,
            (-det * dx + dy.abs() * root) / dr2,
        );
        let p1 = Vec2::new(
            (det * dy - sign * dx * root) / dr2,
            (-det * dx - dy.abs() * root) / dr2,
        );
        Some(Line::new(self.center + p0, self.center + p1))
    }

    /// Is this circle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }
}
