// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle sectors.

use core::f64::consts::TAU;

use crate::common::normalize_angle;
use crate::{Circle, CircularIntervalSet, Point};

/// An arc of a circle from `start_angle` to `end_angle`, swept in the
/// direction of increasing angle.
///
/// Angles are in radians. A sector whose start angle is larger than its end
/// angle wraps through angle zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CircleSector {
    /// The circle the arc lies on.
    pub circle: Circle,
    /// The angle the arc starts at.
    pub start_angle: f64,
    /// The angle the arc ends at.
    pub end_angle: f64,
}

impl CircleSector {
    /// A new sector.
    #[inline]
    pub fn new(circle: Circle, start_angle: f64, end_angle: f64) -> CircleSector {
        CircleSector {
            circle,
            start_angle,
            end_angle,
        }
    }

    /// The point where the arc starts.
    #[inline]
    pub fn start_point(&self) -> Point {
        self.circle.point_at(self.start_angle)
    }

    /// The point where the arc ends.
    #[inline]
    pub fn end_point(&self) -> Point {
        self.circle.point_at(self.end_angle)
    }

    /// The swept angle in `[0, 2π)`.
    #[inline]
    pub fn sweep(&self) -> f64 {
        normalize_angle(self.end_angle - self.start_angle)
    }

    /// Whether the arc covers `angle`.
    ///
    /// The start angle is included, the end angle is not.
    pub fn contains_angle(&self, angle: f64) -> bool {
        let start = normalize_angle(self.start_angle);
        let end = normalize_angle(self.end_angle);
        let angle = normalize_angle(angle);
        if start <= end {
            angle >= start && angle < end
        } else {
            angle >= start || angle < end
        }
    }

    /// The angle at relative position `t` in `[0, 1]` along the arc,
    /// normalized into `[0, 2π)`.
    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        normalize_angle(self.start_angle + self.sweep() * t)
    }

    /// The part of this arc that lies inside the other sector's circle.
    ///
    /// Returns `None` if the circles do not intersect or the arc has no
    /// part inside the other circle.
    ///
    /// An arc that enters the other circle at both of its ends can leave
    /// two separate pieces inside it. Only the piece that comes first in
    /// angle order is returned then.
    pub fn circle_sector_intersection(&self, other: &CircleSector) -> Option<CircleSector> {
        let radical_line = self.circle.circle_intersection(&other.circle)?;
        let angle_of = |p: Point| normalize_angle((p - self.circle.center).atan2());
        let mut set = CircularIntervalSet::full_circle();
        set.intersect(angle_of(radical_line.p0), angle_of(radical_line.p1));
        if (self.end_angle - self.start_angle).abs() < TAU {
            set.intersect(
                normalize_angle(self.start_angle),
                normalize_angle(self.end_angle),
            );
        }
        let pieces = set.intervals();
        let (start, end) = match *pieces {
            [] => return None,
            [[s, e]] => (s, e),
            // A piece touching 2π continues through zero into the first one.
            [[s0, e0], .., [s1, e1]] if s0 <= 0.0 && e1 >= TAU => (s1, e0),
            [[s, e], ..] => (s, e),
        };
        Some(CircleSector::new(self.circle, start, end))
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use crate::{Circle, CircleSector, Point};

    #[test]
    fn contains_angle() {
        let c = Circle::new((0.0, 0.0), 1.0);
        let s = CircleSector::new(c, 0.5, 2.0);
        assert!(s.contains_angle(0.5));
        assert!(s.contains_angle(1.0));
        assert!(!s.contains_angle(2.0));
        let wrapping = CircleSector::new(c, 5.0, 1.0);
        assert!(wrapping.contains_angle(6.0));
        assert!(wrapping.contains_angle(0.2));
        assert!(!wrapping.contains_angle(3.0));
    }

    #[test]
    fn angles_along_the_arc() {
        let s = CircleSector::new(Circle::new((0.0, 0.0), 2.0), 3.0 * FRAC_PI_2, FRAC_PI_2);
        assert_abs_diff_eq!(s.sweep(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(s.angle_at(0.5), 0.0, epsilon = 1e-12);
        assert!(s.start_point().distance(Point::new(0.0, -2.0)) < 1e-12);
        assert!(s.end_point().distance(Point::new(0.0, 2.0)) < 1e-12);
    }

    #[test]
    fn sector_inside_other_circle() {
        let a = CircleSector::new(Circle::new((0.0, 0.0), 10.0), 0.0, 2.0 * PI);
        let b = CircleSector::new(Circle::new((15.0, 0.0), 10.0), 0.0, 2.0 * PI);
        let inside = a.circle_sector_intersection(&b).unwrap();
        // The lens arc of `a` is centered on angle zero.
        assert!(inside.contains_angle(0.0));
        assert!(!inside.contains_angle(PI));
        assert!(inside.start_point().distance(b.circle.center) <= 10.0 + 1e-9);
        assert!(inside.end_point().distance(b.circle.center) <= 10.0 + 1e-9);

        let upper = CircleSector::new(a.circle, 0.0, PI);
        let clipped = upper.circle_sector_intersection(&b).unwrap();
        assert_abs_diff_eq!(clipped.start_angle, 0.0);
        assert!(clipped.end_angle > 0.0 && clipped.end_angle < FRAC_PI_2);

        let far = CircleSector::new(Circle::new((50.0, 0.0), 1.0), 0.0, PI);
        assert!(a.circle_sector_intersection(&far).is_none());
        let away = CircleSector::new(a.circle, 2.0, 4.0);
        assert!(away.circle_sector_intersection(&b).is_none());
    }

    #[test]
    fn split_arc_keeps_first_piece() {
        let circle = Circle::new((0.0, 0.0), 10.0);
        let other = CircleSector::new(Circle::new((20.0, 0.0), 20.0), 0.0, 2.0 * PI);
        // The inside arc of `circle` runs from about -1.318 to 1.318, so
        // this arc around the far side meets it near both of its ends.
        let arc = CircleSector::new(circle, 1.0, 5.5);
        let inside_end = (2.5f64 / 10.0).acos();
        let piece = arc.circle_sector_intersection(&other).unwrap();
        assert_abs_diff_eq!(piece.start_angle, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(piece.end_angle, inside_end, epsilon = 1e-9);
    }
}
