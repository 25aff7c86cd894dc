// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outer boundary of a union of circles.
//!
//! The boundary is found in three steps. First the radical line of every
//! intersecting pair is computed. Each circle then keeps only the angular
//! intervals that lie outside all other circles. Finally the surviving arcs
//! are chained end-to-start into closed partitions, one per connected
//! outline.
//!
//! ```
//! use vgkit::{outer_partitions, Circle};
//!
//! let circles = [Circle::new((0.0, 0.0), 10.0), Circle::new((15.0, 0.0), 10.0)];
//! let partitions = outer_partitions(&circles);
//! assert_eq!(partitions.len(), 1);
//! assert_eq!(partitions[0].len(), 3);
//! ```

use crate::common::normalize_angle;
use crate::{Circle, CircleSector, CircularIntervalSet, Line, Point, PARTITION_EPSILON};

/// Radical lines of all circle pairs.
///
/// The cell `(i, j)` holds the radical line of circles `i` and `j` as seen
/// from circle `i`; the cell `(j, i)` holds the same line reversed.
#[derive(Clone, Debug, PartialEq)]
pub struct RadicalLineMatrix {
    size: usize,
    cells: Vec<Option<Line>>,
}

impl RadicalLineMatrix {
    /// The radical line of circles `i` and `j`, if they intersect.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<Line> {
        if i < self.size && j < self.size {
            self.cells[i * self.size + j]
        } else {
            None
        }
    }

    /// The number of circles.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` for a matrix over no circles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// One interval of one circle's interval set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntervalRef {
    /// Index of the circle.
    pub circle: usize,
    /// Index of the interval within the circle's set.
    pub interval: usize,
}

/// Compute the radical line of every pair of circles.
pub fn build_radical_line_matrix(circles: &[Circle]) -> RadicalLineMatrix {
    let size = circles.len();
    let mut cells = vec![None; size * size];
    for i in 0..size {
        for j in i + 1..size {
            if let Some(line) = circles[i].circle_intersection(&circles[j]) {
                cells[i * size + j] = Some(line);
                cells[j * size + i] = Some(line.reversed());
            }
        }
    }
    RadicalLineMatrix { size, cells }
}

/// Indices of all circles that lie inside some other circle.
pub fn find_inner_circles(circles: &[Circle]) -> Vec<usize> {
    (0..circles.len())
        .filter(|&i| {
            circles
                .iter()
                .enumerate()
                .any(|(j, outer)| j != i && outer.contains_circle(&circles[i]))
        })
        .collect()
}

/// The angles on `circle` of the radical line's two points.
///
/// Going from the first angle to the second in the direction of
/// increasing angle sweeps the arc that lies inside the other circle.
pub fn radical_line_to_interval(circle: &Circle, radical_line: &Line) -> [f64; 2] {
    let angle_of = |p: Point| normalize_angle((p - circle.center).atan2());
    [angle_of(radical_line.p0), angle_of(radical_line.p1)]
}

/// Remove the arc `[arc_start, arc_end]` from `set`, keeping the part of
/// the circle outside it.
///
/// An arc of zero length, as produced by tangent circles, removes nothing.
pub fn keep_outside_arc(set: &mut CircularIntervalSet, [arc_start, arc_end]: [f64; 2]) {
    if arc_start == arc_end {
        return;
    }
    set.intersect(arc_end, arc_start);
}

/// For every circle, the angular intervals of its outline that no other
/// circle covers.
pub fn find_outer_circle_intervals(
    circles: &[Circle],
    radical_lines: &RadicalLineMatrix,
) -> Vec<CircularIntervalSet> {
    circles
        .iter()
        .enumerate()
        .map(|(i, circle)| {
            let mut set = CircularIntervalSet::full_circle();
            for (j, other) in circles.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(line) = radical_lines.get(i, j) {
                    if line.p0 == line.p1 && touches_from_inside(circle, other) {
                        set.clear();
                    } else {
                        keep_outside_arc(&mut set, radical_line_to_interval(circle, &line));
                    }
                } else if other.contains_circle(circle) {
                    set.clear();
                }
            }
            set
        })
        .collect()
}

/// Whether `inner` lies inside `outer`, touching it at one point.
fn touches_from_inside(inner: &Circle, outer: &Circle) -> bool {
    inner.center.distance(outer.center) + inner.radius <= outer.radius + PARTITION_EPSILON
}

fn first_unused(used: &[Vec<bool>]) -> Option<IntervalRef> {
    used.iter().enumerate().find_map(|(circle, row)| {
        row.iter()
            .position(|u| !u)
            .map(|interval| IntervalRef { circle, interval })
    })
}

/// Trace one closed outline through the unused intervals.
///
/// Starts at the lowest-index unused interval and repeatedly continues
/// with the lowest-index unused interval whose start point lies within
/// [`PARTITION_EPSILON`] of the current interval's end point. Every
/// interval taken is marked in `used`, which must have the same shape as
/// `interval_sets`.
///
/// Returns `None` once every interval is used.
pub fn find_outer_partition(
    circles: &[Circle],
    interval_sets: &[CircularIntervalSet],
    used: &mut [Vec<bool>],
) -> Option<Vec<IntervalRef>> {
    let endpoint = |r: IntervalRef, side: usize| {
        circles[r.circle].point_at(interval_sets[r.circle].intervals()[r.interval][side])
    };
    let mut current = first_unused(used)?;
    used[current.circle][current.interval] = true;
    let mut path = vec![current];
    loop {
        let end = endpoint(current, 1);
        let next = used.iter().enumerate().find_map(|(circle, row)| {
            row.iter().enumerate().find_map(|(interval, &u)| {
                let candidate = IntervalRef { circle, interval };
                (!u && endpoint(candidate, 0).is_near(end, PARTITION_EPSILON))
                    .then_some(candidate)
            })
        });
        let Some(next) = next else {
            break;
        };
        used[next.circle][next.interval] = true;
        path.push(next);
        current = next;
    }
    Some(path)
}

/// Trace outlines until every interval belongs to one.
pub fn find_outer_partitions(
    circles: &[Circle],
    interval_sets: &[CircularIntervalSet],
) -> Vec<Vec<IntervalRef>> {
    let mut used: Vec<Vec<bool>> = interval_sets.iter().map(|s| vec![false; s.len()]).collect();
    let mut partitions = Vec::new();
    while let Some(partition) = find_outer_partition(circles, interval_sets, &mut used) {
        partitions.push(partition);
    }
    partitions
}

/// Like [`find_outer_partitions`], with each interval turned into the
/// sector of its circle.
pub fn find_outer_partitions_as_sectors(
    circles: &[Circle],
    interval_sets: &[CircularIntervalSet],
) -> Vec<Vec<CircleSector>> {
    find_outer_partitions(circles, interval_sets)
        .into_iter()
        .map(|partition| {
            partition
                .into_iter()
                .map(|r| {
                    let [start, end] = interval_sets[r.circle].intervals()[r.interval];
                    CircleSector::new(circles[r.circle], start, end)
                })
                .collect()
        })
        .collect()
}

/// The outline of a union of circles as closed chains of sectors.
pub fn outer_partitions(circles: &[Circle]) -> Vec<Vec<CircleSector>> {
    let radical_lines = build_radical_line_matrix(circles);
    let interval_sets = find_outer_circle_intervals(circles, &radical_lines);
    find_outer_partitions_as_sectors(circles, &interval_sets)
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{PI, TAU};

    use approx::assert_abs_diff_eq;

    use super::*;

    fn pair() -> [Circle; 2] {
        [
            Circle::new((0.0, 0.0), 10.0),
            Circle::new((15.0, 0.0), 10.0),
        ]
    }

    #[test]
    fn radical_matrix_is_mirrored() {
        let circles = pair();
        let m = build_radical_line_matrix(&circles);
        assert_eq!(m.len(), 2);
        let line = m.get(0, 1).unwrap();
        assert_eq!(m.get(1, 0), Some(line.reversed()));
        assert!(m.get(0, 0).is_none());
        assert!(m.get(0, 7).is_none());
        assert_abs_diff_eq!(line.p0.x, 7.5, epsilon = 1e-9);
        assert_abs_diff_eq!(line.p1.x, 7.5, epsilon = 1e-9);
        assert_abs_diff_eq!(line.p0.y, -6.6144, epsilon = 1e-4);
        assert_abs_diff_eq!(line.p1.y, 6.6144, epsilon = 1e-4);
    }

    #[test]
    fn overlapping_pair_has_no_inner_circles() {
        assert!(find_inner_circles(&pair()).is_empty());
        let nested = [
            Circle::new((0.0, 0.0), 10.0),
            Circle::new((2.0, 0.0), 3.0),
            Circle::new((30.0, 0.0), 1.0),
        ];
        assert_eq!(find_inner_circles(&nested), vec![1]);
    }

    #[test]
    fn inside_arc_faces_the_other_circle() {
        let [a, b] = pair();
        let line = a.circle_intersection(&b).unwrap();
        let [start, end] = radical_line_to_interval(&a, &line);
        // The arc through angle 0 wraps: it starts below the x axis.
        assert!(start > PI && end < PI, "{start} {end}");
        let mut set = CircularIntervalSet::full_circle();
        keep_outside_arc(&mut set, [start, end]);
        assert_eq!(set.intervals(), &[[end, start]]);

        let mut untouched = CircularIntervalSet::full_circle();
        keep_outside_arc(&mut untouched, [1.0, 1.0]);
        assert_eq!(untouched.intervals(), &[[0.0, TAU]]);
    }

    #[test]
    fn outer_intervals_of_pair() {
        let circles = pair();
        let m = build_radical_line_matrix(&circles);
        let sets = find_outer_circle_intervals(&circles, &m);
        assert_eq!(sets[0].len(), 1);
        assert_eq!(sets[1].len(), 2);
        // Circle 0 keeps its left side, circle 1 its right side.
        let [s, e] = sets[0].intervals()[0];
        assert!(s < PI && e > PI);
        assert_eq!(sets[1].intervals()[0][0], 0.0);
        assert_eq!(sets[1].intervals()[1][1], TAU);
    }

    #[test]
    fn pair_forms_one_partition() {
        let circles = pair();
        let m = build_radical_line_matrix(&circles);
        let sets = find_outer_circle_intervals(&circles, &m);
        let partitions = find_outer_partitions(&circles, &sets);
        assert_eq!(
            partitions,
            vec![vec![
                IntervalRef { circle: 0, interval: 0 },
                IntervalRef { circle: 1, interval: 1 },
                IntervalRef { circle: 1, interval: 0 },
            ]]
        );
        let sectors = find_outer_partitions_as_sectors(&circles, &sets);
        for w in sectors[0].windows(2) {
            assert!(w[0].end_point().is_near(w[1].start_point(), PARTITION_EPSILON));
        }
        let last = sectors[0].last().unwrap();
        assert!(last.end_point().is_near(sectors[0][0].start_point(), 1e-9));
    }

    #[test]
    fn chain_of_three() {
        let circles = [
            Circle::new((0.0, 0.0), 10.0),
            Circle::new((15.0, 0.0), 10.0),
            Circle::new((30.0, 0.0), 10.0),
        ];
        let partitions = outer_partitions(&circles);
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].len(), 5);
        for sector in &partitions[0] {
            let mid = sector.circle.point_at(sector.angle_at(0.5));
            for c in &circles {
                assert!(!c.contains_point(mid) || c == &sector.circle);
            }
        }
    }

    #[test]
    fn separate_and_nested_circles() {
        let separate = [
            Circle::new((0.0, 0.0), 5.0),
            Circle::new((50.0, 0.0), 5.0),
        ];
        let partitions = outer_partitions(&separate);
        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].len(), 1);
        assert_eq!(partitions[0][0].circle, separate[0]);

        let nested = [
            Circle::new((2.0, 0.0), 3.0),
            Circle::new((0.0, 0.0), 10.0),
        ];
        let m = build_radical_line_matrix(&nested);
        let sets = find_outer_circle_intervals(&nested, &m);
        assert!(sets[0].is_empty());
        let partitions = find_outer_partitions_as_sectors(&nested, &sets);
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0][0].circle.center, Point::new(0.0, 0.0));
    }

    #[test]
    fn tangent_circles() {
        let inside = [Circle::new((0.0, 0.0), 10.0), Circle::new((5.0, 0.0), 5.0)];
        let m = build_radical_line_matrix(&inside);
        let line = m.get(0, 1).unwrap();
        assert_eq!(line.p0, line.p1);
        let sets = find_outer_circle_intervals(&inside, &m);
        assert_eq!(sets[0].len(), 1);
        assert!(sets[1].is_empty());
        let partitions = outer_partitions(&inside);
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].len(), 1);
        assert_eq!(partitions[0][0].circle, inside[0]);

        let outside = [Circle::new((0.0, 0.0), 10.0), Circle::new((20.0, 0.0), 10.0)];
        let m = build_radical_line_matrix(&outside);
        assert!(m.get(0, 1).is_some());
        let sets = find_outer_circle_intervals(&outside, &m);
        assert_eq!(sets[0].intervals(), &[[0.0, TAU]]);
        assert_eq!(sets[1].intervals(), &[[0.0, TAU]]);
        assert_eq!(outer_partitions(&outside).len(), 2);
    }

    #[test]
    fn partitions_use_every_interval_once() {
        let circles = [
            Circle::new((0.0, 0.0), 10.0),
            Circle::new((12.0, 5.0), 8.0),
            Circle::new((5.0, 14.0), 7.0),
            Circle::new((60.0, 0.0), 6.0),
            Circle::new((68.0, 0.0), 6.0),
        ];
        let m = build_radical_line_matrix(&circles);
        let sets = find_outer_circle_intervals(&circles, &m);
        let partitions = find_outer_partitions(&circles, &sets);
        let total: usize = sets.iter().map(|s| s.len()).sum();
        let mut seen: Vec<IntervalRef> = partitions.iter().flatten().copied().collect();
        assert_eq!(seen.len(), total);
        seen.sort_by_key(|r| (r.circle, r.interval));
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(partitions.len(), 2);
    }
}
