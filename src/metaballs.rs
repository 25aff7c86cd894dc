// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metaball silhouettes from inflated circles.
//!
//! Every circle that is not swallowed by another is inflated by a fixed
//! radius addon. Where two inflated circles intersect, a circle of the
//! addon radius centered at each intersection point touches both original
//! circles; these inverse circles are the seeds of the concave bridges
//! between neighbouring balls. Inverse circles whose centers lie inside
//! each other are grouped as potential holes.

use crate::{
    build_radical_line_matrix, find_inner_circles, find_outer_circle_intervals,
    find_outer_partitions_as_sectors, Circle, CircleSector, Point, RadicalLineMatrix,
};

/// Tunable parameters for [`Metaballs`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MetaballsOptions {
    /// How much every circle is inflated, and the radius of the inverse
    /// circles.
    pub meta_radius_addon: f64,
}

impl Default for MetaballsOptions {
    fn default() -> Self {
        MetaballsOptions {
            meta_radius_addon: 40.0,
        }
    }
}

/// The inverse circles of one intersecting pair of inflated circles.
#[derive(Clone, Debug, PartialEq)]
pub struct InverseCirclePair {
    /// Index of the first circle in the input.
    pub circle_a: usize,
    /// Index of the second circle in the input.
    pub circle_b: usize,
    /// Circles of radius `meta_radius_addon` centered at the two
    /// intersection points of the inflated circles.
    pub inverse: [Circle; 2],
    /// Whether the two inverse circles intersect each other.
    pub inverse_circles_intersect: bool,
    /// For each inverse circle, its closest points on the original circles
    /// `a` and `b`.
    ///
    /// An entry is `None` if the inverse circle is centered on the original
    /// circle's center.
    pub closest_points: [[Option<Point>; 2]; 2],
}

/// Everything [`Metaballs::compute`] derives from the input circles.
#[derive(Clone, Debug)]
pub struct MetaballsResult {
    /// Indices of input circles lying inside another circle.
    pub excluded: Vec<usize>,
    /// Indices of the remaining input circles, in input order.
    pub circles_of_interest: Vec<usize>,
    /// The remaining circles, inflated. Parallel to `circles_of_interest`.
    pub inflated: Vec<Circle>,
    /// Radical lines between the inflated circles, indexed like `inflated`.
    pub radical_lines: RadicalLineMatrix,
    /// One entry per intersecting pair of inflated circles.
    pub pairs: Vec<InverseCirclePair>,
    /// Groups of indices into [`MetaballsResult::inverse_circles`] whose
    /// centers lie inside each other.
    pub hole_groups: Vec<Vec<usize>>,
    /// The outline of the inflated circles.
    pub outline: Vec<Vec<CircleSector>>,
}

impl MetaballsResult {
    /// All inverse circles in pair order, two per pair.
    pub fn inverse_circles(&self) -> Vec<Circle> {
        self.pairs.iter().flat_map(|p| p.inverse).collect()
    }
}

/// A set of circles rendered as merged metaballs.
#[derive(Clone, Debug, Default)]
pub struct Metaballs {
    /// The input circles.
    pub circles: Vec<Circle>,
    /// Parameters.
    pub options: MetaballsOptions,
}

impl Metaballs {
    /// Metaballs over `circles` with the given options.
    pub fn new(circles: Vec<Circle>, options: MetaballsOptions) -> Metaballs {
        Metaballs { circles, options }
    }

    /// Run the whole pipeline.
    pub fn compute(&self) -> MetaballsResult {
        let addon = self.options.meta_radius_addon;
        let excluded = find_inner_circles(&self.circles);
        let circles_of_interest: Vec<usize> = (0..self.circles.len())
            .filter(|i| !excluded.contains(i))
            .collect();
        let inflated: Vec<Circle> = circles_of_interest
            .iter()
            .map(|&i| self.circles[i].inflate(addon))
            .collect();
        log::debug!(
            "metaballs: {} circles, {} excluded",
            self.circles.len(),
            excluded.len()
        );

        let radical_lines = build_radical_line_matrix(&inflated);
        let mut pairs = Vec::new();
        for i in 0..inflated.len() {
            for j in i + 1..inflated.len() {
                let Some(line) = radical_lines.get(i, j) else {
                    continue;
                };
                let base_a = self.circles[circles_of_interest[i]];
                let base_b = self.circles[circles_of_interest[j]];
                let inverse = [Circle::new(line.p0, addon), Circle::new(line.p1, addon)];
                let closest = |c: &Circle| {
                    [
                        base_a.closest_point(c.center),
                        base_b.closest_point(c.center),
                    ]
                };
                pairs.push(InverseCirclePair {
                    circle_a: circles_of_interest[i],
                    circle_b: circles_of_interest[j],
                    inverse,
                    inverse_circles_intersect: inverse[0]
                        .circle_intersection(&inverse[1])
                        .is_some(),
                    closest_points: [closest(&inverse[0]), closest(&inverse[1])],
                });
            }
        }

        let inverse: Vec<Circle> = pairs.iter().flat_map(|p| p.inverse).collect();
        let hole_groups = detect_holes(&inverse);
        log::debug!(
            "metaballs: {} intersecting pairs, {} hole groups",
            pairs.len(),
            hole_groups.len()
        );

        let interval_sets = find_outer_circle_intervals(&inflated, &radical_lines);
        let outline = find_outer_partitions_as_sectors(&inflated, &interval_sets);

        MetaballsResult {
            excluded,
            circles_of_interest,
            inflated,
            radical_lines,
            pairs,
            hole_groups,
            outline,
        }
    }
}

/// Group circles whose centers lie inside each other.
///
/// Two circles are linked when each one's center lies strictly inside the
/// other circle; groups are the connected components of that relation, in
/// order of their lowest index. Every circle appears in exactly one group,
/// so isolated circles form groups of one.
pub fn detect_holes(circles: &[Circle]) -> Vec<Vec<usize>> {
    let linked = |i: usize, j: usize| {
        circles[i].contains_point(circles[j].center) && circles[j].contains_point(circles[i].center)
    };
    let mut visited = vec![false; circles.len()];
    let mut groups = Vec::new();
    for start in 0..circles.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut group = vec![start];
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            for j in 0..circles.len() {
                if !visited[j] && linked(i, j) {
                    visited[j] = true;
                    group.push(j);
                    stack.push(j);
                }
            }
        }
        group.sort_unstable();
        groups.push(group);
    }
    groups
}
