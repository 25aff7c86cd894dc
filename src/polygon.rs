// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting self-intersecting polygons.

use crate::{Line, Point, DEFAULT_MAX_SPLIT_DEPTH};

/// Split a self-intersecting polygon into polygons without
/// self-intersections, with a recursion depth of
/// [`DEFAULT_MAX_SPLIT_DEPTH`].
pub fn split_polygon(vertices: &[Point]) -> Vec<Vec<Point>> {
    split_polygon_to_non_intersecting(vertices, DEFAULT_MAX_SPLIT_DEPTH)
}

/// Split a self-intersecting polygon into polygons without
/// self-intersections.
///
/// Edges are scanned in order; at the first pair of non-adjacent edges
/// crossing within both segments, the polygon is cut into two polygons
/// that share the crossing point, and both are split further with one
/// level less of depth. Which valid partition results therefore depends on
/// the vertex order.
///
/// A polygon with at most three vertices, or a `max_depth` of zero, is
/// returned unchanged.
///
/// ```
/// use vgkit::{split_polygon_to_non_intersecting, Point};
///
/// let bowtie = [
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
///     Point::new(0.0, 10.0),
/// ];
/// let parts = split_polygon_to_non_intersecting(&bowtie, 10);
/// assert_eq!(parts.len(), 2);
/// ```
pub fn split_polygon_to_non_intersecting(vertices: &[Point], max_depth: usize) -> Vec<Vec<Point>> {
    let n = vertices.len();
    if n <= 3 || max_depth == 0 {
        return vec![vertices.to_vec()];
    }
    let edge = |i: usize| Line::new(vertices[i], vertices[(i + 1) % n]);
    for a in 0..n {
        let edge_a = edge(a);
        for b in 0..n {
            if b == a || b == (a + 1) % n || a == (b + 1) % n {
                continue;
            }
            let edge_b = edge(b);
            let Some(crossing) = edge_a.intersection(&edge_b) else {
                continue;
            };
            if !(edge_a.has_point(crossing) && edge_b.has_point(crossing)) {
                continue;
            }
            let mut first: Vec<Point> = (a + 1..=b).map(|i| vertices[i % n]).collect();
            first.push(crossing);
            let mut second: Vec<Point> = (b + 1..=a + n).map(|i| vertices[i % n]).collect();
            second.push(crossing);
            log::debug!("splitting polygon at edges {a} and {b}");
            let mut result = split_polygon_to_non_intersecting(&first, max_depth - 1);
            result.extend(split_polygon_to_non_intersecting(&second, max_depth - 1));
            return result;
        }
    }
    vec![vertices.to_vec()]
}
