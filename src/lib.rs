// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry for interactive 2D vector graphics.
//!
//! The vgkit library contains editable paths of cubic Bézier curves with
//! arc-length parameterization, circle and sector primitives, the outline
//! of a union of circles, metaball construction and splitting of
//! self-intersecting polygons. It holds no rendering or UI code; results
//! are plain points, curves and sectors.
//!
//! # Examples
//!
//! Addressing a path by distance:
//! ```
//! use vgkit::{BezPath, CubicBez, CurvePointRole, Point, Vec2};
//!
//! let mut path = BezPath::from_curves([
//!     CubicBez::new((0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)),
//!     CubicBez::new((30.0, 0.0), (40.0, 0.0), (50.0, 0.0), (60.0, 0.0)),
//! ]);
//! assert!((path.length() - 60.0).abs() < 1e-9);
//! assert!(path.point_at(0.5).distance(Point::new(30.0, 0.0)) < 1e-9);
//!
//! // The joint is shared: moving it moves both curves.
//! path.move_curve_point(0, CurvePointRole::EndPoint, Vec2::new(0.0, 5.0))?;
//! assert_eq!(path.curve(1).unwrap().p0, Point::new(30.0, 5.0));
//! # Ok::<(), vgkit::Error>(())
//! ```
//!
//! The outline of overlapping circles:
//! ```
//! use vgkit::{outer_partitions, Circle};
//!
//! let circles = [Circle::new((0.0, 0.0), 10.0), Circle::new((15.0, 0.0), 10.0)];
//! let outline = &outer_partitions(&circles)[0];
//! for pair in outline.windows(2) {
//!     assert!(pair[0].end_point().is_near(pair[1].start_point(), 1e-3));
//! }
//! ```
//!
//! # Features
//!
//! The `mint` feature adds conversions to and from [`mint`] types. The
//! `schemars` feature derives `JsonSchema` for the value types.
//!
//! [`mint`]: https://docs.rs/mint

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod bezpath;
mod circle;
mod circle_intersections;
pub mod common;
mod cubicbez;
mod error;
mod interval_set;
mod json;
mod line;
mod metaballs;
mod param_curve;
mod point;
mod polygon;
mod rect;
mod sector;
mod svg;
mod vec2;

pub use crate::bezpath::*;
pub use crate::circle::*;
pub use crate::circle_intersections::*;
pub use crate::cubicbez::*;
pub use crate::error::{Error, Result};
pub use crate::interval_set::*;
pub use crate::json::*;
pub use crate::line::*;
pub use crate::metaballs::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::polygon::*;
pub use crate::rect::*;
pub use crate::sector::*;
pub use crate::svg::*;
pub use crate::vec2::*;

/// Number of chords in a curve's arc-length table.
pub const ARC_LENGTH_SEGMENTS: usize = 30;

/// Handles not longer than this have no usable direction and are not
/// mirrored onto neighbouring curves.
pub const HANDLE_EPSILON: f64 = 0.1;

/// Maximum distance between an interval's end point and the next
/// interval's start point when tracing circle outlines.
pub const PARTITION_EPSILON: f64 = 0.001;

/// Recursion depth used by [`split_polygon`].
pub const DEFAULT_MAX_SPLIT_DEPTH: usize = 10;
