// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised on caller misuse.
//!
//! Degenerate geometry never produces an error; it fails soft with `None`
//! or an empty result. The variants here indicate malformed input handed
//! to a constructor or decoder.

/// Result type for fallible `vgkit` operations.
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `vgkit`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input was not valid JSON for the requested encoding.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A curve record in an array encoding could not be used.
    #[error("malformed curve at index {index}: {reason}")]
    MalformedCurve {
        /// Position of the record in the input array.
        index: usize,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A reduced list needs at least one curve (8 numbers).
    #[error("reduced list needs at least 8 numbers, got {len}")]
    ReducedListTooShort {
        /// Number of values supplied.
        len: usize,
    },

    /// A reduced list must hold 6 numbers per curve plus an end point.
    #[error("reduced list length {len} is not of the form 6n + 2")]
    ReducedListMisaligned {
        /// Number of values supplied.
        len: usize,
    },

    /// SVG path data could not be parsed.
    #[error("invalid SVG path data at byte {offset}: {reason}")]
    SvgParse {
        /// Byte offset into the input where parsing stopped.
        offset: usize,
        /// What was expected.
        reason: &'static str,
    },

    /// Resampling needs a positive number of points.
    #[error("point count must be positive")]
    InvalidPointCount,

    /// A curve index did not address a curve of the path.
    #[error("curve index {index} out of range for a path with {count} curves")]
    CurveIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of curves in the path.
        count: usize,
    },

    /// The input described no curve.
    #[error("path has no curves")]
    EmptyPath,
}
