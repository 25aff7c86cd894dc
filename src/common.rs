// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use core::f64::consts::TAU;

use arrayvec::ArrayVec;

/// Find real roots of quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0.
///
/// If the equation is nearly linear, the root of the linear part is
/// returned. In the degenerate case where all coefficients are zero a
/// single `0.0` is returned.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 * c2.recip();
    let sc1 = c1 * c2.recip();
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            result.push(0.0);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    let root1 = if !arg.is_finite() {
        // sc1 * sc1 overflowed; take one root from sc1 x + x² = 0.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        // See https://math.stackexchange.com/questions/866331
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}

/// Map an angle in radians into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Round `value` to `digits` decimal places.
///
/// If `digits` is too large for the scaled value to be representable,
/// `value` is returned unchanged.
#[inline]
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

#[cfg(test)]
mod tests {
    use crate::common::*;
    use core::f64::consts::PI;

    fn verify<const N: usize>(mut roots: ArrayVec<f64, N>, expected: &[f64]) {
        assert_eq!(expected.len(), roots.len(), "root count");
        let epsilon = 1e-12;
        roots.sort_by(f64::total_cmp);
        for i in 0..expected.len() {
            assert!((roots[i] - expected[i]).abs() < epsilon, "{roots:?}");
        }
    }

    #[test]
    fn test_solve_quadratic() {
        verify(
            solve_quadratic(-5.0, 0.0, 1.0),
            &[-(5.0f64.sqrt()), 5.0f64.sqrt()],
        );
        verify(solve_quadratic(5.0, 0.0, 1.0), &[]);
        verify(solve_quadratic(5.0, 1.0, 0.0), &[-5.0]);
        verify(solve_quadratic(1.0, 2.0, 1.0), &[-1.0]);
    }

    #[test]
    fn angles_wrap_into_domain() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert!(normalize_angle(2.0 * PI) < 1e-12);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to_digits(1.23456, 2), 1.23);
        assert_eq!(round_to_digits(-1.235001, 2), -1.24);
        assert_eq!(round_to_digits(7.5, 0), 8.0);
    }

    #[test]
    fn rounding_with_huge_digit_counts() {
        assert_eq!(round_to_digits(1.5, 400), 1.5);
        assert_eq!(round_to_digits(-2.25, u32::MAX), -2.25);
        assert_eq!(round_to_digits(0.0, 400), 0.0);
        assert!(round_to_digits(1.5, 300).is_finite());
    }
}
