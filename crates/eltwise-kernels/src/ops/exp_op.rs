// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Exponential kernel: range reduction + degree-2 polynomial + repeated
//! squaring.
//!
//! The algorithm computes `e^|x|` and takes the reciprocal for negative
//! inputs (`e^-x = 1/e^x`), which avoids polynomial error growth on the
//! negative branch:
//!
//! 1. If the unbiased binary exponent `e` of `|x|` is non-negative, force
//!    the magnitude into `[0.5, 1)` by resetting the biased exponent field
//!    to 126, giving `r = |x| / 2^(e+1)`.
//! 2. Approximate `e^r` with the quadratic `1 + r·(C0 + C1·r)`.
//! 3. Undo the reduction by squaring `e + 1` times (one unconditional
//!    square plus up to [`MAX_SQUARINGS`] more, covering the f32 range).
//!
//! # Accuracy
//! The polynomial's relative error peaks at about -1.25% near `r ≈ 0.22`,
//! and each squaring doubles the relative error, so precision degrades
//! with magnitude. The negative branch is slightly worse than the positive
//! one: the reciprocal flips the sign of the error, growing it by the same
//! factor (`1/(1-e) - 1 > e`). Bounds on the relative error, both
//! branches: ≤ 1.3% for `|x| ≤ 1`, ≤ 6% for `|x| ≤ 8`, and ≤ 17% across
//! `[-20, 20]` (the worst point sits just past `|x| = 16`, where the
//! reduction switches to five squarings). `exp(0) == 1` exactly; NaN and
//! Inf propagate per IEEE semantics.

use crate::KernelError;
use register_file::ScratchRegisterFile;

/// Linear polynomial coefficient.
const EXP_POLY_C0: f32 = 0.863281;

/// Quadratic polynomial coefficient.
const EXP_POLY_C1: f32 = 0.8373;

/// Conditional squaring iterations after the first unconditional square;
/// 7 covers the dynamic range of a 32-bit float.
const MAX_SQUARINGS: i32 = 7;

/// Fast-reciprocal seed constant (`2 × 0x3F7A3BEA`-family magic).
const RECIP_MAGIC: u32 = 0x7EF3_11C3;

/// Applies the exponential to the tile in `slot`, in place.
///
/// Must be called inside an `Acquired` register-file window.
pub fn exponential(regs: &ScratchRegisterFile, slot: usize) -> Result<(), KernelError> {
    let tile = regs.load(slot)?;
    regs.store(slot, tile.map(exp_scalar))?;
    Ok(())
}

/// Computes the approximate exponential of a single `f32`.
pub fn exp_scalar(x: f32) -> f32 {
    if x.is_nan() {
        return x;
    }
    if x.is_infinite() {
        return if x > 0.0 { f32::INFINITY } else { 0.0 };
    }

    let mag = x.abs();
    let bits = mag.to_bits();
    let exponent = ((bits >> 23) & 0xFF) as i32 - 127;

    // Range reduction: biased exponent 126 puts the value in [0.5, 1).
    let reduced = if exponent >= 0 {
        f32::from_bits((bits & 0x807F_FFFF) | (126 << 23))
    } else {
        mag
    };

    // Degree-2 polynomial via Horner's method.
    let tmp = reduced * EXP_POLY_C1 + EXP_POLY_C0;
    let mut val = reduced * tmp + 1.0;

    // Reconstruction: e^|x| = (e^r)^(2^(exponent+1)).
    if exponent >= 0 {
        val *= val;
        let mut remaining = exponent;
        for _ in 0..MAX_SQUARINGS {
            remaining -= 1;
            if remaining >= 0 {
                val *= val;
            }
        }
    }

    if x < 0.0 {
        reciprocal_scalar(val)
    } else {
        val
    }
}

/// Computes `1/v` via a bit-trick seed refined by three Newton–Raphson
/// steps on `|v|`, accurate to the 2⁻²³ scale of f32 for finite inputs.
///
/// The sign is reapplied at the end, so IEEE conventions hold throughout:
/// `1/±0 = ±Inf`, `1/±Inf = ±0`, NaN propagates.
pub fn reciprocal_scalar(v: f32) -> f32 {
    if v.is_nan() {
        return v;
    }
    let mag = v.abs();
    if mag == 0.0 {
        return f32::INFINITY.copysign(v);
    }
    if mag.is_infinite() {
        return 0.0f32.copysign(v);
    }
    let bits = mag.to_bits();
    if bits >= RECIP_MAGIC {
        // |v| ≳ 1.6e38: the seed subtraction would wrap; 1/v underflows.
        return 0.0f32.copysign(v);
    }

    let mut y = f32::from_bits(RECIP_MAGIC - bits);
    // Newton–Raphson: y ← y·(2 − |v|·y), quadratic convergence.
    y = y * (2.0 - mag * y);
    y = y * (2.0 - mag * y);
    y = y * (2.0 - mag * y);
    y.copysign(v)
}
