// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hyperbolic tangent kernel: 3-entry piecewise-linear lookup table.
//!
//! `tanh` is odd and saturates quickly, so the table works on `|x|` with
//! the sign restored afterwards. Three `(slope, intercept)` entries cover
//! `[0, 1)`, `[1, 2)` and `[2, ∞)`, the last being a flat saturation
//! segment. The entry values are tuning artifacts chosen to interpolate
//! `tanh` at the breakpoints.
//!
//! # Accuracy
//! Output is always in `[-1, 1]`, `tanh(0) == 0` exactly, and the maximum
//! absolute error is ≤ 0.085 (worst near `|x| ≈ 0.55`).

use crate::KernelError;
use register_file::ScratchRegisterFile;

/// Segment breakpoints on `|x|`.
const TANH_BREAKPOINTS: [f32; 2] = [1.0, 2.0];

/// `(slope, intercept)` per segment; the last entry is the saturation
/// segment. Interpolates tanh at 0, 1 and 2: tanh(1) ≈ 0.761594,
/// tanh(2) ≈ 0.964028.
const TANH_LUT: [(f32, f32); 3] = [
    (0.761_594_2, 0.0),
    (0.202_433_4, 0.559_160_7),
    (0.0, 1.0),
];

/// Saturation level: the output magnitude never exceeds this.
const TANH_SATURATION: f32 = 1.0;

/// Applies the hyperbolic tangent to the tile in `slot`, in place.
///
/// Must be called inside an `Acquired` register-file window.
pub fn hyperbolic_tangent(regs: &ScratchRegisterFile, slot: usize) -> Result<(), KernelError> {
    let tile = regs.load(slot)?;
    regs.store(slot, tile.map(tanh_scalar))?;
    Ok(())
}

/// Computes the piecewise-linear tanh approximation of a single `f32`.
pub fn tanh_scalar(x: f32) -> f32 {
    if x.is_nan() {
        return x;
    }
    let t = x.abs();
    let (slope, intercept) = if t < TANH_BREAKPOINTS[0] {
        TANH_LUT[0]
    } else if t < TANH_BREAKPOINTS[1] {
        TANH_LUT[1]
    } else {
        TANH_LUT[2]
    };
    let y = (slope * t + intercept).min(TANH_SATURATION);
    y.copysign(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_core::Tile;

    #[test]
    fn test_tanh_zero_is_exactly_zero() {
        assert_eq!(tanh_scalar(0.0), 0.0);
        assert_eq!(tanh_scalar(-0.0), 0.0);
    }

    #[test]
    fn test_tanh_bounded_for_all_finite_inputs() {
        for i in -4000..=4000 {
            let x = i as f32 / 10.0;
            let y = tanh_scalar(x);
            assert!((-1.0..=1.0).contains(&y), "tanh({x}) = {y} out of bounds");
        }
        assert_eq!(tanh_scalar(f32::MAX), 1.0);
        assert_eq!(tanh_scalar(f32::MIN), -1.0);
    }

    #[test]
    fn test_tanh_infinities_saturate() {
        assert_eq!(tanh_scalar(f32::INFINITY), 1.0);
        assert_eq!(tanh_scalar(f32::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_tanh_nan_propagates() {
        assert!(tanh_scalar(f32::NAN).is_nan());
    }

    #[test]
    fn test_tanh_approximation_error() {
        // Documented bound: max absolute error ≤ 0.085.
        for i in -600..=600 {
            let x = i as f32 / 100.0;
            let err = (tanh_scalar(x) - x.tanh()).abs();
            assert!(err <= 0.085, "tanh({x}) abs err {err}");
        }
    }

    #[test]
    fn test_tanh_odd_symmetry() {
        for &x in &[0.25f32, 0.9, 1.5, 3.0, 10.0] {
            assert_eq!(tanh_scalar(-x), -tanh_scalar(x));
        }
    }

    #[test]
    fn test_tanh_tile_in_register_file() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        regs.store(0, Tile::splat(2.5)).unwrap();
        hyperbolic_tangent(&regs, 0).unwrap();
        assert_eq!(regs.load(0).unwrap().as_slice()[0], 1.0);
    }
}
