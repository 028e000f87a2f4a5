// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hyperbolic sine kernel: `sinh(x) = (e^x - e^-x) / 2`.
//!
//! A pure composition of the exponential kernel and two binary register
//! primitives — the general pattern for building higher-order transforms:
//!
//! 1. Both slots hold `x` on entry (the driver copies the input in twice).
//! 2. Negate the scratch slot: `x, -x`.
//! 3. Exponentiate both: `e^x, e^-x`.
//! 4. Subtract and halve: `(e^x - e^-x) · 0.5`.
//!
//! Accuracy follows the exponential kernel, with one caveat: near zero the
//! subtraction cancels, so absolute error is bounded by the exponential's
//! absolute error (~1% of `e^|x|`) rather than a fixed relative bound.

use crate::ops::{exponential, negate, scale, subtract};
use crate::KernelError;
use register_file::ScratchRegisterFile;

/// Computes `sinh` of the tile held in both `x_slot` and `scratch_slot`,
/// leaving the result in `x_slot`.
///
/// Both slots must contain the same input tile; `scratch_slot` is
/// clobbered. Must be called inside an `Acquired` register-file window.
pub fn hyperbolic_sine(
    regs: &ScratchRegisterFile,
    x_slot: usize,
    scratch_slot: usize,
) -> Result<(), KernelError> {
    negate(regs, scratch_slot)?;
    exponential(regs, x_slot)?;
    exponential(regs, scratch_slot)?;
    subtract(regs, x_slot, scratch_slot)?;
    scale(regs, x_slot, 0.5)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exp_scalar;
    use tile_core::Tile;

    /// Runs the sinh kernel on a single-value tile.
    fn sinh_kernel(x: f32) -> f32 {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        regs.store(0, Tile::splat(x)).unwrap();
        regs.store(1, Tile::splat(x)).unwrap();
        hyperbolic_sine(&regs, 0, 1).unwrap();
        regs.load(0).unwrap().as_slice()[0]
    }

    #[test]
    fn test_sinh_matches_composition_by_construction() {
        for &x in &[0.5f32, 1.0, -2.0, 3.7] {
            let expected = (exp_scalar(x) - exp_scalar(-x)) * 0.5;
            assert_eq!(sinh_kernel(x), expected);
        }
    }

    #[test]
    fn test_sinh_against_reference() {
        // Cancellation makes the relative error widen near zero; these
        // points stay within the exponential kernel's fidelity.
        for &x in &[0.5f32, 1.0, 2.0, 5.0] {
            let got = sinh_kernel(x);
            let want = x.sinh();
            let rel = ((got - want) / want).abs();
            assert!(rel < 0.05, "sinh({x}) = {got}, want {want}, rel {rel}");
        }
    }

    #[test]
    fn test_sinh_near_zero() {
        assert!(sinh_kernel(0.0).abs() < 1e-6);
    }

    #[test]
    fn test_sinh_odd_symmetry() {
        for &x in &[0.5f32, 1.5, 4.0] {
            let pos = sinh_kernel(x);
            let neg = sinh_kernel(-x);
            assert!(
                (pos + neg).abs() <= pos.abs() * 1e-5,
                "sinh not odd at {x}: {pos} vs {neg}"
            );
        }
    }
}
