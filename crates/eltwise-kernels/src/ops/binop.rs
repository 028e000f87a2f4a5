// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binary and unary register primitives.
//!
//! These are the building blocks of the composite kernels: two-slot
//! arithmetic (`add`, `subtract`, `masked_multiply`) and single-slot
//! transforms (`scale`, `negate`). Higher-order kernels such as
//! hyperbolic sine are pure compositions of these plus the unary math
//! kernels.

use crate::KernelError;
use register_file::ScratchRegisterFile;

/// `dst = dst + src`, elementwise.
pub fn add(regs: &ScratchRegisterFile, dst: usize, src: usize) -> Result<(), KernelError> {
    let a = regs.load(dst)?;
    let b = regs.load(src)?;
    regs.store(dst, a.zip_map(&b, |x, y| x + y))?;
    Ok(())
}

/// `dst = dst - src`, elementwise.
pub fn subtract(regs: &ScratchRegisterFile, dst: usize, src: usize) -> Result<(), KernelError> {
    let a = regs.load(dst)?;
    let b = regs.load(src)?;
    regs.store(dst, a.zip_map(&b, |x, y| x - y))?;
    Ok(())
}

/// `slot = slot * factor`, elementwise.
pub fn scale(regs: &ScratchRegisterFile, slot: usize, factor: f32) -> Result<(), KernelError> {
    let t = regs.load(slot)?;
    regs.store(slot, t.map(|x| x * factor))?;
    Ok(())
}

/// `slot = -slot`, elementwise.
pub fn negate(regs: &ScratchRegisterFile, slot: usize) -> Result<(), KernelError> {
    let t = regs.load(slot)?;
    regs.store(slot, t.map(|x| -x))?;
    Ok(())
}

/// `dst = dst * src` where `dst` holds a 0.0/1.0 mask.
///
/// A mask entry of exactly `0.0` contributes a hard `0.0` without touching
/// the value, so an `Inf` or `NaN` in a masked-out branch cannot poison
/// the blend (`0 × Inf` would be `NaN` under a plain multiply). For finite
/// values the result is bit-identical to the plain multiply since masks
/// are exactly 0.0 or 1.0.
pub fn masked_multiply(
    regs: &ScratchRegisterFile,
    dst: usize,
    src: usize,
) -> Result<(), KernelError> {
    let mask = regs.load(dst)?;
    let values = regs.load(src)?;
    regs.store(
        dst,
        mask.zip_map(&values, |m, v| if m == 0.0 { 0.0 } else { m * v }),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_core::Tile;

    /// Runs `f` inside an acquired window on a fresh 4-slot bank.
    fn with_bank<F: FnOnce(&ScratchRegisterFile)>(f: F) {
        let regs = ScratchRegisterFile::new(4).unwrap();
        regs.acquire().unwrap();
        f(&regs);
    }

    #[test]
    fn test_add_subtract() {
        with_bank(|regs| {
            regs.store(0, Tile::splat(5.0)).unwrap();
            regs.store(1, Tile::splat(2.0)).unwrap();
            add(regs, 0, 1).unwrap();
            assert_eq!(regs.load(0).unwrap().as_slice()[0], 7.0);
            subtract(regs, 0, 1).unwrap();
            assert_eq!(regs.load(0).unwrap().as_slice()[0], 5.0);
        });
    }

    #[test]
    fn test_scale_and_negate() {
        with_bank(|regs| {
            regs.store(0, Tile::splat(3.0)).unwrap();
            scale(regs, 0, 0.5).unwrap();
            assert_eq!(regs.load(0).unwrap().as_slice()[0], 1.5);
            negate(regs, 0).unwrap();
            assert_eq!(regs.load(0).unwrap().as_slice()[0], -1.5);
        });
    }

    #[test]
    fn test_masked_multiply_zero_mask_blocks_inf() {
        with_bank(|regs| {
            regs.store(0, Tile::splat(0.0)).unwrap(); // mask
            regs.store(1, Tile::splat(f32::INFINITY)).unwrap();
            masked_multiply(regs, 0, 1).unwrap();
            // 0 × Inf must be a hard zero, not NaN.
            assert_eq!(regs.load(0).unwrap().as_slice()[0], 0.0);
        });
    }

    #[test]
    fn test_masked_multiply_unit_mask_passes_value() {
        with_bank(|regs| {
            regs.store(0, Tile::splat(1.0)).unwrap();
            regs.store(1, Tile::splat(-2.5)).unwrap();
            masked_multiply(regs, 0, 1).unwrap();
            assert_eq!(regs.load(0).unwrap().as_slice()[0], -2.5);
        });
    }

    #[test]
    fn test_binop_outside_acquired_window() {
        let regs = ScratchRegisterFile::new(4).unwrap();
        // Bank is Idle: every primitive must fail fast.
        assert!(add(&regs, 0, 1).is_err());
        assert!(scale(&regs, 0, 2.0).is_err());
    }
}
