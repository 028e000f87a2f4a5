// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Conditional select kernel: complementary-mask blending.
//!
//! `select(c, t, f)` yields `t` where `c > 0` and `f` where `c <= 0`,
//! without branching on data: the condition is turned into two
//! complementary 0.0/1.0 masks and the result is
//! `t·mask_true + f·mask_false`.
//!
//! The false-branch predicate is `<= 0`, so a condition of exactly zero
//! routes to the false branch. That is the operation's contract, inherited
//! unchanged from the source algorithm.
//!
//! For every non-NaN condition, `mask_true + mask_false == 1` exactly.
//! A NaN condition fails both predicates, yielding 0 in both masks and a
//! zero output element.

use crate::ops::{add, masked_multiply};
use crate::KernelError;
use register_file::ScratchRegisterFile;

/// Replaces the tile in `slot` with its greater-than-zero mask:
/// 1.0 where the value is positive, 0.0 elsewhere (including NaN).
pub fn greater_than_zero(regs: &ScratchRegisterFile, slot: usize) -> Result<(), KernelError> {
    let tile = regs.load(slot)?;
    regs.store(slot, tile.map(gtz_scalar))?;
    Ok(())
}

/// Replaces the tile in `slot` with its less-or-equal-zero mask:
/// 1.0 where the value is zero or negative, 0.0 elsewhere (including NaN).
pub fn less_equal_zero(regs: &ScratchRegisterFile, slot: usize) -> Result<(), KernelError> {
    let tile = regs.load(slot)?;
    regs.store(slot, tile.map(lez_scalar))?;
    Ok(())
}

/// Composed conditional select over four register slots.
///
/// Reads the condition from `cond_slot` and the candidate values from
/// `true_slot` / `false_slot`; writes the blended result to `dst_slot`.
/// `cond_slot` is clobbered (it is reused for the false mask). Must be
/// called inside an `Acquired` window.
pub fn select(
    regs: &ScratchRegisterFile,
    cond_slot: usize,
    true_slot: usize,
    false_slot: usize,
    dst_slot: usize,
) -> Result<(), KernelError> {
    let cond = regs.load(cond_slot)?;

    // mask_true · on_true into the destination.
    regs.store(dst_slot, cond.map(gtz_scalar))?;
    masked_multiply(regs, dst_slot, true_slot)?;

    // mask_false · on_false, reusing the condition slot, then accumulate.
    regs.store(cond_slot, cond.map(lez_scalar))?;
    masked_multiply(regs, cond_slot, false_slot)?;
    add(regs, dst_slot, cond_slot)?;
    Ok(())
}

#[inline(always)]
fn gtz_scalar(c: f32) -> f32 {
    if c > 0.0 {
        1.0
    } else {
        0.0
    }
}

#[inline(always)]
fn lez_scalar(c: f32) -> f32 {
    if c <= 0.0 {
        1.0
    } else {
        0.0
    }
}
