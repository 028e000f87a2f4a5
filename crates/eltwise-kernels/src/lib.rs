// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # eltwise-kernels
//!
//! The elementwise transform family of the tile pipeline: conditional
//! select, exponential, hyperbolic tangent, and hyperbolic sine, plus the
//! binary register primitives they compose from.
//!
//! All kernels operate purely on values resident in a
//! [`ScratchRegisterFile`](register_file::ScratchRegisterFile): they read
//! slots populated via `copy_in`, write results back to a slot, and are
//! valid only inside an `Acquired` window (the slot operations enforce
//! this). One call processes a whole tile; there is no fixed lane-width
//! unroll.
//!
//! NaN and Inf inputs are not errors; they propagate per IEEE-754
//! semantics. The mask-based select is constructed so that an Inf in an
//! unused branch never poisons the blended result.

mod error;
mod ops;

pub use error::KernelError;
pub use ops::{
    add, exp_scalar, exponential, greater_than_zero, hyperbolic_sine, hyperbolic_tangent,
    less_equal_zero, masked_multiply, negate, reciprocal_scalar, scale, select, subtract,
    tanh_scalar,
};
