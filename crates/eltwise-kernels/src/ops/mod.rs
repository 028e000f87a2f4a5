// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Kernel operations over register-file slots.
//!
//! Each transform lives in its own module; `binop` holds the two-slot
//! primitives the composite kernels are built from.

mod binop;
mod exp_op;
mod select_op;
mod sinh_op;
mod tanh_op;

pub use binop::{add, masked_multiply, negate, scale, subtract};
pub use exp_op::{exp_scalar, exponential, reciprocal_scalar};
pub use select_op::{greater_than_zero, less_equal_zero, select};
pub use sinh_op::hyperbolic_sine;
pub use tanh_op::{hyperbolic_tangent, tanh_scalar};
