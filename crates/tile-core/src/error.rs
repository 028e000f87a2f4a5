// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tile construction.

/// Errors that can occur when building a tile.
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    /// The provided buffer does not hold exactly one tile's worth of values.
    #[error("size mismatch: expected {expected} values, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A row/column pair is outside the 32×32 tile geometry.
    #[error("index out of bounds: ({row}, {col}) in a {dim}×{dim} tile")]
    IndexOutOfBounds { row: usize, col: usize, dim: usize },
}
