// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tile-core
//!
//! The fixed-size data block ("tile") moved and transformed as a unit by
//! the tile-streaming pipeline.
//!
//! This crate provides:
//! - [`Tile`] — an owned 32×32 block of `f32` values.
//! - [`TILE_DIM`] / [`TILE_ELEMS`] — the fixed tile geometry.
//! - Clean error types via `thiserror`.
//!
//! # Design Goals
//! - Tiles are immutable once produced; transforms yield new tiles.
//! - No per-element heap allocation: one contiguous buffer per tile.

mod error;
mod tile;

pub use error::TileError;
pub use tile::{Tile, TILE_DIM, TILE_ELEMS};
