// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The core tile type.

use crate::TileError;

/// Edge length of a tile: tiles are 32×32 blocks of `f32`.
pub const TILE_DIM: usize = 32;

/// Number of elements in one tile (`TILE_DIM`²).
pub const TILE_ELEMS: usize = TILE_DIM * TILE_DIM;

/// An owned, fixed-shape block of `f32` values.
///
/// `Tile` is the unit of transfer through the pipeline: producers create
/// tiles, channels move them by ownership, and kernels transform them via
/// [`map`](Tile::map) / [`zip_map`](Tile::zip_map) into fresh tiles. A tile
/// is never mutated after construction.
///
/// # Memory Layout
/// Row-major (C) order in one contiguous `Vec<f32>` of length
/// [`TILE_ELEMS`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    data: Vec<f32>,
}

impl Tile {
    /// Creates a tile filled with zeros.
    pub fn zeros() -> Self {
        Self::splat(0.0)
    }

    /// Creates a tile with every element set to `value`.
    ///
    /// # Examples
    /// ```
    /// use tile_core::{Tile, TILE_ELEMS};
    /// let t = Tile::splat(1.5);
    /// assert_eq!(t.as_slice().len(), TILE_ELEMS);
    /// assert_eq!(t.as_slice()[0], 1.5);
    /// ```
    pub fn splat(value: f32) -> Self {
        Self {
            data: vec![value; TILE_ELEMS],
        }
    }

    /// Creates a tile from a vector of values.
    ///
    /// Returns [`TileError::SizeMismatch`] unless `values` holds exactly
    /// [`TILE_ELEMS`] elements.
    pub fn from_values(values: Vec<f32>) -> Result<Self, TileError> {
        if values.len() != TILE_ELEMS {
            return Err(TileError::SizeMismatch {
                expected: TILE_ELEMS,
                actual: values.len(),
            });
        }
        Ok(Self { data: values })
    }

    /// Creates a tile by evaluating `f(flat_index)` for each element.
    pub fn from_fn<F: FnMut(usize) -> f32>(mut f: F) -> Self {
        Self {
            data: (0..TILE_ELEMS).map(&mut f).collect(),
        }
    }

    /// Returns the tile's values as a flat slice (row-major).
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, TileError> {
        if row >= TILE_DIM || col >= TILE_DIM {
            return Err(TileError::IndexOutOfBounds {
                row,
                col,
                dim: TILE_DIM,
            });
        }
        Ok(self.data[row * TILE_DIM + col])
    }

    /// Produces a new tile by applying `f` to every element.
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Tile {
        Tile {
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Produces a new tile by applying `f` to corresponding element pairs.
    ///
    /// Tiles have a fixed shape, so the pairing can never mismatch.
    pub fn zip_map<F: Fn(f32, f32) -> f32>(&self, other: &Tile, f: F) -> Tile {
        Tile {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splat_and_zeros() {
        let z = Tile::zeros();
        assert!(z.as_slice().iter().all(|&x| x == 0.0));

        let s = Tile::splat(3.25);
        assert!(s.as_slice().iter().all(|&x| x == 3.25));
    }

    #[test]
    fn test_from_values_exact() {
        let t = Tile::from_values(vec![2.0; TILE_ELEMS]).unwrap();
        assert_eq!(t.as_slice()[TILE_ELEMS - 1], 2.0);
    }

    #[test]
    fn test_from_values_wrong_size() {
        let result = Tile::from_values(vec![1.0; 100]);
        assert!(matches!(
            result,
            Err(TileError::SizeMismatch { expected, actual: 100 }) if expected == TILE_ELEMS
        ));
    }

    #[test]
    fn test_from_fn_indexing() {
        let t = Tile::from_fn(|i| i as f32);
        assert_eq!(t.get(0, 0).unwrap(), 0.0);
        assert_eq!(t.get(0, 31).unwrap(), 31.0);
        assert_eq!(t.get(1, 0).unwrap(), 32.0);
        assert_eq!(t.get(31, 31).unwrap(), (TILE_ELEMS - 1) as f32);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let t = Tile::zeros();
        assert!(matches!(
            t.get(32, 0),
            Err(TileError::IndexOutOfBounds { row: 32, .. })
        ));
        assert!(t.get(0, 32).is_err());
    }

    #[test]
    fn test_map() {
        let t = Tile::splat(2.0).map(|x| x * x + 1.0);
        assert!(t.as_slice().iter().all(|&x| x == 5.0));
    }

    #[test]
    fn test_zip_map() {
        let a = Tile::from_fn(|i| i as f32);
        let b = Tile::splat(1.0);
        let sum = a.zip_map(&b, |x, y| x + y);
        assert_eq!(sum.get(0, 0).unwrap(), 1.0);
        assert_eq!(sum.get(0, 5).unwrap(), 6.0);
    }
}
