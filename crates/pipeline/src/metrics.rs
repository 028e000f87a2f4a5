// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Run metrics collected by the driver.

use serde::Serialize;
use std::time::Duration;

/// Timing for one streamed block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockMetrics {
    pub index: usize,
    pub tiles: usize,
    pub elapsed: Duration,
}

/// Aggregate results of one pipeline run.
///
/// Per-block entries are recorded only when profiling is enabled; the
/// totals are always populated.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetrics {
    pub kernel: String,
    pub total_tiles: usize,
    pub total_elapsed: Duration,
    pub blocks: Vec<BlockMetrics>,
}

impl PipelineMetrics {
    pub(crate) fn new(kernel: &str) -> Self {
        Self {
            kernel: kernel.to_string(),
            total_tiles: 0,
            total_elapsed: Duration::ZERO,
            blocks: Vec::new(),
        }
    }

    pub(crate) fn record_block(&mut self, index: usize, tiles: usize, elapsed: Duration) {
        self.total_tiles += tiles;
        self.blocks.push(BlockMetrics {
            index,
            tiles,
            elapsed,
        });
    }

    pub(crate) fn record_tiles(&mut self, tiles: usize) {
        self.total_tiles += tiles;
    }

    pub(crate) fn finalise(&mut self, elapsed: Duration) {
        self.total_elapsed = elapsed;
    }

    /// Sustained throughput over the whole run.
    pub fn tiles_per_second(&self) -> f64 {
        let secs = self.total_elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total_tiles as f64 / secs
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} tiles in {:.2?} ({:.0} tiles/s)",
            self.kernel,
            self.total_tiles,
            self.total_elapsed,
            self.tiles_per_second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput() {
        let mut m = PipelineMetrics::new("exponential");
        m.record_block(0, 4, Duration::from_millis(5));
        m.record_block(1, 4, Duration::from_millis(5));
        m.finalise(Duration::from_secs(2));
        assert_eq!(m.total_tiles, 8);
        assert_eq!(m.tiles_per_second(), 4.0);
        assert!(m.summary().contains("8 tiles"));
    }

    #[test]
    fn test_zero_elapsed_is_not_a_division() {
        let m = PipelineMetrics::new("select");
        assert_eq!(m.tiles_per_second(), 0.0);
    }
}
