// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tile-pipeline run` command: stream synthetic tiles through a kernel.
//!
//! The driver runs on the main thread; one producer thread per input
//! channel feeds synthetic tiles and a consumer thread drains the output,
//! so every channel exercises real cross-thread backpressure.

use anyhow::Context;
use pipeline::{BlockPipelineDriver, ChannelId, ComputeRole, KernelOp, PipelineConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tile_channel::{BoundedChannel, CancelToken};
use tile_core::{Tile, TILE_DIM};

pub fn execute(
    config_path: Option<PathBuf>,
    kernel: String,
    blocks: usize,
    block_size: usize,
    pattern: String,
    movement_only: bool,
    profile: bool,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          tile-pipeline · Kernel Runner               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Configuration ──────────────────────────────────────────
    let config = match config_path {
        Some(path) => PipelineConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PipelineConfig {
            kernel,
            block_count: blocks,
            block_size,
            channel_capacity: None,
            role: if movement_only {
                ComputeRole::MovementOnly
            } else {
                ComputeRole::Full
            },
            enable_profiling: profile,
        },
    };
    let op = config.kernel_op()?;
    let pattern = Pattern::parse(&pattern)?;
    let total_tiles = config.block_count * config.block_size;

    println!("  Config:");
    println!("   Kernel:     {op}");
    println!("   Blocks:     {} × {} tiles", config.block_count, config.block_size);
    println!("   Tile shape: {TILE_DIM}×{TILE_DIM} f32");
    println!("   Capacity:   {} tiles per channel", config.effective_capacity());
    println!("   Role:       {:?}", config.role);
    println!("   Pattern:    {pattern:?}");
    println!();

    // ── Pipeline ───────────────────────────────────────────────
    let driver = BlockPipelineDriver::new(&config)?;
    let channels = driver.channels();

    let mut producers = Vec::new();
    match op {
        KernelOp::Select => {
            // Condition follows the pattern; branch values are fixed so
            // the selection is visible in the output.
            producers.push(feed(
                Arc::clone(channels.get(ChannelId::Condition)?),
                pattern,
                total_tiles,
            ));
            producers.push(feed(
                Arc::clone(channels.get(ChannelId::TrueValues)?),
                Pattern::Constant(1.0),
                total_tiles,
            ));
            producers.push(feed(
                Arc::clone(channels.get(ChannelId::FalseValues)?),
                Pattern::Constant(-1.0),
                total_tiles,
            ));
        }
        _ => {
            producers.push(feed(
                Arc::clone(channels.get(ChannelId::Input)?),
                pattern,
                total_tiles,
            ));
        }
    }
    let consumer = drain(Arc::clone(channels.get(ChannelId::Output)?), total_tiles);

    println!("  Streaming {total_tiles} tiles...");
    let metrics = driver.run()?;

    for producer in producers {
        producer
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    }
    let outputs = consumer
        .join()
        .map_err(|_| anyhow::anyhow!("consumer thread panicked"))?;
    println!();

    // ── Results ────────────────────────────────────────────────
    println!("  Results:");
    for (i, tile) in outputs.iter().take(8).enumerate() {
        println!("   tile {i}: [0][0] = {:+.6}", tile.as_slice()[0]);
    }
    if outputs.len() > 8 {
        println!("   ... {} more", outputs.len() - 8);
    }
    println!();
    println!("  Metrics:");
    println!("   {}", metrics.summary());
    if config.enable_profiling {
        for block in &metrics.blocks {
            println!(
                "   block {:>3}: {} tiles in {:.2?}",
                block.index, block.tiles, block.elapsed
            );
        }
    }

    Ok(())
}

/// Synthetic tile stream shapes.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Values sweep linearly across each tile, offset per tile index.
    Ramp,
    /// Whole tiles alternate between +1 and -1.
    Alternating,
    /// Every element is the given value.
    Constant(f32),
}

impl Pattern {
    fn parse(s: &str) -> anyhow::Result<Self> {
        if let Some(value) = s.strip_prefix("constant:") {
            let value: f32 = value
                .parse()
                .with_context(|| format!("invalid constant pattern value '{value}'"))?;
            return Ok(Pattern::Constant(value));
        }
        match s {
            "ramp" => Ok(Pattern::Ramp),
            "alternating" => Ok(Pattern::Alternating),
            other => anyhow::bail!(
                "unknown pattern '{other}' (expected ramp, alternating or constant:<value>)"
            ),
        }
    }

    fn tile(&self, index: usize) -> Tile {
        match *self {
            Pattern::Ramp => {
                let offset = index as f32 * 0.125;
                Tile::from_fn(move |i| (i as f32 / 256.0) - 2.0 + offset)
            }
            Pattern::Alternating => Tile::splat(if index % 2 == 0 { 1.0 } else { -1.0 }),
            Pattern::Constant(value) => Tile::splat(value),
        }
    }
}

fn feed(channel: Arc<BoundedChannel>, pattern: Pattern, count: usize) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let token = CancelToken::new();
        for index in 0..count {
            if channel.reserve_space(1, &token).is_err() {
                return;
            }
            if channel.commit_push(vec![pattern.tile(index)]).is_err() {
                return;
            }
        }
    })
}

fn drain(channel: Arc<BoundedChannel>, count: usize) -> thread::JoinHandle<Vec<Tile>> {
    thread::spawn(move || {
        let token = CancelToken::new();
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            if channel.wait_until_available(1, &token).is_err() {
                break;
            }
            match channel.commit_pop(1) {
                Ok(tiles) => out.extend(tiles),
                Err(_) => break,
            }
        }
        out
    })
}
