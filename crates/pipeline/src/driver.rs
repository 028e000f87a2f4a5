// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The block-synchronous pipeline driver.
//!
//! One driver owns one register file and a set of shared channels. Each
//! call to [`run`](BlockPipelineDriver::run) streams
//! `block_count × block_size` tiles from the input side to the output
//! side, applying the configured kernel once per tile. Output space is
//! reserved a whole block at a time, input tiles are consumed one at a
//! time, and every consumed tile is popped only after its result has been
//! extracted, so a crash mid-tile never loses input data.

use crate::{
    ChannelId, ComputeRole, KernelOp, PipelineChannels, PipelineConfig, PipelineError,
    PipelineMetrics,
};
use eltwise_kernels::{
    add, exponential, greater_than_zero, hyperbolic_sine, hyperbolic_tangent, less_equal_zero,
    masked_multiply,
};
use register_file::ScratchRegisterFile;
use std::time::Instant;
use tile_channel::{BoundedChannel, CancelToken};
use tile_core::Tile;

/// Drives tiles through one elementwise kernel, block by block.
///
/// The driver is single-threaded; concurrency comes from the producer and
/// consumer threads on the other ends of its channels. Cancelling the
/// driver's token unblocks any wait it is parked on and aborts the run
/// with a cancellation error.
pub struct BlockPipelineDriver {
    op: KernelOp,
    role: ComputeRole,
    block_count: usize,
    block_size: usize,
    enable_profiling: bool,
    channels: PipelineChannels,
    regs: ScratchRegisterFile,
    token: CancelToken,
}

impl BlockPipelineDriver {
    /// Builds a driver from a validated configuration, constructing the
    /// kernel's standard channel set.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let op = config.kernel_op()?;
        let channels = PipelineChannels::for_kernel(op, config.effective_capacity())?;
        Self::with_channels(config, channels)
    }

    /// Builds a driver against an externally wired channel set. All roles
    /// in [`KernelOp::required_channels`] must be bound.
    pub fn with_channels(
        config: &PipelineConfig,
        channels: PipelineChannels,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        let op = config.kernel_op()?;
        for id in op.required_channels() {
            let channel = channels.get(*id)?;
            if channel.capacity() < config.block_size {
                return Err(PipelineError::ConfigError(format!(
                    "channel '{}' capacity {} cannot hold a block of {} tiles",
                    id,
                    channel.capacity(),
                    config.block_size
                )));
            }
        }
        Ok(Self {
            op,
            role: config.role,
            block_count: config.block_count,
            block_size: config.block_size,
            enable_profiling: config.enable_profiling,
            channels,
            regs: ScratchRegisterFile::new(op.required_slots())?,
            token: CancelToken::new(),
        })
    }

    /// Returns the channel set, for wiring producer and consumer threads.
    pub fn channels(&self) -> &PipelineChannels {
        &self.channels
    }

    /// Returns a handle that cancels this driver's blocking waits.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Streams all configured blocks through the kernel.
    ///
    /// On success the output channel has received exactly
    /// `block_count × block_size` result tiles, in input order.
    pub fn run(&self) -> Result<PipelineMetrics, PipelineError> {
        tracing::info!(
            kernel = %self.op,
            role = ?self.role,
            blocks = self.block_count,
            block_size = self.block_size,
            "pipeline run started"
        );
        let mut metrics = PipelineMetrics::new(self.op.name());
        let started = Instant::now();

        for block in 0..self.block_count {
            let block_started = Instant::now();
            match self.op {
                KernelOp::Select => self.run_select_block()?,
                _ => self.run_unary_block()?,
            }
            tracing::debug!(block, "block complete");
            if self.enable_profiling {
                metrics.record_block(block, self.block_size, block_started.elapsed());
            } else {
                metrics.record_tiles(self.block_size);
            }
        }

        metrics.finalise(started.elapsed());
        tracing::info!(summary = %metrics.summary(), "pipeline run finished");
        Ok(metrics)
    }

    // ── Unary kernels ──────────────────────────────────────────

    /// One block of a single-input kernel: reserve the whole output block
    /// up front, then cycle the register file once per tile.
    fn run_unary_block(&self) -> Result<(), PipelineError> {
        let input = self.channels.get(ChannelId::Input)?;
        let output = self.channels.get(ChannelId::Output)?;

        output.reserve_space(self.block_size, &self.token)?;
        let mut results = Vec::with_capacity(self.block_size);
        for _ in 0..self.block_size {
            results.push(self.compute_unary_tile(input)?);
        }
        output.commit_push(results)?;
        Ok(())
    }

    fn compute_unary_tile(&self, input: &BoundedChannel) -> Result<Tile, PipelineError> {
        input.wait_until_available(1, &self.token)?;

        self.regs.acquire()?;
        self.regs.copy_in(input, 0, 0)?;
        if self.role == ComputeRole::Full {
            match self.op {
                KernelOp::Exponential => exponential(&self.regs, 0)?,
                KernelOp::HyperbolicTangent => hyperbolic_tangent(&self.regs, 0)?,
                KernelOp::HyperbolicSine => {
                    // sinh needs the operand in both slots: slot 0 becomes
                    // e^x, slot 1 becomes e^-x.
                    self.regs.copy_in(input, 0, 1)?;
                    hyperbolic_sine(&self.regs, 0, 1)?;
                }
                KernelOp::Select => unreachable!("select is not a unary kernel"),
            }
        }
        self.regs.commit()?;
        self.regs.wait_ready(&self.token)?;
        let result = self.regs.extract(0)?;

        // The input tile outlives the computation that read it.
        input.commit_pop(1)?;
        self.regs.release()?;
        Ok(result)
    }

    // ── Select kernel ──────────────────────────────────────────

    /// One block of the select kernel. Each tile takes two register-file
    /// cycles joined by the intermediate channel:
    ///
    /// ```text
    /// stage 1: mask_true(cond) · true_values          → intermediate
    /// stage 2: mask_false(cond) · false_values + int. → output
    /// ```
    ///
    /// The condition tile stays at the front of its channel across both
    /// stages; all three input channels are popped only after the result
    /// is extracted. Under [`ComputeRole::MovementOnly`] both stages skip
    /// the masking, so the extracted result slot holds the condition tile
    /// and the output is the condition stream.
    fn run_select_block(&self) -> Result<(), PipelineError> {
        let condition = self.channels.get(ChannelId::Condition)?;
        let true_values = self.channels.get(ChannelId::TrueValues)?;
        let false_values = self.channels.get(ChannelId::FalseValues)?;
        let intermediate = self.channels.get(ChannelId::Intermediate)?;
        let output = self.channels.get(ChannelId::Output)?;

        output.reserve_space(self.block_size, &self.token)?;
        let mut results = Vec::with_capacity(self.block_size);
        for _ in 0..self.block_size {
            condition.wait_until_available(1, &self.token)?;
            true_values.wait_until_available(1, &self.token)?;
            false_values.wait_until_available(1, &self.token)?;

            // Stage 1: blend the true branch into the intermediate channel.
            intermediate.reserve_space(1, &self.token)?;
            self.regs.acquire()?;
            self.regs.copy_in(condition, 0, 0)?;
            self.regs.copy_in(true_values, 0, 1)?;
            if self.role == ComputeRole::Full {
                greater_than_zero(&self.regs, 0)?;
                masked_multiply(&self.regs, 0, 1)?;
            }
            self.regs.commit()?;
            self.regs.wait_ready(&self.token)?;
            intermediate.commit_push(vec![self.regs.extract(0)?])?;
            self.regs.release()?;

            // Stage 2: blend the false branch and accumulate.
            intermediate.wait_until_available(1, &self.token)?;
            self.regs.acquire()?;
            self.regs.copy_in(condition, 0, 0)?;
            self.regs.copy_in(false_values, 0, 1)?;
            self.regs.copy_in(intermediate, 0, 2)?;
            if self.role == ComputeRole::Full {
                less_equal_zero(&self.regs, 0)?;
                masked_multiply(&self.regs, 0, 1)?;
                add(&self.regs, 0, 2)?;
            }
            self.regs.commit()?;
            self.regs.wait_ready(&self.token)?;
            results.push(self.regs.extract(0)?);

            intermediate.commit_pop(1)?;
            condition.commit_pop(1)?;
            true_values.commit_pop(1)?;
            false_values.commit_pop(1)?;
            self.regs.release()?;
        }
        output.commit_push(results)?;
        Ok(())
    }
}

impl std::fmt::Debug for BlockPipelineDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockPipelineDriver")
            .field("kernel", &self.op)
            .field("role", &self.role)
            .field("block_count", &self.block_count)
            .field("block_size", &self.block_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kernel: &str) -> PipelineConfig {
        PipelineConfig {
            kernel: kernel.to_string(),
            block_count: 1,
            block_size: 1,
            channel_capacity: None,
            role: ComputeRole::Full,
            enable_profiling: false,
        }
    }

    #[test]
    fn test_new_builds_kernel_channel_set() {
        let driver = BlockPipelineDriver::new(&config("select")).unwrap();
        assert!(driver.channels().get(ChannelId::Intermediate).is_ok());
        assert!(driver.channels().get(ChannelId::Input).is_err());
    }

    #[test]
    fn test_with_channels_rejects_missing_role() {
        let channels = PipelineChannels::builder().build();
        let result = BlockPipelineDriver::with_channels(&config("exp"), channels);
        assert!(matches!(
            result,
            Err(PipelineError::MissingChannel(ChannelId::Input))
        ));
    }

    #[test]
    fn test_with_channels_rejects_undersized_channel() {
        use std::sync::Arc;
        let mut cfg = config("exp");
        cfg.block_size = 4;
        cfg.channel_capacity = Some(8);
        let channels = PipelineChannels::builder()
            .bind(
                ChannelId::Input,
                Arc::new(BoundedChannel::new("input", 2).unwrap()),
            )
            .bind(
                ChannelId::Output,
                Arc::new(BoundedChannel::new("output", 8).unwrap()),
            )
            .build();
        assert!(matches!(
            BlockPipelineDriver::with_channels(&cfg, channels),
            Err(PipelineError::ConfigError(_))
        ));
    }
}
