// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pipeline
//!
//! The outer control loop of the tile-streaming engine.
//!
//! A [`BlockPipelineDriver`] pulls blocks of tiles from its input
//! channel(s), stages each tile through the scratch register file's
//! acquire → compute → commit → release lifecycle around one kernel
//! invocation, and pushes results to the output channel:
//!
//! ```text
//!            ┌──────────────────────────────────────────┐
//! input ─────▶ wait → acquire → copy_in → kernel math   │
//!            │      → commit → wait_ready → extract ────┼────▶ output
//!            │      → pop input → release               │
//!            └──────────────────────────────────────────┘
//! ```
//!
//! Configuration (kernel choice, block geometry, channel capacity,
//! compute role) is described by [`PipelineConfig`], built in code or
//! loaded from TOML. Completion of [`run`](BlockPipelineDriver::run)
//! implies the output channel received exactly
//! `block_count × block_size` tiles, in input order.

mod channels;
mod config;
mod driver;
mod error;
mod metrics;

pub use channels::{ChannelId, PipelineChannels, PipelineChannelsBuilder};
pub use config::{ComputeRole, KernelOp, PipelineConfig};
pub use driver::BlockPipelineDriver;
pub use error::PipelineError;
pub use metrics::{BlockMetrics, PipelineMetrics};
