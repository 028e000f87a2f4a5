// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the pipeline driver.

use crate::ChannelId;

/// Errors that can occur while constructing or running a pipeline.
///
/// There are no retries anywhere in this system: the pipeline is a
/// deterministic single-pass transform, so every error is either a
/// programming defect (protocol violations) or a misconfiguration,
/// surfaced immediately.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A channel operation failed (protocol violation, capacity
    /// misconfiguration, or cancellation).
    #[error("channel error: {0}")]
    Channel(#[from] tile_channel::ChannelError),

    /// The register-file lifecycle was violated or cancelled.
    #[error("register file error: {0}")]
    RegisterFile(#[from] register_file::RegisterFileError),

    /// A kernel invocation failed.
    #[error("kernel error: {0}")]
    Kernel(#[from] eltwise_kernels::KernelError),

    /// A logical channel the configured kernel requires is not bound.
    #[error("no channel bound for '{0}'")]
    MissingChannel(ChannelId),

    /// Configuration error detected at construction time.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
