// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pipeline configuration: kernel selection, block geometry and the
//! compute role, loadable from TOML.

use crate::{ChannelId, PipelineError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which half of the stage's work this driver performs.
///
/// A `MovementOnly` driver runs the full channel and register-file
/// protocol but skips the kernel math: each cycle emits whatever tile was
/// staged into the result slot. For unary kernels that is the input
/// stream, passed through bitwise; for select it is the condition stream
/// (the branch-value channels are consumed but ignored). This mirrors
/// splitting a stage across a movement core and a math core, and is also
/// how the transport layer is exercised in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComputeRole {
    Full,
    MovementOnly,
}

impl Default for ComputeRole {
    fn default() -> Self {
        ComputeRole::Full
    }
}

/// The elementwise kernel a pipeline applies to each tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelOp {
    Exponential,
    HyperbolicTangent,
    HyperbolicSine,
    Select,
}

const UNARY_CHANNELS: &[ChannelId] = &[ChannelId::Input, ChannelId::Output];
const SELECT_CHANNELS: &[ChannelId] = &[
    ChannelId::Condition,
    ChannelId::TrueValues,
    ChannelId::FalseValues,
    ChannelId::Intermediate,
    ChannelId::Output,
];

impl KernelOp {
    /// Resolves a configuration string to a kernel, accepting the short
    /// aliases used on the command line.
    pub fn from_name(name: &str) -> Result<Self, PipelineError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "exp" | "exponential" => Ok(KernelOp::Exponential),
            "tanh" | "hyperbolic-tangent" => Ok(KernelOp::HyperbolicTangent),
            "sinh" | "hyperbolic-sine" => Ok(KernelOp::HyperbolicSine),
            "select" | "where" => Ok(KernelOp::Select),
            other => Err(PipelineError::ConfigError(format!(
                "unknown kernel '{}' (expected exp, tanh, sinh or select)",
                other
            ))),
        }
    }

    /// Returns the kernel's canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            KernelOp::Exponential => "exponential",
            KernelOp::HyperbolicTangent => "hyperbolic-tangent",
            KernelOp::HyperbolicSine => "hyperbolic-sine",
            KernelOp::Select => "select",
        }
    }

    /// Channel roles a pipeline running this kernel must bind.
    pub fn required_channels(&self) -> &'static [ChannelId] {
        match self {
            KernelOp::Select => SELECT_CHANNELS,
            _ => UNARY_CHANNELS,
        }
    }

    /// Register slots the kernel needs per compute cycle.
    pub fn required_slots(&self) -> usize {
        match self {
            KernelOp::Exponential | KernelOp::HyperbolicTangent => 1,
            KernelOp::HyperbolicSine => 2,
            KernelOp::Select => 3,
        }
    }
}

impl std::fmt::Display for KernelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarative description of one pipeline run.
///
/// # Example (TOML)
/// ```toml
/// kernel = "tanh"
/// block_count = 8
/// block_size = 4
/// channel_capacity = 8
/// enable_profiling = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Kernel name or alias, resolved via [`KernelOp::from_name`].
    pub kernel: String,
    /// Number of blocks to stream.
    pub block_count: usize,
    /// Tiles per block.
    pub block_size: usize,
    /// Capacity of every channel, in tiles. Defaults to twice the block
    /// size so a producer can stay one block ahead.
    #[serde(default)]
    pub channel_capacity: Option<usize>,
    #[serde(default)]
    pub role: ComputeRole,
    /// Record per-block timing in the run metrics.
    #[serde(default)]
    pub enable_profiling: bool,
}

impl PipelineConfig {
    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&raw)?;
        tracing::info!(path = %path.display(), kernel = %config.kernel, "loaded pipeline config");
        Ok(config)
    }

    /// Parses and validates a configuration from a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| PipelineError::ConfigError(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self)
            .map_err(|e| PipelineError::ConfigError(format!("cannot serialise config: {}", e)))
    }

    /// Resolves the configured kernel name.
    pub fn kernel_op(&self) -> Result<KernelOp, PipelineError> {
        KernelOp::from_name(&self.kernel)
    }

    /// Channel capacity after applying the default of `2 × block_size`.
    pub fn effective_capacity(&self) -> usize {
        self.channel_capacity.unwrap_or(2 * self.block_size)
    }

    /// Checks the cross-field constraints.
    ///
    /// Block-granular output reservation requires every channel to hold at
    /// least one whole block, so `channel_capacity >= block_size`.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.kernel_op()?;
        if self.block_size == 0 {
            return Err(PipelineError::ConfigError(
                "block_size must be at least 1".to_string(),
            ));
        }
        if self.effective_capacity() < self.block_size {
            return Err(PipelineError::ConfigError(format!(
                "channel_capacity {} cannot hold a block of {} tiles",
                self.effective_capacity(),
                self.block_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> PipelineConfig {
        PipelineConfig {
            kernel: "exp".to_string(),
            block_count: 4,
            block_size: 2,
            channel_capacity: None,
            role: ComputeRole::Full,
            enable_profiling: false,
        }
    }

    #[test]
    fn test_kernel_aliases() {
        assert_eq!(KernelOp::from_name("exp").unwrap(), KernelOp::Exponential);
        assert_eq!(
            KernelOp::from_name("Exponential").unwrap(),
            KernelOp::Exponential
        );
        assert_eq!(
            KernelOp::from_name("tanh").unwrap(),
            KernelOp::HyperbolicTangent
        );
        assert_eq!(
            KernelOp::from_name("sinh").unwrap(),
            KernelOp::HyperbolicSine
        );
        assert_eq!(KernelOp::from_name("where").unwrap(), KernelOp::Select);
        assert!(KernelOp::from_name("softmax").is_err());
    }

    #[test]
    fn test_capacity_default_is_double_buffer() {
        let config = base_config();
        assert_eq!(config.effective_capacity(), 4);
    }

    #[test]
    fn test_validate_rejects_undersized_capacity() {
        let mut config = base_config();
        config.channel_capacity = Some(1);
        assert!(matches!(
            config.validate(),
            Err(PipelineError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_block_size() {
        let mut config = base_config();
        config.block_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = base_config();
        let raw = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&raw).unwrap();
        assert_eq!(parsed.kernel, config.kernel);
        assert_eq!(parsed.block_count, config.block_count);
        assert_eq!(parsed.block_size, config.block_size);
        assert_eq!(parsed.role, config.role);
    }

    #[test]
    fn test_toml_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            kernel = "select"
            block_count = 2
            block_size = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.kernel_op().unwrap(), KernelOp::Select);
        assert_eq!(config.effective_capacity(), 6);
        assert_eq!(config.role, ComputeRole::Full);
        assert!(!config.enable_profiling);
    }
}
