// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Logical channel roles and the channel set a driver runs against.

use crate::{KernelOp, PipelineError};
use std::sync::Arc;
use tile_channel::BoundedChannel;

/// The logical role a channel plays in a pipeline.
///
/// Which roles must be bound depends on the configured kernel: the unary
/// kernels use `Input` and `Output`; the select kernel uses `Condition`,
/// `TrueValues`, `FalseValues`, an internal `Intermediate` stage and
/// `Output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelId {
    /// Operand stream for unary kernels.
    Input,
    /// Select: the condition stream.
    Condition,
    /// Select: values taken where the condition is positive.
    TrueValues,
    /// Select: values taken where the condition is zero or negative.
    FalseValues,
    /// Select: partial blend between the two masking stages.
    Intermediate,
    /// Result stream, written in input order.
    Output,
}

impl ChannelId {
    /// Returns the channel's wire name, used for construction and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelId::Input => "input",
            ChannelId::Condition => "condition",
            ChannelId::TrueValues => "true-values",
            ChannelId::FalseValues => "false-values",
            ChannelId::Intermediate => "intermediate",
            ChannelId::Output => "output",
        }
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of channels a [`BlockPipelineDriver`](crate::BlockPipelineDriver)
/// runs against.
///
/// Channels are shared (`Arc`) so that external producer and consumer
/// threads can feed and drain the pipeline while the driver runs.
#[derive(Debug, Clone)]
pub struct PipelineChannels {
    bindings: Vec<(ChannelId, Arc<BoundedChannel>)>,
}

impl PipelineChannels {
    /// Starts an empty channel set for manual wiring.
    pub fn builder() -> PipelineChannelsBuilder {
        PipelineChannelsBuilder {
            bindings: Vec::new(),
        }
    }

    /// Builds the standard channel set for `op`, every channel with the
    /// same `capacity`.
    pub fn for_kernel(op: KernelOp, capacity: usize) -> Result<Self, PipelineError> {
        let mut builder = Self::builder();
        for id in op.required_channels() {
            builder = builder.bind(*id, Arc::new(BoundedChannel::new(id.as_str(), capacity)?));
        }
        Ok(builder.build())
    }

    /// Looks up the channel bound to `id`.
    pub fn get(&self, id: ChannelId) -> Result<&Arc<BoundedChannel>, PipelineError> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == id)
            .map(|(_, ch)| ch)
            .ok_or(PipelineError::MissingChannel(id))
    }

    /// Iterates over all bound channels.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &Arc<BoundedChannel>)> {
        self.bindings.iter().map(|(id, ch)| (*id, ch))
    }
}

/// Builder for a [`PipelineChannels`] set with custom channels, e.g.
/// different capacities per role.
pub struct PipelineChannelsBuilder {
    bindings: Vec<(ChannelId, Arc<BoundedChannel>)>,
}

impl PipelineChannelsBuilder {
    /// Binds `channel` to the role `id`, replacing any earlier binding.
    pub fn bind(mut self, id: ChannelId, channel: Arc<BoundedChannel>) -> Self {
        self.bindings.retain(|(bound, _)| *bound != id);
        self.bindings.push((id, channel));
        self
    }

    pub fn build(self) -> PipelineChannels {
        PipelineChannels {
            bindings: self.bindings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_kernel_unary_set() {
        let channels = PipelineChannels::for_kernel(KernelOp::Exponential, 4).unwrap();
        assert!(channels.get(ChannelId::Input).is_ok());
        assert!(channels.get(ChannelId::Output).is_ok());
        assert!(matches!(
            channels.get(ChannelId::Condition),
            Err(PipelineError::MissingChannel(ChannelId::Condition))
        ));
    }

    #[test]
    fn test_for_kernel_select_set() {
        let channels = PipelineChannels::for_kernel(KernelOp::Select, 4).unwrap();
        for id in [
            ChannelId::Condition,
            ChannelId::TrueValues,
            ChannelId::FalseValues,
            ChannelId::Intermediate,
            ChannelId::Output,
        ] {
            assert!(channels.get(id).is_ok(), "missing {id}");
        }
        assert!(channels.get(ChannelId::Input).is_err());
    }

    #[test]
    fn test_builder_rebind_replaces() {
        let first = Arc::new(BoundedChannel::new("input", 2).unwrap());
        let second = Arc::new(BoundedChannel::new("input", 8).unwrap());
        let channels = PipelineChannels::builder()
            .bind(ChannelId::Input, first)
            .bind(ChannelId::Input, second)
            .build();
        assert_eq!(channels.get(ChannelId::Input).unwrap().capacity(), 8);
    }
}
