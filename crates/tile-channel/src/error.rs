// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for channel operations.

/// Errors that can occur on a bounded channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// A channel must be able to hold at least one tile.
    #[error("channel '{name}' configured with zero capacity")]
    ZeroCapacity { name: String },

    /// The request can never be satisfied by this channel's capacity.
    /// Detected up front rather than deadlocking.
    #[error("channel '{name}': requested {requested} tiles but capacity is {capacity}")]
    CapacityExceeded {
        name: String,
        requested: usize,
        capacity: usize,
    },

    /// A commit was issued without the matching wait/reserve, or a front
    /// read landed outside the waited window. Fatal: indicates a
    /// programming defect in the calling stage.
    #[error("channel '{name}': protocol violation in {op}: {detail}")]
    ProtocolViolation {
        name: String,
        op: &'static str,
        detail: String,
    },

    /// A blocking wait was interrupted by a [`CancelToken`](crate::CancelToken).
    #[error("channel '{name}': wait cancelled")]
    Cancelled { name: String },
}
