// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the scratch register file.

use crate::BankState;

/// Errors that can occur while driving the register-file lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum RegisterFileError {
    /// A lifecycle call arrived out of sequence. Fatal: a programming
    /// defect in the calling stage, not a runtime condition.
    #[error("register file: '{op}' is invalid in state {state:?}")]
    ProtocolViolation { op: &'static str, state: BankState },

    /// The slot index is outside the configured bank.
    #[error("register file: slot {slot} out of range (bank has {num_slots} slots)")]
    SlotOutOfRange { slot: usize, num_slots: usize },

    /// A load/extract touched a slot that was never written this cycle.
    #[error("register file: slot {slot} is empty")]
    EmptySlot { slot: usize },

    /// The bank size is outside the supported range.
    #[error("register file: invalid slot count {0} (must be 1..={max})", max = crate::MAX_SLOTS)]
    InvalidSlotCount(usize),

    /// `wait_ready` observed a cancellation request.
    #[error("register file: wait_ready cancelled")]
    Cancelled,

    /// A `copy_in` failed on the source channel.
    #[error("register file: copy_in failed: {0}")]
    Channel(#[from] tile_channel::ChannelError),
}
