// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tile-channel
//!
//! Bounded, block-granular FIFO channels — the synchronization primitive
//! between pipeline stages.
//!
//! This crate provides:
//! - [`BoundedChannel`] — a fixed-capacity tile queue with a strict
//!   wait/reserve → commit protocol.
//! - [`CancelToken`] — a cooperative shutdown hook observed at every
//!   blocking wait.
//!
//! # Protocol
//! Consumers call [`wait_until_available`](BoundedChannel::wait_until_available)
//! before reading or popping; producers call
//! [`reserve_space`](BoundedChannel::reserve_space) before pushing.
//! Committing without the matching wait/reserve is a programming defect and
//! surfaces as [`ChannelError::ProtocolViolation`] — never a condition to
//! retry.

mod cancel;
mod channel;
mod error;

pub use cancel::CancelToken;
pub use channel::BoundedChannel;
pub use error::ChannelError;
