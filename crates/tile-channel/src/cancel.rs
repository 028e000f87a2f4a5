// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cooperative cancellation for blocking channel waits.
//!
//! The source execution model has no timeouts or cancellation: a
//! permanently empty upstream is simply a deadlock. For testability and
//! graceful shutdown, every suspension point accepts a [`CancelToken`];
//! flipping it makes all blocked stages return
//! [`ChannelError::Cancelled`](crate::ChannelError::Cancelled). Cancellation
//! never alters single-tile numeric semantics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable handle that requests shutdown of blocked pipeline stages.
///
/// # Example
/// ```
/// use tile_channel::CancelToken;
///
/// let token = CancelToken::new();
/// let worker_token = token.clone();
/// assert!(!worker_token.is_cancelled());
///
/// token.cancel();
/// assert!(worker_token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. All current and future blocking waits that
    /// observe this token return `Cancelled`.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
