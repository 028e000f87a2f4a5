// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The bounded tile channel.
//!
//! A [`BoundedChannel`] is a fixed-capacity FIFO of [`Tile`]s with a
//! two-phase protocol on each side:
//!
//! ```text
//! consumer: wait_until_available(n) … front(i) reads … commit_pop(n)
//! producer: reserve_space(n)        …                  commit_push(tiles)
//! ```
//!
//! The wait phase is the only place a stage may block. A successful wait
//! extends the channel's *waited front* — the prefix of tiles the consumer
//! may read in place via [`front`](BoundedChannel::front) before popping.
//! Commits that are not covered by a prior wait/reserve fail fast with
//! [`ChannelError::ProtocolViolation`].
//!
//! # Ordering
//! Strict FIFO within a channel; every tile is consumed exactly once.
//! There is no peek or random access beyond the waited front.

use crate::{CancelToken, ChannelError};
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;
use tile_core::Tile;

/// How often a blocked wait re-checks its cancellation token. Purely a
/// responsiveness knob; invisible to pipeline semantics.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Mutable channel state, guarded by the channel's mutex.
struct ChannelState {
    /// Tiles currently in flight, front = oldest.
    queue: VecDeque<Tile>,
    /// Number of front tiles the consumer has successfully waited for.
    waited_front: usize,
    /// Number of empty slots the producer has reserved but not yet filled.
    reserved: usize,
}

/// A fixed-capacity, block-granular FIFO connecting two pipeline stages.
///
/// # Example
/// ```
/// use tile_channel::{BoundedChannel, CancelToken};
/// use tile_core::Tile;
///
/// let ch = BoundedChannel::new("input", 4).unwrap();
/// let token = CancelToken::new();
///
/// ch.reserve_space(2, &token).unwrap();
/// ch.commit_push(vec![Tile::splat(1.0), Tile::splat(2.0)]).unwrap();
///
/// ch.wait_until_available(2, &token).unwrap();
/// let tiles = ch.commit_pop(2).unwrap();
/// assert_eq!(tiles.len(), 2);
/// assert_eq!(ch.occupied(), 0);
/// ```
pub struct BoundedChannel {
    name: String,
    capacity: usize,
    state: Mutex<ChannelState>,
    changed: Condvar,
}

impl BoundedChannel {
    /// Creates a channel holding at most `capacity` tiles.
    ///
    /// Returns [`ChannelError::ZeroCapacity`] for `capacity == 0` — a
    /// configuration error caught at construction time.
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self, ChannelError> {
        let name = name.into();
        if capacity == 0 {
            return Err(ChannelError::ZeroCapacity { name });
        }
        Ok(Self {
            name,
            capacity,
            state: Mutex::new(ChannelState {
                queue: VecDeque::with_capacity(capacity),
                waited_front: 0,
                reserved: 0,
            }),
            changed: Condvar::new(),
        })
    }

    /// Returns the logical channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the maximum number of tiles this channel can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of tiles currently in flight.
    pub fn occupied(&self) -> usize {
        self.lock().queue.len()
    }

    /// Blocks until at least `n` tiles are present, extending the waited
    /// front to cover them.
    ///
    /// Cooperative and untimed: a permanently empty upstream blocks
    /// forever unless `token` is cancelled. Requests larger than the
    /// channel capacity can never be satisfied and fail immediately with
    /// [`ChannelError::CapacityExceeded`].
    pub fn wait_until_available(
        &self,
        n: usize,
        token: &CancelToken,
    ) -> Result<(), ChannelError> {
        self.check_request(n, "wait_until_available")?;
        let mut state = self.lock();
        loop {
            if token.is_cancelled() {
                return Err(self.cancelled());
            }
            if state.queue.len() >= n {
                state.waited_front = state.waited_front.max(n);
                return Ok(());
            }
            tracing::trace!(
                channel = %self.name,
                want = n,
                have = state.queue.len(),
                "waiting for tiles"
            );
            state = self.block(state);
        }
    }

    /// Blocks until at least `n` empty slots exist, accumulating a
    /// reservation the producer later fills with
    /// [`commit_push`](Self::commit_push).
    pub fn reserve_space(&self, n: usize, token: &CancelToken) -> Result<(), ChannelError> {
        self.check_request(n, "reserve_space")?;
        let mut state = self.lock();
        loop {
            if token.is_cancelled() {
                return Err(self.cancelled());
            }
            let free = self.capacity - state.queue.len() - state.reserved;
            if free >= n {
                state.reserved += n;
                return Ok(());
            }
            tracing::trace!(
                channel = %self.name,
                want = n,
                free = free,
                "waiting for space"
            );
            state = self.block(state);
        }
    }

    /// Pushes `tiles` into the channel, consuming a matching reservation.
    ///
    /// Pushing without a covering [`reserve_space`](Self::reserve_space) is
    /// a protocol violation; occupancy can therefore never exceed capacity.
    pub fn commit_push(&self, tiles: Vec<Tile>) -> Result<(), ChannelError> {
        let n = tiles.len();
        let mut state = self.lock();
        if n > state.reserved {
            return Err(self.violation(
                "commit_push",
                format!("pushing {} tiles with only {} reserved", n, state.reserved),
            ));
        }
        // Reservation accounting makes this unreachable; keep the
        // occupancy invariant checked anyway.
        if state.queue.len() + n > self.capacity {
            return Err(self.violation(
                "commit_push",
                format!(
                    "push of {} tiles would exceed capacity {} (occupied {})",
                    n,
                    self.capacity,
                    state.queue.len()
                ),
            ));
        }
        state.reserved -= n;
        state.queue.extend(tiles);
        self.changed.notify_all();
        Ok(())
    }

    /// Pops the first `n` tiles, consuming a matching waited front.
    ///
    /// Popping more than was waited for is a protocol violation.
    pub fn commit_pop(&self, n: usize) -> Result<Vec<Tile>, ChannelError> {
        let mut state = self.lock();
        if n > state.waited_front {
            return Err(self.violation(
                "commit_pop",
                format!(
                    "popping {} tiles with a waited front of {}",
                    n, state.waited_front
                ),
            ));
        }
        let tiles: Vec<Tile> = state.queue.drain(..n).collect();
        state.waited_front -= n;
        self.changed.notify_all();
        Ok(tiles)
    }

    /// Reads (copies) the tile at position `index` within the waited front
    /// without consuming it. Backs the register file's `copy_in`.
    pub fn front(&self, index: usize) -> Result<Tile, ChannelError> {
        let state = self.lock();
        if index >= state.waited_front {
            return Err(self.violation(
                "front",
                format!(
                    "index {} outside the waited front of {}",
                    index, state.waited_front
                ),
            ));
        }
        Ok(state.queue[index].clone())
    }

    // ── Private helpers ────────────────────────────────────────

    fn lock(&self) -> std::sync::MutexGuard<'_, ChannelState> {
        // A poisoned mutex means another stage panicked mid-protocol; the
        // queue itself is still structurally sound, so keep going and let
        // the protocol checks surface any inconsistency.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn block<'a>(
        &self,
        guard: std::sync::MutexGuard<'a, ChannelState>,
    ) -> std::sync::MutexGuard<'a, ChannelState> {
        let (guard, _timeout) = self
            .changed
            .wait_timeout(guard, WAIT_POLL_INTERVAL)
            .unwrap_or_else(|e| e.into_inner());
        guard
    }

    fn check_request(&self, n: usize, op: &'static str) -> Result<(), ChannelError> {
        if n > self.capacity {
            tracing::error!(channel = %self.name, op, n, capacity = self.capacity,
                "request exceeds channel capacity");
            return Err(ChannelError::CapacityExceeded {
                name: self.name.clone(),
                requested: n,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn violation(&self, op: &'static str, detail: String) -> ChannelError {
        tracing::error!(channel = %self.name, op, %detail, "channel protocol violation");
        ChannelError::ProtocolViolation {
            name: self.name.clone(),
            op,
            detail,
        }
    }

    fn cancelled(&self) -> ChannelError {
        ChannelError::Cancelled {
            name: self.name.clone(),
        }
    }
}

impl std::fmt::Debug for BoundedChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedChannel")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("occupied", &self.occupied())
            .finish()
    }
}
