// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The scratch register bank and its lifecycle state machine.

use crate::RegisterFileError;
use std::sync::Mutex;
use tile_channel::{BoundedChannel, CancelToken};
use tile_core::Tile;

/// Upper bound on the bank size; the hardware DST bank is small.
pub const MAX_SLOTS: usize = 8;

/// Lifecycle states of the whole bank. The state is global: all in-flight
/// slot writes become visible together, never per-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankState {
    /// No stage holds the bank; slots are empty.
    Idle,
    /// One stage holds exclusive read/write access to all slots.
    Acquired,
    /// Writes for this cycle are finalised; results not yet visible.
    Committed,
    /// Commit effects are externally visible; slots may be extracted.
    Readable,
}

/// Slots plus lifecycle state, guarded together.
struct BankInner {
    state: BankState,
    slots: Vec<Option<Tile>>,
}

/// A small bank of tile slots with an acquire → compute → commit → release
/// lifecycle.
///
/// Exactly one stage may hold the bank `Acquired` at a time; the interior
/// mutex exists to *detect* concurrent misuse (a second `acquire` fails
/// fast), not to queue legitimate contention.
///
/// # Example
/// ```
/// use register_file::ScratchRegisterFile;
/// use tile_channel::CancelToken;
/// use tile_core::Tile;
///
/// let regs = ScratchRegisterFile::new(2).unwrap();
/// regs.acquire().unwrap();
/// regs.store(0, Tile::splat(4.0)).unwrap();
/// regs.commit().unwrap();
/// regs.wait_ready(&CancelToken::new()).unwrap();
/// let out = regs.extract(0).unwrap();
/// regs.release().unwrap();
/// assert_eq!(out.as_slice()[0], 4.0);
/// ```
pub struct ScratchRegisterFile {
    inner: Mutex<BankInner>,
    num_slots: usize,
}

impl ScratchRegisterFile {
    /// Creates a bank with `num_slots` tile slots (`1..=`[`MAX_SLOTS`]).
    pub fn new(num_slots: usize) -> Result<Self, RegisterFileError> {
        if num_slots == 0 || num_slots > MAX_SLOTS {
            return Err(RegisterFileError::InvalidSlotCount(num_slots));
        }
        Ok(Self {
            inner: Mutex::new(BankInner {
                state: BankState::Idle,
                slots: (0..num_slots).map(|_| None).collect(),
            }),
            num_slots,
        })
    }

    /// Returns the number of slots in the bank.
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> BankState {
        self.lock().state
    }

    /// Takes exclusive access to the bank for one compute cycle.
    /// Valid only from `Idle`; re-acquiring is a fatal misuse.
    pub fn acquire(&self) -> Result<(), RegisterFileError> {
        self.transition("acquire", BankState::Idle, BankState::Acquired)
    }

    /// Writes a tile into `slot`. Valid only while `Acquired`.
    pub fn store(&self, slot: usize, tile: Tile) -> Result<(), RegisterFileError> {
        self.check_slot(slot)?;
        let mut inner = self.lock();
        Self::expect(&inner, "store", BankState::Acquired)?;
        inner.slots[slot] = Some(tile);
        Ok(())
    }

    /// Reads a copy of the tile in `slot`. Valid only while `Acquired`.
    pub fn load(&self, slot: usize) -> Result<Tile, RegisterFileError> {
        self.check_slot(slot)?;
        let inner = self.lock();
        Self::expect(&inner, "load", BankState::Acquired)?;
        inner.slots[slot]
            .clone()
            .ok_or(RegisterFileError::EmptySlot { slot })
    }

    /// Copies the tile at `front_index` of `channel`'s waited front into
    /// `slot`, without popping it. Valid only while `Acquired`.
    pub fn copy_in(
        &self,
        channel: &BoundedChannel,
        front_index: usize,
        slot: usize,
    ) -> Result<(), RegisterFileError> {
        self.check_slot(slot)?;
        let mut inner = self.lock();
        Self::expect(&inner, "copy_in", BankState::Acquired)?;
        let tile = channel.front(front_index)?;
        inner.slots[slot] = Some(tile);
        Ok(())
    }

    /// Finalises all writes for this cycle. Valid only from `Acquired`.
    pub fn commit(&self) -> Result<(), RegisterFileError> {
        self.transition("commit", BankState::Acquired, BankState::Committed)
    }

    /// Blocks until the commit's effects are externally visible.
    ///
    /// The pipeline-drain latency this models does not exist in software,
    /// so the call returns immediately — but it stays in the interface to
    /// preserve the lifecycle contract, and it honours cancellation like
    /// every other suspension point.
    pub fn wait_ready(&self, token: &CancelToken) -> Result<(), RegisterFileError> {
        if token.is_cancelled() {
            return Err(RegisterFileError::Cancelled);
        }
        self.transition("wait_ready", BankState::Committed, BankState::Readable)
    }

    /// Reads a committed result out of `slot`. Valid only while `Readable`.
    pub fn extract(&self, slot: usize) -> Result<Tile, RegisterFileError> {
        self.check_slot(slot)?;
        let inner = self.lock();
        Self::expect(&inner, "extract", BankState::Readable)?;
        inner.slots[slot]
            .clone()
            .ok_or(RegisterFileError::EmptySlot { slot })
    }

    /// Returns the bank to `Idle`, clearing all slots.
    /// Valid only from `Readable`.
    pub fn release(&self) -> Result<(), RegisterFileError> {
        let mut inner = self.lock();
        Self::expect(&inner, "release", BankState::Readable)?;
        for slot in inner.slots.iter_mut() {
            *slot = None;
        }
        inner.state = BankState::Idle;
        Ok(())
    }

    // ── Private helpers ────────────────────────────────────────

    fn lock(&self) -> std::sync::MutexGuard<'_, BankInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn transition(
        &self,
        op: &'static str,
        from: BankState,
        to: BankState,
    ) -> Result<(), RegisterFileError> {
        let mut inner = self.lock();
        if inner.state != from {
            tracing::error!(op, state = ?inner.state, "register-file protocol violation");
            return Err(RegisterFileError::ProtocolViolation {
                op,
                state: inner.state,
            });
        }
        inner.state = to;
        Ok(())
    }

    fn expect(
        inner: &BankInner,
        op: &'static str,
        state: BankState,
    ) -> Result<(), RegisterFileError> {
        if inner.state != state {
            tracing::error!(op, state = ?inner.state, "register-file protocol violation");
            return Err(RegisterFileError::ProtocolViolation {
                op,
                state: inner.state,
            });
        }
        Ok(())
    }

    fn check_slot(&self, slot: usize) -> Result<(), RegisterFileError> {
        if slot >= self.num_slots {
            return Err(RegisterFileError::SlotOutOfRange {
                slot,
                num_slots: self.num_slots,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for ScratchRegisterFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchRegisterFile")
            .field("num_slots", &self.num_slots)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_channel::ChannelError;

    fn token() -> CancelToken {
        CancelToken::new()
    }

    #[test]
    fn test_invalid_slot_counts() {
        assert!(matches!(
            ScratchRegisterFile::new(0),
            Err(RegisterFileError::InvalidSlotCount(0))
        ));
        assert!(ScratchRegisterFile::new(MAX_SLOTS + 1).is_err());
        assert!(ScratchRegisterFile::new(4).is_ok());
    }

    #[test]
    fn test_full_lifecycle() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        assert_eq!(regs.state(), BankState::Idle);

        regs.acquire().unwrap();
        assert_eq!(regs.state(), BankState::Acquired);
        regs.store(0, Tile::splat(1.0)).unwrap();
        assert_eq!(regs.load(0).unwrap().as_slice()[0], 1.0);

        regs.commit().unwrap();
        assert_eq!(regs.state(), BankState::Committed);
        regs.wait_ready(&token()).unwrap();
        assert_eq!(regs.state(), BankState::Readable);

        let out = regs.extract(0).unwrap();
        assert_eq!(out.as_slice()[0], 1.0);
        regs.release().unwrap();
        assert_eq!(regs.state(), BankState::Idle);
    }

    #[test]
    fn test_commit_from_idle_is_violation() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        assert!(matches!(
            regs.commit(),
            Err(RegisterFileError::ProtocolViolation {
                op: "commit",
                state: BankState::Idle,
            })
        ));
    }

    #[test]
    fn test_double_acquire_is_violation() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        assert!(matches!(
            regs.acquire(),
            Err(RegisterFileError::ProtocolViolation {
                op: "acquire",
                state: BankState::Acquired,
            })
        ));
    }

    #[test]
    fn test_store_after_commit_is_violation() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        regs.store(0, Tile::zeros()).unwrap();
        regs.commit().unwrap();
        assert!(regs.store(1, Tile::zeros()).is_err());
        assert!(regs.load(0).is_err());
    }

    #[test]
    fn test_extract_before_wait_ready_is_violation() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        regs.store(0, Tile::zeros()).unwrap();
        regs.commit().unwrap();
        assert!(matches!(
            regs.extract(0),
            Err(RegisterFileError::ProtocolViolation { op: "extract", .. })
        ));
    }

    #[test]
    fn test_release_clears_slots() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        regs.store(0, Tile::splat(5.0)).unwrap();
        regs.commit().unwrap();
        regs.wait_ready(&token()).unwrap();
        regs.release().unwrap();

        // Next cycle: the slot must be empty again.
        regs.acquire().unwrap();
        assert!(matches!(
            regs.load(0),
            Err(RegisterFileError::EmptySlot { slot: 0 })
        ));
    }

    #[test]
    fn test_slot_out_of_range() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        assert!(matches!(
            regs.store(2, Tile::zeros()),
            Err(RegisterFileError::SlotOutOfRange { slot: 2, num_slots: 2 })
        ));
    }

    #[test]
    fn test_wait_ready_cancellation() {
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        regs.store(0, Tile::zeros()).unwrap();
        regs.commit().unwrap();

        let t = token();
        t.cancel();
        assert!(matches!(
            regs.wait_ready(&t),
            Err(RegisterFileError::Cancelled)
        ));
    }

    #[test]
    fn test_copy_in_from_channel() {
        let ch = BoundedChannel::new("in", 2).unwrap();
        ch.reserve_space(1, &token()).unwrap();
        ch.commit_push(vec![Tile::splat(6.0)]).unwrap();
        ch.wait_until_available(1, &token()).unwrap();

        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        regs.copy_in(&ch, 0, 1).unwrap();
        assert_eq!(regs.load(1).unwrap().as_slice()[0], 6.0);

        // copy_in reads without consuming.
        assert_eq!(ch.occupied(), 1);
    }

    #[test]
    fn test_copy_in_outside_waited_front() {
        let ch = BoundedChannel::new("in", 2).unwrap();
        let regs = ScratchRegisterFile::new(2).unwrap();
        regs.acquire().unwrap();
        let result = regs.copy_in(&ch, 0, 0);
        assert!(matches!(
            result,
            Err(RegisterFileError::Channel(ChannelError::ProtocolViolation { .. }))
        ));
    }
}
