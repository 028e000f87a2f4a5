// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # register-file
//!
//! The compute-local scratch space every kernel works in: a small bank of
//! tile slots gated by a strict, bank-global lifecycle.
//!
//! ```text
//! Idle ──acquire──▶ Acquired ──commit──▶ Committed ──wait_ready──▶ Readable
//!  ▲                                                                  │
//!  └──────────────────────────── release ─────────────────────────────┘
//! ```
//!
//! The lifecycle models a hardware barrier: slot writes made while
//! `Acquired` become visible downstream only after `commit` + `wait_ready`.
//! Every out-of-sequence call fails fast with
//! [`RegisterFileError::ProtocolViolation`] — downstream numeric
//! correctness depends on the ordering, so misuse is fatal, never retried.

mod bank;
mod error;

pub use bank::{BankState, ScratchRegisterFile, MAX_SLOTS};
pub use error::RegisterFileError;
