// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for kernel invocations.

/// Errors that can occur while running a kernel.
///
/// Kernels have no runtime failure modes of their own — NaN/Inf propagate
/// as values — so every error here is a register-file misuse surfaced by
/// the slot operations, and is fatal to the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// A slot operation was rejected by the register file.
    #[error("register file rejected kernel access: {0}")]
    RegisterFile(#[from] register_file::RegisterFileError),
}
