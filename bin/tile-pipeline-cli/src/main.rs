// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tile-pipeline
//!
//! Command-line interface for the tile-pipeline compute engine.
//!
//! ## Usage
//! ```bash
//! # Stream 8 blocks of 4 tiles through the tanh kernel
//! tile-pipeline run --kernel tanh --blocks 8 --block-size 4
//!
//! # Conditional select with an alternating-sign condition stream
//! tile-pipeline run --kernel select --pattern alternating
//!
//! # Describe a kernel's channels and accuracy
//! tile-pipeline inspect --kernel exp
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tile-pipeline",
    about = "Block-synchronous tile-streaming elementwise compute engine",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (overrides CLI arguments).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream synthetic tiles through a kernel and report throughput.
    Run {
        /// Kernel: exp, tanh, sinh, select.
        #[arg(short, long, default_value = "exp")]
        kernel: String,

        /// Number of blocks to stream.
        #[arg(long, default_value_t = 4)]
        blocks: usize,

        /// Tiles per block.
        #[arg(long, default_value_t = 2)]
        block_size: usize,

        /// Synthetic input pattern: ramp, alternating, constant:<value>.
        #[arg(short, long, default_value = "ramp")]
        pattern: String,

        /// Run the channel and register protocol without the kernel math.
        #[arg(long)]
        movement_only: bool,

        /// Record per-block timing in the run metrics.
        #[arg(long)]
        profile: bool,
    },

    /// Describe kernels: channels, register usage, accuracy.
    Inspect {
        /// Kernel to describe; omit to list all kernels.
        #[arg(short, long)]
        kernel: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            kernel,
            blocks,
            block_size,
            pattern,
            movement_only,
            profile,
        } => commands::run::execute(
            cli.config,
            kernel,
            blocks,
            block_size,
            pattern,
            movement_only,
            profile,
        ),
        Commands::Inspect { kernel } => commands::inspect::execute(kernel),
    }
}
