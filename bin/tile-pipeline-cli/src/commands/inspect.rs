// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tile-pipeline inspect` command: describe the available kernels.

use pipeline::KernelOp;

const KERNELS: &[KernelOp] = &[
    KernelOp::Exponential,
    KernelOp::HyperbolicTangent,
    KernelOp::HyperbolicSine,
    KernelOp::Select,
];

pub fn execute(kernel: Option<String>) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          tile-pipeline · Kernel Inspector            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    match kernel {
        Some(name) => describe(KernelOp::from_name(&name)?),
        None => {
            for op in KERNELS {
                describe(*op);
            }
        }
    }
    Ok(())
}

fn describe(op: KernelOp) {
    println!("  {} (aliases: {})", op.name(), aliases(op));
    println!("   {}", summary(op));

    let channels: Vec<&str> = op.required_channels().iter().map(|c| c.as_str()).collect();
    println!("   Channels:  {}", channels.join(", "));
    println!("   Registers: {} slot(s) per cycle", op.required_slots());
    println!("   Accuracy:  {}", accuracy(op));
    println!();
}

fn aliases(op: KernelOp) -> &'static str {
    match op {
        KernelOp::Exponential => "exp",
        KernelOp::HyperbolicTangent => "tanh",
        KernelOp::HyperbolicSine => "sinh",
        KernelOp::Select => "where",
    }
}

fn summary(op: KernelOp) -> &'static str {
    match op {
        KernelOp::Exponential => {
            "e^x via exponent extraction, a degree-2 polynomial and repeated squaring; \
             negatives via fast reciprocal"
        }
        KernelOp::HyperbolicTangent => {
            "tanh via a 3-segment piecewise-linear fit, saturating to ±1 beyond |x| = 2"
        }
        KernelOp::HyperbolicSine => "sinh composed as (e^x - e^-x) / 2 over two register slots",
        KernelOp::Select => {
            "elementwise select(cond, a, b): a where cond > 0, b where cond <= 0, \
             blended through complementary 0/1 masks"
        }
    }
}

fn accuracy(op: KernelOp) -> &'static str {
    match op {
        KernelOp::Exponential => "relative error <= 1.3% for |x| <= 1, <= 17% across [-20, 20]",
        KernelOp::HyperbolicTangent => "absolute error <= 0.085 over the full range",
        KernelOp::HyperbolicSine => "inherits the exponential's bounds; exactly odd",
        KernelOp::Select => "exact: masks are exactly 0.0 or 1.0, no 0 × Inf poisoning",
    }
}
