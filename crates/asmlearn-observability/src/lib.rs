// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # asmlearn-observability
//!
//! Logging setup shared by every asmlearn binary, with per-crate debug flag
//! support (`--debug-asmlearn-training`, `--debug-all`).
//!
//! ## Features
//! - `file-logging`: daily-rolling log files in a timestamped run directory

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known asmlearn crate names for debug flags. These double as the tracing
/// targets the crates log under.
pub const KNOWN_CRATES: &[&str] = &[
    "asmlearn",
    "asmlearn-brain",
    "asmlearn-training",
    "asmlearn-config",
];
