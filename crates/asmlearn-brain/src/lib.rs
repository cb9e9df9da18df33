// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # asmlearn Brain
//!
//! Neural assembly simulator as seen by the training layer:
//! - [`Brain`]: the capability set (areas, stimuli, project, winners, snapshot)
//! - [`Projection`]: a replayable description of one projection step
//! - [`NonLazyBrain`]: a deterministic reference simulator with eagerly
//!   generated connectomes, k-winners-take-all and multiplicative Hebbian
//!   plasticity

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod connectome;
pub mod error;
pub mod non_lazy;
pub mod params;
pub mod projection;
pub mod traits;

pub use connectome::Connectomes;
pub use error::{BrainError, BrainResult};
pub use non_lazy::{BrainSnapshot, NonLazyBrain};
pub use params::BrainParams;
pub use projection::Projection;
pub use traits::{Brain, OUTPUT_AREA_SIZE, OUTPUT_AREA_WINNERS};
