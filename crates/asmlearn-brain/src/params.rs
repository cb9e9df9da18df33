// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulator construction parameters

use serde::{Deserialize, Serialize};

use crate::error::{BrainError, BrainResult};

/// Parameters shared by every area of a [`crate::NonLazyBrain`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainParams {
    /// Probability that a synapse exists between two neurons
    pub p: f64,

    /// RNG seed for connectome generation. `None` draws from the OS.
    pub seed: Option<u64>,

    /// Plasticity of the output area
    pub output_plasticity: f32,
}

impl Default for BrainParams {
    fn default() -> Self {
        Self {
            p: 0.1,
            seed: None,
            output_plasticity: 0.05,
        }
    }
}

impl BrainParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> BrainResult<()> {
        if !(self.p > 0.0 && self.p <= 1.0) {
            return Err(BrainError::invalid_parameter(
                "p",
                format!("{} is outside (0, 1]", self.p),
            ));
        }
        validate_plasticity(self.output_plasticity)
    }
}

pub(crate) fn validate_plasticity(plasticity: f32) -> BrainResult<()> {
    if !plasticity.is_finite() || plasticity < 0.0 {
        return Err(BrainError::invalid_parameter(
            "plasticity",
            format!("{} must be a finite, non-negative number", plasticity),
        ));
    }
    Ok(())
}
