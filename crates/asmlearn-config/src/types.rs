// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to one section of `asmlearn_configuration.toml`. Every
//! section has a default, so partial files are accepted.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AsmlearnConfig {
    pub brain: BrainConfig,
    pub training: TrainingConfig,
    pub logging: LoggingConfig,
}

/// Simulator and network shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Connection probability of random connectomes
    pub p: f64,
    /// RNG seed; unset means entropy
    pub seed: Option<u64>,
    /// Neurons per hidden/input area
    pub area_size: usize,
    /// Winners per hidden/input area
    pub winners: usize,
    /// Hebbian plasticity of hidden/input areas
    pub plasticity: f32,
    /// Hebbian plasticity of the output area
    pub output_plasticity: f32,
    /// Neurons per input stimulus
    pub stimulus_size: usize,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            p: 0.1,
            seed: None,
            area_size: 1000,
            winners: 30,
            plasticity: 0.1,
            output_plasticity: 0.05,
            stimulus_size: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Passes over the training set
    pub cycles: usize,
    /// Pairs per training pass; unset means one per selected domain value
    pub training_set_length: Option<usize>,
    pub noise_probability: f64,
    pub noise_seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            cycles: 50,
            training_set_length: None,
            noise_probability: 0.0,
            noise_seed: None,
        }
    }
}

/// Console logging
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error (case-insensitive)
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: AsmlearnConfig = toml::from_str(
            r#"
            [brain]
            seed = 12

            [training]
            noise_probability = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.brain.seed, Some(12));
        assert_eq!(config.brain.p, BrainConfig::default().p);
        assert_eq!(config.training.noise_probability, 0.1);
        assert_eq!(config.training.cycles, 50);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_config_serializes_to_json() {
        let json = serde_json::to_value(AsmlearnConfig::default()).unwrap();
        assert_eq!(json["training"]["cycles"], 50);
        assert_eq!(json["logging"]["format"], "text");
    }
}
