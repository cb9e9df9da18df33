// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every violation is collected so one run reports all of them.

use crate::{AsmlearnConfig, ConfigError, ConfigResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    OutOfRange { field: String, value: f64, range: &'static str },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { field, value, range } => {
                write!(f, "{} = {} is outside {}", field, value, range)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &AsmlearnConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every violation in `config`, in section order
pub fn collect_errors(config: &AsmlearnConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_brain(config, &mut errors);
    validate_training(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn validate_brain(config: &AsmlearnConfig, errors: &mut Vec<ConfigValidationError>) {
    let brain = &config.brain;

    if !(brain.p > 0.0 && brain.p <= 1.0) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "brain.p".to_string(),
            value: brain.p,
            range: "(0, 1]",
        });
    }
    if brain.area_size == 0 {
        errors.push(invalid("brain.area_size", "must be positive"));
    }
    if brain.winners == 0 || brain.winners > brain.area_size {
        errors.push(invalid(
            "brain.winners",
            format!("must be in 1..={} (brain.area_size)", brain.area_size),
        ));
    }
    if brain.stimulus_size == 0 {
        errors.push(invalid("brain.stimulus_size", "must be positive"));
    }
    for (field, value) in [
        ("brain.plasticity", brain.plasticity),
        ("brain.output_plasticity", brain.output_plasticity),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ConfigValidationError::OutOfRange {
                field: field.to_string(),
                value: f64::from(value),
                range: "[0, inf)",
            });
        }
    }
}

fn validate_training(config: &AsmlearnConfig, errors: &mut Vec<ConfigValidationError>) {
    let training = &config.training;

    if training.cycles == 0 {
        errors.push(invalid("training.cycles", "must be at least 1"));
    }
    if training.training_set_length == Some(0) {
        errors.push(invalid("training.training_set_length", "must be at least 1"));
    }
    if !(0.0..=1.0).contains(&training.noise_probability) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "training.noise_probability".to_string(),
            value: training.noise_probability,
            range: "[0, 1]",
        });
    }
}

fn validate_logging(config: &AsmlearnConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(invalid(
            "logging.level",
            format!("'{}' is not one of {:?}", config.logging.level, LOG_LEVELS),
        ));
    }
    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(invalid(
            "logging.format",
            format!("'{}' is not one of {:?}", config.logging.format, LOG_FORMATS),
        ));
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
