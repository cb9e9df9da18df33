// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for simulator operations

/// Result type for simulator operations
pub type BrainResult<T> = Result<T, BrainError>;

/// Errors raised by a [`crate::Brain`] implementation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BrainError {
    #[error("Unknown area: {0}")]
    UnknownArea(String),

    #[error("Unknown stimulus: {0}")]
    UnknownStimulus(String),

    #[error("Name already in use: {0}")]
    DuplicateName(String),

    #[error("Output area already declared: {0}")]
    OutputAreaAlreadyDeclared(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Area {0} has no winners to project from")]
    NoWinners(String),

    #[error("Fixed winner {neuron} is outside area {area} of size {size}")]
    FixedWinnerOutOfRange {
        area: String,
        neuron: usize,
        size: usize,
    },

    #[error("Projection has no targets")]
    EmptyProjection,

    #[error("Snapshot does not match brain layout: {0}")]
    SnapshotMismatch(String),
}

impl BrainError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        BrainError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
