// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the training layer

use asmlearn_brain::BrainError;

use crate::encoder::{DomainValue, MAX_DOMAIN_SIZE};

/// Result type for training operations
pub type LearningResult<T> = Result<T, LearningError>;

/// Errors that can occur while building or driving a learning model
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LearningError {
    #[error("Invalid domain size {0}: must be within [1, {max}]", max = MAX_DOMAIN_SIZE)]
    InvalidDomainSize(u32),

    #[error("Unknown area: {0}")]
    UnknownArea(String),

    #[error("Unknown stimulus: {0}")]
    UnknownStimulus(String),

    #[error("Brain has no output area")]
    MissingOutputArea,

    #[error("Output area mismatch: sequence uses {sequence}, brain uses {brain}")]
    OutputAreaMismatch { sequence: String, brain: String },

    #[error("Invalid consecutive_runs {0}: must be at least 1")]
    InvalidConsecutiveRuns(usize),

    #[error("Iteration has neither input bits nor area projections")]
    EmptyIteration,

    #[error("Input bit {bit} is outside a domain of {domain_size} bits")]
    InputBitOutOfRange { bit: usize, domain_size: u32 },

    #[error("Area {area} is read by iteration {iteration} before any earlier iteration projects into it")]
    AreaReadBeforeWritten { area: String, iteration: usize },

    #[error("Sequence never projects into output area {0}")]
    OutputNotReached(String),

    #[error("Domain of {domain_size} bits needs {domain_size} input areas, got {areas}")]
    InputAreaCountMismatch { domain_size: u32, areas: usize },

    #[error("Mask length {actual} does not match a domain of {expected} values")]
    MaskLengthMismatch { expected: usize, actual: usize },

    #[error("Label list length {0} is not a power of two of at least 2")]
    InvalidLabelCount(usize),

    #[error("Invalid label {label} for domain value {value}: labels are 0 or 1")]
    InvalidLabel { value: DomainValue, label: u8 },

    #[error("Noise probability {0} is outside [0, 1]")]
    InvalidNoiseProbability(f64),

    #[error("{component} uses a domain of {actual} bits, model expects {expected}")]
    DomainSizeConflict {
        component: &'static str,
        expected: u32,
        actual: u32,
    },

    #[error("Learning task has no {0}")]
    MissingComponent(&'static str),

    #[error("Domain size mismatch: value {value} is outside [0, {max}]")]
    DomainSizeMismatch { value: DomainValue, max: DomainValue },

    #[error("Output area {area} produced unreadable winners {winners:?}")]
    UnreadableOutput { area: String, winners: Vec<usize> },

    #[error("Simulator error: {0}")]
    Brain(#[from] BrainError),
}

impl LearningError {
    /// True for mistakes surfaced while building components, before any
    /// replay touches the simulator
    pub fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            LearningError::DomainSizeMismatch { .. }
                | LearningError::UnreadableOutput { .. }
                | LearningError::Brain(BrainError::NoWinners(_))
                | LearningError::Brain(BrainError::SnapshotMismatch(_))
        )
    }

    /// True when a domain value fell outside `[0, 2^domain_size - 1]`
    pub fn is_domain_size_mismatch(&self) -> bool {
        matches!(self, LearningError::DomainSizeMismatch { .. })
    }
}
