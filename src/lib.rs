// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # asmlearn
//!
//! Supervised learning of binary functions `{0,1}^n -> {0,1}` with neural
//! assemblies. A learning sequence describes which stimuli and areas fire
//! into which areas; the model replays it for every sample, Hebbian
//! plasticity binds input assemblies to the label neuron of a two-neuron
//! output area, and testing reads that area's winner.
//!
//! ## Feature Flags
//! - **`config`** (default): TOML configuration loader and the
//!   [`simulation`] network it configures
//! - **`observability`** (default): logging setup with per-crate debug flags
//! - **`file-logging`**: rolling log files in addition to the console
//!
//! ## Usage
//!
//! ```rust,no_run
//! use asmlearn::prelude::*;
//!
//! let mut brain = NonLazyBrain::new(BrainParams::default().with_seed(3))?;
//! for area in ["A", "B", "C"] {
//!     brain.add_area(area, 1000, 30, 0.1)?;
//! }
//! brain.add_output_area("Output")?;
//!
//! let input_stimuli = InputStimuli::new(&mut brain, 100, &["A", "B"])?;
//! let mut sequence = LearningSequence::new(&brain, &input_stimuli)?;
//! sequence
//!     .add_iteration(Iteration::new().with_input_bits([0, 1]))?
//!     .add_iteration(
//!         Iteration::new()
//!             .with_projection("A", ["C"])
//!             .with_projection("B", ["C"]),
//!     )?
//!     .add_iteration(Iteration::new().with_projection("C", ["Output"]))?;
//!
//! let mut model = LearningModel::new(brain, sequence)?;
//! model.train_model(&create_training_set_from_list(&[0, 1, 0, 1], 40, 0.05)?, 20)?;
//! let results = model.test_model(&create_test_set_from_list(&[0, 1, 0, 1], None)?)?;
//! println!("{}", results);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use asmlearn_brain as brain;
pub use asmlearn_training as training;

#[cfg(feature = "config")]
pub use asmlearn_config as config;

#[cfg(feature = "observability")]
pub use asmlearn_observability as observability;

/// Simplified simulation network built from an [`config::AsmlearnConfig`]
#[cfg(feature = "config")]
pub mod simulation;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::brain::{Brain, BrainError, BrainParams, NonLazyBrain, Projection};
    pub use crate::training::{
        create_data_set_from_fn, create_data_set_from_list, create_explicit_mask_from_list,
        create_test_set_from_list, create_training_set_from_list, DataSet, InputStimuli,
        Iteration, LearningError, LearningModel, LearningResult, LearningSequence, LearningTask,
        Mask, TestResults,
    };
}
