// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # asmlearn Training
//!
//! Supervised training and evaluation of a binary-function learner on top of
//! a neural assembly simulator:
//! - Domain encoding and the input bit -> stimulus mapping
//! - Learning sequences: declarative, replayable projection programs
//! - Labeled data sets with label noise and domain masks
//! - The train / run / test protocol and its classification metrics
//!
//! ## Usage
//!
//! ```rust,no_run
//! use asmlearn_brain::{Brain, BrainParams, NonLazyBrain};
//! use asmlearn_training::{DataSet, InputStimuli, Iteration, LearningModel, LearningSequence};
//!
//! let mut brain = NonLazyBrain::new(BrainParams::default().with_seed(1))?;
//! brain.add_area("A", 200, 10, 0.1)?;
//! brain.add_area("B", 200, 10, 0.1)?;
//! brain.add_output_area("Output")?;
//!
//! let input_stimuli = InputStimuli::new(&mut brain, 10, &["A", "B"])?;
//! let mut sequence = LearningSequence::new(&brain, &input_stimuli)?;
//! sequence
//!     .add_iteration(Iteration::new().with_input_bits([0, 1]))?
//!     .add_iteration(
//!         Iteration::new()
//!             .with_projection("A", ["Output"])
//!             .with_projection("B", ["Output"]),
//!     )?;
//!
//! let mut model = LearningModel::new(brain, sequence)?;
//! let data_set = DataSet::from_labels(vec![0, 1, 0, 1])?;
//! model.train_model(&data_set, 50)?;
//! println!("{}", model.test_model(&data_set)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod data_set;
pub mod encoder;
pub mod error;
pub mod graph;
pub mod input;
pub mod model;
pub mod replay;
pub mod results;
pub mod sequence;
pub mod task;

pub use data_set::{
    create_data_set_from_fn, create_data_set_from_list, create_explicit_mask_from_list,
    create_test_set_from_list, create_training_set_from_list, DataSet, DataSetIter, LabelSource,
    Mask,
};
pub use encoder::{DomainEncoder, DomainValue, Label, MAX_DOMAIN_SIZE};
pub use error::{LearningError, LearningResult};
pub use graph::{ConnectionsGraph, GraphEdge, GraphNode};
pub use input::{InputBit, InputStimuli};
pub use model::LearningModel;
pub use replay::PlasticStateGuard;
pub use results::TestResults;
pub use sequence::{Iteration, LearningSequence, SequenceStep};
pub use task::LearningTask;
