// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulator capability set
//!
//! The training layer never touches neurons or synapses directly. It drives a
//! simulator only through the [`Brain`] trait: declare areas and stimuli,
//! project, read winners, and snapshot/restore plastic state.

use crate::error::BrainResult;
use crate::projection::Projection;

/// Number of neurons in an output area. Neuron `i` stands for label `i`.
pub const OUTPUT_AREA_SIZE: usize = 2;

/// Number of winners in an output area
pub const OUTPUT_AREA_WINNERS: usize = 1;

/// Operations a neural assembly simulator exposes to the training layer
pub trait Brain {
    /// Copy of every piece of state `project` mutates
    type Snapshot;

    /// Declare an area of `size` neurons with `winners` active at a time
    fn add_area(
        &mut self,
        name: &str,
        size: usize,
        winners: usize,
        plasticity: f32,
    ) -> BrainResult<()>;

    /// Declare an external stimulus made of `size` neurons
    fn add_stimulus(&mut self, name: &str, size: usize) -> BrainResult<()>;

    /// Declare the terminal readout area
    fn add_output_area(&mut self, name: &str) -> BrainResult<()>;

    fn has_area(&self, name: &str) -> bool;

    fn has_stimulus(&self, name: &str) -> bool;

    /// Name of the output area, if one was declared
    fn output_area(&self) -> Option<&str>;

    /// Area names in declaration order
    fn area_names(&self) -> Vec<String>;

    /// Run one projection step, updating winners and synaptic weights
    fn project(&mut self, projection: &Projection) -> BrainResult<()>;

    /// Current winners of `area`, sorted by neuron index
    fn winners(&self, area: &str) -> BrainResult<&[usize]>;

    fn snapshot(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: Self::Snapshot) -> BrainResult<()>;
}
