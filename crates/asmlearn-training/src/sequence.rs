// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Learning sequences
//!
//! A [`LearningSequence`] is an ordered program of projection iterations.
//! Each [`Iteration`] names the input bits to re-encode, the area -> area
//! projections to run, and how many times the block repeats back to back.
//! All validation happens in [`LearningSequence::add_iteration`]; replay
//! assumes every name resolves.

use std::collections::BTreeMap;

use ahash::AHashSet;
use asmlearn_brain::{Brain, Projection};
use serde::Serialize;
use tracing::{debug, info};

use crate::encoder::{DomainEncoder, DomainValue};
use crate::error::{LearningError, LearningResult};
use crate::graph::ConnectionsGraph;
use crate::input::InputStimuli;

/// One declarative step of a learning sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Iteration {
    input_bits: Vec<usize>,
    areas_to_areas: BTreeMap<String, Vec<String>>,
    consecutive_runs: usize,
}

impl Default for Iteration {
    fn default() -> Self {
        Self {
            input_bits: Vec::new(),
            areas_to_areas: BTreeMap::new(),
            consecutive_runs: 1,
        }
    }
}

impl Iteration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the active stimulus of each listed bit into its input area
    pub fn with_input_bits(mut self, bits: impl IntoIterator<Item = usize>) -> Self {
        for bit in bits {
            if !self.input_bits.contains(&bit) {
                self.input_bits.push(bit);
            }
        }
        self
    }

    /// Project `source` into every area of `targets`
    pub fn with_projection<I, S>(mut self, source: &str, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.areas_to_areas.entry(source.to_string()).or_default();
        for target in targets {
            let target = target.into();
            if !entry.contains(&target) {
                entry.push(target);
            }
        }
        self
    }

    pub fn with_consecutive_runs(mut self, runs: usize) -> Self {
        self.consecutive_runs = runs;
        self
    }

    pub fn input_bits(&self) -> &[usize] {
        &self.input_bits
    }

    pub fn areas_to_areas(&self) -> &BTreeMap<String, Vec<String>> {
        &self.areas_to_areas
    }

    pub fn consecutive_runs(&self) -> usize {
        self.consecutive_runs
    }

    fn has_projections(&self) -> bool {
        self.areas_to_areas.values().any(|targets| !targets.is_empty())
    }

    fn is_empty(&self) -> bool {
        self.input_bits.is_empty() && !self.has_projections()
    }

    /// Areas receiving input in this iteration, input areas included
    fn targets<'a>(&'a self, input_stimuli: &'a InputStimuli) -> impl Iterator<Item = &'a str> + 'a {
        let input_areas = self
            .input_bits
            .iter()
            .filter_map(|&bit| input_stimuli.bit(bit))
            .map(|bit| bit.area());
        let projected = self.areas_to_areas.values().flatten().map(String::as_str);
        input_areas.chain(projected)
    }
}

/// A single replay step: one run of one iteration
#[derive(Debug, Clone, Copy)]
pub struct SequenceStep<'a> {
    /// Position among all replayed steps, starting at 0
    pub index: usize,
    /// Position of the iteration this step belongs to
    pub iteration: usize,
    /// Which repetition of the iteration this is, starting at 0
    pub run: usize,
    pub definition: &'a Iteration,
}

impl SequenceStep<'_> {
    /// Resolve input bits to the stimuli that are active for `value`
    pub fn resolve(&self, input_stimuli: &InputStimuli, value: DomainValue) -> LearningResult<Projection> {
        let mut projection = Projection::new();
        for &bit in &self.definition.input_bits {
            let (stimulus, area) = input_stimuli.active_stimulus(bit, value)?;
            projection.add_stimulus(stimulus, area);
        }
        for (source, targets) in &self.definition.areas_to_areas {
            for target in targets {
                projection.add_area(source, target);
            }
        }
        Ok(projection)
    }
}

/// Ordered list of iterations replayed for every sample
#[derive(Debug, Clone)]
pub struct LearningSequence {
    input_stimuli: InputStimuli,
    known_areas: AHashSet<String>,
    output_area: String,
    iterations: Vec<Iteration>,
    /// Areas some iteration has projected into so far
    written_areas: AHashSet<String>,
}

impl LearningSequence {
    /// Start an empty sequence validated against `brain`'s areas
    pub fn new<B: Brain>(brain: &B, input_stimuli: &InputStimuli) -> LearningResult<Self> {
        let output_area = brain
            .output_area()
            .ok_or(LearningError::MissingOutputArea)?
            .to_string();

        for stimulus in input_stimuli.stimulus_names() {
            if !brain.has_stimulus(stimulus) {
                return Err(LearningError::UnknownStimulus(stimulus.to_string()));
            }
        }

        Ok(Self {
            input_stimuli: input_stimuli.clone(),
            known_areas: brain.area_names().into_iter().collect(),
            output_area,
            iterations: Vec::new(),
            written_areas: AHashSet::new(),
        })
    }

    /// Validate and append an iteration
    pub fn add_iteration(&mut self, iteration: Iteration) -> LearningResult<&mut Self> {
        let position = self.iterations.len();

        if iteration.consecutive_runs == 0 {
            return Err(LearningError::InvalidConsecutiveRuns(0));
        }
        if iteration.is_empty() {
            return Err(LearningError::EmptyIteration);
        }

        let domain_size = self.input_stimuli.domain_size();
        if let Some(&bit) = iteration
            .input_bits
            .iter()
            .find(|&&bit| bit >= domain_size as usize)
        {
            return Err(LearningError::InputBitOutOfRange { bit, domain_size });
        }

        for (source, targets) in &iteration.areas_to_areas {
            if targets.is_empty() {
                continue;
            }
            if !self.known_areas.contains(source) {
                return Err(LearningError::UnknownArea(source.clone()));
            }
            if !self.written_areas.contains(source) {
                return Err(LearningError::AreaReadBeforeWritten {
                    area: source.clone(),
                    iteration: position,
                });
            }
            if let Some(target) = targets.iter().find(|t| !self.known_areas.contains(*t)) {
                return Err(LearningError::UnknownArea(target.clone()));
            }
        }

        let written: Vec<String> = iteration
            .targets(&self.input_stimuli)
            .map(str::to_string)
            .collect();
        self.written_areas.extend(written);

        debug!(
            target: "asmlearn-training",
            "Added iteration {}: bits={:?}, projections={:?}, runs={}",
            position,
            iteration.input_bits,
            iteration.areas_to_areas,
            iteration.consecutive_runs
        );
        self.iterations.push(iteration);
        Ok(self)
    }

    pub fn iterations(&self) -> &[Iteration] {
        &self.iterations
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn input_stimuli(&self) -> &InputStimuli {
        &self.input_stimuli
    }

    pub fn encoder(&self) -> &DomainEncoder {
        self.input_stimuli.encoder()
    }

    pub fn domain_size(&self) -> u32 {
        self.input_stimuli.domain_size()
    }

    pub fn output_area(&self) -> &str {
        &self.output_area
    }

    /// Areas read or written by any iteration
    pub fn referenced_areas(&self) -> AHashSet<&str> {
        let mut areas: AHashSet<&str> = self.written_areas.iter().map(String::as_str).collect();
        areas.extend(
            self.iterations
                .iter()
                .flat_map(|it| it.areas_to_areas.keys())
                .map(String::as_str),
        );
        areas
    }

    /// True when some iteration projects into the output area
    pub fn reaches_output(&self) -> bool {
        self.written_areas.contains(&self.output_area)
    }

    /// Total number of projection steps per replay
    pub fn step_count(&self) -> usize {
        self.iterations.iter().map(|it| it.consecutive_runs).sum()
    }

    /// Every replay step in order, each iteration repeated `consecutive_runs`
    /// times. Derived from the stored iterations on every call.
    pub fn steps(&self) -> impl Iterator<Item = SequenceStep<'_>> + '_ {
        self.iterations
            .iter()
            .enumerate()
            .flat_map(|(iteration, definition)| {
                (0..definition.consecutive_runs).map(move |run| (iteration, run, definition))
            })
            .enumerate()
            .map(|(index, (iteration, run, definition))| SequenceStep {
                index,
                iteration,
                run,
                definition,
            })
    }

    /// Fully resolved projections for `value`, in replay order
    pub fn iterate(
        &self,
        value: DomainValue,
    ) -> LearningResult<impl Iterator<Item = LearningResult<Projection>> + '_> {
        self.encoder().check(value)?;
        Ok(self
            .steps()
            .map(move |step| step.resolve(&self.input_stimuli, value)))
    }

    pub fn connections_graph(&self) -> ConnectionsGraph {
        ConnectionsGraph::from_steps(self.steps(), &self.input_stimuli)
    }

    /// Render the connections graph as Graphviz DOT text and log it
    pub fn display_connections_graph(&self) -> String {
        let dot = self.connections_graph().to_dot();
        info!(target: "asmlearn-training", "Learning sequence connections:\n{}", dot);
        dot
    }
}
