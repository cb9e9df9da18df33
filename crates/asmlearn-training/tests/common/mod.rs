// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures for training integration tests

#![allow(dead_code)]

use asmlearn_brain::{
    Brain, BrainError, BrainParams, BrainResult, NonLazyBrain, Projection,
};
use asmlearn_training::{InputStimuli, Iteration, LearningModel, LearningSequence};

pub const SEED: u64 = 7;

/// Two input areas feeding a two-neuron output area
pub fn two_bit_brain(seed: u64) -> NonLazyBrain {
    let mut brain = NonLazyBrain::new(BrainParams {
        p: 0.3,
        seed: Some(seed),
        output_plasticity: 0.1,
    })
    .unwrap();
    brain.add_area("A", 200, 10, 0.1).unwrap();
    brain.add_area("B", 200, 10, 0.1).unwrap();
    brain.add_output_area("Output").unwrap();
    brain
}

/// Encode both bits, then project both input areas into the output
pub fn two_bit_sequence<B: Brain>(brain: &mut B) -> LearningSequence {
    let input_stimuli = InputStimuli::new(brain, 10, &["A", "B"]).unwrap();
    let mut sequence = LearningSequence::new(brain, &input_stimuli).unwrap();
    sequence
        .add_iteration(Iteration::new().with_input_bits([0, 1]))
        .unwrap()
        .add_iteration(
            Iteration::new()
                .with_projection("A", ["Output"])
                .with_projection("B", ["Output"]),
        )
        .unwrap();
    sequence
}

pub fn two_bit_model(seed: u64) -> LearningModel<NonLazyBrain> {
    let mut brain = two_bit_brain(seed);
    let sequence = two_bit_sequence(&mut brain);
    LearningModel::new(brain, sequence).unwrap()
}

/// Simulator double that records every projection it runs. Output winners
/// are the pinned label when one is given, neuron 0 otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecordingBrain {
    pub areas: Vec<String>,
    pub stimuli: Vec<String>,
    pub output_area: Option<String>,
    pub projections: Vec<Projection>,
    winners: Vec<(String, Vec<usize>)>,
}

impl RecordingBrain {
    fn set_winners(&mut self, area: &str, winners: Vec<usize>) {
        match self.winners.iter_mut().find(|(name, _)| name == area) {
            Some((_, current)) => *current = winners,
            None => self.winners.push((area.to_string(), winners)),
        }
    }
}

impl Brain for RecordingBrain {
    type Snapshot = (Vec<Projection>, Vec<(String, Vec<usize>)>);

    fn add_area(&mut self, name: &str, _size: usize, _winners: usize, _plasticity: f32) -> BrainResult<()> {
        self.areas.push(name.to_string());
        Ok(())
    }

    fn add_stimulus(&mut self, name: &str, _size: usize) -> BrainResult<()> {
        self.stimuli.push(name.to_string());
        Ok(())
    }

    fn add_output_area(&mut self, name: &str) -> BrainResult<()> {
        self.areas.push(name.to_string());
        self.output_area = Some(name.to_string());
        Ok(())
    }

    fn has_area(&self, name: &str) -> bool {
        self.areas.iter().any(|area| area == name)
    }

    fn has_stimulus(&self, name: &str) -> bool {
        self.stimuli.iter().any(|stimulus| stimulus == name)
    }

    fn output_area(&self) -> Option<&str> {
        self.output_area.as_deref()
    }

    fn area_names(&self) -> Vec<String> {
        self.areas.clone()
    }

    fn project(&mut self, projection: &Projection) -> BrainResult<()> {
        for target in projection.targets() {
            let winners = match projection.fixed_winners(target) {
                Some(fixed) => fixed.to_vec(),
                None if Some(target) == self.output_area.as_deref() => vec![0],
                None => vec![0, 1, 2],
            };
            self.set_winners(target, winners);
        }
        self.projections.push(projection.clone());
        Ok(())
    }

    fn winners(&self, area: &str) -> BrainResult<&[usize]> {
        self.winners
            .iter()
            .find(|(name, _)| name == area)
            .map(|(_, winners)| winners.as_slice())
            .ok_or_else(|| BrainError::NoWinners(area.to_string()))
    }

    fn snapshot(&self) -> Self::Snapshot {
        (self.projections.clone(), self.winners.clone())
    }

    fn restore(&mut self, snapshot: Self::Snapshot) -> BrainResult<()> {
        (self.projections, self.winners) = snapshot;
        Ok(())
    }
}

pub fn recording_brain() -> RecordingBrain {
    let mut brain = RecordingBrain::default();
    brain.add_area("A", 10, 3, 0.1).unwrap();
    brain.add_area("B", 10, 3, 0.1).unwrap();
    brain.add_output_area("Output").unwrap();
    brain
}
