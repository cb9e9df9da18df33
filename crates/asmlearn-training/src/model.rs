// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Train / run / test protocol
//!
//! Every sample is handled by replaying the learning sequence against the
//! simulator. Training keeps the plasticity of the replay; inference and
//! testing run inside a [`PlasticStateGuard`] that rolls the simulator back
//! afterwards, so they never perturb trained weights.
//!
//! Readout: the output area has two neurons and one winner, and the predicted
//! label is the index of that winner. During training the output winner is
//! pinned to the expected label on every step that projects into the output
//! area, so Hebbian plasticity binds the firing assemblies to the label.

use asmlearn_brain::{Brain, OUTPUT_AREA_SIZE};
use tracing::{debug, info};

use crate::data_set::DataSet;
use crate::encoder::{DomainValue, Label};
use crate::error::{LearningError, LearningResult};
use crate::replay::PlasticStateGuard;
use crate::results::{ConfusionAccumulator, TestResults};
use crate::sequence::LearningSequence;

/// A simulator driven by a learning sequence
pub struct LearningModel<B: Brain> {
    brain: B,
    sequence: LearningSequence,
}

impl<B: Brain> LearningModel<B> {
    /// Bind `sequence` to `brain`, checking that every name the sequence
    /// uses exists in this brain
    pub fn new(brain: B, sequence: LearningSequence) -> LearningResult<Self> {
        let output_area = brain
            .output_area()
            .ok_or(LearningError::MissingOutputArea)?;
        if output_area != sequence.output_area() {
            return Err(LearningError::OutputAreaMismatch {
                sequence: sequence.output_area().to_string(),
                brain: output_area.to_string(),
            });
        }
        if !sequence.reaches_output() {
            return Err(LearningError::OutputNotReached(output_area.to_string()));
        }
        if let Some(area) = sequence
            .referenced_areas()
            .into_iter()
            .find(|area| !brain.has_area(area))
        {
            return Err(LearningError::UnknownArea(area.to_string()));
        }
        if let Some(stimulus) = sequence
            .input_stimuli()
            .stimulus_names()
            .find(|name| !brain.has_stimulus(name))
        {
            return Err(LearningError::UnknownStimulus(stimulus.to_string()));
        }

        Ok(Self { brain, sequence })
    }

    pub fn brain(&self) -> &B {
        &self.brain
    }

    pub fn into_brain(self) -> B {
        self.brain
    }

    pub fn sequence(&self) -> &LearningSequence {
        &self.sequence
    }

    pub fn domain_size(&self) -> u32 {
        self.sequence.domain_size()
    }

    /// Predict the label of `domain_value` without changing the simulator
    pub fn run_model(&mut self, domain_value: DomainValue) -> LearningResult<Label> {
        self.sequence.encoder().check(domain_value)?;

        let mut brain = PlasticStateGuard::new(&mut self.brain);
        replay(&mut *brain, &self.sequence, domain_value, None)?;
        read_label(&*brain, self.sequence.output_area())
    }

    /// Replay every pair of `training_set`, `number_of_sequence_cycles` times,
    /// keeping the resulting plasticity
    pub fn train_model(
        &mut self,
        training_set: &DataSet,
        number_of_sequence_cycles: usize,
    ) -> LearningResult<()> {
        self.check_domain("training set", training_set)?;
        info!(
            target: "asmlearn-training",
            "Training for {} cycles over {} samples",
            number_of_sequence_cycles,
            training_set.len()
        );

        for cycle in 0..number_of_sequence_cycles {
            let mut samples = 0usize;
            for (domain_value, expected_label) in training_set {
                self.train_sample(domain_value, expected_label)?;
                samples += 1;
            }
            debug!(
                target: "asmlearn-training",
                "Cycle {}/{} done ({} samples)",
                cycle + 1,
                number_of_sequence_cycles,
                samples
            );
        }
        Ok(())
    }

    fn train_sample(&mut self, domain_value: DomainValue, expected_label: Label) -> LearningResult<()> {
        self.sequence.encoder().check(domain_value)?;

        // A replay that fails half way rolls back instead of leaving
        // partially applied plasticity behind
        let mut brain = PlasticStateGuard::new(&mut self.brain);
        replay(&mut *brain, &self.sequence, domain_value, Some(expected_label))?;
        brain.commit();
        Ok(())
    }

    /// Score the model on every pair of `test_set` without changing the
    /// simulator
    pub fn test_model(&mut self, test_set: &DataSet) -> LearningResult<TestResults> {
        self.check_domain("test set", test_set)?;

        let mut accumulator = ConfusionAccumulator::default();
        for (domain_value, expected_label) in test_set {
            let predicted = self.run_model(domain_value)?;
            debug!(
                target: "asmlearn-training",
                "Sample {}: predicted {} expected {}",
                domain_value,
                predicted,
                expected_label
            );
            accumulator.record(predicted, expected_label);
        }

        let results = accumulator.finish();
        info!(target: "asmlearn-training", "Test results: {}", results);
        Ok(results)
    }

    fn check_domain(&self, component: &'static str, data_set: &DataSet) -> LearningResult<()> {
        if data_set.domain_size() != self.domain_size() {
            return Err(LearningError::DomainSizeConflict {
                component,
                expected: self.domain_size(),
                actual: data_set.domain_size(),
            });
        }
        Ok(())
    }
}

/// Project every step of `sequence` for `domain_value`. With `supervision`,
/// the output area's winner is pinned to that label.
fn replay<B: Brain>(
    brain: &mut B,
    sequence: &LearningSequence,
    domain_value: DomainValue,
    supervision: Option<Label>,
) -> LearningResult<()> {
    let output_area = sequence.output_area();
    for projection in sequence.iterate(domain_value)? {
        let mut projection = projection?;
        if let Some(label) = supervision {
            if projection.targets().contains(output_area) {
                projection.fix_winners(output_area, vec![label as usize]);
            }
        }
        brain.project(&projection)?;
    }
    Ok(())
}

fn read_label<B: Brain>(brain: &B, output_area: &str) -> LearningResult<Label> {
    match brain.winners(output_area)? {
        [winner] if *winner < OUTPUT_AREA_SIZE => Ok(*winner as Label),
        winners => Err(LearningError::UnreadableOutput {
            area: output_area.to_string(),
            winners: winners.to_vec(),
        }),
    }
}
