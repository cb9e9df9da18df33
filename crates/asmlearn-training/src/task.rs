// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Learning tasks: one untouched prototype brain, many trained models

use asmlearn_brain::Brain;
use tracing::info;

use crate::data_set::DataSet;
use crate::encoder::DomainEncoder;
use crate::error::{LearningError, LearningResult};
use crate::model::LearningModel;
use crate::sequence::LearningSequence;

/// Bundles a prototype brain with the sequence and training set used to
/// produce trained models. The prototype itself is never trained.
pub struct LearningTask<B: Brain + Clone> {
    brain: B,
    encoder: DomainEncoder,
    sequence: Option<LearningSequence>,
    training_set: Option<DataSet>,
}

impl<B: Brain + Clone> LearningTask<B> {
    pub fn new(brain: B, domain_size: u32) -> LearningResult<Self> {
        Ok(Self {
            brain,
            encoder: DomainEncoder::new(domain_size)?,
            sequence: None,
            training_set: None,
        })
    }

    pub fn domain_size(&self) -> u32 {
        self.encoder.domain_size()
    }

    pub fn brain(&self) -> &B {
        &self.brain
    }

    /// Prototype brain, e.g. to declare input stimuli before building a
    /// sequence
    pub fn brain_mut(&mut self) -> &mut B {
        &mut self.brain
    }

    pub fn set_sequence(&mut self, sequence: LearningSequence) -> LearningResult<()> {
        self.check_domain("sequence", sequence.domain_size())?;
        self.sequence = Some(sequence);
        Ok(())
    }

    pub fn set_training_set(&mut self, training_set: DataSet) -> LearningResult<()> {
        self.check_domain("training set", training_set.domain_size())?;
        self.training_set = Some(training_set);
        Ok(())
    }

    pub fn sequence(&self) -> Option<&LearningSequence> {
        self.sequence.as_ref()
    }

    pub fn training_set(&self) -> Option<&DataSet> {
        self.training_set.as_ref()
    }

    /// Train a fresh copy of the prototype brain and return the model
    pub fn create_model(&self, number_of_sequence_cycles: usize) -> LearningResult<LearningModel<B>> {
        let sequence = self
            .sequence
            .as_ref()
            .ok_or(LearningError::MissingComponent("sequence"))?;
        let training_set = self
            .training_set
            .as_ref()
            .ok_or(LearningError::MissingComponent("training set"))?;

        let mut model = LearningModel::new(self.brain.clone(), sequence.clone())?;
        model.train_model(training_set, number_of_sequence_cycles)?;
        info!(
            target: "asmlearn-training",
            "Created model trained for {} cycles",
            number_of_sequence_cycles
        );
        Ok(model)
    }

    fn check_domain(&self, component: &'static str, actual: u32) -> LearningResult<()> {
        if actual != self.domain_size() {
            return Err(LearningError::DomainSizeConflict {
                component,
                expected: self.domain_size(),
                actual,
            });
        }
        Ok(())
    }
}
