// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simplified simulation: learn `f(x) = x mod 2` over a 2-bit domain.
//!
//! ```text
//! Input bit 0    Input bit 1
//!      |              |
//!   Area A         Area B
//!        \         /
//!          Area C
//!            |
//!          Output
//! ```
//!
//! Every sample replays:
//! 1. bit 0 -> A, bit 1 -> B
//! 2. twice: bit 0 -> A, bit 1 -> B, A -> A, B -> B
//! 3. [A, B] -> C
//! 4. twice: [A, B, C] -> C
//! 5. C -> Output

use asmlearn_config::AsmlearnConfig;
use asmlearn_training::{
    create_test_set_from_list, create_training_set_from_list, DataSet, InputStimuli, Iteration,
    Label, LearningModel, LearningResult, LearningSequence,
};
use tracing::debug;

use crate::brain::{Brain, BrainParams, NonLazyBrain};

/// Labels of `f(x) = x mod 2`, indexed by domain value
pub const LOWEST_BIT_LABELS: [Label; 4] = [0, 1, 0, 1];

/// Brain with areas A, B, C and the output area, sized by `config`
pub fn simplified_brain(config: &AsmlearnConfig) -> LearningResult<NonLazyBrain> {
    let brain_config = &config.brain;
    let mut brain = NonLazyBrain::new(BrainParams {
        p: brain_config.p,
        seed: brain_config.seed,
        output_plasticity: brain_config.output_plasticity,
    })?;
    for area in ["A", "B", "C"] {
        brain.add_area(
            area,
            brain_config.area_size,
            brain_config.winners,
            brain_config.plasticity,
        )?;
    }
    brain.add_output_area("Output")?;
    Ok(brain)
}

/// Declare the input stimuli on `brain` and build the replayed sequence
pub fn simplified_sequence(
    brain: &mut NonLazyBrain,
    stimulus_size: usize,
) -> LearningResult<LearningSequence> {
    let input_stimuli = InputStimuli::new(&mut *brain, stimulus_size, &["A", "B"])?;
    let mut sequence = LearningSequence::new(&*brain, &input_stimuli)?;
    sequence
        .add_iteration(Iteration::new().with_input_bits([0, 1]))?
        .add_iteration(
            Iteration::new()
                .with_input_bits([0, 1])
                .with_projection("A", ["A"])
                .with_projection("B", ["B"])
                .with_consecutive_runs(2),
        )?
        .add_iteration(
            Iteration::new()
                .with_projection("A", ["C"])
                .with_projection("B", ["C"]),
        )?
        .add_iteration(
            Iteration::new()
                .with_projection("A", ["C"])
                .with_projection("B", ["C"])
                .with_projection("C", ["C"])
                .with_consecutive_runs(2),
        )?
        .add_iteration(Iteration::new().with_projection("C", ["Output"]))?;
    Ok(sequence)
}

/// Untrained model of the simplified simulation
pub fn simplified_model(config: &AsmlearnConfig) -> LearningResult<LearningModel<NonLazyBrain>> {
    let mut brain = simplified_brain(config)?;
    let sequence = simplified_sequence(&mut brain, config.brain.stimulus_size)?;
    debug!(
        target: "asmlearn",
        "Simplified simulation: {} areas, {} projection steps",
        brain.area_names().len(),
        sequence.step_count()
    );
    LearningModel::new(brain, sequence)
}

/// Training set of [`LOWEST_BIT_LABELS`] with the configured length and noise
pub fn simplified_training_set(config: &AsmlearnConfig) -> LearningResult<DataSet> {
    let training = &config.training;
    let length = training
        .training_set_length
        .unwrap_or(LOWEST_BIT_LABELS.len());
    let training_set =
        create_training_set_from_list(&LOWEST_BIT_LABELS, length, training.noise_probability)?;
    Ok(match training.noise_seed {
        Some(seed) => training_set.with_noise_seed(seed),
        None => training_set,
    })
}

/// Every domain value once, noise free
pub fn simplified_test_set() -> LearningResult<DataSet> {
    create_test_set_from_list(&LOWEST_BIT_LABELS, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> AsmlearnConfig {
        let mut config = AsmlearnConfig::default();
        config.brain.area_size = 100;
        config.brain.winners = 10;
        config.brain.stimulus_size = 20;
        config.brain.seed = Some(1);
        config
    }

    #[test]
    fn test_sequence_replays_recurrent_steps() {
        let config = small_config();
        let model = simplified_model(&config).unwrap();
        let sequence = model.sequence();

        assert_eq!(sequence.iterations().len(), 5);
        assert_eq!(sequence.step_count(), 7);
        assert_eq!(sequence.output_area(), "Output");

        let dot = sequence.connections_graph().to_dot();
        assert!(dot.contains("\"A\" -> \"A\""));
        assert!(dot.contains("\"C\" -> \"C\""));
        assert!(dot.contains("\"C\" -> \"Output\""));
    }

    #[test]
    fn test_training_set_follows_configuration() {
        let mut config = small_config();
        config.training.training_set_length = Some(40);
        config.training.noise_probability = 0.0;

        let training_set = simplified_training_set(&config).unwrap();
        assert_eq!(training_set.len(), 40);
        let labels: Vec<Label> = training_set.iter().map(|(_, label)| label).collect();
        assert!(labels
            .iter()
            .enumerate()
            .all(|(i, &label)| label == LOWEST_BIT_LABELS[i % 4]));

        config.training.training_set_length = None;
        assert_eq!(simplified_training_set(&config).unwrap().len(), 4);
    }
}
