// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for assembly formation in the reference simulator

use asmlearn_brain::{Brain, BrainParams, NonLazyBrain, Projection};
use proptest::prelude::*;

fn brain_with_seed(seed: u64) -> NonLazyBrain {
    let mut brain = NonLazyBrain::new(BrainParams {
        p: 0.3,
        seed: Some(seed),
        output_plasticity: 0.1,
    })
    .unwrap();
    brain.add_stimulus("s0", 10).unwrap();
    brain.add_stimulus("s1", 10).unwrap();
    brain.add_area("A", 200, 10, 0.1).unwrap();
    brain.add_area("C", 200, 10, 0.1).unwrap();
    brain.add_output_area("Output").unwrap();
    brain
}

fn stimulate(stimulus: &str) -> Projection {
    let mut projection = Projection::new();
    projection.add_stimulus(stimulus, "A");
    projection
}

#[test]
fn test_repeated_stimulation_keeps_the_same_assembly() {
    let mut brain = brain_with_seed(1);
    brain.project(&stimulate("s0")).unwrap();
    let first = brain.winners("A").unwrap().to_vec();

    for _ in 0..10 {
        brain.project(&stimulate("s0")).unwrap();
        assert_eq!(brain.winners("A").unwrap(), first.as_slice());
    }
}

#[test]
fn test_distinct_stimuli_form_distinct_assemblies() {
    let mut brain = brain_with_seed(2);
    brain.project(&stimulate("s0")).unwrap();
    let first = brain.winners("A").unwrap().to_vec();
    brain.project(&stimulate("s1")).unwrap();
    let second = brain.winners("A").unwrap().to_vec();

    assert_ne!(first, second);
}

#[test]
fn test_chained_projection_reads_previous_winners() {
    let mut brain = brain_with_seed(3);
    brain.project(&stimulate("s0")).unwrap();

    let mut projection = Projection::new();
    projection.add_area("A", "C").add_area("C", "Output");
    // C has no winners yet, so reading from it must fail
    assert!(brain.project(&projection).is_err());

    let mut projection = Projection::new();
    projection.add_area("A", "C");
    brain.project(&projection).unwrap();
    assert_eq!(brain.winners("C").unwrap().len(), 10);

    let mut projection = Projection::new();
    projection.add_area("C", "Output");
    brain.project(&projection).unwrap();
    assert_eq!(brain.winners("Output").unwrap().len(), 1);
}

proptest! {
    #[test]
    fn prop_winner_count_matches_area(seed in 0u64..64) {
        let mut brain = brain_with_seed(seed);
        brain.project(&stimulate("s1")).unwrap();
        prop_assert_eq!(brain.winners("A").unwrap().len(), 10);
    }
}
