// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for learning tasks

mod common;

use asmlearn_brain::Brain;
use asmlearn_training::{
    create_training_set_from_list, DataSet, LearningError, LearningTask,
};
use common::{two_bit_brain, two_bit_sequence, SEED};

fn task_with_labels(labels: &[u8]) -> LearningTask<asmlearn_brain::NonLazyBrain> {
    let mut task = LearningTask::new(two_bit_brain(SEED), 2).unwrap();
    let sequence = two_bit_sequence(task.brain_mut());
    task.set_sequence(sequence).unwrap();
    task.set_training_set(create_training_set_from_list(labels, 4, 0.0).unwrap())
        .unwrap();
    task
}

#[test]
fn test_opposite_labels_give_opposite_models() {
    let mut even = task_with_labels(&[0, 1, 0, 1]).create_model(50).unwrap();
    let mut odd = task_with_labels(&[1, 0, 1, 0]).create_model(50).unwrap();

    for value in 0..4 {
        let a = even.run_model(value).unwrap();
        let b = odd.run_model(value).unwrap();
        assert_ne!(a, b, "models agree on value {}", value);
        assert_eq!(a, (value % 2) as u8);
    }
}

#[test]
fn test_create_model_leaves_prototype_untrained() {
    let task = task_with_labels(&[0, 1, 0, 1]);
    let before = task.brain().snapshot();

    let model = task.create_model(5).unwrap();

    assert_eq!(task.brain().snapshot(), before);
    assert_ne!(model.brain().snapshot(), before);
}

#[test]
fn test_create_model_requires_every_component() {
    let mut task = LearningTask::new(two_bit_brain(SEED), 2).unwrap();
    assert_eq!(
        task.create_model(1).err().unwrap(),
        LearningError::MissingComponent("sequence")
    );

    let sequence = two_bit_sequence(task.brain_mut());
    task.set_sequence(sequence).unwrap();
    assert_eq!(
        task.create_model(1).err().unwrap(),
        LearningError::MissingComponent("training set")
    );
}

#[test]
fn test_components_must_share_domain_size() {
    let mut task = LearningTask::new(two_bit_brain(SEED), 3).unwrap();
    let sequence = two_bit_sequence(task.brain_mut());

    assert_eq!(
        task.set_sequence(sequence).unwrap_err(),
        LearningError::DomainSizeConflict {
            component: "sequence",
            expected: 3,
            actual: 2,
        }
    );
    assert!(task
        .set_training_set(DataSet::from_labels(vec![0, 1, 0, 1]).unwrap())
        .is_err());
    assert!(task
        .set_training_set(DataSet::from_labels(vec![0, 1, 0, 1, 1, 0, 1, 0]).unwrap())
        .is_ok());
}
