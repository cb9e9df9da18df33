// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Classification metrics of a test run

use std::fmt;

use serde::Serialize;

use crate::encoder::Label;

/// Immutable summary of one `test_model` call.
///
/// Index lists hold sample positions in data-set iteration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResults {
    accuracy: f64,
    precision: f64,
    recall: f64,
    true_positive: Vec<usize>,
    false_positive: Vec<usize>,
    true_negative: Vec<usize>,
    false_negative: Vec<usize>,
}

impl TestResults {
    /// Score `(predicted, expected)` pairs given in sample order
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (Label, Label)>,
    {
        let mut accumulator = ConfusionAccumulator::default();
        for (predicted, expected) in outcomes {
            accumulator.record(predicted, expected);
        }
        accumulator.finish()
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn recall(&self) -> f64 {
        self.recall
    }

    pub fn true_positive(&self) -> &[usize] {
        &self.true_positive
    }

    pub fn false_positive(&self) -> &[usize] {
        &self.false_positive
    }

    pub fn true_negative(&self) -> &[usize] {
        &self.true_negative
    }

    pub fn false_negative(&self) -> &[usize] {
        &self.false_negative
    }

    /// Number of scored samples
    pub fn total(&self) -> usize {
        self.true_positive.len()
            + self.false_positive.len()
            + self.true_negative.len()
            + self.false_negative.len()
    }
}

impl fmt::Display for TestResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accuracy={:.4} precision={:.4} recall={:.4} (tp={}, fp={}, tn={}, fn={})",
            self.accuracy,
            self.precision,
            self.recall,
            self.true_positive.len(),
            self.false_positive.len(),
            self.true_negative.len(),
            self.false_negative.len()
        )
    }
}

/// Builds [`TestResults`] one sample at a time
#[derive(Debug, Default)]
pub(crate) struct ConfusionAccumulator {
    next_index: usize,
    true_positive: Vec<usize>,
    false_positive: Vec<usize>,
    true_negative: Vec<usize>,
    false_negative: Vec<usize>,
}

impl ConfusionAccumulator {
    pub(crate) fn record(&mut self, predicted: Label, expected: Label) {
        let index = self.next_index;
        self.next_index += 1;
        match (predicted != 0, expected != 0) {
            (true, true) => self.true_positive.push(index),
            (true, false) => self.false_positive.push(index),
            (false, false) => self.true_negative.push(index),
            (false, true) => self.false_negative.push(index),
        }
    }

    pub(crate) fn finish(self) -> TestResults {
        let tp = self.true_positive.len();
        let fp = self.false_positive.len();
        let tn = self.true_negative.len();
        let fn_ = self.false_negative.len();

        TestResults {
            accuracy: ratio(tp + tn, tp + fp + tn + fn_),
            precision: ratio(tp, tp + fp),
            recall: ratio(tp, tp + fn_),
            true_positive: self.true_positive,
            false_positive: self.false_positive,
            true_negative: self.true_negative,
            false_negative: self.false_negative,
        }
    }
}

/// `numerator / denominator`, 0 when the denominator is 0
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
