// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Labeled data sets
//!
//! A [`DataSet`] is a restartable stream of `(domain value, expected label)`
//! pairs. Domain values come out in increasing order, skipping masked-out
//! values. Each call to [`DataSet::iter`] draws a fresh label-noise stream,
//! so training cycles never see the same corruption twice.

mod constructors;
mod mask;

pub use constructors::{
    create_data_set_from_fn, create_data_set_from_list, create_explicit_mask_from_list,
    create_test_set_from_list, create_training_set_from_list,
};
pub use mask::Mask;

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::encoder::{DomainEncoder, DomainValue, Label};
use crate::error::{LearningError, LearningResult};

/// Label function over the domain; any non-zero result means label 1
pub type LabelFn = Arc<dyn Fn(DomainValue) -> Label + Send + Sync>;

/// Where expected labels come from
#[derive(Clone)]
pub enum LabelSource {
    /// One label per domain value, in increasing order
    Explicit(Vec<Label>),
    Function(LabelFn),
}

impl fmt::Debug for LabelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelSource::Explicit(labels) => f.debug_tuple("Explicit").field(labels).finish(),
            LabelSource::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl LabelSource {
    fn label(&self, value: DomainValue) -> Label {
        match self {
            LabelSource::Explicit(labels) => labels[value as usize],
            LabelSource::Function(function) => (function(value) != 0) as Label,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataSet {
    encoder: DomainEncoder,
    labels: LabelSource,
    noise_probability: f64,
    mask: Mask,
    length: Option<usize>,
    /// Seeds the noise of each iteration when noise is reproducible
    pass_seeds: RefCell<Option<StdRng>>,
}

impl DataSet {
    /// Data set over the domain whose size is `labels.len()`
    pub fn from_labels(labels: Vec<Label>) -> LearningResult<Self> {
        let encoder = DomainEncoder::for_domain_len(labels.len())?;
        if let Some((value, &label)) = labels.iter().enumerate().find(|(_, &l)| l > 1) {
            return Err(LearningError::InvalidLabel {
                value: value as DomainValue,
                label,
            });
        }
        Self::build(encoder, LabelSource::Explicit(labels))
    }

    /// Data set labelled by `function` over a `domain_size`-bit domain
    pub fn from_fn<F>(domain_size: u32, function: F) -> LearningResult<Self>
    where
        F: Fn(DomainValue) -> Label + Send + Sync + 'static,
    {
        let encoder = DomainEncoder::new(domain_size)?;
        Self::build(encoder, LabelSource::Function(Arc::new(function)))
    }

    fn build(encoder: DomainEncoder, labels: LabelSource) -> LearningResult<Self> {
        Ok(Self {
            mask: Mask::full(encoder.domain_size())?,
            encoder,
            labels,
            noise_probability: 0.0,
            length: None,
            pass_seeds: RefCell::new(None),
        })
    }

    /// Flip each emitted label independently with probability `noise_probability`
    pub fn with_noise(mut self, noise_probability: f64) -> LearningResult<Self> {
        if !(0.0..=1.0).contains(&noise_probability) {
            return Err(LearningError::InvalidNoiseProbability(noise_probability));
        }
        self.noise_probability = noise_probability;
        Ok(self)
    }

    /// Restrict emitted values to those `mask` selects
    pub fn with_mask(mut self, mask: Mask) -> LearningResult<Self> {
        if mask.len() != self.encoder.domain_len() {
            return Err(LearningError::MaskLengthMismatch {
                expected: self.encoder.domain_len(),
                actual: mask.len(),
            });
        }
        if mask.selected_count() == 0 {
            warn!(target: "asmlearn-training", "Mask selects no domain value; data set is empty");
        }
        self.mask = mask;
        Ok(self)
    }

    /// Emit exactly `length` pairs, cycling over the selected values
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Make label noise reproducible. Successive iterations still draw
    /// different noise.
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.pass_seeds = RefCell::new(Some(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn encoder(&self) -> &DomainEncoder {
        &self.encoder
    }

    pub fn domain_size(&self) -> u32 {
        self.encoder.domain_size()
    }

    pub fn noise_probability(&self) -> f64 {
        self.noise_probability
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Number of pairs one iteration emits
    pub fn len(&self) -> usize {
        let selected = self.mask.selected_count();
        if selected == 0 {
            return 0;
        }
        self.length.unwrap_or(selected)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Noise-free label of `value`
    pub fn expected_label(&self, value: DomainValue) -> LearningResult<Label> {
        self.encoder.check(value)?;
        Ok(self.labels.label(value))
    }

    pub fn iter(&self) -> DataSetIter<'_> {
        let rng = match self.pass_seeds.borrow_mut().as_mut() {
            Some(seeds) => StdRng::seed_from_u64(seeds.gen()),
            None => StdRng::from_entropy(),
        };
        DataSetIter {
            data_set: self,
            cursor: 0,
            emitted: 0,
            limit: self.len(),
            rng,
        }
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = (DomainValue, Label);
    type IntoIter = DataSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over a [`DataSet`]; `None` marks exhaustion
pub struct DataSetIter<'a> {
    data_set: &'a DataSet,
    cursor: DomainValue,
    emitted: usize,
    limit: usize,
    rng: StdRng,
}

impl DataSetIter<'_> {
    fn next_selected(&mut self) -> DomainValue {
        let domain_len = self.data_set.encoder.domain_len() as DomainValue;
        loop {
            let value = self.cursor;
            self.cursor = (self.cursor + 1) % domain_len;
            if self.data_set.mask.is_selected(value) {
                return value;
            }
        }
    }
}

impl Iterator for DataSetIter<'_> {
    type Item = (DomainValue, Label);

    fn next(&mut self) -> Option<Self::Item> {
        // limit > 0 implies the mask selects something, so the scan ends
        if self.emitted >= self.limit {
            return None;
        }
        self.emitted += 1;

        let value = self.next_selected();
        let mut label = self.data_set.labels.label(value);
        let p = self.data_set.noise_probability;
        if p > 0.0 && self.rng.gen_bool(p) {
            label ^= 1;
        }
        Some((value, label))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.limit - self.emitted;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DataSetIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_emits_values_in_order_then_ends() {
        let data_set = DataSet::from_labels(vec![0, 1, 0, 1]).unwrap();
        let pairs: Vec<_> = data_set.iter().collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 0), (3, 1)]);

        let mut iter = data_set.iter();
        assert_eq!(iter.len(), 4);
        iter.by_ref().for_each(drop);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_restartable() {
        let data_set = DataSet::from_labels(vec![1, 1, 0, 0]).unwrap();
        let first: Vec<_> = data_set.iter().collect();
        let second: Vec<_> = (&data_set).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mask_skips_values() {
        let data_set = DataSet::from_labels(vec![0, 1, 0, 1])
            .unwrap()
            .with_mask(Mask::from_list(&[1, 1, 1, 0]))
            .unwrap();
        let values: Vec<_> = data_set.iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(data_set.len(), 3);
    }

    #[test]
    fn test_mask_length_mismatch() {
        let result = DataSet::from_labels(vec![0, 1, 0, 1])
            .unwrap()
            .with_mask(Mask::from_list(&[1, 1]));
        assert_eq!(
            result.unwrap_err(),
            LearningError::MaskLengthMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_empty_mask_yields_nothing() {
        let data_set = DataSet::from_labels(vec![0, 1])
            .unwrap()
            .with_mask(Mask::from_list(&[0, 0]))
            .unwrap()
            .with_length(10);
        assert!(data_set.is_empty());
        assert_eq!(data_set.iter().count(), 0);
    }

    #[test]
    fn test_length_cycles_selected_values() {
        let data_set = DataSet::from_labels(vec![0, 1, 1, 0])
            .unwrap()
            .with_mask(Mask::from_list(&[0, 1, 1, 0]))
            .unwrap()
            .with_length(5);
        let values: Vec<_> = data_set.iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            DataSet::from_labels(vec![0, 1, 0]).unwrap_err(),
            LearningError::InvalidLabelCount(3)
        );
        assert_eq!(
            DataSet::from_labels(vec![0, 2]).unwrap_err(),
            LearningError::InvalidLabel { value: 1, label: 2 }
        );
        assert_eq!(
            DataSet::from_labels(vec![0, 1])
                .unwrap()
                .with_noise(1.5)
                .unwrap_err(),
            LearningError::InvalidNoiseProbability(1.5)
        );
        assert!(DataSet::from_fn(0, |v| v as Label).is_err());
    }

    #[test]
    fn test_label_function() {
        // parity of the number of set bits
        let data_set = DataSet::from_fn(2, |v| (v.count_ones() % 2) as Label).unwrap();
        let labels: Vec<_> = data_set.iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec![0, 1, 1, 0]);

        let identity = DataSet::from_fn(1, |v| v as Label * 7).unwrap();
        assert_eq!(identity.expected_label(1).unwrap(), 1);
        assert!(identity.expected_label(2).is_err());
    }

    #[test]
    fn test_seeded_noise_varies_between_iterations() {
        let data_set = DataSet::from_fn(6, |_| 0)
            .unwrap()
            .with_noise(0.5)
            .unwrap()
            .with_noise_seed(9);
        let first: Vec<_> = data_set.iter().map(|(_, l)| l).collect();
        let second: Vec<_> = data_set.iter().map(|(_, l)| l).collect();
        assert_ne!(first, second);

        let replica = DataSet::from_fn(6, |_| 0)
            .unwrap()
            .with_noise(0.5)
            .unwrap()
            .with_noise_seed(9);
        let replayed: Vec<_> = replica.iter().map(|(_, l)| l).collect();
        assert_eq!(first, replayed);
    }

    #[test]
    fn test_seeded_passes_do_not_shift_into_neighbouring_seeds() {
        let noisy = |seed| {
            DataSet::from_fn(6, |_| 0)
                .unwrap()
                .with_noise(0.5)
                .unwrap()
                .with_noise_seed(seed)
        };
        let nine = noisy(9);
        let nine_first: Vec<_> = nine.iter().map(|(_, l)| l).collect();
        let nine_second: Vec<_> = nine.iter().map(|(_, l)| l).collect();

        let ten = noisy(10);
        let ten_first: Vec<_> = ten.iter().map(|(_, l)| l).collect();
        let ten_second: Vec<_> = ten.iter().map(|(_, l)| l).collect();

        assert_ne!(nine_second, ten_first);
        assert_ne!(nine_first, ten_first);
        assert_ne!(nine_second, ten_second);
    }

    proptest! {
        #[test]
        fn prop_zero_noise_keeps_labels(labels in proptest::collection::vec(0u8..2, 8)) {
            let data_set = DataSet::from_labels(labels.clone()).unwrap().with_noise(0.0).unwrap();
            for _ in 0..3 {
                let emitted: Vec<_> = data_set.iter().map(|(_, l)| l).collect();
                prop_assert_eq!(&emitted, &labels);
            }
        }

        #[test]
        fn prop_full_noise_flips_labels(labels in proptest::collection::vec(0u8..2, 8)) {
            let data_set = DataSet::from_labels(labels.clone()).unwrap().with_noise(1.0).unwrap();
            let complement: Vec<_> = labels.iter().map(|l| l ^ 1).collect();
            for _ in 0..3 {
                let emitted: Vec<_> = data_set.iter().map(|(_, l)| l).collect();
                prop_assert_eq!(&emitted, &complement);
            }
        }

        #[test]
        fn prop_mask_controls_emitted_values(mask in proptest::collection::vec(0u8..2, 16)) {
            let data_set = DataSet::from_fn(4, |v| (v % 2) as Label)
                .unwrap()
                .with_mask(Mask::from_list(&mask))
                .unwrap();
            let values: Vec<_> = data_set.iter().map(|(v, _)| v).collect();
            let expected: Vec<_> = (0..16u64).filter(|&v| mask[v as usize] == 1).collect();
            prop_assert_eq!(values, expected);
        }
    }
}
