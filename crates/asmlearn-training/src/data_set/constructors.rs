// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shorthand constructors for the common data set shapes

use super::{DataSet, Mask};
use crate::encoder::{DomainValue, Label};
use crate::error::LearningResult;

/// One pass over the whole domain, labels taken from `values`
pub fn create_data_set_from_list(values: &[Label]) -> LearningResult<DataSet> {
    DataSet::from_labels(values.to_vec())
}

/// `training_set_length` noisy pairs cycling over the whole domain
pub fn create_training_set_from_list(
    values: &[Label],
    training_set_length: usize,
    noise_probability: f64,
) -> LearningResult<DataSet> {
    Ok(DataSet::from_labels(values.to_vec())?
        .with_noise(noise_probability)?
        .with_length(training_set_length))
}

/// Noise-free single pass, optionally restricted by `mask`
pub fn create_test_set_from_list(values: &[Label], mask: Option<Mask>) -> LearningResult<DataSet> {
    let data_set = DataSet::from_labels(values.to_vec())?;
    match mask {
        Some(mask) => data_set.with_mask(mask),
        None => Ok(data_set),
    }
}

pub fn create_data_set_from_fn<F>(domain_size: u32, function: F) -> LearningResult<DataSet>
where
    F: Fn(DomainValue) -> Label + Send + Sync + 'static,
{
    DataSet::from_fn(domain_size, function)
}

pub fn create_explicit_mask_from_list(values: &[u8]) -> Mask {
    Mask::from_list(values)
}
