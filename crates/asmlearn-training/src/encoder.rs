// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Domain encoding
//!
//! A domain value is an integer in `[0, 2^domain_size - 1]`. Bit `i` of the
//! value is `(value >> i) & 1`, so bit 0 is the least significant bit.

use std::ops::Range;

use crate::error::{LearningError, LearningResult};

/// Integer encoding of a multi-bit input
pub type DomainValue = u64;

/// Binary label, 0 or 1
pub type Label = u8;

/// Largest supported number of input bits
pub const MAX_DOMAIN_SIZE: u32 = 24;

/// Maps domain values to the set of input bits that are on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainEncoder {
    domain_size: u32,
}

impl DomainEncoder {
    pub fn new(domain_size: u32) -> LearningResult<Self> {
        if domain_size == 0 || domain_size > MAX_DOMAIN_SIZE {
            return Err(LearningError::InvalidDomainSize(domain_size));
        }
        Ok(Self { domain_size })
    }

    /// Encoder whose domain has exactly `len` values
    pub fn for_domain_len(len: usize) -> LearningResult<Self> {
        if len < 2 || !len.is_power_of_two() {
            return Err(LearningError::InvalidLabelCount(len));
        }
        Self::new(len.trailing_zeros())
    }

    pub fn domain_size(&self) -> u32 {
        self.domain_size
    }

    /// Number of distinct domain values, `2^domain_size`
    pub fn domain_len(&self) -> usize {
        1usize << self.domain_size
    }

    pub fn max_value(&self) -> DomainValue {
        (1 << self.domain_size) - 1
    }

    pub fn values(&self) -> Range<DomainValue> {
        0..(1 << self.domain_size)
    }

    pub fn contains(&self, value: DomainValue) -> bool {
        value <= self.max_value()
    }

    pub fn check(&self, value: DomainValue) -> LearningResult<()> {
        if !self.contains(value) {
            return Err(LearningError::DomainSizeMismatch {
                value,
                max: self.max_value(),
            });
        }
        Ok(())
    }

    pub fn bit(&self, value: DomainValue, bit: usize) -> bool {
        (value >> bit) & 1 == 1
    }

    /// Bit positions that are 1 in `value`, lowest first
    pub fn active_bits(&self, value: DomainValue) -> LearningResult<Vec<usize>> {
        self.check(value)?;
        Ok((0..self.domain_size as usize)
            .filter(|&bit| self.bit(value, bit))
            .collect())
    }
}
