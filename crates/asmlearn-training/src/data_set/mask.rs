// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Domain masks
//!
//! A mask holds one flag per domain value; unselected values are never
//! emitted by a data set. "No mask" is the full mask, not a special case.

use serde::Serialize;

use crate::encoder::{DomainEncoder, DomainValue};
use crate::error::LearningResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mask {
    selected: Vec<bool>,
}

impl Mask {
    /// Mask selecting every value of a `domain_size`-bit domain
    pub fn full(domain_size: u32) -> LearningResult<Self> {
        let encoder = DomainEncoder::new(domain_size)?;
        Ok(Self {
            selected: vec![true; encoder.domain_len()],
        })
    }

    /// One entry per domain value in increasing order; non-zero selects
    pub fn from_list(values: &[u8]) -> Self {
        Self {
            selected: values.iter().map(|&v| v != 0).collect(),
        }
    }

    pub fn from_fn(domain_size: u32, select: impl Fn(DomainValue) -> bool) -> LearningResult<Self> {
        let encoder = DomainEncoder::new(domain_size)?;
        Ok(Self {
            selected: encoder.values().map(select).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, value: DomainValue) -> bool {
        usize::try_from(value)
            .ok()
            .and_then(|index| self.selected.get(index))
            .copied()
            .unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    pub fn selected_values(&self) -> impl Iterator<Item = DomainValue> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, &s)| s)
            .map(|(value, _)| value as DomainValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mask_selects_everything() {
        let mask = Mask::full(2).unwrap();
        assert_eq!(mask.len(), 4);
        assert_eq!(mask.selected_count(), 4);
        assert_eq!(mask.selected_values().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_explicit_mask() {
        let mask = Mask::from_list(&[1, 1, 1, 0]);
        assert!(mask.is_selected(2));
        assert!(!mask.is_selected(3));
        assert!(!mask.is_selected(99));
        assert_eq!(mask.selected_values().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_mask_from_fn() {
        let mask = Mask::from_fn(3, |v| v % 2 == 0).unwrap();
        assert_eq!(mask.selected_values().collect::<Vec<_>>(), vec![0, 2, 4, 6]);
        assert!(Mask::from_fn(0, |_| true).is_err());
    }
}
