// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Mapping from input bits to simulator stimuli
//!
//! Every input bit is wired to one input area and owns two stimuli in the
//! simulator: one that fires when the bit is 0 and one that fires when it is
//! 1. For a given domain value only the stimulus matching the bit's value is
//! active; the other never fires, even when an iteration lists the bit.

use asmlearn_brain::{Brain, BrainError};
use serde::Serialize;

use crate::encoder::{DomainEncoder, DomainValue};
use crate::error::{LearningError, LearningResult};

/// Stimuli and target area of a single input bit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputBit {
    area: String,
    /// `stimuli[v]` fires when the bit holds `v`
    stimuli: [String; 2],
}

impl InputBit {
    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn stimulus(&self, bit_value: bool) -> &str {
        &self.stimuli[bit_value as usize]
    }
}

/// Input bit -> stimulus mapping, also known as the input stimuli of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStimuli {
    encoder: DomainEncoder,
    bits: Vec<InputBit>,
}

impl InputStimuli {
    /// Wire bit `i` to `areas[i]`, creating `stimulus_size`-neuron stimuli in
    /// `brain`. The domain has one bit per area.
    pub fn new<B: Brain>(brain: &mut B, stimulus_size: usize, areas: &[&str]) -> LearningResult<Self> {
        let domain_size = u32::try_from(areas.len())
            .map_err(|_| LearningError::InvalidDomainSize(u32::MAX))?;
        Self::with_domain_size(brain, stimulus_size, domain_size, areas)
    }

    /// Same as [`InputStimuli::new`], but rejects an area list whose length
    /// differs from `domain_size`
    pub fn with_domain_size<B: Brain>(
        brain: &mut B,
        stimulus_size: usize,
        domain_size: u32,
        areas: &[&str],
    ) -> LearningResult<Self> {
        let encoder = DomainEncoder::new(domain_size)?;
        if areas.len() != domain_size as usize {
            return Err(LearningError::InputAreaCountMismatch {
                domain_size,
                areas: areas.len(),
            });
        }

        let bits: Vec<InputBit> = areas
            .iter()
            .enumerate()
            .map(|(bit, area)| InputBit {
                area: area.to_string(),
                stimuli: [stimulus_name(area, bit, false), stimulus_name(area, bit, true)],
            })
            .collect();

        // Validate everything up front so a failure never leaves half the
        // stimuli declared in the brain
        for bit in &bits {
            if !brain.has_area(&bit.area) {
                return Err(LearningError::UnknownArea(bit.area.clone()));
            }
            for stimulus in &bit.stimuli {
                if brain.has_stimulus(stimulus) || brain.has_area(stimulus) {
                    return Err(BrainError::DuplicateName(stimulus.clone()).into());
                }
            }
        }
        for bit in &bits {
            for stimulus in &bit.stimuli {
                brain.add_stimulus(stimulus, stimulus_size)?;
            }
        }

        Ok(Self { encoder, bits })
    }

    pub fn encoder(&self) -> &DomainEncoder {
        &self.encoder
    }

    pub fn domain_size(&self) -> u32 {
        self.encoder.domain_size()
    }

    pub fn bits(&self) -> &[InputBit] {
        &self.bits
    }

    pub fn bit(&self, bit: usize) -> Option<&InputBit> {
        self.bits.get(bit)
    }

    /// Stimulus that fires for `bit` under `value`, with its target area
    pub fn active_stimulus(&self, bit: usize, value: DomainValue) -> LearningResult<(&str, &str)> {
        let input = self.bits.get(bit).ok_or(LearningError::InputBitOutOfRange {
            bit,
            domain_size: self.domain_size(),
        })?;
        Ok((input.stimulus(self.encoder.bit(value, bit)), input.area()))
    }

    /// Every stimulus name this mapping declared
    pub fn stimulus_names(&self) -> impl Iterator<Item = &str> {
        self.bits
            .iter()
            .flat_map(|bit| bit.stimuli.iter().map(String::as_str))
    }
}

fn stimulus_name(area: &str, bit: usize, bit_value: bool) -> String {
    format!("{}#bit{}={}", area, bit, bit_value as u8)
}
