// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Description of a single projection step
//!
//! A [`Projection`] names which stimuli and which areas fire into which
//! target areas during one simulator step. It carries no simulator state, so
//! the same value can be replayed any number of times.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// One projection step: sources firing into target areas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Stimulus name -> target area names
    stimuli_to_areas: BTreeMap<String, Vec<String>>,

    /// Source area name -> target area names
    areas_to_areas: BTreeMap<String, Vec<String>>,

    /// Target area name -> winners imposed instead of winner-take-all
    fixed_winners: BTreeMap<String, Vec<usize>>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `stimulus` into `target`
    pub fn add_stimulus(&mut self, stimulus: &str, target: &str) -> &mut Self {
        push_unique(
            self.stimuli_to_areas.entry(stimulus.to_string()).or_default(),
            target,
        );
        self
    }

    /// Fire the current winners of `source` into `target`
    pub fn add_area(&mut self, source: &str, target: &str) -> &mut Self {
        push_unique(
            self.areas_to_areas.entry(source.to_string()).or_default(),
            target,
        );
        self
    }

    /// Impose the winners of `area` for this step.
    ///
    /// Synapses into the imposed winners are still strengthened, which is how
    /// a supervised assembly gets bound to its inputs.
    pub fn fix_winners(&mut self, area: &str, winners: Vec<usize>) -> &mut Self {
        self.fixed_winners.insert(area.to_string(), winners);
        self
    }

    pub fn stimuli_to_areas(&self) -> &BTreeMap<String, Vec<String>> {
        &self.stimuli_to_areas
    }

    pub fn areas_to_areas(&self) -> &BTreeMap<String, Vec<String>> {
        &self.areas_to_areas
    }

    pub fn fixed_winners(&self, area: &str) -> Option<&[usize]> {
        self.fixed_winners.get(area).map(Vec::as_slice)
    }

    pub fn fixed_winner_areas(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.fixed_winners
            .iter()
            .map(|(area, winners)| (area.as_str(), winners.as_slice()))
    }

    /// True when nothing fires into anything
    pub fn is_empty(&self) -> bool {
        self.stimuli_to_areas.values().all(Vec::is_empty)
            && self.areas_to_areas.values().all(Vec::is_empty)
    }

    /// Every area receiving input in this step, in name order
    pub fn targets(&self) -> BTreeSet<&str> {
        self.stimuli_to_areas
            .values()
            .chain(self.areas_to_areas.values())
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Stimuli firing into `target`
    pub fn stimuli_into<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        sources_into(&self.stimuli_to_areas, target)
    }

    /// Areas firing into `target`
    pub fn areas_into<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        sources_into(&self.areas_to_areas, target)
    }
}

fn sources_into<'a>(
    mapping: &'a BTreeMap<String, Vec<String>>,
    target: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    mapping
        .iter()
        .filter(move |(_, targets)| targets.iter().any(|t| t == target))
        .map(|(source, _)| source.as_str())
}

fn push_unique(targets: &mut Vec<String>, target: &str) {
    if !targets.iter().any(|t| t == target) {
        targets.push(target.to_string());
    }
}
