// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Non-lazy assembly simulator
//!
//! Every connectome is materialized when an area or stimulus is declared, so
//! a projection is a handful of dense vector additions followed by
//! winner-take-all and a multiplicative Hebbian update.
//!
//! After the update, each winner's incoming weights are rescaled to the total
//! they had before it. Firing synapses keep gaining on the others while every
//! weight stays bounded by the initial incoming total of its neuron.

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::connectome::{area_connectome, stimulus_connectome, Connectomes};
use crate::error::{BrainError, BrainResult};
use crate::params::{validate_plasticity, BrainParams};
use crate::projection::Projection;
use crate::traits::{Brain, OUTPUT_AREA_SIZE, OUTPUT_AREA_WINNERS};

#[derive(Debug, Clone)]
struct Area {
    name: String,
    size: usize,
    winners_count: usize,
    plasticity: f32,
    is_output: bool,
    winners: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Stimulus {
    name: String,
    size: usize,
}

/// Plastic state of a [`NonLazyBrain`]: weights and winners
#[derive(Debug, Clone, PartialEq)]
pub struct BrainSnapshot {
    connectomes: Connectomes,
    winners: Vec<Vec<usize>>,
}

/// Winners and Hebbian work computed for one target of a projection
struct TargetUpdate {
    target: usize,
    winners: Vec<usize>,
    stimuli: Vec<usize>,
    sources: Vec<usize>,
}

/// Reference simulator with eagerly generated connectomes
#[derive(Debug, Clone)]
pub struct NonLazyBrain {
    params: BrainParams,
    rng: StdRng,
    areas: Vec<Area>,
    area_index: AHashMap<String, usize>,
    stimuli: Vec<Stimulus>,
    stimulus_index: AHashMap<String, usize>,
    output_area: Option<usize>,
    connectomes: Connectomes,
}

impl NonLazyBrain {
    pub fn new(params: BrainParams) -> BrainResult<Self> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            params,
            rng,
            areas: Vec::new(),
            area_index: AHashMap::new(),
            stimuli: Vec::new(),
            stimulus_index: AHashMap::new(),
            output_area: None,
            connectomes: Connectomes::default(),
        })
    }

    pub fn params(&self) -> &BrainParams {
        &self.params
    }

    pub fn stimulus_names(&self) -> Vec<String> {
        self.stimuli.iter().map(|s| s.name.clone()).collect()
    }

    /// Sum of every synaptic weight, mostly useful to observe plasticity
    pub fn total_synaptic_weight(&self) -> f64 {
        self.connectomes.total_weight()
    }

    fn ensure_name_free(&self, name: &str) -> BrainResult<()> {
        if self.area_index.contains_key(name) || self.stimulus_index.contains_key(name) {
            return Err(BrainError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn area_id(&self, name: &str) -> BrainResult<usize> {
        self.area_index
            .get(name)
            .copied()
            .ok_or_else(|| BrainError::UnknownArea(name.to_string()))
    }

    fn stimulus_id(&self, name: &str) -> BrainResult<usize> {
        self.stimulus_index
            .get(name)
            .copied()
            .ok_or_else(|| BrainError::UnknownStimulus(name.to_string()))
    }

    fn push_area(&mut self, area: Area) {
        let new_id = self.areas.len();
        let p = self.params.p;
        self.area_index.insert(area.name.clone(), new_id);
        self.areas.push(area);

        let (new_size, new_is_output) = {
            let area = &self.areas[new_id];
            (area.size, area.is_output)
        };

        for (stimulus, row) in self
            .stimuli
            .iter()
            .zip(self.connectomes.stimulus_to_area.iter_mut())
        {
            row.push(stimulus_connectome(
                &mut self.rng,
                stimulus.size,
                new_size,
                p,
                new_is_output,
            ));
        }

        for (source, row) in self.areas[..new_id]
            .iter()
            .zip(self.connectomes.area_to_area.iter_mut())
        {
            row.push(area_connectome(
                &mut self.rng,
                source.size,
                new_size,
                p,
                new_is_output,
            ));
        }

        let mut new_row = Vec::with_capacity(self.areas.len());
        for target in &self.areas {
            new_row.push(area_connectome(
                &mut self.rng,
                new_size,
                target.size,
                p,
                target.is_output,
            ));
        }
        self.connectomes.area_to_area.push(new_row);
    }

    /// Resolve every name of `projection` and compute new winners, without
    /// touching any state
    fn plan(&self, projection: &Projection) -> BrainResult<Vec<TargetUpdate>> {
        if projection.is_empty() {
            return Err(BrainError::EmptyProjection);
        }

        for stimulus in projection.stimuli_to_areas().keys() {
            self.stimulus_id(stimulus)?;
        }
        for source in projection.areas_to_areas().keys() {
            let id = self.area_id(source)?;
            if self.areas[id].winners.is_empty() {
                return Err(BrainError::NoWinners(source.clone()));
            }
        }
        for (area, winners) in projection.fixed_winner_areas() {
            let id = self.area_id(area)?;
            let size = self.areas[id].size;
            if let Some(&neuron) = winners.iter().find(|&&n| n >= size) {
                return Err(BrainError::FixedWinnerOutOfRange {
                    area: area.to_string(),
                    neuron,
                    size,
                });
            }
        }

        let mut updates = Vec::new();
        for target_name in projection.targets() {
            let target = self.area_id(target_name)?;
            let stimuli = projection
                .stimuli_into(target_name)
                .map(|name| self.stimulus_id(name))
                .collect::<BrainResult<Vec<_>>>()?;
            let sources = projection
                .areas_into(target_name)
                .map(|name| self.area_id(name))
                .collect::<BrainResult<Vec<_>>>()?;

            let winners = match projection.fixed_winners(target_name) {
                Some(fixed) => {
                    let mut fixed = fixed.to_vec();
                    fixed.sort_unstable();
                    fixed.dedup();
                    fixed
                }
                None => {
                    let inputs = self.synaptic_input(target, &stimuli, &sources);
                    top_k(&inputs, self.areas[target].winners_count)
                }
            };

            updates.push(TargetUpdate {
                target,
                winners,
                stimuli,
                sources,
            });
        }
        Ok(updates)
    }

    fn synaptic_input(&self, target: usize, stimuli: &[usize], sources: &[usize]) -> Vec<f32> {
        let mut inputs = ndarray::Array1::<f32>::zeros(self.areas[target].size);
        for &stimulus in stimuli {
            inputs += &self.connectomes.stimulus_to_area[stimulus][target];
        }
        for &source in sources {
            let weights = &self.connectomes.area_to_area[source][target];
            for &neuron in &self.areas[source].winners {
                inputs += &weights.row(neuron);
            }
        }
        inputs.to_vec()
    }

    /// Strengthen every synapse from a firing source onto a new winner, then
    /// normalize the winner's incoming weights back to their previous total.
    /// Must run before winners are committed, since sources fire with their
    /// previous winners.
    fn apply_hebbian(&mut self, update: &TargetUpdate) {
        let plasticity = self.areas[update.target].plasticity;
        if plasticity == 0.0 {
            return;
        }
        let factor = 1.0 + plasticity;
        let totals: Vec<f64> = update
            .winners
            .iter()
            .map(|&neuron| self.connectomes.incoming_weight(update.target, neuron))
            .collect();
        // Weight added onto each winner, in `update.winners` order
        let mut gains = vec![0.0f64; update.winners.len()];

        for &stimulus in &update.stimuli {
            let weights = &mut self.connectomes.stimulus_to_area[stimulus][update.target];
            for (gain, &neuron) in gains.iter_mut().zip(&update.winners) {
                *gain += (weights[neuron] * plasticity) as f64;
                weights[neuron] *= factor;
            }
        }
        for &source in &update.sources {
            let firing = &self.areas[source].winners;
            let weights = &mut self.connectomes.area_to_area[source][update.target];
            for &pre in firing {
                for (gain, &post) in gains.iter_mut().zip(&update.winners) {
                    *gain += (weights[[pre, post]] * plasticity) as f64;
                    weights[[pre, post]] *= factor;
                }
            }
        }

        for ((&neuron, &total), &gain) in update.winners.iter().zip(&totals).zip(&gains) {
            if gain > 0.0 {
                self.connectomes
                    .scale_incoming(update.target, neuron, (total / (total + gain)) as f32);
            }
        }
    }
}

/// Indices of the `k` largest inputs, ties going to the lower index,
/// returned in ascending index order
fn top_k(inputs: &[f32], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..inputs.len()).collect();
    order.sort_by(|&a, &b| inputs[b].total_cmp(&inputs[a]).then(a.cmp(&b)));
    order.truncate(k);
    order.sort_unstable();
    order
}

impl Brain for NonLazyBrain {
    type Snapshot = BrainSnapshot;

    fn add_area(
        &mut self,
        name: &str,
        size: usize,
        winners: usize,
        plasticity: f32,
    ) -> BrainResult<()> {
        self.ensure_name_free(name)?;
        if size == 0 {
            return Err(BrainError::invalid_parameter("size", "area must have neurons"));
        }
        if winners == 0 || winners > size {
            return Err(BrainError::invalid_parameter(
                "winners",
                format!("{} is outside [1, {}]", winners, size),
            ));
        }
        validate_plasticity(plasticity)?;

        self.push_area(Area {
            name: name.to_string(),
            size,
            winners_count: winners,
            plasticity,
            is_output: false,
            winners: Vec::new(),
        });
        debug!(target: "asmlearn-brain", "Added area {} (n={}, k={}, beta={})", name, size, winners, plasticity);
        Ok(())
    }

    fn add_stimulus(&mut self, name: &str, size: usize) -> BrainResult<()> {
        self.ensure_name_free(name)?;
        if size == 0 {
            return Err(BrainError::invalid_parameter(
                "size",
                "stimulus must have neurons",
            ));
        }

        let id = self.stimuli.len();
        let p = self.params.p;
        let mut row = Vec::with_capacity(self.areas.len());
        for area in &self.areas {
            row.push(stimulus_connectome(
                &mut self.rng,
                size,
                area.size,
                p,
                area.is_output,
            ));
        }
        self.connectomes.stimulus_to_area.push(row);
        self.stimuli.push(Stimulus {
            name: name.to_string(),
            size,
        });
        self.stimulus_index.insert(name.to_string(), id);
        debug!(target: "asmlearn-brain", "Added stimulus {} (size={})", name, size);
        Ok(())
    }

    fn add_output_area(&mut self, name: &str) -> BrainResult<()> {
        if let Some(existing) = self.output_area {
            return Err(BrainError::OutputAreaAlreadyDeclared(
                self.areas[existing].name.clone(),
            ));
        }
        self.ensure_name_free(name)?;

        let id = self.areas.len();
        self.push_area(Area {
            name: name.to_string(),
            size: OUTPUT_AREA_SIZE,
            winners_count: OUTPUT_AREA_WINNERS,
            plasticity: self.params.output_plasticity,
            is_output: true,
            winners: Vec::new(),
        });
        self.output_area = Some(id);
        debug!(target: "asmlearn-brain", "Added output area {}", name);
        Ok(())
    }

    fn has_area(&self, name: &str) -> bool {
        self.area_index.contains_key(name)
    }

    fn has_stimulus(&self, name: &str) -> bool {
        self.stimulus_index.contains_key(name)
    }

    fn output_area(&self) -> Option<&str> {
        self.output_area.map(|id| self.areas[id].name.as_str())
    }

    fn area_names(&self) -> Vec<String> {
        self.areas.iter().map(|a| a.name.clone()).collect()
    }

    fn project(&mut self, projection: &Projection) -> BrainResult<()> {
        let updates = self.plan(projection)?;

        for update in &updates {
            self.apply_hebbian(update);
        }
        for update in updates {
            trace!(
                target: "asmlearn-brain",
                "Area {} winners: {:?}",
                self.areas[update.target].name,
                update.winners
            );
            self.areas[update.target].winners = update.winners;
        }
        Ok(())
    }

    fn winners(&self, area: &str) -> BrainResult<&[usize]> {
        let id = self.area_id(area)?;
        Ok(&self.areas[id].winners)
    }

    fn snapshot(&self) -> BrainSnapshot {
        BrainSnapshot {
            connectomes: self.connectomes.clone(),
            winners: self.areas.iter().map(|a| a.winners.clone()).collect(),
        }
    }

    fn restore(&mut self, snapshot: BrainSnapshot) -> BrainResult<()> {
        if snapshot.connectomes.layout() != self.connectomes.layout()
            || snapshot.winners.len() != self.areas.len()
        {
            return Err(BrainError::SnapshotMismatch(format!(
                "snapshot has {} areas, brain has {}",
                snapshot.winners.len(),
                self.areas.len()
            )));
        }
        self.connectomes = snapshot.connectomes;
        for (area, winners) in self.areas.iter_mut().zip(snapshot.winners) {
            area.winners = winners;
        }
        Ok(())
    }
}
