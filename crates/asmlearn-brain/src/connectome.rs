// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dense connectome storage
//!
//! Stimulus connectomes hold, per target neuron, the summed weight of every
//! stimulus neuron synapsing onto it. Area connectomes are full
//! source × target weight matrices.

use ndarray::{Array1, Array2};
use rand::Rng;

/// Every synaptic weight of a brain, indexed by declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connectomes {
    /// `[stimulus][area]`
    pub(crate) stimulus_to_area: Vec<Vec<Array1<f32>>>,

    /// `[source area][target area]`
    pub(crate) area_to_area: Vec<Vec<Array2<f32>>>,
}

impl Connectomes {
    /// Sum of every synaptic weight
    pub fn total_weight(&self) -> f64 {
        let stimulus: f64 = self
            .stimulus_to_area
            .iter()
            .flatten()
            .map(|weights| weights.iter().map(|&w| w as f64).sum::<f64>())
            .sum();
        let area: f64 = self
            .area_to_area
            .iter()
            .flatten()
            .map(|weights| weights.iter().map(|&w| w as f64).sum::<f64>())
            .sum();
        stimulus + area
    }

    /// Total weight of every synapse onto `neuron` of area `target`,
    /// whether or not its source fires
    pub(crate) fn incoming_weight(&self, target: usize, neuron: usize) -> f64 {
        let stimulus: f64 = self
            .stimulus_to_area
            .iter()
            .map(|row| row[target][neuron] as f64)
            .sum();
        let area: f64 = self
            .area_to_area
            .iter()
            .map(|row| {
                row[target]
                    .column(neuron)
                    .iter()
                    .map(|&w| w as f64)
                    .sum::<f64>()
            })
            .sum();
        stimulus + area
    }

    /// Multiply every synapse onto `neuron` of area `target` by `factor`
    pub(crate) fn scale_incoming(&mut self, target: usize, neuron: usize, factor: f32) {
        for row in &mut self.stimulus_to_area {
            row[target][neuron] *= factor;
        }
        for row in &mut self.area_to_area {
            row[target].column_mut(neuron).mapv_inplace(|w| w * factor);
        }
    }

    pub(crate) fn layout(&self) -> (usize, usize) {
        (self.stimulus_to_area.len(), self.area_to_area.len())
    }
}

/// Stimulus -> area connectome: each entry is a Binomial(stimulus_size, p) draw.
/// Connectomes into a readout area are dense.
pub(crate) fn stimulus_connectome<R: Rng>(
    rng: &mut R,
    stimulus_size: usize,
    target_size: usize,
    p: f64,
    dense: bool,
) -> Array1<f32> {
    if dense {
        return Array1::from_elem(target_size, stimulus_size as f32);
    }
    Array1::from_shape_fn(target_size, |_| {
        (0..stimulus_size).filter(|_| rng.gen_bool(p)).count() as f32
    })
}

/// Area -> area connectome: Bernoulli(p) synapses of unit weight.
/// Connectomes into a readout area are dense.
pub(crate) fn area_connectome<R: Rng>(
    rng: &mut R,
    source_size: usize,
    target_size: usize,
    p: f64,
    dense: bool,
) -> Array2<f32> {
    if dense {
        return Array2::ones((source_size, target_size));
    }
    Array2::from_shape_fn((source_size, target_size), |_| {
        if rng.gen_bool(p) {
            1.0
        } else {
            0.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dense_connectomes() {
        let mut rng = StdRng::seed_from_u64(7);
        let stimulus = stimulus_connectome(&mut rng, 5, 2, 0.1, true);
        assert_eq!(stimulus.to_vec(), vec![5.0, 5.0]);

        let area = area_connectome(&mut rng, 3, 2, 0.1, true);
        assert!(area.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_sparse_connectome_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let stimulus = stimulus_connectome(&mut rng, 10, 50, 0.5, false);
        assert!(stimulus.iter().all(|&w| (0.0..=10.0).contains(&w)));

        let area = area_connectome(&mut rng, 20, 20, 0.5, false);
        assert!(area.iter().all(|&w| w == 0.0 || w == 1.0));
        assert!(area.iter().any(|&w| w == 1.0));
    }

    fn two_area_connectomes() -> Connectomes {
        let mut rng = StdRng::seed_from_u64(5);
        Connectomes {
            stimulus_to_area: vec![vec![
                stimulus_connectome(&mut rng, 10, 4, 0.5, false),
                stimulus_connectome(&mut rng, 10, 3, 0.5, false),
            ]],
            area_to_area: vec![
                vec![
                    area_connectome(&mut rng, 4, 4, 0.5, false),
                    area_connectome(&mut rng, 4, 3, 0.5, false),
                ],
                vec![
                    area_connectome(&mut rng, 3, 4, 0.5, false),
                    area_connectome(&mut rng, 3, 3, 0.5, false),
                ],
            ],
        }
    }

    #[test]
    fn test_incoming_weight_sums_every_source() {
        let connectomes = two_area_connectomes();
        let expected = connectomes.stimulus_to_area[0][1][2] as f64
            + connectomes.area_to_area[0][1].column(2).sum() as f64
            + connectomes.area_to_area[1][1].column(2).sum() as f64;
        assert_eq!(connectomes.incoming_weight(1, 2), expected);
    }

    #[test]
    fn test_scale_incoming_touches_one_neuron() {
        let mut connectomes = two_area_connectomes();
        let before = connectomes.clone();
        connectomes.scale_incoming(1, 2, 0.5);

        assert_eq!(
            connectomes.stimulus_to_area[0][1][2],
            before.stimulus_to_area[0][1][2] * 0.5
        );
        assert_eq!(
            connectomes.area_to_area[1][1].column(2),
            before.area_to_area[1][1].column(2).mapv(|w| w * 0.5)
        );
        assert_eq!(
            connectomes.area_to_area[0][1].column(1),
            before.area_to_area[0][1].column(1)
        );
        assert_eq!(connectomes.area_to_area[0][0], before.area_to_area[0][0]);
    }

    #[test]
    fn test_connectome_generation_is_seeded() {
        let a = area_connectome(&mut StdRng::seed_from_u64(3), 10, 10, 0.3, false);
        let b = area_connectome(&mut StdRng::seed_from_u64(3), 10, 10, 0.3, false);
        assert_eq!(a, b);
    }
}
