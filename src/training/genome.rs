//! Fixed-topology genomes: a flat weight vector for a 3 -> H -> 1 network

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::controller::FeedForwardNetwork;
use crate::error::{Result, read_json, write_json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Hidden layer width
    pub hidden: usize,
    pub weights: Vec<f32>,
    /// Score from the latest evaluation
    #[serde(default)]
    pub fitness: f32,
}

impl Genome {
    /// Random weights uniform in `[-range, range]`
    pub fn random(hidden: usize, range: f32, rng: &mut impl Rng) -> Self {
        let count = FeedForwardNetwork::weight_count(hidden);
        let weights = (0..count)
            .map(|_| {
                if range > 0.0 {
                    rng.random_range(-range..=range)
                } else {
                    0.0
                }
            })
            .collect();
        Self {
            hidden,
            weights,
            fitness: 0.0,
        }
    }

    /// Perturb each weight with probability `rate` by up to `power`
    pub fn mutate(&mut self, rate: f32, power: f32, rng: &mut impl Rng) {
        if power <= 0.0 {
            return;
        }
        for weight in &mut self.weights {
            if rng.random_bool(rate as f64) {
                *weight += rng.random_range(-power..=power);
            }
        }
    }

    /// Uniform crossover; each weight comes from either parent
    pub fn crossover(&self, other: &Genome, rng: &mut impl Rng) -> Genome {
        let weights = self
            .weights
            .iter()
            .zip(&other.weights)
            .map(|(a, b)| if rng.random_bool(0.5) { *a } else { *b })
            .collect();
        Genome {
            hidden: self.hidden,
            weights,
            fitness: 0.0,
        }
    }

    pub fn to_network(&self) -> Result<FeedForwardNetwork> {
        FeedForwardNetwork::from_weights(self.hidden, &self.weights)
    }

    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Load a saved genome straight into a playable network.
    ///
    /// Fails if the weight count doesn't match the stored topology.
    pub fn load_network(path: &Path) -> Result<FeedForwardNetwork> {
        Self::load(path)?.to_network()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)?;
        log::info!("Genome saved to {}", path.display());
        Ok(())
    }
}
