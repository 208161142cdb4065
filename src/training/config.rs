//! Neuroevolution parameters, read from a JSON file

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, read_json};
use crate::sim::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    // === Population ===
    pub population_size: usize,
    /// Upper bound on generations to run
    pub generations: u32,
    /// Hidden layer width of every network (0 = direct input -> output)
    pub hidden_neurons: usize,
    /// Initial weights are uniform in `[-weight_init_range, weight_init_range]`
    pub weight_init_range: f32,

    // === Reproduction ===
    /// Chance for each weight to be perturbed
    pub mutation_rate: f32,
    /// Largest perturbation applied to a weight
    pub mutation_power: f32,
    /// Chance a child mixes two parents instead of cloning one
    pub crossover_rate: f32,
    /// Best genomes copied unchanged into the next generation
    pub elitism: usize,
    pub tournament_size: usize,

    // === Fitness ===
    /// Stop as soon as any genome reaches this fitness
    pub fitness_threshold: f32,
    /// A trial ends on game over or after this many ticks
    pub max_ticks_per_trial: u64,
    /// Trials averaged into one genome's fitness
    pub trials_per_genome: u32,
    /// Falling items in each trial
    pub item_kinds: Vec<EntityKind>,

    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            hidden_neurons: 4,
            weight_init_range: 1.0,

            mutation_rate: 0.2,
            mutation_power: 0.5,
            crossover_rate: 0.7,
            elitism: 2,
            tournament_size: 3,

            fitness_threshold: 50.0,
            max_ticks_per_trial: 60 * 60,
            trials_per_genome: 1,
            item_kinds: vec![EntityKind::Beneficial],

            seed: 0,
        }
    }
}

impl TrainingConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = read_json(path)?;
        config.validate()?;
        log::info!("Loaded training config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig("population_size must be at least 1".into()));
        }
        if self.generations == 0 {
            return Err(Error::InvalidConfig("generations must be at least 1".into()));
        }
        if self.tournament_size == 0 {
            return Err(Error::InvalidConfig("tournament_size must be at least 1".into()));
        }
        if self.trials_per_genome == 0 {
            return Err(Error::InvalidConfig("trials_per_genome must be at least 1".into()));
        }
        if self.max_ticks_per_trial == 0 {
            return Err(Error::InvalidConfig("max_ticks_per_trial must be at least 1".into()));
        }
        if self.elitism > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "elitism {} exceeds population_size {}",
                self.elitism, self.population_size
            )));
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within 0..=1, got {rate}"
                )));
            }
        }
        for (name, value) in [
            ("mutation_power", self.mutation_power),
            ("weight_init_range", self.weight_init_range),
        ] {
            // Both become the bounds of a sampling range
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and not negative, got {value}"
                )));
            }
        }
        if !self.item_kinds.iter().any(|k| k.is_falling()) {
            return Err(Error::InvalidConfig("item_kinds needs at least one falling item".into()));
        }
        Ok(())
    }
}
