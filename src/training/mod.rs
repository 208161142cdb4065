//! Neuroevolution of basket-steering policies
//!
//! Every genome plays its own runs with its own basket and its own
//! `GameState`, so each catch counts toward exactly one genome's fitness.
//! Evaluation is embarrassingly parallel; selection and reproduction run on
//! a single seeded RNG so a training run replays identically for a seed.

pub mod config;
pub mod genome;

pub use config::TrainingConfig;
pub use genome::Genome;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use rayon::prelude::*;

use crate::Settings;
use crate::controller::LearnedPolicy;
use crate::error::{Error, Result};
use crate::sim::{GameState, tick};

/// Fitness spread of one generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    pub generation: u32,
    pub best: f32,
    pub mean: f32,
    pub worst: f32,
}

#[derive(Debug, Clone)]
pub struct TrainingSummary {
    /// Fittest genome of the last evaluated generation
    pub winner: Genome,
    pub history: Vec<GenerationReport>,
    /// Whether `fitness_threshold` was reached
    pub solved: bool,
}

/// Seed for one trial; every genome of a generation faces the same drops
pub fn trial_seed(base: u64, generation: u32, trial: u32) -> u64 {
    base.wrapping_mul(2654435761)
        .wrapping_add((generation as u64) << 16)
        .wrapping_add(trial as u64)
}

/// Play one trial and return the beneficial catches
pub fn run_trial(
    genome: &Genome,
    config: &TrainingConfig,
    settings: &Settings,
    seed: u64,
) -> Result<u32> {
    let network = genome.to_network()?;
    let mut policy = LearnedPolicy::new(network, settings.policy_speed);
    let mut state = GameState::with_layout(seed, settings, &config.item_kinds);
    let dt = settings.dt();

    while !state.is_over() && state.time_ticks < config.max_ticks_per_trial {
        tick(&mut state, &mut policy, dt);
    }

    Ok(state.collected_count)
}

/// Mean catches over `trials_per_genome` trials
pub fn evaluate_genome(
    genome: &Genome,
    config: &TrainingConfig,
    settings: &Settings,
    generation: u32,
) -> f32 {
    let mut total = 0u64;
    for trial in 0..config.trials_per_genome {
        let seed = trial_seed(config.seed, generation, trial);
        match run_trial(genome, config, settings, seed) {
            Ok(catches) => total += catches as u64,
            Err(err) => {
                log::warn!("Genome can't be evaluated: {err}");
                return 0.0;
            }
        }
    }
    total as f32 / config.trials_per_genome as f32
}

pub struct Population {
    genomes: Vec<Genome>,
    generation: u32,
    rng: Pcg32,
    config: TrainingConfig,
    settings: Settings,
}

impl Population {
    /// Random initial population
    pub fn new(config: TrainingConfig, settings: Settings) -> Result<Self> {
        config.validate()?;
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let genomes = (0..config.population_size)
            .map(|_| Genome::random(config.hidden_neurons, config.weight_init_range, &mut rng))
            .collect();

        Ok(Self {
            genomes,
            generation: 0,
            rng,
            config,
            settings,
        })
    }

    /// Start from explicit genomes instead of random ones
    pub fn from_genomes(
        genomes: Vec<Genome>,
        config: TrainingConfig,
        settings: Settings,
    ) -> Result<Self> {
        config.validate()?;
        settings.validate()?;
        if genomes.is_empty() {
            return Err(Error::InvalidConfig("population needs at least one genome".into()));
        }
        let rng = Pcg32::seed_from_u64(config.seed);
        Ok(Self {
            genomes,
            generation: 0,
            rng,
            config,
            settings,
        })
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Score every genome in parallel
    pub fn evaluate(&mut self) -> GenerationReport {
        let generation = self.generation;
        let config = &self.config;
        let settings = &self.settings;
        self.genomes.par_iter_mut().for_each(|genome| {
            genome.fitness = evaluate_genome(genome, config, settings, generation);
        });

        let fitness = self.genomes.iter().map(|g| g.fitness);
        let best = fitness.clone().fold(f32::MIN, f32::max);
        let worst = fitness.clone().fold(f32::MAX, f32::min);
        let mean = fitness.sum::<f32>() / self.genomes.len() as f32;

        let report = GenerationReport {
            generation,
            best,
            mean,
            worst,
        };
        log::info!(
            "Generation {}: best {:.1}, mean {:.2}, worst {:.1}",
            report.generation,
            report.best,
            report.mean,
            report.worst
        );
        report
    }

    /// Fittest genome from the latest evaluation
    pub fn best(&self) -> Option<&Genome> {
        self.genomes
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
    }

    /// Replace the population with the next generation
    pub fn evolve(&mut self) {
        let mut ranked: Vec<&Genome> = self.genomes.iter().collect();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let mut next: Vec<Genome> = ranked
            .iter()
            .take(self.config.elitism)
            .map(|g| Genome {
                fitness: 0.0,
                ..(*g).clone()
            })
            .collect();

        while next.len() < self.config.population_size {
            let a = tournament(&self.genomes, self.config.tournament_size, &mut self.rng);
            let mut child = if self.rng.random::<f32>() < self.config.crossover_rate {
                let b = tournament(&self.genomes, self.config.tournament_size, &mut self.rng);
                a.crossover(b, &mut self.rng)
            } else {
                Genome {
                    fitness: 0.0,
                    ..a.clone()
                }
            };
            child.mutate(self.config.mutation_rate, self.config.mutation_power, &mut self.rng);
            next.push(child);
        }

        self.genomes = next;
        self.generation += 1;
    }
}

/// Fittest of `size` randomly drawn genomes
fn tournament<'a>(genomes: &'a [Genome], size: usize, rng: &mut impl Rng) -> &'a Genome {
    let mut best = &genomes[rng.random_range(0..genomes.len())];
    for _ in 1..size {
        let candidate = &genomes[rng.random_range(0..genomes.len())];
        if candidate.fitness > best.fitness {
            best = candidate;
        }
    }
    best
}

/// Evolve until the fitness threshold or the generation limit
pub fn train(config: TrainingConfig, settings: Settings) -> Result<TrainingSummary> {
    let generations = config.generations;
    let threshold = config.fitness_threshold;
    log::info!(
        "Training {} genomes for up to {} generations",
        config.population_size,
        generations
    );

    let mut population = Population::new(config, settings)?;
    let mut history = Vec::new();
    let mut solved = false;

    loop {
        let report = population.evaluate();
        history.push(report);
        if report.best >= threshold {
            solved = true;
            break;
        }
        if population.generation() + 1 >= generations {
            break;
        }
        population.evolve();
    }

    let winner = population
        .best()
        .cloned()
        .ok_or_else(|| Error::InvalidConfig("empty population".into()))?;
    log::info!(
        "Best genome after {} generations: fitness {:.1}{}",
        history.len(),
        winner.fitness,
        if solved { " (threshold reached)" } else { "" }
    );

    Ok(TrainingSummary {
        winner,
        history,
        solved,
    })
}
