//! Mushroom Collector entry point
//!
//! Headless front end: scripted keyboard play, policy training and replay of
//! a trained genome. Drawing and sound mixing are left to other front ends;
//! here the HUD goes to the log (`RUST_LOG=debug` for every second of play).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use mushroom_collector::Settings;
use mushroom_collector::audio::AudioManager;
use mushroom_collector::controller::{HumanController, LearnedPolicy, ScriptedInput};
use mushroom_collector::render::LogRenderer;
use mushroom_collector::session::{Session, SessionConfig, SessionSummary};
use mushroom_collector::sim::{EntityKind, GameState, SINGLE_PLAYER_LAYOUT};
use mushroom_collector::training::{Genome, TrainingConfig, train};

#[derive(Parser, Debug)]
#[command(name = "mushroom-collector", about = "Catch mushrooms, dodge the poisonous ones")]
struct Cli {
    /// Settings JSON (defaults are used when omitted)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play with a scripted key sequence
    Play {
        #[command(flatten)]
        run: RunArgs,
        /// Held keys per tick: L = left, R = right, anything else = neither
        #[arg(long, default_value = "")]
        inputs: String,
    },
    /// Evolve a policy network
    Train {
        /// Training config JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the config's seed
        #[arg(long)]
        seed: Option<u64>,
        /// Write the winning genome here
        #[arg(long)]
        save_winner: Option<PathBuf>,
    },
    /// Let a trained genome play (on the default training layout unless
    /// `--items` says otherwise)
    Watch {
        #[command(flatten)]
        run: RunArgs,
        /// Genome JSON written by `train --save-winner`
        #[arg(long)]
        genome: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,
    /// Throttle to the configured frame rate
    #[arg(long)]
    realtime: bool,
    /// Falling items, comma separated (e.g. `beneficial,poisonous`)
    #[arg(long, value_delimiter = ',')]
    items: Vec<EntityKind>,
}

impl RunArgs {
    /// Items to drop: `--items` if given, otherwise `default`
    fn layout(&self, default: &[EntityKind]) -> Vec<EntityKind> {
        if self.items.is_empty() {
            default.to_vec()
        } else {
            self.items.clone()
        }
    }
}

fn session_for(
    run: &RunArgs,
    settings: &Settings,
    default_layout: &[EntityKind],
) -> Result<Session> {
    let layout = run.layout(default_layout);
    anyhow::ensure!(
        layout.iter().any(|kind| kind.is_falling()),
        "--items needs at least one falling item"
    );

    let config = SessionConfig {
        max_frames: run.max_frames,
        realtime: run.realtime,
        ..SessionConfig::from_settings(settings)
    };
    let state = GameState::with_layout(run.seed, settings, &layout);
    Ok(Session::new(state, config))
}

fn print_summary(summary: &SessionSummary) {
    println!(
        "{:?} after {} ticks - Count: {} Poisonous: {} Missed: {}",
        summary.end,
        summary.ticks,
        summary.collected_count,
        summary.poisonous_count,
        summary.missed_count
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings =
        Settings::load_or_default(cli.settings.as_deref()).context("failed to load settings")?;

    match cli.command {
        Command::Play { run, inputs } => {
            let mut session = session_for(&run, &settings, &SINGLE_PLAYER_LAYOUT)?;
            let input = ScriptedInput::parse(&inputs);
            let mut human = HumanController::new(input, settings.human_speed);
            let mut renderer = LogRenderer::new(settings.fps as u64);
            let mut audio = AudioManager::from_settings(&settings);
            let summary = session.run(&mut human, &mut renderer, &mut audio);
            print_summary(&summary);
        }
        Command::Train {
            config,
            seed,
            save_winner,
        } => {
            let mut config = match config {
                Some(path) => {
                    TrainingConfig::load(&path).context("failed to load training config")?
                }
                None => TrainingConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }

            let summary = train(config, settings).context("training failed")?;
            println!(
                "Best fitness {:.1} after {} generations{}",
                summary.winner.fitness,
                summary.history.len(),
                if summary.solved { " (solved)" } else { "" }
            );
            if let Some(path) = save_winner {
                summary
                    .winner
                    .save(&path)
                    .with_context(|| format!("failed to save winner to {}", path.display()))?;
            }
        }
        Command::Watch { run, genome } => {
            let network = Genome::load_network(&genome)
                .with_context(|| format!("failed to load genome from {}", genome.display()))?;

            let layout = TrainingConfig::default().item_kinds;
            let mut session = session_for(&run, &settings, &layout)?;
            let mut policy = LearnedPolicy::new(network, settings.policy_speed);
            let mut renderer = LogRenderer::new(settings.fps as u64);
            let mut audio = AudioManager::from_settings(&settings);
            let summary = session.run(&mut policy, &mut renderer, &mut audio);
            print_summary(&summary);
        }
    }

    Ok(())
}
