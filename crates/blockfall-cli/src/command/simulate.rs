use blockfall_engine::{Command, GameEngine, GameSnapshot, PieceSeed};
use log::info;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{
    command::engine_arg::EngineArg,
    logging::{self, LogTarget},
};

/// Most player moves issued between two ticks by the random policy.
const MAX_MOVES_PER_TICK: usize = 4;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    engine: EngineArg,
    /// Maximum number of ticks to run
    #[clap(long, default_value_t = 1000)]
    ticks: u64,
    /// How player input is generated
    #[clap(long, value_enum, default_value_t = InputPolicy::Random)]
    policy: InputPolicy,
}

/// Source of simulated player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum InputPolicy {
    /// Up to a few random moves before every tick
    Random,
    /// No input; pieces fall straight down
    Idle,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    policy: InputPolicy,
    commands: u64,
    snapshot: GameSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        engine,
        ticks,
        policy,
    } = arg;

    logging::init(LogTarget::Stderr)?;
    let (mut engine, seed) = engine.build_engine()?;
    let report = simulate(&mut engine, seed, *policy, *ticks);
    info!(
        "simulation finished after {} commands, game over: {}",
        report.commands, report.snapshot.game_over
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Drives `engine` for up to `ticks` ticks, stopping early at game over.
///
/// Input is drawn from a generator derived from `seed`, so a run is fully
/// determined by the seed, policy and engine configuration.
fn simulate(
    engine: &mut GameEngine,
    seed: PieceSeed,
    policy: InputPolicy,
    ticks: u64,
) -> SimulationReport {
    let mut rng = input_rng(seed);
    let mut commands = 0;

    for _ in 0..ticks {
        if engine.is_game_over() {
            break;
        }
        if policy == InputPolicy::Random {
            for _ in 0..rng.random_range(0..=MAX_MOVES_PER_TICK) {
                engine.apply(random_move(&mut rng));
                commands += 1;
            }
        }
        engine.apply(Command::Tick);
        commands += 1;
    }

    SimulationReport {
        seed,
        policy,
        commands,
        snapshot: engine.snapshot(),
    }
}

/// Stream selector mixed into the seed so input draws do not mirror the
/// piece generator's sequence.
const INPUT_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

#[expect(clippy::cast_possible_truncation)]
fn input_rng(seed: PieceSeed) -> Pcg32 {
    let value = u128::from_le_bytes(seed.to_bytes());
    let state = value as u64;
    let stream = (value >> 64) as u64;
    Pcg32::new(state, stream ^ INPUT_STREAM)
}

fn random_move<R: Rng + ?Sized>(rng: &mut R) -> Command {
    Command::PLAYER_MOVES[rng.random_range(0..Command::PLAYER_MOVES.len())]
}
