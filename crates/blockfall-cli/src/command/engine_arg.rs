use std::{fs, path::PathBuf, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{EngineConfig, GameEngine, PieceSeed, RotationPolicy};
use log::info;

/// Engine options shared by every subcommand.
///
/// Values given on the command line override the ones read from `--config`.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EngineArg {
    /// JSON file with engine settings
    #[clap(long)]
    config: Option<PathBuf>,
    /// Piece sequence seed, 32 hexadecimal digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Whether rotations may move cells into walls or locked cells
    #[clap(long, value_enum)]
    rotation: Option<RotationArg>,
    /// Starting speed scalar (milliseconds per drop)
    #[clap(long, allow_negative_numbers = true)]
    initial_speed: Option<i64>,
    /// Shortest allowed time between drops, in milliseconds
    #[clap(long)]
    min_drop_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RotationArg {
    Permissive,
    Guarded,
}

impl From<RotationArg> for RotationPolicy {
    fn from(arg: RotationArg) -> Self {
        match arg {
            RotationArg::Permissive => Self::Permissive,
            RotationArg::Guarded => Self::Guarded,
        }
    }
}

impl EngineArg {
    pub(crate) fn config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => EngineConfig::default(),
        };
        if let Some(rotation) = self.rotation {
            config.rotation = rotation.into();
        }
        if let Some(speed) = self.initial_speed {
            config.initial_speed = speed;
        }
        if let Some(millis) = self.min_drop_interval_ms {
            config.min_drop_interval = Duration::from_millis(millis);
        }
        Ok(config)
    }

    /// Resolves the configuration and seed and builds a fresh engine.
    pub(crate) fn build_engine(&self) -> anyhow::Result<(GameEngine, PieceSeed)> {
        let config = self.config()?;
        let seed = self.seed.unwrap_or_else(rand::random);
        info!("starting engine with seed {seed}, {config:?}");
        Ok((GameEngine::with_seed(config, seed), seed))
    }
}
