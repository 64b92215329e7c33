use std::path::PathBuf;

use log::info;

use crate::{
    command::{engine_arg::EngineArg, play::app::PlayApp},
    logging::{self, LogTarget},
    tui::Runtime,
};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    engine: EngineArg,
    /// File that receives log output while the game owns the terminal
    #[clap(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

const DEFAULT_LOG_FILE: &str = "blockfall.log";

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            engine: EngineArg::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { engine, log_file } = arg;

    logging::init(LogTarget::File(log_file))?;
    let (engine, seed) = engine.build_engine()?;

    let mut app = PlayApp::new(engine);
    Runtime::new().run(&mut app)?;

    let stats = app.engine().stats();
    info!(
        "session ended: {} lines, {} pieces, {} ticks",
        stats.lines_cleared(),
        stats.locked_pieces(),
        stats.tick()
    );
    println!(
        "lines: {}  pieces: {}  seed: {seed}",
        stats.lines_cleared(),
        stats.locked_pieces()
    );
    Ok(())
}
