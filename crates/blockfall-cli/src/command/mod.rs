use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

mod engine_arg;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a game headlessly with random input and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_simulate_subcommand() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "simulate",
            "--ticks",
            "50",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--rotation",
            "guarded",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_rejects_bad_seed() {
        let result = CommandArgs::try_parse_from(["blockfall", "play", "--seed", "xyz"]);
        assert!(result.is_err());
    }
}
