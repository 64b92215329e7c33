use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Where log records go.
#[derive(Debug)]
pub(crate) enum LogTarget<'a> {
    /// Standard error, for runs that do not take over the terminal.
    Stderr,
    /// A file, truncated on start. The terminal UI owns the screen, so
    /// interactive sessions log here.
    File(&'a Path),
}

/// Installs the global logger. `RUST_LOG` selects the filter, `info` if unset.
pub(crate) fn init(target: LogTarget<'_>) -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_module_path(false);
    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }
    builder.try_init().context("logger already initialized")?;
    Ok(())
}
