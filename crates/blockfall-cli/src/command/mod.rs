use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::util::{self, LogTarget};

use self::{play::PlayArg, replay::ReplayArg};

mod play;
mod replay;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log records to this file (level from `RUST_LOG`, default `info`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Replay a saved recording headlessly and print the final stats
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { log_file, mode } = CommandArgs::parse();
    let mode = mode.unwrap_or_else(|| Mode::Play(PlayArg::default()));

    // stderr would garble the terminal UI, so play only logs to a file
    let log_target = match (log_file, &mode) {
        (Some(path), _) => Some(LogTarget::File(path)),
        (None, Mode::Replay(_)) => Some(LogTarget::Stderr),
        (None, Mode::Play(_)) => None,
    };
    if let Some(target) = log_target {
        util::init_logging(target)?;
    }

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}
