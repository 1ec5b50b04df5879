use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use blockfall_engine::{GameConfig, GameSeed};
use rand::Rng as _;
use ratatui_runtime::Runtime;

use crate::{schema::record::RecordFile, util};

use self::app::PlayApp;

mod app;
mod input;

const DEFAULT_FPS: f64 = 60.0;
const MIN_FPS: f64 = 1.0;
const MAX_FPS: f64 = 1000.0;
const DEFAULT_RECORD_DIR: &str = "./data/recordings/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Game rules as JSON; missing fields take their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// 32-digit hex seed for a reproducible game (random if omitted)
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Start with random block injection enabled
    #[clap(long)]
    random_blocks: bool,
    /// Frames and simulation ticks per second (1 to 1000)
    #[clap(long, default_value_t = DEFAULT_FPS)]
    fps: f64,
    /// Save the game recording to a file when the session ends
    #[clap(long)]
    save_recording: bool,
    /// Directory to save recording files
    #[clap(long, default_value = DEFAULT_RECORD_DIR)]
    record_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            random_blocks: false,
            fps: DEFAULT_FPS,
            save_recording: false,
            record_dir: PathBuf::from(DEFAULT_RECORD_DIR),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        seed,
        random_blocks,
        fps,
        save_recording,
        record_dir,
    } = arg;

    check_fps(*fps)?;
    let config: GameConfig = match config {
        Some(path) => util::read_json_file("config", path)?,
        None => GameConfig::default(),
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let mut app = PlayApp::new(config, seed, *fps, *random_blocks, *save_recording)
        .context("Invalid game config")?;
    Runtime::new().run(&mut app)?;

    let (recording, session) = app.into_parts();
    eprintln!(
        "Final score {} (level {}, {} lines, seed {seed})",
        session.stats().score(),
        session.stats().level(),
        session.stats().cleared_lines(),
    );
    if let Some(recording) = recording {
        let path = RecordFile::new(recording, &session).save(record_dir)?;
        eprintln!("Saved recording to {}", path.display());
    }

    Ok(())
}

fn check_fps(fps: f64) -> anyhow::Result<()> {
    ensure!(
        (MIN_FPS..=MAX_FPS).contains(&fps),
        "--fps must be between {MIN_FPS} and {MAX_FPS}, got {fps}"
    );
    Ok(())
}
