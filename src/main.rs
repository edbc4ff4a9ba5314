//! Vector Arcade headless runner
//!
//! Builds one of the bundled games, drives it for a number of ticks with a
//! scripted keyboard and a manual clock, and logs what happened.
//!
//! ```text
//! vector-arcade <asteroids|lander|snake|invaders> [ticks] [--seed N] [--settings path.json]
//! ```

use std::process::ExitCode;
use std::rc::Rc;

use vector_arcade::audio::{AudioManager, SoundEffect};
use vector_arcade::consts::FRAME_MS;
use vector_arcade::games::{Arcade, Collaborators};
use vector_arcade::platform::{Key, Keyboard, ManualClock};
use vector_arcade::renderer::RecordingSurface;
use vector_arcade::{GamePreset, SettingsError, WorldSettings};

const DEFAULT_TICKS: u64 = 600;
const USAGE: &str = concat!(
    "usage: vector-arcade <asteroids|lander|snake|invaders> ",
    "[ticks] [--seed N] [--settings path.json]"
);

#[derive(thiserror::Error, Debug)]
enum RunError {
    #[error("unknown game '{0}'")]
    UnknownGame(String),
    #[error("missing game name")]
    MissingGame,
    #[error("invalid number '{0}'")]
    BadNumber(String),
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("unexpected argument '{0}'")]
    Unexpected(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

struct Options {
    preset: GamePreset,
    ticks: u64,
    seed: Option<u64>,
    settings_path: Option<String>,
}

fn parse_number(s: &str) -> Result<u64, RunError> {
    s.parse().map_err(|_| RunError::BadNumber(s.to_string()))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, RunError> {
    let mut args = args.into_iter();
    let game = args.next().ok_or(RunError::MissingGame)?;
    let preset = GamePreset::from_str(&game).ok_or(RunError::UnknownGame(game))?;

    let mut options = Options {
        preset,
        ticks: DEFAULT_TICKS,
        seed: None,
        settings_path: None,
    };
    let mut ticks_seen = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or(RunError::MissingValue("--seed"))?;
                options.seed = Some(parse_number(&value)?);
            }
            "--settings" => {
                let value = args.next().ok_or(RunError::MissingValue("--settings"))?;
                options.settings_path = Some(value);
            }
            _ if !ticks_seen && !arg.starts_with("--") => {
                options.ticks = parse_number(&arg)?;
                ticks_seen = true;
            }
            _ => return Err(RunError::Unexpected(arg)),
        }
    }
    Ok(options)
}

/// Keys held on a given tick: fire constantly, turn now and then
fn script_keys(keyboard: &Keyboard, tick: u64) {
    keyboard.release_all();
    keyboard.press(Key::Action);
    match (tick / 60) % 4 {
        0 => keyboard.press(Key::Left),
        2 => keyboard.press(Key::Right),
        _ => {}
    }
    if tick % 120 < 10 {
        keyboard.press(Key::Up);
    }
}

/// Preset settings, overlaid with the settings file and seed if given
fn resolve_settings(options: &Options) -> Result<WorldSettings, RunError> {
    let preset = options.preset.settings();
    let mut settings = match &options.settings_path {
        Some(path) => WorldSettings::load_over(path, &preset)?,
        None => preset,
    };
    if let Some(seed) = options.seed {
        settings.seed = seed;
    }
    settings.validate()?;
    Ok(settings)
}

fn run(options: Options) -> Result<(), RunError> {
    let settings = resolve_settings(&options)?;

    let keyboard = Rc::new(Keyboard::new());
    let clock = Rc::new(ManualClock::new(0));
    let audio = Rc::new(AudioManager::new());
    let collab = Collaborators::new(keyboard.clone(), clock.clone()).with_audio(&audio);

    let mut arcade = Arcade::build(options.preset, settings, &collab);
    let mut surface = RecordingSurface::new();
    let mut contacts = 0;
    let mut added = 0;
    let mut removed = 0;

    for tick in 0..options.ticks {
        script_keys(&keyboard, tick);
        clock.advance(FRAME_MS);
        let report = arcade.tick(&mut surface);
        contacts += report.contacts.len();
        added += report.added;
        removed += report.removed;
    }

    log::info!(
        "{}: {} ticks, {} contacts, +{} -{} bodies, {} draw calls, {} shots",
        options.preset.as_str(),
        options.ticks,
        contacts,
        added,
        removed,
        surface.total_calls,
        audio.play_count(SoundEffect::Shot)
    );
    for (kind, count) in arcade.census() {
        log::info!("  {kind}: {count}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}
