//! Sticker train entry point.
//!
//! A headless 2D scene built on:
//! - **bevy_ecs** for the entity-component-system architecture
//! - **configparser** for the INI configuration
//! - **crossbeam-channel** for the button readers running on their own threads
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (or use defaults) and the prefab definitions
//! 2. Pick a button source: keyboard, serial line, stdin lines or none
//! 3. Build the world, register observers and run the scene setup
//! 4. Step the schedule at a fixed `1 / fps` delta, sleeping between frames
//!    unless pacing is disabled
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini --serial /dev/ttyACM0
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info, warn};

use stickertrain::components::category::ObjectCategory;
use stickertrain::game::{build_schedule, build_world, step};
use stickertrain::resources::buttonsource::{
    ButtonInput, KeyboardButtonSource, LineButtonSource, TypedKeys,
};
use stickertrain::resources::collector::StickerCollector;
use stickertrain::resources::display::{Display, LogDisplay};
use stickertrain::resources::gameconfig::{GameConfig, InputMode};
use stickertrain::resources::prefabs::PrefabStore;
use stickertrain::resources::spawner::{ObjectSpawner, SpawnRng};

#[derive(Parser, Debug)]
#[command(version, about = "Headless side-scrolling sticker train")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON prefab definitions merged over the built-in ones.
    #[arg(long, value_name = "PATH")]
    prefabs: Option<PathBuf>,

    /// Read button frames from this serial device (overrides the config).
    #[arg(long, value_name = "DEVICE", conflicts_with = "stdin")]
    serial: Option<PathBuf>,

    /// Read button frames (`1,0,0,0,0` lines) from stdin.
    #[arg(long)]
    stdin: bool,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Run frames back to back instead of at the configured fps.
    #[arg(long)]
    no_pacing: bool,

    /// Write a configuration file with default values and exit.
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,

    /// Seed for spawn positions.
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(path: &PathBuf) -> GameConfig {
    let mut config = GameConfig::with_path(path.clone());
    if !config.file_exists() {
        info!("No config at {:?}, using defaults", path);
        return config;
    }
    if let Err(e) = config.load_from_file() {
        error!("{}; using defaults", e);
        return GameConfig::with_path(path.clone());
    }
    config
}

fn load_prefabs(path: Option<&PathBuf>) -> PrefabStore {
    match path {
        Some(path) => PrefabStore::load_from_file(path).unwrap_or_else(|e| {
            error!("{}; using built-in prefabs", e);
            PrefabStore::builtin()
        }),
        None => PrefabStore::builtin(),
    }
}

fn select_input(cli: &Cli, config: &GameConfig) -> Option<ButtonInput> {
    let timeout = config.input_timeout();
    let mode = if cli.serial.is_some() {
        InputMode::Serial
    } else if cli.stdin {
        InputMode::Stdin
    } else {
        config.input_mode
    };

    match mode {
        InputMode::Keyboard => Some(ButtonInput::new(KeyboardButtonSource::new(
            TypedKeys::stdin(),
            config.key_bindings,
        ))),
        InputMode::Serial => {
            let path = cli
                .serial
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.serial_path));
            match LineButtonSource::open(&path, timeout) {
                Ok(source) => Some(ButtonInput::new(source)),
                Err(e) => {
                    warn!("{}; running without buttons", e);
                    None
                }
            }
        }
        InputMode::Stdin => Some(ButtonInput::new(LineButtonSource::stdin(timeout))),
        InputMode::None => None,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Some(path) = &cli.write_default_config {
        return match GameConfig::with_path(path.clone()).save_to_file() {
            Ok(()) => {
                info!("Wrote default configuration to {:?}", path);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = load_config(&cli.config);
    let prefabs = load_prefabs(cli.prefabs.as_ref());
    let input = select_input(&cli, &config);
    let rng = cli.seed.map(SpawnRng::with_seed).unwrap_or_default();
    let display = Display::new(LogDisplay::default(), config.sorting_layers.clone());

    let fps = config.fps.max(1);
    let dt = 1.0 / fps as f32;
    let frame_time = Duration::from_secs_f32(dt);

    let mut world = build_world(config, prefabs, input, display, rng);
    let mut update = build_schedule();
    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Running at {} fps", fps);
    let mut frame: u64 = 0;
    loop {
        if cli.frames.is_some_and(|limit| frame >= limit) {
            break;
        }
        let started = Instant::now();
        step(&mut world, &mut update, dt);
        frame += 1;

        if !cli.no_pacing {
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let spawner = world.resource::<ObjectSpawner>();
    for category in ObjectCategory::ALL {
        info!("{}: {} spawned", category.key(), spawner.count(category));
    }
    let collector = world.resource::<StickerCollector>();
    info!(
        "{} frames, {} sticker(s) waiting, {} on the board",
        frame,
        collector.len(),
        collector.on_board().len()
    );
    ExitCode::SUCCESS
}
