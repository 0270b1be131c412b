//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! fps = 60
//!
//! [scroll]
//! speed = 2
//! ease_duration = 2
//! easing = quad_in
//! passing_interval = 5
//!
//! [spawner]
//! spawn_x = 28
//! tree_min_y = -14
//! tree_max_y = -5
//! tree_max_scale = 2.5
//!
//! [misc]
//! interval = 10
//! entries = tractor@30,-12,20 | balloon@30,9
//!
//! [input]
//! source = keyboard
//! serial_path = /dev/ttyACM0
//! read_timeout_ms = 5
//! keys = 12345
//! ```
//!
//! Every key is optional; anything missing keeps its default.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use configparser::ini::Ini;
use log::{info, warn};
use thiserror::Error;

use crate::components::category::ObjectCategory;
use crate::components::miscspawner::SpawnEntry;
use crate::components::sticker::DEFAULT_COLLECT_X;
use crate::components::stickerboard::DEFAULT_MIN_CELL_SIZE;
use crate::components::tween::Easing;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_FPS: u32 = 60;
const DEFAULT_SCROLL_SPEED: f32 = 2.0;
const DEFAULT_EASE_DURATION: f32 = 2.0;
const DEFAULT_PASSING_INTERVAL: f32 = 5.0;
const DEFAULT_PASSING_SPEED: f32 = 5.0;
const DEFAULT_PASSING_LIFETIME: f32 = 15.0;
const DEFAULT_PASSING_PAUSE: f32 = 5.0;
const DEFAULT_SPAWN_X: f32 = 28.0;
const DEFAULT_MISC_INTERVAL: f32 = 10.0;
const DEFAULT_READ_TIMEOUT_MS: u64 = 5;
const DEFAULT_SERIAL_PATH: &str = "/dev/ttyACM0";
const DEFAULT_SORTING_LAYERS: [&str; 5] = ["Sky", "Background", "Ground", "Station", "Board"];

/// Errors raised while loading or saving configuration data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for [{section}] {key}: {value}")]
    InvalidValue {
        section: &'static str,
        key: String,
        value: String,
    },
    #[error("failed to read prefab file {path:?}: {source}")]
    PrefabIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse prefab file {path:?}: {source}")]
    PrefabParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where button frames come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Key-held state from a keyboard port.
    #[default]
    Keyboard,
    /// Comma-separated lines from a serial device file.
    Serial,
    /// Comma-separated lines from standard input.
    Stdin,
    /// No input at all; the scene only scrolls.
    None,
}

impl InputMode {
    pub fn name(self) -> &'static str {
        match self {
            InputMode::Keyboard => "keyboard",
            InputMode::Serial => "serial",
            InputMode::Stdin => "stdin",
            InputMode::None => "none",
        }
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyboard" => Ok(InputMode::Keyboard),
            "serial" => Ok(InputMode::Serial),
            "stdin" => Ok(InputMode::Stdin),
            "none" => Ok(InputMode::None),
            other => Err(format!("unknown input source '{other}'")),
        }
    }
}

/// Spawn and growth settings for one object category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySettings {
    pub min_y: f32,
    pub max_y: f32,
    pub base_scale: f32,
    pub max_scale: f32,
    /// Render/sorting layer assigned on spawn.
    pub layer: String,
}

impl CategorySettings {
    /// Built-in settings for a category.
    pub fn defaults_for(category: ObjectCategory) -> Self {
        let (min_y, max_y, base_scale, max_scale, layer) = match category {
            ObjectCategory::Cow => (3.0, 10.0, 1.0, 3.0, "Ground"),
            ObjectCategory::Cloud => (3.0, 10.0, 1.0, 3.0, "Sky"),
            ObjectCategory::Flower => (-15.0, -8.0, 0.5, 3.0, "Ground"),
            ObjectCategory::Windmill => (3.0, 10.0, 1.0, 3.0, "Ground"),
            ObjectCategory::Tree => (-14.0, -5.0, 1.0, 2.5, "Ground"),
        };
        Self {
            min_y,
            max_y,
            base_scale,
            max_scale,
            layer: layer.to_string(),
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    // [simulation]
    /// Fixed simulation steps per second.
    pub fps: u32,
    pub time_scale: f32,

    // [camera]
    pub camera_position: Vec2,
    pub camera_half_width: f32,
    pub camera_half_height: f32,

    // [background]
    pub sky_parallax: f32,
    pub sky_speed: f32,
    pub hills_parallax: f32,
    pub hills_speed: f32,

    // [scroll]
    pub scroll_speed: f32,
    pub ease_duration: f32,
    pub easing: Easing,
    /// Seconds between passing object spawns.
    pub passing_interval: f32,

    // [passing]
    pub passing_prefab: String,
    pub passing_speed: f32,
    pub passing_lifetime: f32,
    pub passing_pause: f32,
    pub passing_offset: Vec2,

    // [drift]
    pub drift_speed: f32,
    pub drift_acceleration: f32,
    pub collect_x: f32,

    // [spawner]
    pub spawn_x: f32,
    /// Indexed by button slot.
    pub categories: [CategorySettings; 5],

    // [board]
    pub board_position: Vec2,
    pub board_min_cell: f32,
    pub board_width_factor: f32,
    pub board_height_factor: f32,

    // [misc]
    pub misc_interval: f32,
    pub misc_entries: Vec<SpawnEntry>,

    // [input]
    pub input_mode: InputMode,
    pub serial_path: String,
    /// Upper bound; see [`GameConfig::input_timeout`].
    pub read_timeout_ms: u64,
    pub key_bindings: [char; 5],

    // [render]
    pub sorting_layers: Vec<String>,

    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            fps: DEFAULT_FPS,
            time_scale: 1.0,
            camera_position: Vec2::ZERO,
            camera_half_width: 17.5,
            camera_half_height: 10.0,
            sky_parallax: 0.9,
            sky_speed: 0.5,
            hills_parallax: 0.5,
            hills_speed: 1.0,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            ease_duration: DEFAULT_EASE_DURATION,
            easing: Easing::QuadIn,
            passing_interval: DEFAULT_PASSING_INTERVAL,
            passing_prefab: "station".to_string(),
            passing_speed: DEFAULT_PASSING_SPEED,
            passing_lifetime: DEFAULT_PASSING_LIFETIME,
            passing_pause: DEFAULT_PASSING_PAUSE,
            passing_offset: Vec2::new(10.0, 0.0),
            drift_speed: 3.0,
            drift_acceleration: 0.5,
            collect_x: DEFAULT_COLLECT_X,
            spawn_x: DEFAULT_SPAWN_X,
            categories: ObjectCategory::ALL.map(CategorySettings::defaults_for),
            board_position: Vec2::new(-8.0, 0.0),
            board_min_cell: DEFAULT_MIN_CELL_SIZE,
            board_width_factor: 1.0,
            board_height_factor: 1.0,
            misc_interval: DEFAULT_MISC_INTERVAL,
            misc_entries: vec![
                SpawnEntry::new("tractor", Vec2::new(30.0, -12.0)).with_ttl(30.0),
                SpawnEntry::new("balloon", Vec2::new(30.0, 8.0)).with_ttl(30.0),
            ],
            input_mode: InputMode::Keyboard,
            serial_path: DEFAULT_SERIAL_PATH.to_string(),
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            key_bindings: ['1', '2', '3', '4', '5'],
            sorting_layers: DEFAULT_SORTING_LAYERS.iter().map(|s| s.to_string()).collect(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Wait for button lines, capped at half a frame so an idle line source
    /// never slows the simulation below `fps`.
    pub fn input_timeout(&self) -> Duration {
        let half_frame = Duration::from_secs_f64(0.5 / f64::from(self.fps.max(1)));
        Duration::from_millis(self.read_timeout_ms).min(half_frame)
    }

    /// Settings for a category.
    pub fn category(&self, category: ObjectCategory) -> &CategorySettings {
        &self.categories[category.slot()]
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Malformed values
    /// are logged and ignored. Returns an error if the file cannot be read.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|message| ConfigError::Load {
                path: self.config_path.clone(),
                message,
            })?;

        // [simulation]
        read_u32(&config, "simulation", "fps", &mut self.fps);
        read_f32(&config, "simulation", "time_scale", &mut self.time_scale);

        // [camera]
        read_f32(&config, "camera", "x", &mut self.camera_position.x);
        read_f32(&config, "camera", "y", &mut self.camera_position.y);
        read_f32(&config, "camera", "half_width", &mut self.camera_half_width);
        read_f32(&config, "camera", "half_height", &mut self.camera_half_height);

        // [background]
        read_f32(&config, "background", "sky_parallax", &mut self.sky_parallax);
        read_f32(&config, "background", "sky_speed", &mut self.sky_speed);
        read_f32(&config, "background", "hills_parallax", &mut self.hills_parallax);
        read_f32(&config, "background", "hills_speed", &mut self.hills_speed);

        // [scroll]
        read_f32(&config, "scroll", "speed", &mut self.scroll_speed);
        read_f32(&config, "scroll", "ease_duration", &mut self.ease_duration);
        read_parsed(&config, "scroll", "easing", &mut self.easing);
        read_f32(&config, "scroll", "passing_interval", &mut self.passing_interval);

        // [passing]
        if let Some(prefab) = config.get("passing", "prefab") {
            self.passing_prefab = prefab;
        }
        read_f32(&config, "passing", "speed", &mut self.passing_speed);
        read_f32(&config, "passing", "lifetime", &mut self.passing_lifetime);
        read_f32(&config, "passing", "pause", &mut self.passing_pause);
        read_f32(&config, "passing", "offset_x", &mut self.passing_offset.x);
        read_f32(&config, "passing", "offset_y", &mut self.passing_offset.y);

        // [drift]
        read_f32(&config, "drift", "speed", &mut self.drift_speed);
        read_f32(&config, "drift", "acceleration", &mut self.drift_acceleration);
        read_f32(&config, "drift", "collect_x", &mut self.collect_x);

        // [spawner]
        read_f32(&config, "spawner", "spawn_x", &mut self.spawn_x);
        for category in ObjectCategory::ALL {
            let key = category.key();
            let settings = &mut self.categories[category.slot()];
            read_f32(&config, "spawner", &format!("{key}_min_y"), &mut settings.min_y);
            read_f32(&config, "spawner", &format!("{key}_max_y"), &mut settings.max_y);
            read_f32(
                &config,
                "spawner",
                &format!("{key}_base_scale"),
                &mut settings.base_scale,
            );
            read_f32(
                &config,
                "spawner",
                &format!("{key}_max_scale"),
                &mut settings.max_scale,
            );
            if let Some(layer) = config.get("spawner", &format!("{key}_layer")) {
                settings.layer = layer;
            }
        }

        // [board]
        read_f32(&config, "board", "x", &mut self.board_position.x);
        read_f32(&config, "board", "y", &mut self.board_position.y);
        read_f32(&config, "board", "min_cell", &mut self.board_min_cell);
        read_f32(&config, "board", "width_factor", &mut self.board_width_factor);
        read_f32(&config, "board", "height_factor", &mut self.board_height_factor);

        // [misc]
        read_f32(&config, "misc", "interval", &mut self.misc_interval);
        if let Some(entries) = config.get("misc", "entries") {
            match parse_misc_entries(&entries) {
                Ok(parsed) => self.misc_entries = parsed,
                Err(e) => warn!("{}", e),
            }
        }

        // [input]
        read_parsed(&config, "input", "source", &mut self.input_mode);
        if let Some(path) = config.get("input", "serial_path") {
            self.serial_path = path;
        }
        match config.getuint("input", "read_timeout_ms") {
            Ok(Some(ms)) => self.read_timeout_ms = ms,
            Ok(None) => {}
            Err(e) => warn!("[input] read_timeout_ms: {}", e),
        }
        if let Some(keys) = config.get("input", "keys") {
            let chars: Vec<char> = keys.trim().chars().collect();
            match <[char; 5]>::try_from(chars) {
                Ok(bindings) => self.key_bindings = bindings,
                Err(_) => warn!("[input] keys must be exactly five characters, got '{}'", keys),
            }
        }

        // [render]
        if let Some(layers) = config.get("render", "sorting_layers") {
            let layers: Vec<String> = layers
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !layers.is_empty() {
                self.sorting_layers = layers;
            }
        }

        info!(
            "Loaded config from {:?}: fps={}, scroll={}, passing every {}s, input={}",
            self.config_path,
            self.fps,
            self.scroll_speed,
            self.passing_interval,
            self.input_mode.name()
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("simulation", "fps", self.fps.to_string());
        set("simulation", "time_scale", self.time_scale.to_string());

        set("camera", "x", self.camera_position.x.to_string());
        set("camera", "y", self.camera_position.y.to_string());
        set("camera", "half_width", self.camera_half_width.to_string());
        set("camera", "half_height", self.camera_half_height.to_string());

        set("background", "sky_parallax", self.sky_parallax.to_string());
        set("background", "sky_speed", self.sky_speed.to_string());
        set("background", "hills_parallax", self.hills_parallax.to_string());
        set("background", "hills_speed", self.hills_speed.to_string());

        set("scroll", "speed", self.scroll_speed.to_string());
        set("scroll", "ease_duration", self.ease_duration.to_string());
        set("scroll", "easing", self.easing.name().to_string());
        set("scroll", "passing_interval", self.passing_interval.to_string());

        set("passing", "prefab", self.passing_prefab.clone());
        set("passing", "speed", self.passing_speed.to_string());
        set("passing", "lifetime", self.passing_lifetime.to_string());
        set("passing", "pause", self.passing_pause.to_string());
        set("passing", "offset_x", self.passing_offset.x.to_string());
        set("passing", "offset_y", self.passing_offset.y.to_string());

        set("drift", "speed", self.drift_speed.to_string());
        set("drift", "acceleration", self.drift_acceleration.to_string());
        set("drift", "collect_x", self.collect_x.to_string());

        set("spawner", "spawn_x", self.spawn_x.to_string());
        for category in ObjectCategory::ALL {
            let key = category.key();
            let settings = self.category(category);
            set("spawner", &format!("{key}_min_y"), settings.min_y.to_string());
            set("spawner", &format!("{key}_max_y"), settings.max_y.to_string());
            set(
                "spawner",
                &format!("{key}_base_scale"),
                settings.base_scale.to_string(),
            );
            set(
                "spawner",
                &format!("{key}_max_scale"),
                settings.max_scale.to_string(),
            );
            set("spawner", &format!("{key}_layer"), settings.layer.clone());
        }

        set("board", "x", self.board_position.x.to_string());
        set("board", "y", self.board_position.y.to_string());
        set("board", "min_cell", self.board_min_cell.to_string());
        set("board", "width_factor", self.board_width_factor.to_string());
        set("board", "height_factor", self.board_height_factor.to_string());

        set("misc", "interval", self.misc_interval.to_string());
        set("misc", "entries", format_misc_entries(&self.misc_entries));

        set("input", "source", self.input_mode.name().to_string());
        set("input", "serial_path", self.serial_path.clone());
        set("input", "read_timeout_ms", self.read_timeout_ms.to_string());
        set("input", "keys", self.key_bindings.iter().collect());

        set("render", "sorting_layers", self.sorting_layers.join(","));

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Whether the configured file exists on disk.
    pub fn file_exists(&self) -> bool {
        Path::new(&self.config_path).exists()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    match config.getfloat(section, key) {
        Ok(Some(v)) => *target = v as f32,
        Ok(None) => {}
        Err(e) => warn!("[{}] {}: {}", section, key, e),
    }
}

fn read_u32(config: &Ini, section: &str, key: &str, target: &mut u32) {
    match config.getuint(section, key) {
        Ok(Some(v)) => *target = v as u32,
        Ok(None) => {}
        Err(e) => warn!("[{}] {}: {}", section, key, e),
    }
}

fn read_parsed<T: FromStr<Err = String>>(config: &Ini, section: &str, key: &str, target: &mut T) {
    if let Some(raw) = config.get(section, key) {
        match raw.parse::<T>() {
            Ok(v) => *target = v,
            Err(e) => warn!("[{}] {}: {}", section, key, e),
        }
    }
}

/// Parse `prefab@x,y[,ttl]` entries separated by `|`.
pub fn parse_misc_entries(raw: &str) -> Result<Vec<SpawnEntry>, ConfigError> {
    let invalid = |entry: &str| ConfigError::InvalidValue {
        section: "misc",
        key: "entries".to_string(),
        value: entry.to_string(),
    };

    let mut entries = Vec::new();
    for entry in raw.split('|').map(str::trim).filter(|s| !s.is_empty()) {
        let (prefab, coords) = entry.split_once('@').ok_or_else(|| invalid(entry))?;
        let numbers = coords
            .split(',')
            .map(|n| n.trim().parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|_| invalid(entry))?;
        let spawn = match numbers.as_slice() {
            [x, y] => SpawnEntry::new(prefab.trim(), Vec2::new(*x, *y)),
            [x, y, ttl] => SpawnEntry::new(prefab.trim(), Vec2::new(*x, *y)).with_ttl(*ttl),
            _ => return Err(invalid(entry)),
        };
        if spawn.prefab.is_empty() {
            return Err(invalid(entry));
        }
        entries.push(spawn);
    }
    Ok(entries)
}

/// Inverse of [`parse_misc_entries`].
pub fn format_misc_entries(entries: &[SpawnEntry]) -> String {
    entries
        .iter()
        .map(|e| match e.ttl {
            Some(ttl) => format!("{}@{},{},{}", e.prefab, e.position.x, e.position.y, ttl),
            None => format!("{}@{},{}", e.prefab, e.position.x, e.position.y),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
