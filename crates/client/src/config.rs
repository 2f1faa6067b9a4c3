//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Settings for one headless session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `maps/`.
    pub data_dir: PathBuf,
    /// Explicit engine config file; `data_dir/config.toml` when unset.
    pub config_path: Option<PathBuf>,
    /// Map name resolved as `data_dir/maps/{map}.ron`.
    pub map: String,
    pub ticks: u64,
    /// Comma-separated player commands, see [`crate::script`].
    pub script: String,
    pub message_capacity: usize,
    /// Also write logs to `client.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub const DEFAULT_MAP: &'static str = "cellar";
    pub const DEFAULT_TICKS: u64 = 60;
    pub const DEFAULT_SCRIPT: &'static str =
        "move:east,get:dagger,wield:dagger,wear:cloak,move:east,move:east,move:east,move:east";
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 256;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_DATA_DIR` - Content directory (default: the crate's `data/`)
    /// - `DUNGEON_CONFIG` - Engine config TOML (default: `{data_dir}/config.toml`)
    /// - `DUNGEON_MAP` - Map name under `{data_dir}/maps/` (default: `cellar`)
    /// - `DUNGEON_TICKS` - Ticks to simulate (default: 60)
    /// - `DUNGEON_SCRIPT` - Player commands (default: a short cellar walk)
    /// - `DUNGEON_MESSAGE_CAPACITY` - Message log capacity (default: 256)
    /// - `DUNGEON_LOG_DIR` - Optional directory for a log file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DUNGEON_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.config_path = env::var("DUNGEON_CONFIG").ok().map(PathBuf::from);
        if let Ok(map) = env::var("DUNGEON_MAP") {
            config.map = map;
        }
        if let Some(ticks) = read_env::<u64>("DUNGEON_TICKS") {
            config.ticks = ticks;
        }
        if let Ok(script) = env::var("DUNGEON_SCRIPT") {
            config.script = script;
        }
        if let Some(capacity) = read_env::<usize>("DUNGEON_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }
        config.log_dir = env::var("DUNGEON_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            config_path: None,
            map: Self::DEFAULT_MAP.to_string(),
            ticks: Self::DEFAULT_TICKS,
            script: Self::DEFAULT_SCRIPT.to_string(),
            message_capacity: Self::DEFAULT_MESSAGE_CAPACITY,
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
