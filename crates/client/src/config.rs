//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration of one headless run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub save_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub seed: Option<u64>,
    pub max_stages: u32,
    pub tick_seconds: f64,
}

impl ClientConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";
    pub const DEFAULT_MAX_STAGES: u32 = 5;
    pub const DEFAULT_TICK_SECONDS: f64 = 0.1;
    pub const MIN_TICK_SECONDS: f64 = 0.001;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `INFINITY_DATA_DIR` - Content directory (default: `data`)
    /// - `INFINITY_SAVE_DIR` - Profile directory (default: platform-specific)
    /// - `INFINITY_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `INFINITY_SEED` - Game seed (default: derived from the clock)
    /// - `INFINITY_MAX_STAGES` - Reward cycles before the run ends (default: 5)
    /// - `INFINITY_TICK_SECONDS` - Virtual seconds per tick (default: 0.1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("INFINITY_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.save_dir = env::var("INFINITY_SAVE_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("INFINITY_SESSION_ID").ok();
        config.seed = read_env::<u64>("INFINITY_SEED");

        if let Some(stages) = read_env::<u32>("INFINITY_MAX_STAGES") {
            config.max_stages = stages.max(1);
        }
        if let Some(tick) = read_env::<f64>("INFINITY_TICK_SECONDS")
            && tick.is_finite()
        {
            config.tick_seconds = tick.max(Self::MIN_TICK_SECONDS);
        }

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            save_dir: None,
            session_id: None,
            seed: None,
            max_stages: Self::DEFAULT_MAX_STAGES,
            tick_seconds: Self::DEFAULT_TICK_SECONDS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
