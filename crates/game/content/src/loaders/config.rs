//! Stage configuration loader.

use std::path::Path;

use game_core::{GameConfig, StageConfig};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Layout of `stage.toml`: a `[game]` table and a `[stage]` table.
///
/// Both tables and every field inside them are optional; missing values fall
/// back to the game-core defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageFile {
    pub game: GameConfig,
    pub stage: StageConfig,
}

/// Loader for stage configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// The stage section is normalized (clamped into its valid ranges) before
    /// it is returned.
    pub fn load(path: &Path) -> LoadResult<StageFile> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StageFile> {
        let mut file: StageFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage TOML: {}", e))?;

        if file.game.max_actors == 0 {
            anyhow::bail!("game.max_actors must be at least 1");
        }
        file.stage = file.stage.normalized();

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use game_core::Position;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let file = ConfigLoader::parse("").unwrap();
        assert_eq!(file, StageFile::default());
    }

    #[test]
    fn partial_tables_override_defaults() {
        let file = ConfigLoader::parse(
            r#"
            [game]
            max_actors = 16

            [stage]
            initial_target_enemy_count = 3
            level_up_probability_percent = 150
            origin = { x = 10.0, y = 20.0, z = 0.0 }
            reward_spawn_points = [{ x = 1.0, y = 2.0, z = 3.0 }]
            "#,
        )
        .unwrap();

        assert_eq!(file.game.max_actors, 16);
        assert_eq!(file.stage.initial_target_enemy_count, 3);
        assert_eq!(file.stage.level_up_probability_percent, 100);
        assert_eq!(file.stage.origin, Position::new(10.0, 20.0, 0.0));
        assert_eq!(file.stage.reward_spawn_points.len(), 1);
        assert_eq!(
            file.stage.preparation_seconds,
            StageConfig::DEFAULT_PREPARATION_SECONDS
        );
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = ConfigLoader::parse("[game]\nmax_actors = 0").unwrap_err();
        assert!(err.to_string().contains("max_actors"));
    }

    #[test]
    fn too_many_reward_points_is_rejected() {
        let points = vec!["{ x = 0.0, y = 0.0, z = 0.0 }"; GameConfig::MAX_REWARD_POINTS + 1];
        let toml = format!("[stage]\nreward_spawn_points = [{}]", points.join(", "));
        assert!(ConfigLoader::parse(&toml).is_err());
    }
}
