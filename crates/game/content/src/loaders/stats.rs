//! Level table loader.

use std::path::Path;

use game_core::{CharacterStat, StatTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Level table structure for RON files.
///
/// `levels[0]` is the level-1 row; the row count is the maximum level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTableSpec {
    pub max_stat: CharacterStat,
    pub levels: Vec<CharacterStat>,
}

/// Loader for character level tables from RON files.
pub struct StatTableLoader;

impl StatTableLoader {
    /// Load a level table from a RON file.
    ///
    /// Fails when the table is empty or a row exceeds the caps.
    pub fn load(path: &Path) -> LoadResult<StatTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StatTable> {
        let spec: StatTableSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stat table RON: {}", e))?;

        if let Some(level) = spec
            .levels
            .iter()
            .position(|row| !row.within(&spec.max_stat))
        {
            anyhow::bail!("Level {} exceeds max_stat", level + 1);
        }

        StatTable::new(spec.levels, spec.max_stat)
            .map_err(|e| anyhow::anyhow!("Invalid stat table: {}", e))
    }
}
