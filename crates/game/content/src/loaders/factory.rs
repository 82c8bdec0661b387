//! Content factory for building game content from data files.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, StageConfig, StatTable};

use crate::loaders::{ConfigLoader, LoadResult, ScrollLoader, StageFile, StatTableLoader};
use crate::scroll::ScrollCatalog;

/// Everything a session needs from the data directory.
#[derive(Clone, Debug)]
pub struct Content {
    pub game: GameConfig,
    pub stage: StageConfig,
    pub stats: StatTable,
    pub scrolls: ScrollCatalog,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── stage.toml
/// ├── stats.ron
/// └── scrolls.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load world and stage configuration from `stage.toml`.
    pub fn load_stage_file(&self) -> LoadResult<StageFile> {
        ConfigLoader::load(&self.data_dir.join("stage.toml"))
    }

    /// Load the level table and caps from `stats.ron`.
    pub fn load_stat_table(&self) -> LoadResult<StatTable> {
        StatTableLoader::load(&self.data_dir.join("stats.ron"))
    }

    /// Load the scroll catalogue from `scrolls.ron`.
    ///
    /// A missing file yields an empty catalogue.
    pub fn load_scrolls(&self) -> LoadResult<ScrollCatalog> {
        let path = self.data_dir.join("scrolls.ron");
        if !path.exists() {
            return Ok(ScrollCatalog::default());
        }
        ScrollLoader::load(&path)
    }

    /// Load every content file.
    pub fn load_all(&self) -> LoadResult<Content> {
        let StageFile { game, stage } = self.load_stage_file()?;
        Ok(Content {
            game,
            stage,
            stats: self.load_stat_table()?,
            scrolls: self.load_scrolls()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
