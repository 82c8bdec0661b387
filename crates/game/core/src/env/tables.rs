use crate::env::OracleError;
use crate::stats::CharacterStat;

/// Oracle mapping a character level to its base stat record.
pub trait LevelTableOracle: Send + Sync {
    /// Base stats for `level` (1-based).
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LevelNotFound` if the table has no row for `level`.
    fn stat_for_level(&self, level: u32) -> Result<CharacterStat, OracleError>;
}

/// Oracle providing the global upper bounds of the stat system.
pub trait StatCapsOracle: Send + Sync {
    /// Highest reachable character (and stage) level.
    fn max_level(&self) -> u32;

    /// Per-field maximum applied to every composed total.
    fn max_stat(&self) -> CharacterStat;
}

/// Read-only table pair handed to stat operations.
#[derive(Clone, Copy)]
pub struct StatTables<'a> {
    pub levels: &'a dyn LevelTableOracle,
    pub caps: &'a dyn StatCapsOracle,
}

impl<'a> StatTables<'a> {
    pub fn new(levels: &'a dyn LevelTableOracle, caps: &'a dyn StatCapsOracle) -> Self {
        Self { levels, caps }
    }

    /// Uses one object for both lookups.
    pub fn from_table<T>(table: &'a T) -> Self
    where
        T: LevelTableOracle + StatCapsOracle,
    {
        Self::new(table, table)
    }
}

/// In-memory level table with its caps.
///
/// Row `i` holds the base stats for level `i + 1`; the number of rows is the
/// maximum level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatTable {
    levels: Vec<CharacterStat>,
    max_stat: CharacterStat,
}

impl StatTable {
    /// Builds a table from per-level rows and the global cap record.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EmptyLevelTable` if `levels` is empty.
    pub fn new(levels: Vec<CharacterStat>, max_stat: CharacterStat) -> Result<Self, OracleError> {
        if levels.is_empty() {
            return Err(OracleError::EmptyLevelTable);
        }
        Ok(Self { levels, max_stat })
    }

    pub fn levels(&self) -> &[CharacterStat] {
        &self.levels
    }

    pub fn as_tables(&self) -> StatTables<'_> {
        StatTables::from_table(self)
    }
}

impl LevelTableOracle for StatTable {
    fn stat_for_level(&self, level: u32) -> Result<CharacterStat, OracleError> {
        level
            .checked_sub(1)
            .and_then(|index| self.levels.get(index as usize))
            .copied()
            .ok_or(OracleError::LevelNotFound(level))
    }
}

impl StatCapsOracle for StatTable {
    fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }

    fn max_stat(&self) -> CharacterStat {
        self.max_stat
    }
}
