//! Scroll definitions.
//!
//! A scroll is a permanent stat bonus the player picks up during the reward
//! phase. Scrolls are handed out in catalogue order, cycling once exhausted.

use game_core::CharacterStat;

/// One scroll: a display name and the bonus it adds to the scroll layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollDefinition {
    pub name: String,
    pub bonus: CharacterStat,
}

impl ScrollDefinition {
    pub fn new(name: impl Into<String>, bonus: CharacterStat) -> Self {
        Self {
            name: name.into(),
            bonus,
        }
    }
}

/// Ordered scroll catalogue.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollCatalog {
    pub scrolls: Vec<ScrollDefinition>,
}

impl ScrollCatalog {
    pub fn new(scrolls: Vec<ScrollDefinition>) -> Self {
        Self { scrolls }
    }

    pub fn len(&self) -> usize {
        self.scrolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrolls.is_empty()
    }

    /// Scroll granted by the `draw`-th non-empty pickup (0-based), cycling
    /// through the catalogue. `None` for an empty catalogue.
    pub fn nth_cycled(&self, draw: usize) -> Option<&ScrollDefinition> {
        if self.scrolls.is_empty() {
            return None;
        }
        self.scrolls.get(draw % self.scrolls.len())
    }

    pub fn find(&self, name: &str) -> Option<&ScrollDefinition> {
        self.scrolls.iter().find(|scroll| scroll.name == name)
    }
}
