//! Scroll catalogue loader.

use std::collections::HashSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scroll::ScrollCatalog;

/// Loader for the scroll catalogue from RON files.
pub struct ScrollLoader;

impl ScrollLoader {
    /// Load the scroll catalogue from a RON file.
    ///
    /// Scroll names must be non-empty and unique.
    pub fn load(path: &Path) -> LoadResult<ScrollCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScrollCatalog> {
        let catalog: ScrollCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scroll catalogue RON: {}", e))?;

        let mut seen = HashSet::new();
        for scroll in &catalog.scrolls {
            if scroll.name.is_empty() {
                anyhow::bail!("Scroll with empty name");
            }
            if !seen.insert(scroll.name.as_str()) {
                anyhow::bail!("Duplicate scroll '{}'", scroll.name);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalogue() {
        let catalog = ScrollLoader::parse(
            r#"(scrolls: [
                (name: "vigor", bonus: (max_hp: 20.0)),
                (name: "swift", bonus: (movement_speed: 50.0)),
            ])"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.scrolls[1].bonus.movement_speed, 50.0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ScrollLoader::parse(
            r#"(scrolls: [(name: "a", bonus: (max_hp: 1.0)), (name: "a", bonus: (attack: 1.0))])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate scroll 'a'"));
    }
}
