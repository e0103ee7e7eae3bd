//! Loaders for reading room configurations from files.
//!
//! Each loader follows the same shape: read file, serde-parse, validate the
//! dependency graph, return the typed configuration. A configuration that
//! fails validation never leaves the loader.

use std::path::Path;

use room_core::RoomConfig;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Loader for room configurations from RON and TOML files.
pub struct RoomLoader;

impl RoomLoader {
    /// Load a room configuration from a RON file.
    pub fn from_ron(path: &Path) -> LoadResult<RoomConfig> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load room from {}: {}", path.display(), e))
    }

    /// Load a room configuration from a TOML file.
    pub fn from_toml(path: &Path) -> LoadResult<RoomConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load room from {}: {}", path.display(), e))
    }

    /// Parse a room configuration from RON source.
    pub fn from_ron_str(content: &str) -> LoadResult<RoomConfig> {
        let config: RoomConfig = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse room RON: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a room configuration from TOML source.
    pub fn from_toml_str(content: &str) -> LoadResult<RoomConfig> {
        let config: RoomConfig =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse room TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_core::{ElementId, PuzzleKind};

    // Newtype ids (RoomId, ElementId) serialize transparently as their inner
    // string in both formats.
    const LAB_RON: &str = r#"(
    id: "lab",
    name: "Laboratory",
    description: "Chemical storage and analysis",
    elements: [
        (
            id: "fume-hood",
            name: "Fume hood",
            dependencies: [],
            puzzle: Some((
                kind: pattern,
                prompt: "Match the valve sequence",
                max_hints: 2,
            )),
            rewards: [
                clue(
                    title: "Valve order",
                    description: "Etched into the glass",
                ),
            ],
        ),
        (
            id: "sample-safe",
            name: "Sample safe",
            dependencies: ["fume-hood"],
        ),
    ],
)"#;

    #[test]
    fn parses_a_ron_room() {
        let config = RoomLoader::from_ron_str(LAB_RON).expect("RON room should parse");
        assert_eq!(config.id.as_str(), "lab");
        assert_eq!(config.elements.len(), 2);
        let hood = config.element(&ElementId::from("fume-hood")).unwrap();
        assert_eq!(hood.puzzle.as_ref().unwrap().kind, PuzzleKind::Pattern);
        assert_eq!(hood.rewards.len(), 1);
        assert_eq!(
            config.elements[1].dependencies,
            vec![ElementId::from("fume-hood")]
        );
    }

    #[test]
    fn parses_a_toml_room() {
        let toml_room = r#"
id = "archive"
name = "Archive"

[[elements]]
id = "card-index"
name = "Card index"

[[elements]]
id = "microfilm"
name = "Microfilm reader"
dependencies = ["card-index"]
"#;
        let config = RoomLoader::from_toml_str(toml_room).expect("TOML room should parse");
        assert_eq!(config.id.as_str(), "archive");
        assert_eq!(config.elements.len(), 2);
        assert!(config.elements[0].puzzle.is_none());
    }

    #[test]
    fn rejects_an_invalid_graph() {
        let bad = r#"(
    id: "lab",
    name: "Laboratory",
    elements: [
        (
            id: "a",
            name: "A",
            dependencies: ["ghost"],
        ),
    ],
)"#;
        assert!(RoomLoader::from_ron_str(bad).is_err());
    }
}
