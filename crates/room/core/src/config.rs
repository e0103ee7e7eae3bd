//! Static, authored room configuration.
//!
//! A [`RoomConfig`] is supplied whole at store creation; the engine never
//! fetches or partially loads configuration. [`RoomConfig::validate`] checks
//! the dependency graph up front so a malformed config fails construction
//! loudly instead of silently producing elements that can never unlock.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::state::{ClueKind, ElementId, ItemKind, RoomId};

/// Flat score granted for every solved element, on top of any `Score`
/// rewards the element declares.
pub const SOLVE_SCORE: u64 = 100;

/// Complete static description of one themed room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub elements: Vec<ElementConfig>,
    /// Audio/timing metadata carried for the presentation layer; the engine
    /// does not interpret it.
    #[serde(default)]
    pub ambience: AmbienceConfig,
}

impl RoomConfig {
    pub fn element(&self, id: &ElementId) -> Option<&ElementConfig> {
        self.elements.iter().find(|element| &element.id == id)
    }

    /// Validates the configuration.
    ///
    /// Rejects empty rooms, duplicate ids, dependencies or unlock-reward
    /// targets naming unknown elements, and dependency cycles. The
    /// propagation algorithm assumes a DAG; a cycle would make an element
    /// permanently unsolvable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elements.is_empty() {
            return Err(ConfigError::NoElements {
                room: self.id.clone(),
            });
        }

        let mut ids: HashSet<&ElementId> = HashSet::new();
        for element in &self.elements {
            if !ids.insert(&element.id) {
                return Err(ConfigError::DuplicateElement {
                    element: element.id.clone(),
                });
            }
        }

        for element in &self.elements {
            for dependency in &element.dependencies {
                if dependency == &element.id || !ids.contains(dependency) {
                    return Err(ConfigError::UnknownDependency {
                        element: element.id.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
            for reward in &element.rewards {
                if let RewardConfig::Unlock { targets } = reward {
                    for target in targets {
                        if !ids.contains(target) {
                            return Err(ConfigError::UnknownRewardTarget {
                                element: element.id.clone(),
                                target: target.clone(),
                            });
                        }
                    }
                }
            }
        }

        self.check_acyclic()
    }

    /// Three-color depth-first walk over the dependency edges.
    fn check_acyclic(&self) -> Result<(), ConfigError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit<'a>(
            id: &'a ElementId,
            by_id: &HashMap<&'a ElementId, &'a ElementConfig>,
            marks: &mut HashMap<&'a ElementId, Mark>,
        ) -> Result<(), ConfigError> {
            match marks.get(id) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => {
                    return Err(ConfigError::DependencyCycle {
                        element: id.clone(),
                    });
                }
                None => {}
            }
            marks.insert(id, Mark::Visiting);
            if let Some(element) = by_id.get(id) {
                for dependency in &element.dependencies {
                    visit(dependency, by_id, marks)?;
                }
            }
            marks.insert(id, Mark::Done);
            Ok(())
        }

        let by_id: HashMap<&ElementId, &ElementConfig> = self
            .elements
            .iter()
            .map(|element| (&element.id, element))
            .collect();
        let mut marks = HashMap::new();
        for element in &self.elements {
            visit(&element.id, &by_id, &mut marks)?;
        }
        Ok(())
    }
}

/// Audio and timing metadata attached to a room, opaque to the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AmbienceConfig {
    #[serde(default)]
    pub soundtrack: Option<String>,
    #[serde(default)]
    pub ambient_volume: Option<f32>,
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
}

/// One interactive element: dependencies gate its unlock, rewards fire on
/// solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementConfig {
    pub id: ElementId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ids that must all be solved before this element unlocks.
    #[serde(default)]
    pub dependencies: Vec<ElementId>,
    /// Overrides the default initial unlock (`dependencies.is_empty()`).
    #[serde(default)]
    pub starts_unlocked: Option<bool>,
    #[serde(default)]
    pub puzzle: Option<PuzzleConfig>,
    /// Effects applied in declaration order when this element is solved.
    #[serde(default)]
    pub rewards: Vec<RewardConfig>,
}

/// Mini-game family rendered by the presentation layer.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PuzzleKind {
    Pattern,
    Code,
    Quiz,
    Custom,
}

/// Authored description handed to an opaque puzzle component.
///
/// The engine never interprets `data`; it only receives the final
/// solved/unsolved verdict. Per-puzzle time limits are enforced by the
/// puzzle UI, not the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub kind: PuzzleKind,
    pub prompt: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
    #[serde(default)]
    pub max_hints: u32,
}

/// Effect triggered when an element is solved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardConfig {
    /// Unlocks the listed elements (plus anything their solve state now
    /// permits through dependency propagation).
    Unlock { targets: Vec<ElementId> },
    /// Materializes a local clue into the room's clue list.
    Clue {
        title: String,
        description: String,
        #[serde(default)]
        data: serde_json::Value,
    },
    /// Materializes an inventory item.
    Item {
        name: String,
        description: String,
        kind: ItemKind,
    },
    /// Extra points on top of the flat solve score.
    Score { points: u64 },
    /// Clue destined for a different room, emitted for the external relay.
    CrossRoom {
        target_room: RoomId,
        clue_kind: ClueKind,
        value: serde_json::Value,
        description: String,
    },
}

/// Configuration errors detected at store-creation time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("room '{room}' declares no elements")]
    NoElements { room: RoomId },

    #[error("element '{element}' is declared more than once")]
    DuplicateElement { element: ElementId },

    #[error("element '{element}' depends on unknown element '{dependency}'")]
    UnknownDependency {
        element: ElementId,
        dependency: ElementId,
    },

    #[error("dependency cycle involving element '{element}'")]
    DependencyCycle { element: ElementId },

    #[error("element '{element}' declares an unlock reward for unknown element '{target}'")]
    UnknownRewardTarget { element: ElementId, target: ElementId },
}

impl crate::error::EngineError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str, deps: &[&str]) -> ElementConfig {
        ElementConfig {
            id: ElementId::from(id),
            name: id.to_uppercase(),
            description: String::new(),
            dependencies: deps.iter().map(|d| ElementId::from(*d)).collect(),
            starts_unlocked: None,
            puzzle: None,
            rewards: Vec::new(),
        }
    }

    fn room(elements: Vec<ElementConfig>) -> RoomConfig {
        RoomConfig {
            id: RoomId::from("lab"),
            name: "Laboratory".to_owned(),
            description: String::new(),
            elements,
            ambience: AmbienceConfig::default(),
        }
    }

    #[test]
    fn accepts_a_dag() {
        let config = room(vec![
            element("a", &[]),
            element("b", &["a"]),
            element("c", &["a", "b"]),
        ]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_room() {
        let config = room(vec![]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NoElements {
                room: RoomId::from("lab")
            })
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let config = room(vec![element("a", &[]), element("a", &[])]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateElement { .. })
        ));
    }

    #[test]
    fn rejects_unknown_dependency() {
        let config = room(vec![element("a", &["ghost"])]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownDependency {
                element: ElementId::from("a"),
                dependency: ElementId::from("ghost"),
            })
        );
    }

    #[test]
    fn rejects_self_dependency() {
        let config = room(vec![element("a", &["a"])]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn rejects_cycle() {
        let config = room(vec![
            element("a", &["c"]),
            element("b", &["a"]),
            element("c", &["b"]),
        ]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DependencyCycle { .. })
        ));
    }

    #[test]
    fn rejects_unknown_unlock_target() {
        let mut unlocks = element("a", &[]);
        unlocks.rewards.push(RewardConfig::Unlock {
            targets: vec![ElementId::from("ghost")],
        });
        let config = room(vec![unlocks]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownRewardTarget {
                element: ElementId::from("a"),
                target: ElementId::from("ghost"),
            })
        );
    }
}
