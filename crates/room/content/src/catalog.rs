//! Built-in demo rooms.
//!
//! Authored in code so the runtime and its tests have realistic
//! configurations without touching the filesystem. Production deployments
//! load their rooms through [`crate::loaders::RoomLoader`] instead.

use room_core::{
    AmbienceConfig, ClueKind, ElementConfig, ElementId, ItemKind, PuzzleConfig, PuzzleKind,
    RewardConfig, RoomConfig, RoomId,
};

pub const LABORATORY_ROOM_ID: &str = "laboratory";
pub const VAULT_ROOM_ID: &str = "vault";

/// All rooms shipped with the game, lobby assignment order.
pub fn builtin_rooms() -> Vec<RoomConfig> {
    vec![laboratory(), vault()]
}

/// Looks up a built-in room by id.
pub fn builtin_room(id: &str) -> Option<RoomConfig> {
    builtin_rooms()
        .into_iter()
        .find(|room| room.id.as_str() == id)
}

fn laboratory() -> RoomConfig {
    RoomConfig {
        id: RoomId::from(LABORATORY_ROOM_ID),
        name: "Contamination Lab".to_owned(),
        description: "Trace the spill back to its source before lockdown.".to_owned(),
        elements: vec![
            ElementConfig {
                id: ElementId::from("fume-hood"),
                name: "Fume hood".to_owned(),
                description: "The exhaust valves are out of order.".to_owned(),
                dependencies: vec![],
                starts_unlocked: None,
                puzzle: Some(PuzzleConfig {
                    kind: PuzzleKind::Pattern,
                    prompt: "Restore the valve sequence".to_owned(),
                    data: serde_json::json!({ "valves": 5 }),
                    time_limit_secs: None,
                    max_hints: 2,
                }),
                rewards: vec![RewardConfig::Clue {
                    title: "Valve order".to_owned(),
                    description: "A sequence etched into the glass".to_owned(),
                    data: serde_json::json!({ "sequence": [3, 1, 4, 2, 5] }),
                }],
            },
            ElementConfig {
                id: ElementId::from("sample-cabinet"),
                name: "Sample cabinet".to_owned(),
                description: "Locked until the fume hood is safe.".to_owned(),
                dependencies: vec![ElementId::from("fume-hood")],
                starts_unlocked: None,
                puzzle: Some(PuzzleConfig {
                    kind: PuzzleKind::Code,
                    prompt: "Enter the cabinet code".to_owned(),
                    data: serde_json::Value::Null,
                    time_limit_secs: Some(120),
                    max_hints: 1,
                }),
                rewards: vec![
                    RewardConfig::Item {
                        name: "Sealed sample".to_owned(),
                        description: "Handle with gloves".to_owned(),
                        kind: ItemKind::Sample,
                    },
                    RewardConfig::Score { points: 50 },
                ],
            },
            ElementConfig {
                id: ElementId::from("centrifuge"),
                name: "Centrifuge".to_owned(),
                description: "Needs a sample and a steady hand.".to_owned(),
                dependencies: vec![
                    ElementId::from("fume-hood"),
                    ElementId::from("sample-cabinet"),
                ],
                starts_unlocked: None,
                puzzle: Some(PuzzleConfig {
                    kind: PuzzleKind::Quiz,
                    prompt: "Pick the correct spin profile".to_owned(),
                    data: serde_json::Value::Null,
                    time_limit_secs: None,
                    max_hints: 0,
                }),
                rewards: vec![RewardConfig::CrossRoom {
                    target_room: RoomId::from(VAULT_ROOM_ID),
                    clue_kind: ClueKind::CrossRoom,
                    value: serde_json::json!("7-3-9"),
                    description: "Dial sequence recovered from the sediment".to_owned(),
                }],
            },
        ],
        ambience: AmbienceConfig {
            soundtrack: Some("lab-drone".to_owned()),
            ambient_volume: Some(0.4),
            time_limit_secs: Some(1_800),
        },
    }
}

fn vault() -> RoomConfig {
    RoomConfig {
        id: RoomId::from(VAULT_ROOM_ID),
        name: "Archive Vault".to_owned(),
        description: "The destruction codes are split across the archive.".to_owned(),
        elements: vec![
            ElementConfig {
                id: ElementId::from("card-index"),
                name: "Card index".to_owned(),
                description: String::new(),
                dependencies: vec![],
                starts_unlocked: None,
                puzzle: Some(PuzzleConfig {
                    kind: PuzzleKind::Quiz,
                    prompt: "File the misplaced cards".to_owned(),
                    data: serde_json::Value::Null,
                    time_limit_secs: None,
                    max_hints: 1,
                }),
                rewards: vec![RewardConfig::Unlock {
                    targets: vec![ElementId::from("microfilm")],
                }],
            },
            ElementConfig {
                id: ElementId::from("microfilm"),
                name: "Microfilm reader".to_owned(),
                description: "Dark until someone finds the index entry.".to_owned(),
                dependencies: vec![ElementId::from("card-index")],
                starts_unlocked: Some(false),
                puzzle: Some(PuzzleConfig {
                    kind: PuzzleKind::Custom,
                    prompt: "Scrub to the redacted frame".to_owned(),
                    data: serde_json::json!({ "reel": "B-12" }),
                    time_limit_secs: None,
                    max_hints: 2,
                }),
                rewards: vec![RewardConfig::Item {
                    name: "Redacted memo".to_owned(),
                    description: "Half a destruction code".to_owned(),
                    kind: ItemKind::Document,
                }],
            },
        ],
        ambience: AmbienceConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rooms_are_valid() {
        let rooms = builtin_rooms();
        assert!(!rooms.is_empty());
        for room in &rooms {
            room.validate()
                .unwrap_or_else(|e| panic!("room '{}' invalid: {e}", room.id));
        }
    }

    #[test]
    fn lookup_by_id() {
        assert!(builtin_room(LABORATORY_ROOM_ID).is_some());
        assert!(builtin_room("missing").is_none());
    }
}
