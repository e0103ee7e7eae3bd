//! Persistable session snapshots.
//!
//! A snapshot is the JSON value stored in the local persistence slot keyed
//! by [`slot_key`]. Reads are best-effort at session creation; absence or a
//! parse failure falls back to fresh state.

use serde::{Deserialize, Serialize};

use crate::env::Timestamp;
use crate::state::{PlayerId, RoomId, RoomState};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Key of the persistence slot for one room and player.
pub fn slot_key(room_id: &RoomId, player_id: &PlayerId) -> String {
    format!("room-state-{}-{}", room_id, player_id)
}

/// Value stored in the persistence slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub version: u32,
    pub room_id: RoomId,
    pub player_id: PlayerId,
    pub state: RoomState,
    pub timestamp: Timestamp,
}

impl RoomSnapshot {
    /// Captures the current state.
    pub fn capture(state: &RoomState, timestamp: Timestamp) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            room_id: state.room_id.clone(),
            player_id: state.player_id.clone(),
            state: state.clone(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, SolveCommand};
    use crate::config::{AmbienceConfig, ElementConfig, RewardConfig, RoomConfig};
    use crate::engine::RoomEngine;
    use crate::env::RoomEnv;

    fn config() -> RoomConfig {
        RoomConfig {
            id: RoomId::from("lab"),
            name: "Laboratory".to_owned(),
            description: String::new(),
            elements: vec![
                ElementConfig {
                    id: "a".into(),
                    name: "A".to_owned(),
                    description: String::new(),
                    dependencies: vec![],
                    starts_unlocked: None,
                    puzzle: None,
                    rewards: vec![],
                },
                ElementConfig {
                    id: "b".into(),
                    name: "B".to_owned(),
                    description: String::new(),
                    dependencies: vec!["a".into()],
                    starts_unlocked: None,
                    puzzle: None,
                    rewards: vec![],
                },
            ],
            ambience: AmbienceConfig::default(),
        }
    }

    #[test]
    fn slot_key_matches_the_contract() {
        assert_eq!(
            slot_key(&RoomId::from("lab"), &PlayerId::from("p1")),
            "room-state-lab-p1"
        );
    }

    #[test]
    fn json_round_trip_reproduces_the_state() {
        let config = config();
        let mut state = RoomState::initialize(&config, PlayerId::from("p1"));
        let env = RoomEnv::new(&config, Timestamp(42));
        RoomEngine::new(&mut state)
            .execute(
                env,
                &Command::Solve(SolveCommand::new(
                    "a",
                    vec![RewardConfig::Clue {
                        title: "Torn page".to_owned(),
                        description: String::new(),
                        data: serde_json::json!({ "page": 7 }),
                    }],
                )),
            )
            .unwrap();

        let snapshot = RoomSnapshot::capture(&state, Timestamp(100));
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: RoomSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);

        let mut fresh = RoomState::initialize(&config, PlayerId::from("p1"));
        fresh.absorb_snapshot(restored.state);
        assert_eq!(fresh.solved_elements(), state.solved_elements());
        assert_eq!(fresh.clues(), state.clues());
        assert_eq!(fresh.progress(), state.progress());
    }
}
