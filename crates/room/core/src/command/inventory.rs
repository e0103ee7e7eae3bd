//! Direct inventory appends.

use super::CommandTransition;
use crate::env::RoomEnv;
use crate::error::NeverError;
use crate::state::{InventoryItem, RoomState};

/// Appends an item to the room's ordered inventory.
///
/// Acquisition order is preserved and duplicates are permitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddItemCommand {
    pub item: InventoryItem,
}

impl AddItemCommand {
    pub fn new(item: InventoryItem) -> Self {
        Self { item }
    }
}

impl CommandTransition for AddItemCommand {
    type Error = NeverError;
    type Result = ();

    fn apply(&self, state: &mut RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        state.push_item(self.item.clone());
        Ok(())
    }
}
