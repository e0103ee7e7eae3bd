//! Topic-based event routing between the session worker and consumers.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ProgressUpdate, RoomEvent, RoomResults};
