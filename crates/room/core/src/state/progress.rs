//! Derived progress record.

use serde::{Deserialize, Serialize};

/// Aggregate completion of a room.
///
/// Always recomputed synchronously from the element states after a mutation,
/// so `percentage == elements_completed as f64 * 100.0 / total_elements as
/// f64` holds exactly. Display rounding is the consumer's concern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomProgress {
    pub percentage: f64,
    pub elements_completed: u32,
    pub total_elements: u32,
    pub time_elapsed_secs: u64,
}

impl RoomProgress {
    pub fn compute(completed: u32, total: u32, time_elapsed_secs: u64) -> Self {
        // A validated config declares at least one element; the zero guard
        // only covers states built from unvalidated input.
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(completed) * 100.0 / f64::from(total)
        };
        Self {
            percentage,
            elements_completed: completed,
            total_elements: total,
            time_elapsed_secs,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_elements > 0 && self.elements_completed == self.total_elements
    }
}
