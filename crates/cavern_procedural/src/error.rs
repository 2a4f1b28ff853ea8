//! # Generation Error Types
//!
//! All errors that can occur while generating a cave.

use cavern_shared::GridError;
use thiserror::Error;

use crate::room::RoomId;

/// Errors that can occur during cave generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaveError {
    /// A generation parameter is out of range. Reported before any work.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Pruning removed every open region. Retry with looser thresholds.
    #[error("no room survived pruning (min_room_region = {min_room_region})")]
    NoSurvivingRoom {
        /// The room size threshold that was applied.
        min_room_region: usize,
    },

    /// Some rooms could not be connected to the main room.
    #[error("rooms unreachable from the main room: {rooms:?}")]
    UnreachableRoom {
        /// The rooms left inaccessible.
        rooms: Vec<RoomId>,
    },

    /// The grid could not be allocated.
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl CaveError {
    /// Creates an invalid parameter error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for generation operations.
pub type CaveResult<T> = Result<T, CaveError>;
