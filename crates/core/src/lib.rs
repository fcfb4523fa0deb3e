#![warn(missing_docs)]
//! Core primitives shared across the workspace: block coordinates, directions and sign text.

pub mod text;
pub mod vector;

use serde::{Deserialize, Serialize};

pub use text::{normalize, wrap, SignBudget};
pub use vector::{next_anchor, BlockPos, CoordinateOverflow, Direction, PosParseError};

/// Which side of a section's forward axis a sub-structure is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomOrientation {
    /// West of the forward axis.
    Left,
    /// East of the forward axis.
    Right,
}

impl RoomOrientation {
    /// Canonical string key used in macro sources and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl Default for RoomOrientation {
    fn default() -> Self {
        Self::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_keys_match_serde() {
        assert_eq!(RoomOrientation::Left.as_str(), "left");
        assert_eq!(RoomOrientation::Right.as_str(), "right");
        assert_eq!(RoomOrientation::default(), RoomOrientation::Left);
    }
}
