//! Block-space coordinates and directional unit vectors.
//!
//! Axis conventions follow the usual voxel layout: +Y is up, North is -Z, East is +X.
//! The forward axis of every built section is North, so "lateral" means the X axis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Integer block coordinate in world space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then y, then z).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East/west component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
    /// North/south component.
    pub z: i32,
}

impl BlockPos {
    /// World origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Construct a position from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Reflect across the plane `x = axis_x`, or `None` if the result leaves the `i32` range.
    pub fn mirror_x(self, axis_x: i32) -> Option<Self> {
        let x = axis_x.checked_mul(2)?.checked_sub(self.x)?;
        Some(Self::new(x, self.y, self.z))
    }

    /// Component-wise sum, or `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(rhs.x)?,
            self.y.checked_add(rhs.y)?,
            self.z.checked_add(rhs.z)?,
        ))
    }

    /// Each component multiplied by `factor`, or `None` on overflow.
    pub fn checked_scale(self, factor: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_mul(factor)?,
            self.y.checked_mul(factor)?,
            self.z.checked_mul(factor)?,
        ))
    }
}

/// A coordinate step left the `i32` block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("block coordinates overflow stepping away from {from}")]
pub struct CoordinateOverflow {
    /// Position the step started from.
    pub from: BlockPos,
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Error returned when parsing a `x,y,z` coordinate string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid block position `{input}`: expected x,y,z integers")]
pub struct PosParseError {
    input: String,
}

impl FromStr for BlockPos {
    type Err = PosParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PosParseError {
            input: s.to_string(),
        };
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(err());
        };
        Ok(Self::new(
            x.parse().map_err(|_| err())?,
            y.parse().map_err(|_| err())?,
            z.parse().map_err(|_| err())?,
        ))
    }
}

/// The six axis-aligned directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Negative Z.
    North,
    /// Positive Z.
    South,
    /// Positive X.
    East,
    /// Negative X.
    West,
    /// Positive Y.
    Up,
    /// Negative Y.
    Down,
}

impl Direction {
    /// Unit vector for this direction.
    pub const fn unit(self) -> BlockPos {
        match self {
            Self::North => BlockPos::new(0, 0, -1),
            Self::South => BlockPos::new(0, 0, 1),
            Self::East => BlockPos::new(1, 0, 0),
            Self::West => BlockPos::new(-1, 0, 0),
            Self::Up => BlockPos::new(0, 1, 0),
            Self::Down => BlockPos::new(0, -1, 0),
        }
    }

    /// Unit vector scaled by `distance`, or `None` on overflow.
    pub fn times(self, distance: i32) -> Option<BlockPos> {
        self.unit().checked_scale(distance)
    }

    /// Reflect across the forward (north/south) axis: east and west swap, the rest are unchanged.
    pub const fn mirrored_lateral(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::West => Self::East,
            other => other,
        }
    }
}

/// Derive the anchor `distance` blocks from `anchor` along `direction`.
pub fn next_anchor(
    anchor: BlockPos,
    direction: Direction,
    distance: i32,
) -> Result<BlockPos, CoordinateOverflow> {
    direction
        .times(distance)
        .and_then(|step| anchor.checked_add(step))
        .ok_or(CoordinateOverflow { from: anchor })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_anchor_moves_along_axis() {
        let start = BlockPos::new(3, 64, -2);
        assert_eq!(
            next_anchor(start, Direction::North, 10),
            Ok(BlockPos::new(3, 64, -12))
        );
        assert_eq!(
            next_anchor(start, Direction::Up, 5),
            Ok(BlockPos::new(3, 69, -2))
        );
        assert_eq!(
            next_anchor(start, Direction::South, 2),
            Ok(BlockPos::new(3, 64, 0))
        );
    }

    #[test]
    fn next_anchor_reports_overflow_at_range_edge() {
        let edge = BlockPos::new(0, 64, i32::MIN + 3);
        assert_eq!(
            next_anchor(edge, Direction::North, 10),
            Err(CoordinateOverflow { from: edge })
        );
        assert_eq!(
            next_anchor(edge, Direction::South, 10),
            Ok(BlockPos::new(0, 64, i32::MIN + 13))
        );
        assert!(next_anchor(BlockPos::ORIGIN, Direction::North, i32::MIN).is_err());
        assert!(BlockPos::new(i32::MAX - 1, 0, 0)
            .checked_add(BlockPos::new(2, 0, 0))
            .is_none());
    }

    #[test]
    fn mirror_x_reflects_about_axis() {
        let pos = BlockPos::new(7, 1, 4);
        assert_eq!(pos.mirror_x(5), Some(BlockPos::new(3, 1, 4)));
        assert_eq!(pos.mirror_x(5).and_then(|p| p.mirror_x(5)), Some(pos));
        assert_eq!(BlockPos::new(i32::MIN, 0, 0).mirror_x(0), None);
    }

    #[test]
    fn parses_coordinate_triples() {
        assert_eq!("1, -2,3".parse::<BlockPos>(), Ok(BlockPos::new(1, -2, 3)));
        assert!("1,2".parse::<BlockPos>().is_err());
        assert!("a,b,c".parse::<BlockPos>().is_err());
        assert!("1,2,3,4".parse::<BlockPos>().is_err());
    }

    #[test]
    fn lateral_mirror_only_swaps_east_west() {
        assert_eq!(Direction::East.mirrored_lateral(), Direction::West);
        assert_eq!(Direction::West.mirrored_lateral(), Direction::East);
        assert_eq!(Direction::North.mirrored_lateral(), Direction::North);
        assert_eq!(Direction::Up.mirrored_lateral(), Direction::Up);
    }
}
