use std::fmt;
use std::str::FromStr;

use contentcraft_core::Direction;
use serde::{Deserialize, Serialize};

/// Block types that macro templates may place.
///
/// Tokens are the snake_case names used in macro sources (e.g. `stone_bricks`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Air,
    Stone,
    StoneBricks,
    Cobblestone,
    Planks,
    Log,
    Glass,
    GlassPane,
    Glowstone,
    Wool,
    Fence,
    Torch,
    Ladder,
    Bookshelf,
    WallSign,
    SignPost,
}

impl BlockKind {
    /// Every kind, in token order.
    pub const ALL: [BlockKind; 16] = [
        Self::Air,
        Self::Stone,
        Self::StoneBricks,
        Self::Cobblestone,
        Self::Planks,
        Self::Log,
        Self::Glass,
        Self::GlassPane,
        Self::Glowstone,
        Self::Wool,
        Self::Fence,
        Self::Torch,
        Self::Ladder,
        Self::Bookshelf,
        Self::WallSign,
        Self::SignPost,
    ];

    /// Source token for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Stone => "stone",
            Self::StoneBricks => "stone_bricks",
            Self::Cobblestone => "cobblestone",
            Self::Planks => "planks",
            Self::Log => "log",
            Self::Glass => "glass",
            Self::GlassPane => "glass_pane",
            Self::Glowstone => "glowstone",
            Self::Wool => "wool",
            Self::Fence => "fence",
            Self::Torch => "torch",
            Self::Ladder => "ladder",
            Self::Bookshelf => "bookshelf",
            Self::WallSign => "wall_sign",
            Self::SignPost => "sign_post",
        }
    }

    /// Whether placements of this kind can carry sign text.
    pub const fn is_signage(self) -> bool {
        matches!(self, Self::WallSign | Self::SignPost)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a block token does not name a known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block type `{0}`")]
pub struct UnknownBlockKind(pub String);

impl FromStr for BlockKind {
    type Err = UnknownBlockKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == token)
            .ok_or_else(|| UnknownBlockKind(s.to_string()))
    }
}

/// Per-placement metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockMeta {
    /// Direction the block faces (signs, ladders, torches).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facing: Option<Direction>,
}

impl BlockMeta {
    pub const fn facing(direction: Direction) -> Self {
        Self {
            facing: Some(direction),
        }
    }

    /// Metadata for the lateral mirror image of this block.
    pub const fn mirrored_lateral(self) -> Self {
        match self.facing {
            Some(dir) => Self::facing(dir.mirrored_lateral()),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_from_str() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.as_str().parse::<BlockKind>(), Ok(kind));
        }
        assert_eq!("Wall_Sign".parse::<BlockKind>(), Ok(BlockKind::WallSign));
        assert!("bedrock".parse::<BlockKind>().is_err());
    }

    #[test]
    fn serde_tokens_match_as_str() {
        for kind in BlockKind::ALL {
            let json = serde_json::to_string(&kind).expect("serialize");
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn only_signs_are_signage() {
        let signage: Vec<_> = BlockKind::ALL
            .into_iter()
            .filter(|kind| kind.is_signage())
            .collect();
        assert_eq!(signage, vec![BlockKind::WallSign, BlockKind::SignPost]);
    }

    #[test]
    fn mirrored_meta_flips_east_west() {
        assert_eq!(
            BlockMeta::facing(Direction::East).mirrored_lateral(),
            BlockMeta::facing(Direction::West)
        );
        assert_eq!(
            BlockMeta::facing(Direction::South).mirrored_lateral(),
            BlockMeta::facing(Direction::South)
        );
        assert_eq!(BlockMeta::default().mirrored_lateral(), BlockMeta::default());
    }
}
