use contentcraft_core::BlockPos;
use serde::Serialize;
use thiserror::Error;

use crate::{BlockKind, BlockMeta};

/// Reference to a block the host has placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BlockHandle {
    pub pos: BlockPos,
    pub kind: BlockKind,
}

/// Reference to a spawned marker entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerHandle(pub u32);

/// Rejections raised by a [`RenderHost`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The target position is outside the buildable height range.
    #[error("position {pos} is outside the world height range {min_y}..={max_y}")]
    OutOfBounds { pos: BlockPos, min_y: i32, max_y: i32 },
    /// Sign text was written to a block that cannot display it.
    #[error("block at {pos} ({kind}) cannot hold sign text")]
    NotSignage { pos: BlockPos, kind: BlockKind },
    /// The handle no longer refers to the block the host holds at that position.
    #[error("stale block handle at {0}")]
    StaleHandle(BlockPos),
    /// Any other host-side refusal.
    #[error("host rejected placement: {0}")]
    Rejected(String),
}

/// World-side sink for block placement, sign text and marker spawning.
///
/// The layout engine only talks to the world through this trait.
pub trait RenderHost {
    /// Place `kind` at `pos`, replacing whatever was there.
    fn place_block(
        &mut self,
        pos: BlockPos,
        kind: BlockKind,
        meta: BlockMeta,
    ) -> Result<BlockHandle, PlacementError>;

    /// Write display lines onto a placed sign.
    fn set_sign_lines(&mut self, block: BlockHandle, lines: &[String])
        -> Result<(), PlacementError>;

    /// Spawn a labelled marker entity at `pos`.
    fn spawn_marker(&mut self, pos: BlockPos, label: &str) -> Result<MarkerHandle, PlacementError>;
}

impl<H: RenderHost + ?Sized> RenderHost for &mut H {
    fn place_block(
        &mut self,
        pos: BlockPos,
        kind: BlockKind,
        meta: BlockMeta,
    ) -> Result<BlockHandle, PlacementError> {
        (**self).place_block(pos, kind, meta)
    }

    fn set_sign_lines(
        &mut self,
        block: BlockHandle,
        lines: &[String],
    ) -> Result<(), PlacementError> {
        (**self).set_sign_lines(block, lines)
    }

    fn spawn_marker(&mut self, pos: BlockPos, label: &str) -> Result<MarkerHandle, PlacementError> {
        (**self).spawn_marker(pos, label)
    }
}
