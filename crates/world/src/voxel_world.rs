use std::collections::BTreeMap;

use contentcraft_core::BlockPos;
use serde::Serialize;

use crate::{BlockHandle, BlockKind, BlockMeta, MarkerHandle, PlacementError, RenderHost};

/// Lowest buildable Y coordinate.
pub const WORLD_MIN_Y: i32 = 0;
/// Highest buildable Y coordinate.
pub const WORLD_MAX_Y: i32 = 255;

/// A block resident in a [`VoxelWorld`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedBlock {
    pub kind: BlockKind,
    pub meta: BlockMeta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sign_lines: Vec<String>,
}

/// A labelled marker entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub id: u32,
    pub pos: BlockPos,
    pub label: String,
}

/// Sparse in-memory world used as the default render host.
/// Uses BTreeMap so exports and iteration are ordered by position.
#[derive(Debug, Default)]
pub struct VoxelWorld {
    blocks: BTreeMap<BlockPos, PlacedBlock>,
    markers: Vec<Marker>,
    placements: u64,
}

#[derive(Serialize)]
struct ExportedBlock<'a> {
    pos: BlockPos,
    #[serde(flatten)]
    block: &'a PlacedBlock,
}

#[derive(Serialize)]
struct WorldExport<'a> {
    placements: u64,
    blocks: Vec<ExportedBlock<'a>>,
    markers: &'a [Marker],
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-air blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true when no blocks have been placed (or all were cleared to air).
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total successful `place_block` calls, including overwrites and air.
    pub fn placement_count(&self) -> u64 {
        self.placements
    }

    pub fn block(&self, pos: BlockPos) -> Option<&PlacedBlock> {
        self.blocks.get(&pos)
    }

    /// Sign text at `pos`, empty when the block is not a sign or holds no text.
    pub fn sign_lines(&self, pos: BlockPos) -> &[String] {
        self.blocks
            .get(&pos)
            .map(|block| block.sign_lines.as_slice())
            .unwrap_or(&[])
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Inclusive (min, max) corners of all resident blocks.
    pub fn bounds(&self) -> Option<(BlockPos, BlockPos)> {
        let mut positions = self.blocks.keys();
        let first = *positions.next()?;
        Some(positions.fold((first, first), |(min, max), pos| {
            (
                BlockPos::new(min.x.min(pos.x), min.y.min(pos.y), min.z.min(pos.z)),
                BlockPos::new(max.x.max(pos.x), max.y.max(pos.y), max.z.max(pos.z)),
            )
        }))
    }

    /// Serialize blocks and markers as pretty JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let export = WorldExport {
            placements: self.placements,
            blocks: self
                .blocks
                .iter()
                .map(|(pos, block)| ExportedBlock { pos: *pos, block })
                .collect(),
            markers: &self.markers,
        };
        serde_json::to_string_pretty(&export)
    }
}

impl RenderHost for VoxelWorld {
    fn place_block(
        &mut self,
        pos: BlockPos,
        kind: BlockKind,
        meta: BlockMeta,
    ) -> Result<BlockHandle, PlacementError> {
        if !(WORLD_MIN_Y..=WORLD_MAX_Y).contains(&pos.y) {
            return Err(PlacementError::OutOfBounds {
                pos,
                min_y: WORLD_MIN_Y,
                max_y: WORLD_MAX_Y,
            });
        }

        if kind == BlockKind::Air {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(
                pos,
                PlacedBlock {
                    kind,
                    meta,
                    sign_lines: Vec::new(),
                },
            );
        }
        self.placements += 1;
        Ok(BlockHandle { pos, kind })
    }

    fn set_sign_lines(
        &mut self,
        block: BlockHandle,
        lines: &[String],
    ) -> Result<(), PlacementError> {
        let Some(placed) = self.blocks.get_mut(&block.pos) else {
            return Err(PlacementError::StaleHandle(block.pos));
        };
        if placed.kind != block.kind {
            return Err(PlacementError::StaleHandle(block.pos));
        }
        if !placed.kind.is_signage() {
            return Err(PlacementError::NotSignage {
                pos: block.pos,
                kind: placed.kind,
            });
        }
        placed.sign_lines = lines.to_vec();
        Ok(())
    }

    fn spawn_marker(&mut self, pos: BlockPos, label: &str) -> Result<MarkerHandle, PlacementError> {
        let id = self.markers.len() as u32;
        self.markers.push(Marker {
            id,
            pos,
            label: label.to_string(),
        });
        tracing::debug!(id, %pos, label, "marker spawned");
        Ok(MarkerHandle(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentcraft_core::Direction;

    #[test]
    fn place_and_read_back() {
        let mut world = VoxelWorld::new();
        let pos = BlockPos::new(1, 64, -3);
        let handle = world
            .place_block(pos, BlockKind::Stone, BlockMeta::default())
            .expect("in bounds");
        assert_eq!(handle.pos, pos);
        assert_eq!(world.block(pos).map(|b| b.kind), Some(BlockKind::Stone));
        assert_eq!(world.len(), 1);
        assert_eq!(world.placement_count(), 1);
    }

    #[test]
    fn air_clears_existing_block() {
        let mut world = VoxelWorld::new();
        let pos = BlockPos::new(0, 10, 0);
        world
            .place_block(pos, BlockKind::Planks, BlockMeta::default())
            .unwrap();
        world
            .place_block(pos, BlockKind::Air, BlockMeta::default())
            .unwrap();
        assert!(world.is_empty());
        assert_eq!(world.placement_count(), 2);
    }

    #[test]
    fn rejects_out_of_height_range() {
        let mut world = VoxelWorld::new();
        let err = world
            .place_block(BlockPos::new(0, 256, 0), BlockKind::Stone, BlockMeta::default())
            .unwrap_err();
        assert!(matches!(err, PlacementError::OutOfBounds { .. }));
        assert!(world
            .place_block(BlockPos::new(0, -1, 0), BlockKind::Stone, BlockMeta::default())
            .is_err());
        assert!(world.is_empty());
    }

    #[test]
    fn sign_text_only_on_signage() {
        let mut world = VoxelWorld::new();
        let sign = world
            .place_block(
                BlockPos::new(0, 1, 0),
                BlockKind::WallSign,
                BlockMeta::facing(Direction::South),
            )
            .unwrap();
        let stone = world
            .place_block(BlockPos::new(1, 1, 0), BlockKind::Stone, BlockMeta::default())
            .unwrap();

        let lines = vec!["Reports".to_string()];
        world.set_sign_lines(sign, &lines).expect("sign accepts text");
        assert_eq!(world.sign_lines(sign.pos), lines.as_slice());
        assert!(matches!(
            world.set_sign_lines(stone, &lines),
            Err(PlacementError::NotSignage { .. })
        ));
    }

    #[test]
    fn overwritten_sign_handle_is_stale() {
        let mut world = VoxelWorld::new();
        let pos = BlockPos::new(0, 1, 0);
        let sign = world
            .place_block(pos, BlockKind::WallSign, BlockMeta::default())
            .unwrap();
        world
            .place_block(pos, BlockKind::Glass, BlockMeta::default())
            .unwrap();
        assert_eq!(
            world.set_sign_lines(sign, &["x".to_string()]),
            Err(PlacementError::StaleHandle(pos))
        );
    }

    #[test]
    fn bounds_cover_all_blocks() {
        let mut world = VoxelWorld::new();
        assert!(world.bounds().is_none());
        for pos in [BlockPos::new(-2, 5, 3), BlockPos::new(4, 1, -7)] {
            world
                .place_block(pos, BlockKind::Stone, BlockMeta::default())
                .unwrap();
        }
        assert_eq!(
            world.bounds(),
            Some((BlockPos::new(-2, 1, -7), BlockPos::new(4, 5, 3)))
        );
    }

    #[test]
    fn export_lists_blocks_and_markers() {
        let mut world = VoxelWorld::new();
        world
            .place_block(BlockPos::new(0, 1, 0), BlockKind::Glowstone, BlockMeta::default())
            .unwrap();
        world.spawn_marker(BlockPos::new(0, 1, 2), "alice").unwrap();
        let json = world.to_json_pretty().expect("export");
        assert!(json.contains("glowstone"));
        assert!(json.contains("alice"));
    }
}
