use contentcraft_core::BlockPos;
use contentcraft_world::{
    BlockHandle, BlockKind, BlockMeta, MarkerHandle, PlacementError, RenderHost, VoxelWorld,
};

/// One accepted `place_block` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Absolute position.
    pub pos: BlockPos,
    /// Block placed.
    pub kind: BlockKind,
    /// Orientation data it was placed with.
    pub meta: BlockMeta,
}

/// A [`RenderHost`] that applies everything to a [`VoxelWorld`] and remembers the call order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    world: VoxelWorld,
    placements: Vec<Placement>,
    sign_writes: Vec<(BlockPos, Vec<String>)>,
    marker_limit: Option<usize>,
}

impl RecordingHost {
    /// Empty world, nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `limit` marker spawns, then reject every later one.
    pub fn fail_markers_after(mut self, limit: usize) -> Self {
        self.marker_limit = Some(limit);
        self
    }

    /// Placements in call order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Sign text writes in call order.
    pub fn sign_writes(&self) -> &[(BlockPos, Vec<String>)] {
        &self.sign_writes
    }

    /// World state after every accepted call.
    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }
}

impl RenderHost for RecordingHost {
    fn place_block(
        &mut self,
        pos: BlockPos,
        kind: BlockKind,
        meta: BlockMeta,
    ) -> Result<BlockHandle, PlacementError> {
        let handle = self.world.place_block(pos, kind, meta)?;
        self.placements.push(Placement { pos, kind, meta });
        Ok(handle)
    }

    fn set_sign_lines(
        &mut self,
        block: BlockHandle,
        lines: &[String],
    ) -> Result<(), PlacementError> {
        self.world.set_sign_lines(block, lines)?;
        self.sign_writes.push((block.pos, lines.to_vec()));
        Ok(())
    }

    fn spawn_marker(&mut self, pos: BlockPos, label: &str) -> Result<MarkerHandle, PlacementError> {
        if self
            .marker_limit
            .is_some_and(|limit| self.world.markers().len() >= limit)
        {
            return Err(PlacementError::Rejected(format!(
                "marker limit reached before {label}"
            )));
        }
        self.world.spawn_marker(pos, label)
    }
}

/// A [`RecordingHost`] that rejects exactly one block placement.
#[derive(Debug)]
pub struct FailingHost {
    inner: RecordingHost,
    fail_at: usize,
    attempts: usize,
}

impl FailingHost {
    /// Reject the placement with zero-based index `index`; all others go through.
    pub fn fail_at(index: usize) -> Self {
        Self {
            inner: RecordingHost::new(),
            fail_at: index,
            attempts: 0,
        }
    }

    /// Calls that were accepted.
    pub fn inner(&self) -> &RecordingHost {
        &self.inner
    }
}

impl RenderHost for FailingHost {
    fn place_block(
        &mut self,
        pos: BlockPos,
        kind: BlockKind,
        meta: BlockMeta,
    ) -> Result<BlockHandle, PlacementError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if attempt == self.fail_at {
            return Err(PlacementError::Rejected(format!(
                "injected failure at placement {attempt}"
            )));
        }
        self.inner.place_block(pos, kind, meta)
    }

    fn set_sign_lines(
        &mut self,
        block: BlockHandle,
        lines: &[String],
    ) -> Result<(), PlacementError> {
        self.inner.set_sign_lines(block, lines)
    }

    fn spawn_marker(&mut self, pos: BlockPos, label: &str) -> Result<MarkerHandle, PlacementError> {
        self.inner.spawn_marker(pos, label)
    }
}
