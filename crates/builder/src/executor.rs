use contentcraft_assets::{MacroEntry, MacroStore};
use contentcraft_core::{BlockPos, CoordinateOverflow, RoomOrientation};
use contentcraft_world::{BlockHandle, BlockMeta, PlacementError, RenderHost};
use serde::Serialize;
use tracing::debug;

use crate::BuildError;

/// Emitted once per block placed during a macro run.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEvent<'a> {
    /// Macro being run.
    pub macro_name: &'a str,
    /// Zero-based index of the entry within the template.
    pub ordinal: usize,
    /// The block the host just placed.
    pub block: BlockHandle,
}

/// Receives placement events synchronously, in placement order.
pub trait PlacementListener {
    /// Called after every successful placement of the run the listener was passed to.
    fn on_placed(
        &mut self,
        event: &PlacementEvent<'_>,
        host: &mut dyn RenderHost,
    ) -> Result<(), PlacementError>;
}

/// Summary of one macro invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroRun {
    /// Macro that was run.
    pub macro_name: String,
    /// Anchor the offsets were resolved against.
    pub anchor: BlockPos,
    /// Requested orientation, `None` for the template's own.
    pub orientation: Option<RoomOrientation>,
    /// Blocks placed.
    pub placed: usize,
}

/// Instantiates templates from a [`MacroStore`] through a [`RenderHost`].
///
/// Holds no state between runs.
#[derive(Debug, Clone, Copy)]
pub struct MacroExecutor<'a> {
    store: &'a MacroStore,
}

impl<'a> MacroExecutor<'a> {
    /// Execute macros loaded into `store`.
    pub fn new(store: &'a MacroStore) -> Self {
        Self { store }
    }

    /// Run `macro_name` at `anchor`.
    ///
    /// With `orientation` set to the side opposite the template's authored handedness, every
    /// offset is mirrored across the anchor's forward (north/south) axis. Blocks are placed in
    /// template order and `listener` sees each one before the next is placed. The first host
    /// rejection aborts the run; earlier blocks are left in place.
    pub fn run(
        &self,
        host: &mut dyn RenderHost,
        macro_name: &str,
        anchor: BlockPos,
        orientation: Option<RoomOrientation>,
        mut listener: Option<&mut dyn PlacementListener>,
    ) -> Result<MacroRun, BuildError> {
        let template = self.store.lookup(macro_name)?;
        let mirror = orientation.is_some_and(|side| side != template.orientation());

        for (ordinal, entry) in template.entries().iter().enumerate() {
            let overflow = CoordinateOverflow { from: anchor };
            let (offset, meta) = transform(entry, mirror).ok_or(overflow)?;
            let pos = anchor.checked_add(offset).ok_or(overflow)?;
            let placement_err = |err| BuildError::Placement {
                macro_name: macro_name.to_string(),
                pos,
                err,
            };

            let block = host
                .place_block(pos, entry.kind, meta)
                .map_err(placement_err)?;
            if let Some(listener) = listener.as_deref_mut() {
                let event = PlacementEvent {
                    macro_name,
                    ordinal,
                    block,
                };
                listener.on_placed(&event, host).map_err(placement_err)?;
            }
        }

        let placed = template.entries().len();
        debug!(macro_name, %anchor, ?orientation, mirror, placed, "macro run");
        Ok(MacroRun {
            macro_name: macro_name.to_string(),
            anchor,
            orientation,
            placed,
        })
    }
}

/// Offset and metadata of `entry`, reflected across the X = 0 plane when `mirror` is set.
pub(crate) fn transform(entry: &MacroEntry, mirror: bool) -> Option<(BlockPos, BlockMeta)> {
    if mirror {
        Some((entry.offset.mirror_x(0)?, entry.meta.mirrored_lateral()))
    } else {
        Some((entry.offset, entry.meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentcraft_core::Direction;
    use contentcraft_testkit::{FailingHost, RecordingHost};
    use contentcraft_world::BlockKind;

    const STEPS: &str = r#"{
        "name": "test.steps",
        "orientation": "left",
        "blocks": [
            {"offset": [-1, 0, 0], "block": "stone"},
            {"offset": [-2, 1, -1], "block": "wall_sign", "meta": {"facing": "east"}},
            {"offset": [0, 2, -2], "block": "glass"}
        ]
    }"#;

    fn store() -> MacroStore {
        let store = MacroStore::builtin();
        store.load_str("inline", STEPS).expect("valid macro");
        store
    }

    struct Collect(Vec<(String, usize, BlockPos)>);

    impl PlacementListener for Collect {
        fn on_placed(
            &mut self,
            event: &PlacementEvent<'_>,
            _host: &mut dyn RenderHost,
        ) -> Result<(), PlacementError> {
            self.0
                .push((event.macro_name.to_string(), event.ordinal, event.block.pos));
            Ok(())
        }
    }

    #[test]
    fn places_offsets_relative_to_anchor_in_order() {
        let store = store();
        let mut host = RecordingHost::new();
        let anchor = BlockPos::new(10, 64, 10);
        let run = MacroExecutor::new(&store)
            .run(&mut host, "test.steps", anchor, None, None)
            .expect("run");

        assert_eq!(run.placed, 3);
        let positions: Vec<_> = host.placements().iter().map(|p| p.pos).collect();
        assert_eq!(
            positions,
            vec![
                BlockPos::new(9, 64, 10),
                BlockPos::new(8, 65, 9),
                BlockPos::new(10, 66, 8)
            ]
        );
    }

    #[test]
    fn opposite_orientation_mirrors_offsets_and_facing() {
        let store = store();
        let mut host = RecordingHost::new();
        let anchor = BlockPos::new(10, 64, 10);
        MacroExecutor::new(&store)
            .run(
                &mut host,
                "test.steps",
                anchor,
                Some(RoomOrientation::Right),
                None,
            )
            .expect("run");

        let placements = host.placements();
        assert_eq!(placements[0].pos, BlockPos::new(11, 64, 10));
        assert_eq!(placements[1].pos, BlockPos::new(12, 65, 9));
        assert_eq!(placements[1].meta, BlockMeta::facing(Direction::West));
        assert_eq!(placements[2].pos, BlockPos::new(10, 66, 8));
    }

    #[test]
    fn authored_orientation_is_identity() {
        let store = store();
        let executor = MacroExecutor::new(&store);
        let anchor = BlockPos::new(0, 10, 0);

        let mut plain = RecordingHost::new();
        executor
            .run(&mut plain, "test.steps", anchor, None, None)
            .unwrap();
        let mut left = RecordingHost::new();
        executor
            .run(
                &mut left,
                "test.steps",
                anchor,
                Some(RoomOrientation::Left),
                None,
            )
            .unwrap();
        assert_eq!(plain.placements(), left.placements());
    }

    #[test]
    fn listener_sees_every_placement_in_order() {
        let store = store();
        let mut host = RecordingHost::new();
        let mut collect = Collect(Vec::new());
        MacroExecutor::new(&store)
            .run(
                &mut host,
                "test.steps",
                BlockPos::new(0, 10, 0),
                None,
                Some(&mut collect),
            )
            .unwrap();
        let ordinals: Vec<_> = collect.0.iter().map(|(_, ordinal, _)| *ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert!(collect.0.iter().all(|(name, _, _)| name == "test.steps"));
        let placed: Vec<_> = host.placements().iter().map(|p| p.pos).collect();
        let seen: Vec<_> = collect.0.iter().map(|(_, _, pos)| *pos).collect();
        assert_eq!(placed, seen);
    }

    #[test]
    fn anchor_at_range_edge_is_an_overflow_error() {
        let store = store();
        let mut host = RecordingHost::new();
        let anchor = BlockPos::new(i32::MIN, 10, 0);
        let err = MacroExecutor::new(&store)
            .run(&mut host, "test.steps", anchor, None, None)
            .unwrap_err();
        assert!(matches!(err, BuildError::Overflow(overflow) if overflow.from == anchor));
        assert!(host.placements().is_empty());
    }

    #[test]
    fn unknown_macro_is_an_error() {
        let store = store();
        let mut host = RecordingHost::new();
        let err = MacroExecutor::new(&store)
            .run(&mut host, "test.missing", BlockPos::ORIGIN, None, None)
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownMacro(_)));
        assert!(host.placements().is_empty());
    }

    #[test]
    fn placement_failure_aborts_without_rollback() {
        let store = store();
        let mut host = FailingHost::fail_at(1);
        let err = MacroExecutor::new(&store)
            .run(&mut host, "test.steps", BlockPos::new(0, 10, 0), None, None)
            .unwrap_err();
        match err {
            BuildError::Placement {
                macro_name, pos, ..
            } => {
                assert_eq!(macro_name, "test.steps");
                assert_eq!(pos, BlockPos::new(-2, 11, -1));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(host.inner().placements().len(), 1);
        assert_eq!(host.inner().placements()[0].kind, BlockKind::Stone);
    }
}
