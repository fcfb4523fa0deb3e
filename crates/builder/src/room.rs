use contentcraft_core::{BlockPos, RoomOrientation, SignBudget};
use contentcraft_repo::FolderNode;
use contentcraft_world::RenderHost;

use crate::{
    attribution, BuildError, MacroExecutor, MacroInvocation, SignQueue, SITE_SUBFOLDER_LEFT,
    SITE_SUBFOLDER_RIGHT,
};

/// Builds the room for a single child folder beside a corridor segment.
#[derive(Debug, Clone, Copy)]
pub struct RoomBuilder<'a> {
    executor: MacroExecutor<'a>,
    budget: SignBudget,
}

impl<'a> RoomBuilder<'a> {
    /// Rooms run through `executor` with signs of the given size.
    pub fn new(executor: MacroExecutor<'a>, budget: SignBudget) -> Self {
        Self { executor, budget }
    }

    /// Macro used for rooms on `orientation`'s side.
    pub const fn macro_for(orientation: RoomOrientation) -> &'static str {
        match orientation {
            RoomOrientation::Left => SITE_SUBFOLDER_LEFT,
            RoomOrientation::Right => SITE_SUBFOLDER_RIGHT,
        }
    }

    /// Build the room for `folder` at `anchor`, signed with its name and creator.
    pub fn build(
        &self,
        host: &mut dyn RenderHost,
        folder: &dyn FolderNode,
        anchor: BlockPos,
        orientation: RoomOrientation,
    ) -> Result<MacroInvocation, BuildError> {
        let mut signs = SignQueue::new(
            [folder.name().to_string(), attribution(folder.created_by())],
            self.budget,
        );
        let run = self.executor.run(
            host,
            Self::macro_for(orientation),
            anchor,
            Some(orientation),
            Some(&mut signs),
        )?;
        Ok(MacroInvocation::new(run, signs.into_assigned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentcraft_assets::MacroStore;
    use contentcraft_repo::Folder;
    use contentcraft_testkit::RecordingHost;

    fn store() -> MacroStore {
        let store = MacroStore::builtin();
        store
            .load_all([SITE_SUBFOLDER_LEFT, SITE_SUBFOLDER_RIGHT])
            .expect("builtin rooms");
        store
    }

    #[test]
    fn room_signs_carry_name_and_creator() {
        let store = store();
        let rooms = RoomBuilder::new(MacroExecutor::new(&store), SignBudget::WALL_SIGN);
        let mut host = RecordingHost::new();
        let folder = Folder::new("Quarterly Budget Reviews", "bob");

        let invocation = rooms
            .build(&mut host, &folder, BlockPos::new(0, 64, 0), RoomOrientation::Left)
            .expect("room builds");

        assert_eq!(invocation.macro_name, SITE_SUBFOLDER_LEFT);
        assert_eq!(invocation.orientation, Some(RoomOrientation::Left));
        assert_eq!(
            invocation.labels,
            vec!["Quarterly Budget Reviews", "Created By     bob"]
        );
        let writes = host.sign_writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].1, vec!["Quarterly", "Budget Reviews"]);
        // Padding collapses, so a short creator fits on one line.
        assert_eq!(writes[1].1, vec!["Created By bob"]);
    }

    #[test]
    fn left_and_right_rooms_are_mirror_images() {
        let store = store();
        let rooms = RoomBuilder::new(MacroExecutor::new(&store), SignBudget::WALL_SIGN);
        let folder = Folder::new("Q1", "bob");
        let anchor = BlockPos::new(5, 64, -20);

        let mut left = RecordingHost::new();
        rooms
            .build(&mut left, &folder, anchor, RoomOrientation::Left)
            .unwrap();
        let mut right = RecordingHost::new();
        rooms
            .build(&mut right, &folder, anchor, RoomOrientation::Right)
            .unwrap();

        let mut mirrored: Vec<_> = left
            .placements()
            .iter()
            .map(|p| (p.pos.mirror_x(anchor.x).unwrap(), p.kind))
            .collect();
        let mut actual: Vec<_> = right.placements().iter().map(|p| (p.pos, p.kind)).collect();
        mirrored.sort();
        actual.sort();
        assert_eq!(mirrored, actual);
        assert!(left.placements().iter().all(|p| p.pos.x < anchor.x));
    }
}
