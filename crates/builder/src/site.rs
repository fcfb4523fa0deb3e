use contentcraft_assets::MacroStore;
use contentcraft_core::{next_anchor, BlockPos, Direction, RoomOrientation, SignBudget};
use contentcraft_repo::{child_folders, FolderNode, MembershipListing, RepositoryTree};
use contentcraft_world::RenderHost;
use tracing::{debug, info};

use crate::{
    attribution, spawn_member_markers, BuildError, BuildReport, LayoutConfig, MacroExecutor,
    MacroInvocation, RoomBuilder, SignQueue, SITE_FOLDER_BACK, SITE_FOLDER_FRONT,
    SITE_FOLDER_MIDDLE, SITE_FOLDER_PLATFORM, SITE_MACROS,
};

/// Which site to build, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Repository site id.
    pub site: String,
    /// Position the layout is measured from.
    pub start: BlockPos,
    /// Where the member marker line begins.
    pub marker_origin: BlockPos,
}

impl BuildRequest {
    /// Build `site` from `start`, with member markers starting at the same position.
    pub fn new(site: impl Into<String>, start: BlockPos) -> Self {
        Self {
            site: site.into(),
            start,
            marker_origin: start,
        }
    }

    /// Start the member marker line somewhere else (usually the requesting player).
    pub fn with_marker_origin(mut self, origin: BlockPos) -> Self {
        self.marker_origin = origin;
        self
    }
}

/// Lays out a site's folder tree.
///
/// Each root folder becomes a section: an entrance, a platform, one corridor segment per pair
/// of child folders with a room on each side, and a closing wall. Sections stack upward.
#[derive(Debug)]
pub struct SiteBuilder {
    store: MacroStore,
    layout: LayoutConfig,
    signs: SignBudget,
}

impl SiteBuilder {
    /// Take ownership of `store` and load every site macro into it.
    pub fn new(
        store: MacroStore,
        layout: LayoutConfig,
        signs: SignBudget,
    ) -> Result<Self, BuildError> {
        layout.validate()?;
        store.load_all(SITE_MACROS)?;
        Ok(Self {
            store,
            layout,
            signs,
        })
    }

    /// Builder over the built-in macros with default spacing and wall signs.
    pub fn with_builtin_macros() -> Result<Self, BuildError> {
        Self::new(
            MacroStore::builtin(),
            LayoutConfig::default(),
            SignBudget::WALL_SIGN,
        )
    }

    /// Macros available to this builder.
    pub fn store(&self) -> &MacroStore {
        &self.store
    }

    /// Spacing in use.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    fn executor(&self) -> MacroExecutor<'_> {
        MacroExecutor::new(&self.store)
    }

    /// Build the site named by `request` into `host`.
    ///
    /// Unknown or empty site names are usage errors and nothing is placed. Member markers are
    /// best effort; every other failure aborts the build, leaving placed blocks where they are.
    pub fn build(
        &self,
        tree: &dyn RepositoryTree,
        members: &dyn MembershipListing,
        host: &mut dyn RenderHost,
        request: &BuildRequest,
    ) -> Result<BuildReport, BuildError> {
        let site = request.site.trim();
        if site.is_empty() {
            return Err(BuildError::MissingSiteName);
        }
        let root = tree.root_folder(site)?;

        let markers = spawn_member_markers(
            members,
            host,
            site,
            request.marker_origin,
            self.layout.marker_spacing,
        );
        let invocations = self.build_root_folders(host, root, request.start)?;

        let report = BuildReport {
            site: site.to_string(),
            invocations,
            members: markers,
        };
        info!(
            site,
            invocations = report.invocations.len(),
            blocks = report.blocks_placed(),
            members = report.members.spawned.len(),
            "site built"
        );
        Ok(report)
    }

    /// Build one section per child folder of `root`, the first one `root_offset` north of
    /// `start`.
    pub fn build_root_folders(
        &self,
        host: &mut dyn RenderHost,
        root: &dyn FolderNode,
        start: BlockPos,
    ) -> Result<Vec<MacroInvocation>, BuildError> {
        let mut invocations = Vec::new();
        let mut anchor = next_anchor(start, Direction::North, self.layout.root_offset)?;
        for folder in child_folders(root) {
            self.build_root_folder(host, folder, anchor, &mut invocations)?;
            anchor = next_anchor(anchor, Direction::Up, self.layout.root_spacing)?;
        }
        Ok(invocations)
    }

    fn build_root_folder(
        &self,
        host: &mut dyn RenderHost,
        folder: &dyn FolderNode,
        front: BlockPos,
        invocations: &mut Vec<MacroInvocation>,
    ) -> Result<(), BuildError> {
        let executor = self.executor();
        let rooms = RoomBuilder::new(executor, self.signs);
        let owner = attribution(folder.created_by());
        let children = child_folders(folder);
        info!(
            folder = folder.name(),
            children = children.len(),
            %front,
            "building root folder"
        );

        let mut signs = SignQueue::new([folder.name().to_string(), owner.clone()], self.signs);
        let run = executor.run(host, SITE_FOLDER_FRONT, front, None, Some(&mut signs))?;
        invocations.push(MacroInvocation::new(run, signs.into_assigned()));

        let platform = next_anchor(front, Direction::South, self.layout.platform_offset)?;
        let run = executor.run(host, SITE_FOLDER_PLATFORM, platform, None, None)?;
        invocations.push(MacroInvocation::new(run, Vec::new()));

        let mut middle = next_anchor(front, Direction::North, self.layout.middle_offset)?;
        for pair in children.chunks(2) {
            let (first, second) = (pair[0], pair.get(1).copied());
            debug!(
                first = first.name(),
                second = ?second.map(|f| f.name()),
                %middle,
                "building folder pair"
            );

            // Both attribution slots carry the section owner, not the child's creator.
            let mut signs = SignQueue::new(
                [
                    first.name().to_string(),
                    owner.clone(),
                    second.map(|f| f.name().to_string()).unwrap_or_default(),
                    second.map(|_| owner.clone()).unwrap_or_default(),
                ],
                self.signs,
            );
            let run = executor.run(host, SITE_FOLDER_MIDDLE, middle, None, Some(&mut signs))?;
            invocations.push(MacroInvocation::new(run, signs.into_assigned()));

            invocations.push(rooms.build(host, first, middle, RoomOrientation::Left)?);
            if let Some(second) = second {
                invocations.push(rooms.build(host, second, middle, RoomOrientation::Right)?);
            }

            middle = next_anchor(middle, Direction::North, self.layout.pair_spacing)?;
        }

        let run = executor.run(host, SITE_FOLDER_BACK, middle, None, None)?;
        invocations.push(MacroInvocation::new(run, Vec::new()));
        Ok(())
    }
}
