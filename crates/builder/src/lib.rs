#![warn(missing_docs)]
//! Folder-tree layout engine: macro execution, sign decoration, rooms and whole sites.

mod config;
mod error;
mod executor;
mod members;
mod report;
mod room;
mod signs;
mod site;

pub use config::LayoutConfig;
pub use error::BuildError;
pub use executor::{MacroExecutor, MacroRun, PlacementEvent, PlacementListener};
pub use members::{spawn_member_markers, MemberMarkerOutcome};
pub use report::{BuildReport, MacroInvocation};
pub use room::RoomBuilder;
pub use signs::{attribution, SignQueue, ATTRIBUTION_PREFIX};
pub use site::{BuildRequest, SiteBuilder};

/// Entrance of a root folder section.
pub const SITE_FOLDER_FRONT: &str = "site.folder.front";
/// Corridor segment holding one pair of child folders.
pub const SITE_FOLDER_MIDDLE: &str = "site.folder.middle";
/// Closing wall of a section.
pub const SITE_FOLDER_BACK: &str = "site.folder.back";
/// Walkway in front of the entrance.
pub const SITE_FOLDER_PLATFORM: &str = "site.folder.platform";
/// Child folder room west of the corridor.
pub const SITE_SUBFOLDER_LEFT: &str = "site.subfolder.left";
/// Child folder room east of the corridor.
pub const SITE_SUBFOLDER_RIGHT: &str = "site.subfolder.right";

/// Every macro the site builder runs; the built-in macro set covers exactly these.
pub const SITE_MACROS: [&str; 6] = contentcraft_assets::BUILTIN_MACRO_NAMES;
