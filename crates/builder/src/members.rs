use contentcraft_core::{next_anchor, BlockPos, CoordinateOverflow, Direction};
use contentcraft_repo::MembershipListing;
use contentcraft_world::RenderHost;
use serde::Serialize;
use tracing::{info, warn};

/// What the member marker side task managed to do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberMarkerOutcome {
    /// Members whose marker was spawned, in spawn order.
    pub spawned: Vec<String>,
    /// Failure that stopped the task, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MemberMarkerOutcome {
    /// Whether the task stopped early.
    pub fn degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Spawn one labelled marker per site member in a line running south of `origin`.
///
/// The k-th member (1-based) stands `k * spacing` blocks south. Never fails: the first error
/// stops the task, is logged, and is recorded in the outcome. Markers already spawned remain.
pub fn spawn_member_markers(
    members: &dyn MembershipListing,
    host: &mut dyn RenderHost,
    site: &str,
    origin: BlockPos,
    spacing: i32,
) -> MemberMarkerOutcome {
    let mut outcome = MemberMarkerOutcome::default();
    let result = spawn_all(members, host, site, origin, spacing, &mut outcome.spawned);

    if let Err(err) = result {
        warn!(
            site,
            spawned = outcome.spawned.len(),
            error = %err,
            "member markers incomplete; continuing build"
        );
        outcome.error = Some(err.to_string());
    }
    outcome
}

fn spawn_all(
    members: &dyn MembershipListing,
    host: &mut dyn RenderHost,
    site: &str,
    origin: BlockPos,
    spacing: i32,
    spawned: &mut Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    for (index, name) in members.members(site)?.into_iter().enumerate() {
        let distance = i32::try_from(index + 1)
            .ok()
            .and_then(|k| spacing.checked_mul(k))
            .ok_or(CoordinateOverflow { from: origin })?;
        let pos = next_anchor(origin, Direction::South, distance)?;
        host.spawn_marker(pos, &name)?;
        info!(site, member = %name, %pos, "member marker spawned");
        spawned.push(name);
    }
    Ok(())
}
