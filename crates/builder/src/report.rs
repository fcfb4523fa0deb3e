use contentcraft_core::{BlockPos, RoomOrientation};
use serde::Serialize;

use crate::{MacroRun, MemberMarkerOutcome, SITE_SUBFOLDER_LEFT, SITE_SUBFOLDER_RIGHT};

/// Record of one macro run issued during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroInvocation {
    /// Macro that was run.
    pub macro_name: String,
    /// Anchor it was run at.
    pub anchor: BlockPos,
    /// Requested orientation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<RoomOrientation>,
    /// Blocks placed.
    pub placed: usize,
    /// Label consumed by each sign, in placement order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl MacroInvocation {
    /// Combine a run summary with the labels its signs consumed.
    pub fn new(run: MacroRun, labels: Vec<String>) -> Self {
        Self {
            macro_name: run.macro_name,
            anchor: run.anchor,
            orientation: run.orientation,
            placed: run.placed,
            labels,
        }
    }
}

/// Everything a site build issued, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Site that was built.
    pub site: String,
    /// Macro runs in issue order.
    pub invocations: Vec<MacroInvocation>,
    /// Result of the member marker side task.
    pub members: MemberMarkerOutcome,
}

impl BuildReport {
    /// Invocations of `macro_name`, in issue order.
    pub fn invocations_of<'a>(
        &'a self,
        macro_name: &'a str,
    ) -> impl Iterator<Item = &'a MacroInvocation> + 'a {
        self.invocations
            .iter()
            .filter(move |invocation| invocation.macro_name == macro_name)
    }

    /// Number of runs of `macro_name`.
    pub fn count(&self, macro_name: &str) -> usize {
        self.invocations_of(macro_name).count()
    }

    /// Room runs, in issue order.
    pub fn rooms(&self) -> impl Iterator<Item = &MacroInvocation> + '_ {
        self.invocations.iter().filter(|invocation| {
            invocation.macro_name == SITE_SUBFOLDER_LEFT
                || invocation.macro_name == SITE_SUBFOLDER_RIGHT
        })
    }

    /// Total blocks placed across all runs.
    pub fn blocks_placed(&self) -> usize {
        self.invocations.iter().map(|invocation| invocation.placed).sum()
    }
}
