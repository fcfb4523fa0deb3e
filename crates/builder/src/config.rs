use serde::{Deserialize, Serialize};

use crate::BuildError;

/// Spacing between the structures of a site, in blocks.
///
/// Root folder sections are stacked upward; the pairs inside a section run north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance north of the start position to the first section's entrance.
    pub root_offset: i32,
    /// Vertical distance between consecutive root folder sections.
    pub root_spacing: i32,
    /// Distance south of an entrance to its platform.
    pub platform_offset: i32,
    /// Distance north of an entrance to the first corridor segment.
    pub middle_offset: i32,
    /// Distance north between consecutive corridor segments.
    pub pair_spacing: i32,
    /// Distance south between consecutive member markers.
    pub marker_spacing: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_offset: 10,
            root_spacing: 5,
            platform_offset: 2,
            middle_offset: 4,
            pair_spacing: 8,
            marker_spacing: 2,
        }
    }
}

impl LayoutConfig {
    /// Reject non-positive distances.
    pub fn validate(&self) -> Result<(), BuildError> {
        let fields = [
            ("root_offset", self.root_offset),
            ("root_spacing", self.root_spacing),
            ("platform_offset", self.platform_offset),
            ("middle_offset", self.middle_offset),
            ("pair_spacing", self.pair_spacing),
            ("marker_spacing", self.marker_spacing),
        ];
        match fields.into_iter().find(|(_, value)| *value <= 0) {
            Some((field, value)) => Err(BuildError::InvalidLayout { field, value }),
            None => Ok(()),
        }
    }
}
