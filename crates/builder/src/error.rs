use contentcraft_assets::{LoadError, UnknownMacroError};
use contentcraft_core::{BlockPos, CoordinateOverflow};
use contentcraft_repo::RepoError;
use contentcraft_world::PlacementError;
use thiserror::Error;

/// Failures that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The request named no site.
    #[error("no site name was provided")]
    MissingSiteName,
    /// The repository has no such site.
    #[error("site `{0}` could not be found")]
    SiteNotFound(String),
    /// A macro was run before being loaded.
    #[error(transparent)]
    UnknownMacro(#[from] UnknownMacroError),
    /// A macro source could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The render host rejected a placement or sign write. Blocks already placed stay.
    #[error("macro `{macro_name}` failed at {pos}: {err}")]
    Placement {
        /// Macro being run.
        macro_name: String,
        /// Absolute position of the failing block.
        pos: BlockPos,
        /// Host rejection.
        #[source]
        err: PlacementError,
    },
    /// An anchor or placement fell outside the representable block range.
    #[error(transparent)]
    Overflow(#[from] CoordinateOverflow),
    /// Any other repository failure.
    #[error("repository error: {0}")]
    Repository(#[source] RepoError),
    /// A layout distance that would stack structures on one anchor.
    #[error("layout setting `{field}` must be positive (got {value})")]
    InvalidLayout {
        /// Offending setting.
        field: &'static str,
        /// Configured value.
        value: i32,
    },
}

impl From<RepoError> for BuildError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::SiteNotFound(site) => Self::SiteNotFound(site),
            other => Self::Repository(other),
        }
    }
}

impl BuildError {
    /// Whether the error stems from the request rather than from the engine.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::MissingSiteName | Self::SiteNotFound(_))
    }
}
