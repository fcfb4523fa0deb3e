//! Content repository collaborator: read-only folder trees and site membership.
//!
//! The layout engine only sees the [`RepositoryTree`], [`FolderNode`] and
//! [`MembershipListing`] traits. [`SiteCatalog`] is a JSON-backed implementation used by the
//! command line and by tests.

mod catalog;

pub use catalog::{Document, Folder, Item, SiteCatalog};

use thiserror::Error;

/// Errors raised by repository collaborators.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No site with that id.
    #[error("site `{0}` not found")]
    SiteNotFound(String),
    /// The membership list could not be produced.
    #[error("members of site `{0}` are unavailable")]
    MembersUnavailable(String),
    /// Wrap IO errors when reading catalogs.
    #[error("failed to read catalog {path}: {err}")]
    Io {
        path: String,
        #[source]
        err: std::io::Error,
    },
    /// Wrap serde parsing issues.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A read-only folder in the repository.
pub trait FolderNode {
    fn name(&self) -> &str;

    /// Login of the user that created the folder.
    fn created_by(&self) -> &str;

    /// Direct children. No ordering is guaranteed by the contract.
    fn children(&self) -> Vec<RepoItem<'_>>;
}

/// A child of a folder: either another folder or some other item (documents, links).
#[derive(Clone, Copy)]
pub enum RepoItem<'a> {
    Folder(&'a dyn FolderNode),
    Other { name: &'a str },
}

impl<'a> RepoItem<'a> {
    pub fn as_folder(&self) -> Option<&'a dyn FolderNode> {
        match *self {
            RepoItem::Folder(folder) => Some(folder),
            RepoItem::Other { .. } => None,
        }
    }
}

impl std::fmt::Debug for RepoItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoItem::Folder(folder) => f.debug_tuple("Folder").field(&folder.name()).finish(),
            RepoItem::Other { name } => f.debug_struct("Other").field("name", name).finish(),
        }
    }
}

/// Child folders of `folder` in the order the repository returned them; other items are dropped.
pub fn child_folders(folder: &dyn FolderNode) -> Vec<&dyn FolderNode> {
    folder
        .children()
        .into_iter()
        .filter_map(|item| item.as_folder())
        .collect()
}

/// Site-level tree access.
pub trait RepositoryTree {
    /// Top-level folder (document library) of `site_id`.
    fn root_folder(&self, site_id: &str) -> Result<&dyn FolderNode, RepoError>;
}

/// Site membership listing.
pub trait MembershipListing {
    /// Member names of `site_id`.
    fn members(&self, site_id: &str) -> Result<Vec<String>, RepoError>;
}
