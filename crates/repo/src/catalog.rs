use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FolderNode, MembershipListing, RepoError, RepoItem, RepositoryTree};

/// A folder record as stored in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub created_by: String,
    #[serde(default)]
    pub children: Vec<Item>,
}

/// A non-folder leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub document: String,
}

/// Catalog child entry. Documents are written as `{"document": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Document(Document),
    Folder(Folder),
}

impl Folder {
    pub fn new(name: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_by: created_by.into(),
            children: Vec::new(),
        }
    }

    /// Append a child folder.
    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.children.push(Item::Folder(folder));
        self
    }

    /// Append a document leaf.
    pub fn with_document(mut self, name: impl Into<String>) -> Self {
        self.children.push(Item::Document(Document {
            document: name.into(),
        }));
        self
    }
}

impl FolderNode for Folder {
    fn name(&self) -> &str {
        &self.name
    }

    fn created_by(&self) -> &str {
        &self.created_by
    }

    fn children(&self) -> Vec<RepoItem<'_>> {
        self.children
            .iter()
            .map(|item| match item {
                Item::Folder(folder) => RepoItem::Folder(folder),
                Item::Document(doc) => RepoItem::Other {
                    name: &doc.document,
                },
            })
            .collect()
    }
}

/// JSON-backed set of sites and their members.
///
/// ```json
/// {
///   "sites": { "finance": { "name": "documentLibrary", "created_by": "admin", "children": [] } },
///   "members": { "finance": ["alice", "bob"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteCatalog {
    /// Site id to document library root.
    pub sites: BTreeMap<String, Folder>,
    /// Site id to member names. Sites without an entry report their members as unavailable.
    pub members: BTreeMap<String, Vec<String>>,
}

impl SiteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from the provided JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, RepoError> {
        let data = fs::read_to_string(path).map_err(|err| RepoError::Io {
            path: path.display().to_string(),
            err,
        })?;
        Self::from_str(&data)
    }

    /// Load a catalog from an in-memory JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self, RepoError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn with_site(mut self, site_id: impl Into<String>, root: Folder) -> Self {
        self.sites.insert(site_id.into(), root);
        self
    }

    pub fn with_members<I, S>(mut self, site_id: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members
            .insert(site_id.into(), members.into_iter().map(Into::into).collect());
        self
    }
}

impl RepositoryTree for SiteCatalog {
    fn root_folder(&self, site_id: &str) -> Result<&dyn FolderNode, RepoError> {
        self.sites
            .get(site_id)
            .map(|folder| folder as &dyn FolderNode)
            .ok_or_else(|| RepoError::SiteNotFound(site_id.to_string()))
    }
}

impl MembershipListing for SiteCatalog {
    fn members(&self, site_id: &str) -> Result<Vec<String>, RepoError> {
        self.members
            .get(site_id)
            .cloned()
            .ok_or_else(|| RepoError::MembersUnavailable(site_id.to_string()))
    }
}
