use contentcraft_repo::{Folder, SiteCatalog};

/// Site id used by [`reports_catalog`].
pub const REPORTS_SITE: &str = "finance";

/// The `Reports` section: three quarterly folders and a stray document, owned by alice.
pub fn reports_folder() -> Folder {
    Folder::new("Reports", "alice")
        .with_folder(Folder::new("Q1", "bob"))
        .with_document("summary.pdf")
        .with_folder(Folder::new("Q2", "carol"))
        .with_folder(Folder::new("Q3", "dave"))
}

/// One site whose document library holds the `Reports` section, with two members.
pub fn reports_catalog() -> SiteCatalog {
    let root = Folder::new("documentLibrary", "admin").with_folder(reports_folder());
    SiteCatalog::new()
        .with_site(REPORTS_SITE, root)
        .with_members(REPORTS_SITE, ["alice", "bob"])
}

/// A root folder holding `sections` root folders, each with `children` child folders.
pub fn grid_folder(sections: usize, children: usize) -> Folder {
    (0..sections).fold(Folder::new("documentLibrary", "admin"), |root, s| {
        let section = (0..children).fold(Folder::new(format!("S{s}"), "owner"), |folder, c| {
            folder.with_folder(Folder::new(format!("S{s}C{c}"), format!("user{c}")))
        });
        root.with_folder(section)
    })
}
