use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::LoadError;

/// Names of the macros compiled into the binary.
pub const BUILTIN_MACRO_NAMES: [&str; 6] = [
    "site.folder.back",
    "site.folder.front",
    "site.folder.middle",
    "site.folder.platform",
    "site.subfolder.left",
    "site.subfolder.right",
];

/// Resolves a source name to the raw JSON text of a macro source.
pub trait MacroSource: Send + Sync {
    /// Read the source called `source_name`.
    fn read(&self, source_name: &str) -> Result<String, LoadError>;

    /// Names of every source this resolver can read, sorted.
    fn list(&self) -> Result<Vec<String>, LoadError>;
}

/// Macros shipped with the crate under `macros/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMacros;

impl MacroSource for BuiltinMacros {
    fn read(&self, source_name: &str) -> Result<String, LoadError> {
        let text = match source_name {
            "site.folder.back" => include_str!("../macros/site.folder.back.json"),
            "site.folder.front" => include_str!("../macros/site.folder.front.json"),
            "site.folder.middle" => include_str!("../macros/site.folder.middle.json"),
            "site.folder.platform" => include_str!("../macros/site.folder.platform.json"),
            "site.subfolder.left" => include_str!("../macros/site.subfolder.left.json"),
            "site.subfolder.right" => include_str!("../macros/site.subfolder.right.json"),
            _ => return Err(LoadError::Missing(source_name.to_string())),
        };
        Ok(text.to_string())
    }

    fn list(&self) -> Result<Vec<String>, LoadError> {
        Ok(BUILTIN_MACRO_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

/// Macro sources stored as `<dir>/<source_name>.json`.
#[derive(Debug, Clone)]
pub struct DirMacroSource {
    root: PathBuf,
}

impl DirMacroSource {
    /// Resolve sources relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, source_name: &str) -> PathBuf {
        self.root.join(format!("{source_name}.json"))
    }
}

impl MacroSource for DirMacroSource {
    fn read(&self, source_name: &str) -> Result<String, LoadError> {
        let path = self.path_for(source_name);
        fs::read_to_string(&path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                LoadError::Missing(source_name.to_string())
            } else {
                LoadError::Io {
                    source_name: source_name.to_string(),
                    err,
                }
            }
        })
    }

    fn list(&self) -> Result<Vec<String>, LoadError> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| LoadError::Io {
                source_name: self.root.display().to_string(),
                err: err.into(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some("json")
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
