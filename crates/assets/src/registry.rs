use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use contentcraft_core::{BlockPos, RoomOrientation};
use contentcraft_world::{BlockKind, BlockMeta};
use tracing::{debug, warn};

use crate::{
    load_macros_from_str, BuiltinMacros, DirMacroSource, LoadError, MacroDefinition, MacroSource,
    UnknownMacroError,
};

/// One resolved placement inside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroEntry {
    /// Offset from the anchor, in the template's authored handedness.
    pub offset: BlockPos,
    /// Block type to place.
    pub kind: BlockKind,
    /// Placement metadata.
    pub meta: BlockMeta,
}

/// A loaded, immutable macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroTemplate {
    name: String,
    orientation: RoomOrientation,
    entries: Vec<MacroEntry>,
}

impl MacroTemplate {
    fn new(
        name: impl Into<String>,
        orientation: RoomOrientation,
        entries: Vec<MacroEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            orientation,
            entries,
        }
    }

    fn from_definition(def: MacroDefinition) -> Result<Self, LoadError> {
        let mut entries = Vec::with_capacity(def.blocks.len());
        for (index, block) in def.blocks.into_iter().enumerate() {
            let kind = block
                .block
                .parse::<BlockKind>()
                .map_err(|_| LoadError::UnknownBlockType {
                    macro_name: def.name.clone(),
                    index,
                    token: block.block.clone(),
                })?;
            let [x, y, z] = block.offset;
            entries.push(MacroEntry {
                offset: BlockPos::new(x, y, z),
                kind,
                meta: block.meta,
            });
        }
        Ok(Self::new(def.name, def.orientation, entries))
    }

    /// Unique macro name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handedness the offsets were authored in.
    pub fn orientation(&self) -> RoomOrientation {
        self.orientation
    }

    /// Placements in execution order.
    pub fn entries(&self) -> &[MacroEntry] {
        &self.entries
    }

    /// Number of placements able to carry sign text.
    pub fn signage_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind.is_signage())
            .count()
    }
}

#[derive(Default)]
struct StoreState {
    templates: HashMap<String, Arc<MacroTemplate>>,
    loaded_sources: HashSet<String>,
}

/// Named macro templates, loaded from a [`MacroSource`].
///
/// Loading is idempotent: a source that was already loaded is not read again, and when two
/// sources define the same macro the first one loaded wins. The store is safe to share across
/// threads; templates are handed out as `Arc`s and never change once inserted.
pub struct MacroStore {
    source: Box<dyn MacroSource>,
    state: RwLock<StoreState>,
}

impl MacroStore {
    /// Create an empty store resolving sources through `source`.
    pub fn new(source: impl MacroSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Store backed by the macros compiled into the crate.
    pub fn builtin() -> Self {
        Self::new(BuiltinMacros)
    }

    /// Store backed by `<dir>/<name>.json` files.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirMacroSource::new(dir))
    }

    /// Source resolver backing this store.
    pub fn source(&self) -> &dyn MacroSource {
        self.source.as_ref()
    }

    /// Load the named source through the resolver. No-op if it is already loaded.
    pub fn load(&self, source_name: &str) -> Result<(), LoadError> {
        if self.is_source_loaded(source_name) {
            return Ok(());
        }
        let text = self.source.read(source_name)?;
        self.load_str(source_name, &text)
    }

    /// Load every source in `source_names`, stopping at the first failure.
    pub fn load_all<'a>(
        &self,
        source_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), LoadError> {
        for name in source_names {
            self.load(name)?;
        }
        Ok(())
    }

    /// Parse and register macros from in-memory JSON under `source_name`.
    pub fn load_str(&self, source_name: &str, input: &str) -> Result<(), LoadError> {
        let defs = load_macros_from_str(source_name, input)?;
        if defs.is_empty() {
            return Err(LoadError::Empty(source_name.to_string()));
        }

        let mut seen = HashSet::new();
        let mut templates = Vec::with_capacity(defs.len());
        for def in defs {
            if !seen.insert(def.name.clone()) {
                return Err(LoadError::DuplicateMacro {
                    source_name: source_name.to_string(),
                    macro_name: def.name,
                });
            }
            templates.push(MacroTemplate::from_definition(def)?);
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.loaded_sources.insert(source_name.to_string()) {
            return Ok(());
        }
        for template in templates {
            if state.templates.contains_key(template.name()) {
                warn!(
                    source = source_name,
                    name = template.name(),
                    "macro already loaded from another source; keeping the first"
                );
                continue;
            }
            debug!(
                source = source_name,
                name = template.name(),
                entries = template.entries().len(),
                "macro loaded"
            );
            state
                .templates
                .insert(template.name().to_string(), Arc::new(template));
        }
        Ok(())
    }

    /// Resolve a loaded macro by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<MacroTemplate>, UnknownMacroError> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .templates
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownMacroError(name.to_string()))
    }

    /// Whether `source_name` has been loaded.
    pub fn is_source_loaded(&self, source_name: &str) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .loaded_sources
            .contains(source_name)
    }

    /// Names of all loaded macros, sorted.
    pub fn names(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = state.templates.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for MacroStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroStore")
            .field("macros", &self.names())
            .finish()
    }
}
