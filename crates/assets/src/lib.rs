#![warn(missing_docs)]
//! Macro source schema, resolvers and the macro definition store.

mod loader;
mod registry;

pub use loader::{BuiltinMacros, DirMacroSource, MacroSource, BUILTIN_MACRO_NAMES};
pub use registry::{MacroEntry, MacroStore, MacroTemplate};

use contentcraft_core::RoomOrientation;
use contentcraft_world::BlockMeta;
use serde::Deserialize;
use thiserror::Error;

/// One macro as written in a source file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MacroDefinition {
    /// Unique macro name (e.g., "site.folder.front").
    pub name: String,
    /// Handedness the offsets were authored in.
    #[serde(default)]
    pub orientation: RoomOrientation,
    /// Placements in execution order.
    pub blocks: Vec<BlockDefinition>,
}

/// One templated placement.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockDefinition {
    /// Offset from the anchor as `[x, y, z]`.
    pub offset: [i32; 3],
    /// Block type token (e.g., "wall_sign").
    pub block: String,
    /// Optional placement metadata.
    #[serde(default)]
    pub meta: BlockMeta,
}

/// Errors emitted while loading macro sources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resolver has no source by that name.
    #[error("macro source `{0}` not found")]
    Missing(String),
    /// Wrap IO errors when reading sources.
    #[error("failed to read macro source `{source_name}`: {err}")]
    Io {
        /// Source being read.
        source_name: String,
        /// Underlying IO failure.
        #[source]
        err: std::io::Error,
    },
    /// Wrap serde parsing issues (bad JSON, malformed offsets, unknown fields).
    #[error("failed to parse macro source `{source_name}`: {err}")]
    Parse {
        /// Source being parsed.
        source_name: String,
        /// Underlying parse failure.
        #[source]
        err: serde_json::Error,
    },
    /// A block token did not name a known block type.
    #[error("macro `{macro_name}` entry {index}: unknown block type `{token}`")]
    UnknownBlockType {
        /// Macro containing the entry.
        macro_name: String,
        /// Zero-based entry index.
        index: usize,
        /// Offending token.
        token: String,
    },
    /// The same macro name appears twice in one source.
    #[error("macro `{macro_name}` is defined more than once in `{source_name}`")]
    DuplicateMacro {
        /// Source containing the duplicates.
        source_name: String,
        /// Duplicated macro name.
        macro_name: String,
    },
    /// The source parsed but defines no macros.
    #[error("macro source `{0}` defines no macros")]
    Empty(String),
}

/// Lookup of a macro name that was never loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown macro `{0}`")]
pub struct UnknownMacroError(pub String);

/// Parse a JSON macro source holding either one macro object or an array of them.
pub fn load_macros_from_str(
    source_name: &str,
    input: &str,
) -> Result<Vec<MacroDefinition>, LoadError> {
    let parse_err = |err| LoadError::Parse {
        source_name: source_name.to_string(),
        err,
    };
    let value: serde_json::Value = serde_json::from_str(input).map_err(parse_err)?;
    let defs = if value.is_array() {
        serde_json::from_value(value).map_err(parse_err)?
    } else {
        vec![serde_json::from_value(value).map_err(parse_err)?]
    };
    Ok(defs)
}
