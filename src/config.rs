//! Loading options and type tables from disk.

use anyhow::{Context, Result};
use fieldmatch_matcher::MatchOptions;
use fieldmatch_types::{TypeId, TypeStore, TypeTable};
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

/// Read [`MatchOptions`] from a JSON file.
pub fn load_options(path: &Path) -> Result<MatchOptions> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    let options = MatchOptions::from_json_str(&source)
        .with_context(|| format!("failed to parse options file {}", path.display()))?;
    debug!(path = %path.display(), ?options, "loaded match options");
    Ok(options)
}

/// Read a JSON type table and register its types in `store`.
pub fn load_type_table(path: &Path, store: &TypeStore) -> Result<IndexMap<String, TypeId>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read type table {}", path.display()))?;
    let table = TypeTable::from_json_str(&source)
        .with_context(|| format!("failed to parse type table {}", path.display()))?;
    table
        .load_into(store)
        .with_context(|| format!("failed to load type table {}", path.display()))
}
