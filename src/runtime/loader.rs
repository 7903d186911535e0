//! Loading a program directory into a [`Grid`].
//!
//! A program is a directory of `<id>.tier` files. The id must be an integer
//! and `0.tier` is the entry point.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::grid::Grid;
use crate::core::{TierError, TierResult};

/// File extension of tier sources.
pub const TIER_EXTENSION: &str = "tier";

/// Tier id of the entry point.
pub const ENTRY_TIER: i64 = 0;

/// A tier file found in a program directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierFile {
    pub id: i64,
    pub path: PathBuf,
}

/// List the tier files in `directory`, sorted by path.
///
/// Files whose stem is not an integer in canonical form are skipped with a
/// warning, so `00.tier` or `+1.tier` never share an id with `0.tier`/`1.tier`.
pub fn discover(directory: &Path) -> TierResult<Vec<TierFile>> {
    let entries = fs::read_dir(directory).map_err(|source| TierError::ProgramDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| TierError::ProgramDirectory {
            path: directory.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(TIER_EXTENSION) || !path.is_file() {
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        match stem.parse::<i64>() {
            Ok(id) if id.to_string() == stem => files.push(TierFile { id, path }),
            Ok(_) => warn!(file = %path.display(), "skipping tier file with a non-canonical id"),
            Err(_) => warn!(file = %path.display(), "skipping tier file without an integer id"),
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Load every tier in `directory` into one grid.
pub fn load_directory(directory: impl AsRef<Path>) -> TierResult<Grid> {
    let directory = directory.as_ref();
    let files = discover(directory)?;

    if !files.iter().any(|f| f.id == ENTRY_TIER) {
        return Err(TierError::MissingEntryPoint {
            directory: directory.to_path_buf(),
        });
    }

    let mut grid = Grid::new();
    for file in &files {
        let source = fs::read_to_string(&file.path).map_err(|source| TierError::TierFile {
            path: file.path.clone(),
            source,
        })?;
        debug!(tier = file.id, file = %file.path.display(), "loaded tier");
        grid.add_tier(file.id, &source);
    }

    info!(
        directory = %directory.display(),
        tiers = files.len(),
        "program loaded"
    );
    Ok(grid)
}
