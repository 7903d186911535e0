//! Loading programs from disk.
//!
//! # Layer 1 - Depends on core

pub mod grid;
pub mod loader;

pub use grid::{Grid, SourceGrid, COMMENT_MARKER};
pub use loader::{discover, load_directory, TierFile, ENTRY_TIER, TIER_EXTENSION};
