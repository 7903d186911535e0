//! Character grids: one plain-text slice per tier.
//!
//! The engine only ever sees the [`SourceGrid`] trait; [`Grid`] is the
//! in-memory implementation built from tier source text.

use std::collections::{BTreeMap, HashMap};

use crate::core::{Bounds, Position};

/// Line comment marker. Only honoured at column 0 by the grid builder.
pub const COMMENT_MARKER: char = ';';

/// Read access to the program's cells.
pub trait SourceGrid {
    /// Character at `pos`, or `None` for a cell with no source character.
    fn char_at(&self, pos: Position) -> Option<char>;

    /// Bounding box over all tiers combined.
    fn bounds(&self) -> Bounds;

    /// Tier ids that have source.
    fn tiers(&self) -> Vec<i64>;
}

/// Addressable grid of every loaded tier.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: HashMap<(i64, i64, i64), char>,
    bounds: Bounds,
    lines: BTreeMap<i64, Vec<String>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from `(tier id, source text)` pairs.
    pub fn from_tiers<'a>(tiers: impl IntoIterator<Item = (i64, &'a str)>) -> Self {
        let mut grid = Grid::new();
        for (tier, source) in tiers {
            grid.add_tier(tier, source);
        }
        grid
    }

    /// Add one tier's source.
    ///
    /// Rows end at `\n`, `\r` or `\r\n` and keep their line index even when
    /// a line is a comment. Every scanned column widens the bounds, including
    /// the column holding the line terminator or a column-0 comment marker;
    /// neither is stored.
    pub fn add_tier(&mut self, tier: i64, source: &str) {
        let mut raw_lines = Vec::new();
        for (row, (line, terminated)) in rows(source).into_iter().enumerate() {
            let row = row as i64;
            self.bounds.include(0, row);
            let mut width = 0;
            for (column, ch) in line.chars().enumerate() {
                let column = column as i64;
                self.bounds.include(column, row);
                if ch == COMMENT_MARKER && column == 0 {
                    break;
                }
                self.cells.insert((column, row, tier), ch);
                width = column + 1;
            }
            if terminated && width as usize == line.chars().count() {
                self.bounds.include(width, row);
            }
            raw_lines.push(line.to_string());
        }
        self.lines.insert(tier, raw_lines);
    }

    /// Source lines of `tier` without terminators, comments included.
    pub fn lines(&self, tier: i64) -> Option<&[String]> {
        self.lines.get(&tier).map(Vec::as_slice)
    }

    /// All tiers' source lines.
    pub fn all_lines(&self) -> &BTreeMap<i64, Vec<String>> {
        &self.lines
    }

    pub fn has_tier(&self, tier: i64) -> bool {
        self.lines.contains_key(&tier)
    }
}

/// Split `source` into rows, each paired with whether a terminator ended it.
fn rows(source: &str) -> Vec<(&str, bool)> {
    let mut rows = Vec::new();
    let mut rest = source;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(end) => {
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rows.push((&rest[..end], true));
                rest = &rest[end + terminator..];
            }
            None => {
                rows.push((rest, false));
                break;
            }
        }
    }
    rows
}

impl SourceGrid for Grid {
    fn char_at(&self, pos: Position) -> Option<char> {
        self.cells.get(&(pos.column, pos.row, pos.tier)).copied()
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn tiers(&self) -> Vec<i64> {
        self.lines.keys().copied().collect()
    }
}
