//! Program counter, velocity and the wraparound box.

use std::fmt;

use serde::Serialize;

use super::error::CellLocation;

/// Direction of PC travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    North,
    South,
    #[default]
    East,
    West,
}

impl Velocity {
    /// Unit step as (column, row).
    pub fn delta(self) -> (i64, i64) {
        match self {
            Velocity::North => (0, -1),
            Velocity::South => (0, 1),
            Velocity::East => (1, 0),
            Velocity::West => (-1, 0),
        }
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dc, dr) = self.delta();
        write!(f, "{},{}", dc, dr)
    }
}

/// Inclusive upper bounds of the grid, shared by every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bounds {
    pub max_column: i64,
    pub max_row: i64,
}

impl Bounds {
    pub fn new(max_column: i64, max_row: i64) -> Self {
        Self { max_column, max_row }
    }

    /// Grow the box so it covers (column, row).
    pub fn include(&mut self, column: i64, row: i64) {
        self.max_column = self.max_column.max(column);
        self.max_row = self.max_row.max(row);
    }
}

/// Wrap `v` into `[0, max]`.
#[inline]
fn wrap(v: i64, max: i64) -> i64 {
    v.rem_euclid(max + 1)
}

/// The program counter: a cell coordinate in some tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub column: i64,
    pub row: i64,
    pub tier: i64,
}

impl Position {
    pub fn new(column: i64, row: i64, tier: i64) -> Self {
        Self { column, row, tier }
    }

    /// Move `steps` cells along `velocity` (negative steps move backwards),
    /// wrapping each axis independently into `bounds`.
    pub fn shift(&mut self, velocity: Velocity, steps: i64, bounds: Bounds) {
        let (dc, dr) = velocity.delta();
        self.column = wrap(self.column + dc * steps, bounds.max_column);
        self.row = wrap(self.row + dr * steps, bounds.max_row);
    }

    /// One step along `velocity`.
    #[inline]
    pub fn advance(&mut self, velocity: Velocity, bounds: Bounds) {
        self.shift(velocity, 1, bounds);
    }

    pub fn location(&self) -> CellLocation {
        CellLocation::new(self.tier, self.row, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.column, self.row, self.tier)
    }
}
