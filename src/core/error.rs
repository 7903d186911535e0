//! Error types for the Tier interpreter.
//!
//! Every failure is fatal: the engine never retries or recovers, it stops the
//! run and hands the error back to the caller.
//!
//! # Error Categories
//!
//! - **Config**: the program directory cannot be turned into a grid
//! - **Parse**: a literal, input line or jump address does not parse
//! - **Runtime**: unknown instructions, arithmetic faults, exhausted input
//! - **Type**: an operator applied to operand kinds it does not define
//! - **IO**: standard streams or the debugger terminal failed

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::value::ValueKind;

/// Grid cell where an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellLocation {
    pub tier: i64,
    pub row: i64,
    pub column: i64,
}

impl CellLocation {
    pub fn new(tier: i64, row: i64, column: i64) -> Self {
        Self { tier, row, column }
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.tier:{}:{}", self.tier, self.row, self.column)
    }
}

/// What kind of text failed to parse as a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralSource {
    /// A `'...'` number literal in the grid.
    Grid,
    /// A quoted line read by the input instruction.
    Input,
    /// The configured initial value of ts.
    InitialTs,
}

impl fmt::Display for LiteralSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralSource::Grid => write!(f, "number literal"),
            LiteralSource::Input => write!(f, "input"),
            LiteralSource::InitialTs => write!(f, "initial ts"),
        }
    }
}

/// Comprehensive error type for Tier.
#[derive(Debug, Error)]
pub enum TierError {
    // ═══════════════════════════════════════════════════════════════════
    // Config Errors
    // ═══════════════════════════════════════════════════════════════════

    /// The program directory has no `0.tier` entry point.
    #[error("no entry point in {}: add a 0.tier file to this directory", .directory.display())]
    MissingEntryPoint { directory: PathBuf },

    /// The program directory could not be listed.
    #[error("cannot read program directory {}: {source}", .path.display())]
    ProgramDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A tier file could not be read.
    #[error("cannot read tier file {}: {source}", .path.display())]
    TierFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Parse Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A literal could not be parsed as an integer or float.
    #[error("{}malformed {origin}: '{text}'", location_prefix(.location))]
    MalformedLiteral {
        text: String,
        origin: LiteralSource,
        location: Option<CellLocation>,
    },

    /// The accumulated jump address is not an integer tier id.
    #[error("[{location}] malformed jump address: '{address}'")]
    MalformedJumpAddress {
        address: String,
        location: CellLocation,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Runtime Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A non-inert character has no instruction.
    #[error("[{location}] unknown instruction '{character}'")]
    UnknownInstruction {
        character: char,
        location: CellLocation,
    },

    /// Division, floored division or modulo by zero.
    #[error("[{location}] division by zero in '{operator}'")]
    DivisionByZero {
        operator: char,
        location: CellLocation,
    },

    /// Integer arithmetic left the 64-bit range.
    #[error("[{location}] integer overflow in '{operator}'")]
    Overflow {
        operator: char,
        location: CellLocation,
    },

    /// The input instruction reached end of input.
    #[error("[{location}] input exhausted")]
    InputExhausted { location: CellLocation },

    /// The configured tick budget was used up.
    #[error("[{location}] tick limit exceeded: {limit} ticks")]
    TickLimitExceeded { limit: u64, location: CellLocation },

    // ═══════════════════════════════════════════════════════════════════
    // Type Errors
    // ═══════════════════════════════════════════════════════════════════

    /// An operator was applied to operand kinds it does not define.
    #[error("[{location}] type mismatch: '{operator}' is not defined for {left} and {right}")]
    TypeMismatch {
        operator: char,
        left: ValueKind,
        right: ValueKind,
        location: CellLocation,
    },

    // ═══════════════════════════════════════════════════════════════════
    // I/O Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Standard stream or terminal failure.
    #[error("I/O error during {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: io::Error,
    },
}

fn location_prefix(location: &Option<CellLocation>) -> String {
    match location {
        Some(loc) => format!("[{}] ", loc),
        None => String::new(),
    }
}

impl TierError {
    /// Wrap an I/O error with the operation that produced it.
    pub fn io(operation: &'static str, source: io::Error) -> Self {
        TierError::Io { operation, source }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TierError::MissingEntryPoint { .. }
            | TierError::ProgramDirectory { .. }
            | TierError::TierFile { .. } => ErrorCategory::Config,

            TierError::MalformedLiteral { .. } | TierError::MalformedJumpAddress { .. } => {
                ErrorCategory::Parse
            }

            TierError::UnknownInstruction { .. }
            | TierError::DivisionByZero { .. }
            | TierError::Overflow { .. }
            | TierError::InputExhausted { .. }
            | TierError::TickLimitExceeded { .. } => ErrorCategory::Runtime,

            TierError::TypeMismatch { .. } => ErrorCategory::Type,

            TierError::Io { .. } => ErrorCategory::IO,
        }
    }

    /// Get the error code for programmatic handling.
    pub fn code(&self) -> u32 {
        match self {
            // Config: 1000-1999
            TierError::MissingEntryPoint { .. } => 1001,
            TierError::ProgramDirectory { .. } => 1002,
            TierError::TierFile { .. } => 1003,

            // Parse: 2000-2999
            TierError::MalformedLiteral { .. } => 2001,
            TierError::MalformedJumpAddress { .. } => 2002,

            // Runtime: 3000-3999
            TierError::UnknownInstruction { .. } => 3001,
            TierError::DivisionByZero { .. } => 3002,
            TierError::Overflow { .. } => 3003,
            TierError::InputExhausted { .. } => 3004,
            TierError::TickLimitExceeded { .. } => 3005,

            // Type: 4000-4999
            TierError::TypeMismatch { .. } => 4001,

            // I/O: 7000-7999
            TierError::Io { .. } => 7001,
        }
    }

    /// Get the grid location if the error was raised by the engine.
    pub fn location(&self) -> Option<&CellLocation> {
        match self {
            TierError::MalformedLiteral { location, .. } => location.as_ref(),

            TierError::MalformedJumpAddress { location, .. }
            | TierError::UnknownInstruction { location, .. }
            | TierError::DivisionByZero { location, .. }
            | TierError::Overflow { location, .. }
            | TierError::InputExhausted { location }
            | TierError::TickLimitExceeded { location, .. }
            | TierError::TypeMismatch { location, .. } => Some(location),

            TierError::MissingEntryPoint { .. }
            | TierError::ProgramDirectory { .. }
            | TierError::TierFile { .. }
            | TierError::Io { .. } => None,
        }
    }
}

/// Error category for filtering and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Parse,
    Runtime,
    Type,
    IO,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Runtime => write!(f, "runtime"),
            ErrorCategory::Type => write!(f, "type"),
            ErrorCategory::IO => write!(f, "io"),
        }
    }
}

/// Result type alias for Tier operations.
pub type TierResult<T> = Result<T, TierError>;
