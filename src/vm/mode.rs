//! The mode state machine.
//!
//! [`Mode::resolve`] is the single transition function: given the current mode
//! and the character under the PC it yields the next mode and the [`Action`]
//! the engine has to carry out. Literal and address buffers live inside the
//! mode that owns them, so leaving a mode always drains its buffer.

use std::fmt;

use serde::Serialize;

use super::instruction::{is_inert, Instruction, NUMBER_DELIMITER, SIGN, STRING_DELIMITER};

/// Engine mode together with its buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    ReadingNumber { digits: String },
    ReadingString { text: String },
    Jumping { address: String },
}

/// Mode without its buffer, for snapshots and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Normal,
    ReadingNumber,
    ReadingString,
    Jumping,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::Normal => write!(f, "normal"),
            ModeKind::ReadingNumber => write!(f, "reading number"),
            ModeKind::ReadingString => write!(f, "reading string"),
            ModeKind::Jumping => write!(f, "jumping"),
        }
    }
}

/// What the engine must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the usual PC advance.
    Continue,
    /// Run an instruction from the table.
    Execute(Instruction),
    /// Store a finished number literal at sp.
    CommitNumber(String),
    /// Store a finished string literal at sp.
    CommitText(String),
    /// Finish a jump; the PC does not advance this tick.
    Relocate(String),
    /// A non-inert character with no instruction.
    Unknown(char),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Normal => ModeKind::Normal,
            Mode::ReadingNumber { .. } => ModeKind::ReadingNumber,
            Mode::ReadingString { .. } => ModeKind::ReadingString,
            Mode::Jumping { .. } => ModeKind::Jumping,
        }
    }

    /// Contents of the active buffer, empty in normal mode.
    pub fn buffer(&self) -> &str {
        match self {
            Mode::Normal => "",
            Mode::ReadingNumber { digits } => digits,
            Mode::ReadingString { text } => text,
            Mode::Jumping { address } => address,
        }
    }

    /// Transition on the character under the PC (`None` for an empty cell).
    ///
    /// Empty cells add nothing to literal buffers and end a jump address.
    pub fn resolve(self, cell: Option<char>) -> (Mode, Action) {
        match self {
            Mode::Normal => resolve_normal(cell),

            Mode::ReadingNumber { mut digits } => match cell {
                Some(NUMBER_DELIMITER) => (Mode::Normal, Action::CommitNumber(digits)),
                Some(ch) => {
                    digits.push(ch);
                    (Mode::ReadingNumber { digits }, Action::Continue)
                }
                None => (Mode::ReadingNumber { digits }, Action::Continue),
            },

            Mode::ReadingString { mut text } => match cell {
                Some(STRING_DELIMITER) => (Mode::Normal, Action::CommitText(text)),
                Some(ch) => {
                    text.push(ch);
                    (Mode::ReadingString { text }, Action::Continue)
                }
                None => (Mode::ReadingString { text }, Action::Continue),
            },

            Mode::Jumping { mut address } => match cell {
                Some(ch) if extends_address(ch) => {
                    address.push(ch);
                    (Mode::Jumping { address }, Action::Continue)
                }
                _ => (Mode::Normal, Action::Relocate(address)),
            },
        }
    }
}

fn resolve_normal(cell: Option<char>) -> (Mode, Action) {
    let ch = match cell {
        Some(ch) if !is_inert(ch) => ch,
        _ => return (Mode::Normal, Action::Continue),
    };
    match Instruction::decode(ch) {
        Some(Instruction::NumberLiteral) => (
            Mode::ReadingNumber { digits: String::new() },
            Action::Continue,
        ),
        Some(Instruction::StringLiteral) => (
            Mode::ReadingString { text: String::new() },
            Action::Continue,
        ),
        Some(Instruction::Jump) => (
            Mode::Jumping { address: String::new() },
            Action::Continue,
        ),
        Some(instr) => (Mode::Normal, Action::Execute(instr)),
        None => (Mode::Normal, Action::Unknown(ch)),
    }
}

/// Whether `ch` belongs to a jump address rather than terminating it.
///
/// Anything that is not an instruction extends the address, and so does the
/// sign; blanks and the decimal point terminate it.
fn extends_address(ch: char) -> bool {
    (Instruction::decode(ch).is_none() || ch == SIGN) && !matches!(ch, ' ' | '.')
}
