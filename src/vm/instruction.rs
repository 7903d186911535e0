//! The instruction table: which character does what.

use crate::core::{BinaryOp, Velocity};

/// Delimiter of number literals.
pub const NUMBER_DELIMITER: char = '\'';
/// Delimiter of string literals.
pub const STRING_DELIMITER: char = '"';
/// Starts a jump.
pub const JUMP_MARKER: char = '@';
/// Allowed inside a jump address so negative tiers can be addressed.
pub const SIGN: char = '-';
/// The grid's placeholder for an intentionally empty cell.
pub const EMPTY_MARKER: char = '£';

/// One grid instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `^ _ > <`
    Face(Velocity),
    /// `@`
    Jump,
    /// `[`
    IncrementPointer,
    /// `]`
    DecrementPointer,
    /// `~`: push ts, then clear it.
    PushTemp,
    /// `(`: ts = stack[sp].
    LoadTemp,
    /// `)`: stack[sp] = ts.
    StoreTemp,
    /// `#`
    Halt,
    /// `{`
    Print,
    /// `}`
    Input,
    /// `+ - * / % & | \`
    Binary(BinaryOp),
    /// `?`: skip the next cell if stack[sp] > stack[sp-1].
    SkipIfGreater,
    /// `=`: skip the next cell if stack[sp] is zero.
    SkipIfZero,
    /// `!`
    Not,
    /// `` ` ``
    RandomBit,
    /// `:`
    PopShift,
    /// `$`
    PopTop,
    /// `'`
    NumberLiteral,
    /// `"`
    StringLiteral,
    /// `,`: ts = sp.
    PointerToTemp,
}

impl Instruction {
    /// Look up the instruction for `ch`.
    pub fn decode(ch: char) -> Option<Instruction> {
        let instr = match ch {
            '^' => Instruction::Face(Velocity::North),
            '_' => Instruction::Face(Velocity::South),
            '>' => Instruction::Face(Velocity::East),
            '<' => Instruction::Face(Velocity::West),
            JUMP_MARKER => Instruction::Jump,
            '[' => Instruction::IncrementPointer,
            ']' => Instruction::DecrementPointer,
            '~' => Instruction::PushTemp,
            '(' => Instruction::LoadTemp,
            ')' => Instruction::StoreTemp,
            '#' => Instruction::Halt,
            '{' => Instruction::Print,
            '}' => Instruction::Input,
            '+' => Instruction::Binary(BinaryOp::Add),
            '-' => Instruction::Binary(BinaryOp::Sub),
            '*' => Instruction::Binary(BinaryOp::Mul),
            '/' => Instruction::Binary(BinaryOp::Div),
            '%' => Instruction::Binary(BinaryOp::Rem),
            '&' => Instruction::Binary(BinaryOp::BitAnd),
            '|' => Instruction::Binary(BinaryOp::BitOr),
            '\\' => Instruction::Binary(BinaryOp::FloorDiv),
            '?' => Instruction::SkipIfGreater,
            '=' => Instruction::SkipIfZero,
            '!' => Instruction::Not,
            '`' => Instruction::RandomBit,
            ':' => Instruction::PopShift,
            '$' => Instruction::PopTop,
            NUMBER_DELIMITER => Instruction::NumberLiteral,
            STRING_DELIMITER => Instruction::StringLiteral,
            ',' => Instruction::PointerToTemp,
            _ => return None,
        };
        Some(instr)
    }

    /// The grid character of this instruction.
    pub fn symbol(self) -> char {
        match self {
            Instruction::Face(Velocity::North) => '^',
            Instruction::Face(Velocity::South) => '_',
            Instruction::Face(Velocity::East) => '>',
            Instruction::Face(Velocity::West) => '<',
            Instruction::Jump => JUMP_MARKER,
            Instruction::IncrementPointer => '[',
            Instruction::DecrementPointer => ']',
            Instruction::PushTemp => '~',
            Instruction::LoadTemp => '(',
            Instruction::StoreTemp => ')',
            Instruction::Halt => '#',
            Instruction::Print => '{',
            Instruction::Input => '}',
            Instruction::Binary(op) => op.symbol(),
            Instruction::SkipIfGreater => '?',
            Instruction::SkipIfZero => '=',
            Instruction::Not => '!',
            Instruction::RandomBit => '`',
            Instruction::PopShift => ':',
            Instruction::PopTop => '$',
            Instruction::NumberLiteral => NUMBER_DELIMITER,
            Instruction::StringLiteral => STRING_DELIMITER,
            Instruction::PointerToTemp => ',',
        }
    }
}

/// Characters that do nothing in normal traversal.
///
/// ASCII letters and digits, the decimal point, the comment marker, a space
/// and the empty-cell marker.
pub fn is_inert(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | ';' | ' ' | EMPTY_MARKER)
}
