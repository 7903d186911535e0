//! Value type for Tier: an integer, a float, or a piece of text.
//!
//! Operators are dispatched on the kinds of both operands. Every pair the
//! matrix below does not define is a type mismatch; nothing is coerced.
//!
//! | operator            | int ∘ int | any float | text ∘ text |
//! |---------------------|-----------|-----------|-------------|
//! | `+`                 | int       | float     | concatenate |
//! | `-` `*` `%` `\`     | int       | float     | error       |
//! | `/`                 | float     | float     | error       |
//! | `&` `|`             | int       | error     | error       |

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::error::{CellLocation, LiteralSource, TierError, TierResult};

/// A scalar held by ts or by a stack slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

/// The kind of a value, used in type errors and debugger output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "int"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Text => write!(f, "text"),
        }
    }
}

/// Binary stack operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    FloorDiv,
}

impl BinaryOp {
    /// The grid character of this operator.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Rem => '%',
            BinaryOp::BitAnd => '&',
            BinaryOp::BitOr => '|',
            BinaryOp::FloorDiv => '\\',
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::ZERO
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Floats always show a fractional part so `2.0` never prints as `2`.
/// Magnitudes below `1e-4` or from `1e16` up use exponent form (`1e+16`,
/// `1.5e-05`).
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        let s = if x > 0.0 { "inf" } else { "-inf" };
        return s.to_string();
    }
    if x != 0.0 {
        let scientific = format!("{:e}", x);
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            if !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
    }
    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Operand pair after numeric promotion.
enum Numeric {
    Ints(i64, i64),
    Floats(f64, f64),
}

impl Value {
    /// The value every unwritten slot reads as.
    pub const ZERO: Value = Value::Int(0);

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Zero, `0.0` and empty text are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// Numeric zero check used by `=`. Text is never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(i) => *i == 0,
            Value::Float(x) => *x == 0.0,
            Value::Text(_) => false,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            Value::Text(_) => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Parsing
    // ═══════════════════════════════════════════════════════════════════

    /// Parse a number literal: a float when it contains `.`, an integer otherwise.
    ///
    /// Surrounding whitespace is ignored; anything else that the integer or
    /// float grammar rejects (stray signs, a second `.`) yields `None`.
    pub fn parse_number(text: &str) -> Option<Value> {
        let trimmed = text.trim();
        if trimmed.contains('.') {
            trimmed.parse::<f64>().ok().map(Value::Float)
        } else {
            trimmed.parse::<i64>().ok().map(Value::Int)
        }
    }

    /// Parse a committed grid literal, reporting failures at `location`.
    pub fn parse_literal(text: &str, location: CellLocation) -> TierResult<Value> {
        Value::parse_number(text).ok_or_else(|| TierError::MalformedLiteral {
            text: text.to_string(),
            origin: LiteralSource::Grid,
            location: Some(location),
        })
    }

    /// Parse a line using the quoting convention shared by `}` and `--set-ts`.
    ///
    /// `'12'` and `'1.5'` are numbers; everything else, including text
    /// shorter than two characters, is taken verbatim as text.
    pub fn parse_quoted(text: &str, origin: LiteralSource) -> TierResult<Value> {
        if text.chars().count() < 2 {
            return Ok(Value::Text(text.to_string()));
        }
        match text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
            Some(inner) => Value::parse_number(inner).ok_or_else(|| TierError::MalformedLiteral {
                text: inner.to_string(),
                origin,
                location: None,
            }),
            None => Ok(Value::Text(text.to_string())),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Operators
    // ═══════════════════════════════════════════════════════════════════

    fn mismatch(op: char, left: &Value, right: &Value, location: CellLocation) -> TierError {
        TierError::TypeMismatch {
            operator: op,
            left: left.kind(),
            right: right.kind(),
            location,
        }
    }

    fn numeric(&self, rhs: &Value, op: char, location: CellLocation) -> TierResult<Numeric> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Numeric::Ints(*a, *b)),
            (Value::Text(_), _) | (_, Value::Text(_)) => Err(Value::mismatch(op, self, rhs, location)),
            _ => match (self.as_f64(), rhs.as_f64()) {
                (Some(a), Some(b)) => Ok(Numeric::Floats(a, b)),
                _ => Err(Value::mismatch(op, self, rhs, location)),
            },
        }
    }

    /// Apply `op` with `self` as the left operand.
    pub fn apply(&self, op: BinaryOp, rhs: &Value, location: CellLocation) -> TierResult<Value> {
        let sym = op.symbol();
        let overflow = || TierError::Overflow { operator: sym, location };
        let by_zero = || TierError::DivisionByZero { operator: sym, location };

        match op {
            BinaryOp::Add => {
                if let (Value::Text(a), Value::Text(b)) = (self, rhs) {
                    return Ok(Value::Text(format!("{}{}", a, b)));
                }
                match self.numeric(rhs, sym, location)? {
                    Numeric::Ints(a, b) => a.checked_add(b).map(Value::Int).ok_or_else(overflow),
                    Numeric::Floats(a, b) => Ok(Value::Float(a + b)),
                }
            }
            BinaryOp::Sub => match self.numeric(rhs, sym, location)? {
                Numeric::Ints(a, b) => a.checked_sub(b).map(Value::Int).ok_or_else(overflow),
                Numeric::Floats(a, b) => Ok(Value::Float(a - b)),
            },
            BinaryOp::Mul => match self.numeric(rhs, sym, location)? {
                Numeric::Ints(a, b) => a.checked_mul(b).map(Value::Int).ok_or_else(overflow),
                Numeric::Floats(a, b) => Ok(Value::Float(a * b)),
            },
            BinaryOp::Div => {
                let (a, b) = match self.numeric(rhs, sym, location)? {
                    Numeric::Ints(a, b) => (a as f64, b as f64),
                    Numeric::Floats(a, b) => (a, b),
                };
                if b == 0.0 {
                    return Err(by_zero());
                }
                Ok(Value::Float(a / b))
            }
            BinaryOp::Rem => match self.numeric(rhs, sym, location)? {
                Numeric::Ints(_, 0) => Err(by_zero()),
                Numeric::Ints(a, b) => {
                    let r = a.checked_rem(b).ok_or_else(overflow)?;
                    Ok(Value::Int(if r != 0 && (r < 0) != (b < 0) { r + b } else { r }))
                }
                Numeric::Floats(_, b) if b == 0.0 => Err(by_zero()),
                Numeric::Floats(a, b) => {
                    let r = a % b;
                    Ok(Value::Float(if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }))
                }
            },
            BinaryOp::FloorDiv => match self.numeric(rhs, sym, location)? {
                Numeric::Ints(_, 0) => Err(by_zero()),
                Numeric::Ints(a, b) => {
                    let q = a.checked_div(b).ok_or_else(overflow)?;
                    Ok(Value::Int(if a % b != 0 && (a < 0) != (b < 0) { q - 1 } else { q }))
                }
                Numeric::Floats(_, b) if b == 0.0 => Err(by_zero()),
                Numeric::Floats(a, b) => Ok(Value::Float((a / b).floor())),
            },
            BinaryOp::BitAnd => match (self, rhs) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a & b)),
                _ => Err(Value::mismatch(sym, self, rhs, location)),
            },
            BinaryOp::BitOr => match (self, rhs) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a | b)),
                _ => Err(Value::mismatch(sym, self, rhs, location)),
            },
        }
    }

    /// `self > rhs` for the `?` instruction.
    ///
    /// Numbers compare numerically and text lexicographically; mixing the two
    /// is a type mismatch.
    pub fn greater_than(&self, rhs: &Value, location: CellLocation) -> TierResult<bool> {
        let ordering = match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Text(_), _) | (_, Value::Text(_)) => {
                return Err(Value::mismatch('?', self, rhs, location));
            }
            _ => match (self.as_f64(), rhs.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        };
        // NaN compares false, as it does everywhere else.
        Ok(ordering == Some(Ordering::Greater))
    }
}
