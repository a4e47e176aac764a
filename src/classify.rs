//! Token classification.
//!
//! [`classify`] is total: every [`Token`] resolves to either [`Classified::Valid`] with a finite
//! value or [`Classified::Invalid`] with the reason it was rejected.

use std::fmt;

use crate::types::Token;

/// Why a token was not usable as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The token was absent/null.
    Null,
    /// The token kind is never numeric (booleans, composite values).
    UnsupportedType(&'static str),
    /// Text that is empty or whitespace only.
    Empty,
    /// Text that is not a decimal number literal.
    NotANumber,
    /// NaN or infinite values (including literals that overflow `f64`).
    NonFinite,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Null => f.write_str("missing value"),
            InvalidReason::UnsupportedType(kind) => write!(f, "unsupported type '{kind}'"),
            InvalidReason::Empty => f.write_str("empty text"),
            InvalidReason::NotANumber => f.write_str("not a number"),
            InvalidReason::NonFinite => f.write_str("not a finite number"),
        }
    }
}

/// Result of classifying one token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    /// A usable, finite number.
    Valid(f64),
    /// The token could not be interpreted as a number.
    Invalid(InvalidReason),
}

impl Classified {
    /// The numeric value, if valid.
    pub fn value(&self) -> Option<f64> {
        match self {
            Classified::Valid(v) => Some(*v),
            Classified::Invalid(_) => None,
        }
    }

    /// Returns `true` for [`Classified::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Classified::Valid(_))
    }
}

/// Classify a single token.
///
/// Rules:
///
/// - `Null`, `Bool` and `Composite` are always invalid.
/// - `Int` converts to `f64`; `Float` is accepted when finite.
/// - `Text` is trimmed, then parsed as a decimal literal (optional sign, fraction and exponent).
///   Thousands separators, decimal commas and surrounding text are rejected, as are `inf`/`NaN`.
pub fn classify(token: &Token) -> Classified {
    match token {
        Token::Null => Classified::Invalid(InvalidReason::Null),
        Token::Bool(_) | Token::Composite(_) => {
            Classified::Invalid(InvalidReason::UnsupportedType(token.kind()))
        }
        Token::Int(v) => Classified::Valid(*v as f64),
        Token::Float(v) => finite(*v),
        Token::Text(raw) => classify_text(raw),
    }
}

fn classify_text(raw: &str) -> Classified {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Classified::Invalid(InvalidReason::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(v) => finite(v),
        Err(_) => Classified::Invalid(InvalidReason::NotANumber),
    }
}

fn finite(v: f64) -> Classified {
    if v.is_finite() {
        Classified::Valid(v)
    } else {
        Classified::Invalid(InvalidReason::NonFinite)
    }
}
