//! Core data model types.
//!
//! Every source adapter flattens its input into a `Vec<`[`Token`]`>`. A token is a raw value of
//! unknown type; whether it is usable as a number is decided later by
//! [`crate::classify::classify`].

use std::fmt;

/// One raw input value awaiting classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Missing/absent value (e.g. JSON `null`).
    Null,
    /// Integer value.
    Int(i64),
    /// Floating point value (may be non-finite when constructed directly).
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Raw text, exactly as it appeared in the source.
    Text(String),
    /// A structured value (object, array, ...) carried as its compact rendering.
    Composite(String),
}

impl Token {
    /// Short name of the token kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Null => "null",
            Token::Int(_) => "int",
            Token::Float(_) => "float",
            Token::Bool(_) => "bool",
            Token::Text(_) => "text",
            Token::Composite(_) => "composite",
        }
    }

    /// Returns `true` for [`Token::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Token::Null)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Null => f.write_str("null"),
            Token::Int(v) => write!(f, "{v}"),
            Token::Float(v) => write!(f, "{v}"),
            Token::Bool(v) => write!(f, "{v}"),
            Token::Text(s) => write!(f, "{s:?}"),
            Token::Composite(raw) => f.write_str(raw),
        }
    }
}

impl From<i64> for Token {
    fn from(v: i64) -> Self {
        Token::Int(v)
    }
}

impl From<i32> for Token {
    fn from(v: i32) -> Self {
        Token::Int(i64::from(v))
    }
}

impl From<u32> for Token {
    fn from(v: u32) -> Self {
        Token::Int(i64::from(v))
    }
}

impl From<f64> for Token {
    fn from(v: f64) -> Self {
        Token::Float(v)
    }
}

impl From<bool> for Token {
    fn from(v: bool) -> Self {
        Token::Bool(v)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Text(s.to_owned())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Text(s)
    }
}

impl<T: Into<Token>> From<Option<T>> for Token {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Token::Null)
    }
}

impl From<serde_json::Value> for Token {
    fn from(v: serde_json::Value) -> Self {
        Token::from(&v)
    }
}

impl From<&serde_json::Value> for Token {
    /// Converts a single JSON value without flattening; arrays and objects become
    /// [`Token::Composite`].
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Token::Null,
            serde_json::Value::Bool(b) => Token::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Token::Int(i),
                // u64 beyond i64::MAX and all non-integers.
                None => n.as_f64().map(Token::Float).unwrap_or(Token::Null),
            },
            serde_json::Value::String(s) => Token::Text(s.clone()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Token::Composite(v.to_string()),
        }
    }
}
