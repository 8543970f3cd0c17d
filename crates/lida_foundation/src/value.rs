//! Attribute values exchanged between derivations and the sync engine.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value of one cached attribute.
///
/// Derivations compute an `AttrValue`; the sync engine compares it against the
/// stored one and records an [`AttrChange`] when they differ.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttrValue {
    /// Text (canonical labels, markup, slugs, sort keys).
    Text(String),
    /// Signed integer (charges).
    Int(i64),
    /// Non-negative count (atoms, states, transitions).
    Count(u64),
    /// Floating point (masses, energies).
    Float(f64),
}

impl AttrValue {
    /// Returns the variant name, for type mismatch reports.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Count(_) => "count",
            Self::Float(_) => "float",
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a signed integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a count.
    #[must_use]
    pub const fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u64> for AttrValue {
    fn from(n: u64) -> Self {
        Self::Count(n)
    }
}

impl From<usize> for AttrValue {
    fn from(n: usize) -> Self {
        Self::Count(n as u64)
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// One attribute updated by a sync: `(attribute, old_value, new_value)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttrChange {
    /// Registered attribute name.
    pub attribute: &'static str,
    /// Value stored before the sync.
    pub old: AttrValue,
    /// Value computed by the sync.
    pub new: AttrValue,
}

impl AttrChange {
    /// Creates a change record.
    #[must_use]
    pub fn new(attribute: &'static str, old: AttrValue, new: AttrValue) -> Self {
        Self { attribute, old, new }
    }
}

impl fmt::Display for AttrChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "updated {}: {} -> {}", self.attribute, self.old, self.new)
    }
}
