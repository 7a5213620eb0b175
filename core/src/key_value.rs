//! Type-erased unit property values.
//!
//! Accessors on a [`UnitDescriptor`](crate::UnitDescriptor) return a
//! [`KeyValue`] so that the generator can treat route keys, category keys,
//! and filter values uniformly regardless of their source type. Comparison
//! and key-coercion follow loose scripting-language conventions: values of
//! different shapes compare by content where a sensible conversion exists.

// ═══════════════════════════════════════════════════════════════════════════════
// KeyValue
// ═══════════════════════════════════════════════════════════════════════════════

/// A dynamically typed value produced by a unit accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    /// Absence of a value.
    None,
    /// String data.
    String(String),
    /// Integer data.
    Int(i64),
    /// Boolean data.
    Bool(bool),
    /// An ordered list of values (route alternates, mostly).
    List(Vec<KeyValue>),
}

impl KeyValue {
    /// Coerces the value to a map-key string.
    ///
    /// Scalars render by content; `None` and `false` coerce to the strings
    /// a loosely typed runtime would produce (`""`). Lists have no single
    /// key and must be expanded with [`into_keys`](Self::into_keys) first.
    pub fn coerce_key(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Bool(true) => "1".to_owned(),
            Self::Bool(false) => String::new(),
            Self::List(_) => String::new(),
        }
    }

    /// Expands the value into the list of map keys it denotes.
    ///
    /// A scalar yields exactly one key; a list yields one key per element
    /// in order. Used for route values, where a unit may claim several
    /// route patterns at once.
    pub fn into_keys(self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().map(KeyValue::coerce_key).collect(),
            other => vec![other.coerce_key()],
        }
    }

    /// Whether the value is "truthy" under loose comparison rules.
    ///
    /// Empty string, `"0"`, zero, `false`, `None`, and the empty list are
    /// all falsy; everything else is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::String(s) => !s.is_empty() && s != "0",
            Self::Int(i) => *i != 0,
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Loose equality between two values.
    ///
    /// Same-shape values compare structurally. An integer and a string
    /// compare numerically when the string parses as an integer. A boolean
    /// compares against the other side's truthiness, and `None` equals any
    /// falsy value. Lists compare elementwise under the same rules.
    pub fn loose_eq(&self, other: &KeyValue) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(i), Self::String(s)) | (Self::String(s), Self::Int(i)) => {
                s.trim().parse::<i64>().map_or(false, |parsed| parsed == *i)
            }
            (Self::Bool(b), other) | (other, Self::Bool(b)) => *b == other.truthy(),
            (Self::None, other) | (other, Self::None) => !other.truthy(),
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            _ => false,
        }
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for KeyValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for KeyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<KeyValue>> From<Vec<T>> for KeyValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
