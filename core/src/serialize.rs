//! Route table encoding and decoding.
//!
//! Tables persist as plain nested maps in either JSON (universally
//! readable) or RON (Rust-literal notation, convenient when the artifact
//! is consumed as source-adjacent data). Format selection is by explicit
//! request or inferred from a file extension; `Auto` exists only as the
//! inference placeholder and is never encodable itself.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{MapError, RouteTable};

// ═══════════════════════════════════════════════════════════════════════════════
// Format
// ═══════════════════════════════════════════════════════════════════════════════

/// A route table container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Infer the format from the output file extension.
    Auto,
    /// JSON.
    Json,
    /// Rusty Object Notation.
    Ron,
}

impl Format {
    /// Infers a format from a path's extension.
    pub fn from_extension(path: &Path) -> Result<Self, MapError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| MapError::UnknownExtension {
                path: path.display().to_string(),
            })?;
        match ext {
            "json" => Ok(Self::Json),
            "ron" => Ok(Self::Ron),
            _ => Err(MapError::UnknownExtension {
                path: path.display().to_string(),
            }),
        }
    }

    /// Canonical file extension, without the dot. `None` for `Auto`.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Auto => None,
            Self::Json => Some("json"),
            Self::Ron => Some("ron"),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Json => f.write_str("json"),
            Self::Ron => f.write_str("ron"),
        }
    }
}

impl FromStr for Format {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "ron" => Ok(Self::Ron),
            // "auto" is deliberately not accepted: explicit selection of
            // the inference placeholder is a configuration error.
            _ => Err(MapError::InvalidFormat),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Encode / decode
// ═══════════════════════════════════════════════════════════════════════════════

/// Encodes a table in the given concrete format.
pub fn encode(table: &RouteTable, format: Format) -> Result<String, MapError> {
    match format {
        Format::Auto => Err(MapError::InvalidFormat),
        Format::Json => serde_json::to_string_pretty(table).map_err(|e| MapError::Encoding {
            format,
            source: e.to_string(),
        }),
        Format::Ron => {
            let config = ron::ser::PrettyConfig::new();
            ron::ser::to_string_pretty(table, config).map_err(|e| MapError::Encoding {
                format,
                source: e.to_string(),
            })
        }
    }
}

/// Decodes a table from the given concrete format.
pub fn decode(text: &str, format: Format) -> Result<RouteTable, MapError> {
    match format {
        Format::Auto => Err(MapError::InvalidFormat),
        Format::Json => serde_json::from_str(text).map_err(|e| MapError::Encoding {
            format,
            source: e.to_string(),
        }),
        Format::Ron => ron::from_str(text).map_err(|e| MapError::Encoding {
            format,
            source: e.to_string(),
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
