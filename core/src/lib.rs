//! atlas - static route discovery and hierarchical pattern dispatch
//!
//! Two decoupled runtime phases share one artifact, the [`RouteTable`]:
//!
//! - **Build phase** — [`MapGenerator`] walks a source tree, resolves each
//!   candidate file against a [`UnitRegistry`] of registered handler
//!   descriptors, classifies and filters the survivors, and produces a
//!   nested route table (optionally persisted via [`serialize`]).
//! - **Lookup phase** — [`RouteMapper`] loads a table and resolves an input
//!   string to a handler identifier plus named regex captures, with
//!   consume-once filter narrowing.
//!
//! The phases never execute in the same call graph; the serialized table is
//! the only coupling between them.
//!
//! # Key Design Insights
//!
//! 1. **Registration over reflection**: candidate units are not loaded and
//!    introspected at build time. Each unit contributes a trivially
//!    constructible [`UnitDescriptor`] to an immutable [`UnitRegistry`];
//!    the directory scan only decides which registered descriptors are in
//!    play for this build.
//!
//! 2. **Insertion order is the precedence order**: [`RouteTable`] preserves
//!    insertion order exactly, and the mapper commits to the first pattern
//!    that matches at each level. Callers control precedence entirely
//!    through the order in which entries were produced.
//!
//! 3. **No-match is not an error**: [`RouteMapper::search`] returns
//!    `Option<RouteMatch>`; all fatal conditions surface at construction
//!    or build time as [`MapError`].
//!
//! # Example
//!
//! ```
//! use atlas::prelude::*;
//!
//! let mut table = RouteTable::new();
//! table.insert(r"user/profile/(?P<id>\d+)", RouteNode::leaf("ProfileHandler"));
//! table.insert("user/me", RouteNode::leaf("MeHandler"));
//!
//! let mut mapper = RouteMapper::from_table(table);
//! let hit = mapper.search("user/profile/42").unwrap();
//! assert_eq!(hit.handler, "ProfileHandler");
//! assert_eq!(hit.params["id"], "42");
//! assert!(mapper.search("user/other").is_none());
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod generator;
mod key_value;
mod mapper;
mod registry;
mod route_table;
mod scan;
pub mod serialize;
mod unit;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use generator::MapGenerator;
pub use key_value::KeyValue;
pub use mapper::{RouteMapper, RouteMatch};
pub use registry::{UnitRegistry, UnitRegistryBuilder};
pub use route_table::{RouteNode, RouteTable, GENERATED_KEY};
pub use scan::{unit_name, UNIT_SUFFIX};
pub use serialize::Format;
pub use unit::UnitDescriptor;

/// Prelude module for convenient imports.
///
/// ```
/// use atlas::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Format, KeyValue, MapError, MapGenerator, RouteMapper, RouteMatch, RouteNode, RouteTable,
        UnitDescriptor, UnitRegistry, UnitRegistryBuilder, GENERATED_KEY,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from map generation, serialization, and mapper construction.
///
/// Configuration errors are detected eagerly, before any filesystem work.
/// A [`Collision`](Self::Collision) aborts the entire build — no partial
/// table is returned and no output file is written. The absence of a match
/// during lookup is `Option::None`, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A required builder setting was not provided before `generate()`.
    MissingSetting {
        /// The setter that must be called (`"path"` or `"route_method"`).
        setting: &'static str,
    },
    /// An output format that cannot be selected explicitly (i.e. `Auto`).
    InvalidFormat,
    /// `format()` was called after `output_file()`.
    FormatAfterOutputFile,
    /// The output or map file extension maps to no known format.
    UnknownExtension {
        /// The offending path.
        path: String,
    },
    /// An explicitly selected format conflicts with the output file extension.
    FormatExtensionMismatch {
        /// The explicitly configured format.
        format: Format,
        /// The extension found on the output path.
        extension: String,
    },
    /// A configured accessor name is not exposed by a surviving unit.
    UnknownAccessor {
        /// Qualified name of the unit.
        unit: String,
        /// The accessor that was requested.
        accessor: String,
    },
    /// The mapper was given neither a usable table nor a decodable file.
    InvalidSource {
        /// The path that failed to load or decode.
        path: String,
        /// The underlying error message.
        source: String,
    },
    /// Encoding or decoding a route table failed.
    Encoding {
        /// The format being encoded or decoded.
        format: Format,
        /// The underlying error message.
        source: String,
    },
    /// A filesystem operation failed.
    Io {
        /// The path involved.
        path: String,
        /// The underlying error message.
        source: String,
    },
    /// Two units produced the same terminal key at the same nesting path.
    Collision {
        /// The colliding key.
        key: String,
        /// The handler already registered under the key.
        existing: String,
        /// The handler that attempted to claim the key.
        incoming: String,
    },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSetting { setting } => {
                write!(f, "call {setting}() before generate()")
            }
            Self::InvalidFormat => {
                write!(f, "\"auto\" is an inference placeholder, not a selectable format")
            }
            Self::FormatAfterOutputFile => {
                write!(f, "call format() before output_file()")
            }
            Self::UnknownExtension { path } => {
                write!(f, "cannot determine a format from the extension of \"{path}\"")
            }
            Self::FormatExtensionMismatch { format, extension } => {
                write!(
                    f,
                    "output extension \".{extension}\" does not match configured format \"{format}\""
                )
            }
            Self::UnknownAccessor { unit, accessor } => {
                write!(f, "unit \"{unit}\" exposes no accessor \"{accessor}\"")
            }
            Self::InvalidSource { path, source } => {
                write!(f, "\"{path}\" is not a loadable route table: {source}")
            }
            Self::Encoding { format, source } => {
                write!(f, "{format} encoding failed: {source}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error on \"{path}\": {source}")
            }
            Self::Collision { key, existing, incoming } => {
                write!(
                    f,
                    "\"{existing}\" is already handling \"{key}\" (conflicting unit: \"{incoming}\")"
                )
            }
        }
    }
}

impl std::error::Error for MapError {}
