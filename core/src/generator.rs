//! Route map generation.
//!
//! [`MapGenerator`] is a consume-self builder over one build: configure the
//! scan root, name derivation, classification, and output, then call
//! [`generate`](MapGenerator::generate) once. Configuration mistakes are
//! reported before any filesystem work; a key collision aborts the whole
//! build with both claimants named, rather than letting one silently win.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, trace};

use crate::route_table::{RouteNode, RouteTable, GENERATED_KEY};
use crate::scan::{scan, unit_name};
use crate::serialize::{encode, Format};
use crate::{KeyValue, MapError, UnitDescriptor, UnitRegistry};

/// Pluggable output sink, for tests and dry runs. Defaults to
/// [`std::fs::write`].
type OutputWriter = Box<dyn Fn(&Path, &str) -> io::Result<()>>;

struct Output {
    path: PathBuf,
    writer: OutputWriter,
}

// ═══════════════════════════════════════════════════════════════════════════════
// MapGenerator
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for one route table build.
pub struct MapGenerator<'r> {
    registry: &'r UnitRegistry,
    path: Option<PathBuf>,
    namespace: String,
    interface: Option<String>,
    route_method: Option<String>,
    categories: Vec<String>,
    filters: Vec<(String, KeyValue)>,
    format: Format,
    output: Option<Output>,
}

impl<'r> MapGenerator<'r> {
    /// Creates a generator resolving unit names against `registry`.
    pub fn new(registry: &'r UnitRegistry) -> Self {
        Self {
            registry,
            path: None,
            namespace: String::new(),
            interface: None,
            route_method: None,
            categories: Vec::new(),
            filters: Vec::new(),
            format: Format::Auto,
            output: None,
        }
    }

    /// Sets the scan root. Required.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the namespace prepended to derived unit names.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Restricts the build to units declaring this capability.
    #[must_use]
    pub fn interface(mut self, capability: impl Into<String>) -> Self {
        self.interface = Some(capability.into());
        self
    }

    /// Sets the accessor whose value supplies each unit's route key(s).
    /// Required.
    #[must_use]
    pub fn route_method(mut self, accessor: impl Into<String>) -> Self {
        self.route_method = Some(accessor.into());
        self
    }

    /// Adds a category accessor. Each category introduces one nesting
    /// level in the output, in the order added.
    #[must_use]
    pub fn category(mut self, accessor: impl Into<String>) -> Self {
        self.categories.push(accessor.into());
        self
    }

    /// Adds a filter: only units whose `accessor` value loosely equals
    /// `expected` are included. Filters are conjunctive.
    #[must_use]
    pub fn filter(mut self, accessor: impl Into<String>, expected: impl Into<KeyValue>) -> Self {
        self.filters.push((accessor.into(), expected.into()));
        self
    }

    /// Selects the output format explicitly.
    ///
    /// Must precede [`output_file`](Self::output_file), and `Auto` (the
    /// inference placeholder) is not selectable.
    pub fn format(mut self, format: Format) -> Result<Self, MapError> {
        if self.output.is_some() {
            return Err(MapError::FormatAfterOutputFile);
        }
        if format == Format::Auto {
            return Err(MapError::InvalidFormat);
        }
        self.format = format;
        Ok(self)
    }

    /// Sets the output file. When no format was selected explicitly, the
    /// extension decides it; an explicit format must agree with the
    /// extension.
    pub fn output_file(self, path: impl Into<PathBuf>) -> Result<Self, MapError> {
        self.output_file_with(path, Box::new(|p: &Path, text: &str| fs::write(p, text)))
    }

    /// Like [`output_file`](Self::output_file), with a custom sink.
    pub fn output_file_with(
        mut self,
        path: impl Into<PathBuf>,
        writer: OutputWriter,
    ) -> Result<Self, MapError> {
        let path = path.into();
        let inferred = Format::from_extension(&path)?;
        match self.format {
            Format::Auto => self.format = inferred,
            explicit if explicit != inferred => {
                return Err(MapError::FormatExtensionMismatch {
                    format: explicit,
                    // from_extension succeeded, so the extension exists
                    extension: path
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or_default()
                        .to_owned(),
                });
            }
            _ => {}
        }
        self.output = Some(Output { path, writer });
        Ok(self)
    }

    /// Runs the build: scan, classify, assemble, and (when configured)
    /// persist. Returns the assembled table.
    pub fn generate(self) -> Result<RouteTable, MapError> {
        let root = self.path.as_deref().ok_or(MapError::MissingSetting { setting: "path" })?;
        let route_method = self
            .route_method
            .as_deref()
            .ok_or(MapError::MissingSetting { setting: "route_method" })?;

        let mut table = RouteTable::new();
        for relative in scan(root)? {
            let Some(name) = unit_name(&self.namespace, &relative) else {
                continue;
            };
            let Some(unit) = self.registry.get(&name) else {
                debug!(file = %relative, unit = %name, "skipping unregistered unit");
                continue;
            };
            if unit.source_file() != relative {
                debug!(
                    file = %relative,
                    declared = %unit.source_file(),
                    unit = %name,
                    "skipping unit with mismatched source file",
                );
                continue;
            }
            if unit.is_abstract() {
                debug!(unit = %name, "skipping abstract unit");
                continue;
            }
            if let Some(capability) = self.interface.as_deref() {
                if !unit.has_capability(capability) {
                    debug!(unit = %name, capability, "skipping unit without capability");
                    continue;
                }
            }
            if !self.passes_filters(unit, &name)? {
                continue;
            }

            let routes = unit
                .get(route_method)
                .ok_or_else(|| MapError::UnknownAccessor {
                    unit: name.clone(),
                    accessor: route_method.to_owned(),
                })?
                .into_keys();

            let mut level = &mut table;
            for category in &self.categories {
                let value = unit.get(category).ok_or_else(|| MapError::UnknownAccessor {
                    unit: name.clone(),
                    accessor: category.clone(),
                })?;
                let key = value.coerce_key();
                level = level.descend_mut(&key).map_err(|existing| MapError::Collision {
                    key,
                    existing,
                    incoming: name.clone(),
                })?;
            }
            for key in routes {
                if let Some(occupant) = level.get(&key) {
                    return Err(MapError::Collision {
                        key,
                        existing: occupant.as_leaf().unwrap_or("<nested routes>").to_owned(),
                        incoming: name,
                    });
                }
                trace!(unit = %name, key = %key, "adding route");
                level.insert(key, RouteNode::leaf(name.clone()));
            }
        }

        table.insert(
            GENERATED_KEY,
            RouteNode::leaf(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)),
        );

        if let Some(output) = &self.output {
            let text = encode(&table, self.format)?;
            (output.writer)(&output.path, &text).map_err(|e| MapError::Io {
                path: output.path.display().to_string(),
                source: e.to_string(),
            })?;
        }
        Ok(table)
    }

    /// Conjunctive filter evaluation; the first mismatch excludes the
    /// unit and later filters are not consulted.
    fn passes_filters(&self, unit: &UnitDescriptor, name: &str) -> Result<bool, MapError> {
        for (accessor, expected) in &self.filters {
            let actual = unit.get(accessor).ok_or_else(|| MapError::UnknownAccessor {
                unit: name.to_owned(),
                accessor: accessor.clone(),
            })?;
            if !expected.loose_eq(&actual) {
                debug!(unit = %name, accessor = %accessor, "skipping filtered unit");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

// The writer closure is opaque; show the path it targets instead.
impl fmt::Debug for MapGenerator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapGenerator")
            .field("path", &self.path)
            .field("namespace", &self.namespace)
            .field("interface", &self.interface)
            .field("route_method", &self.route_method)
            .field("categories", &self.categories)
            .field("filters", &self.filters)
            .field("format", &self.format)
            .field("output", &self.output.as_ref().map(|o| &o.path))
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
