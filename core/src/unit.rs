//! Handler unit descriptors.
//!
//! A [`UnitDescriptor`] is the explicit, trivially constructible stand-in
//! for compile-time introspection: instead of the generator loading a
//! source file and asking it questions, each unit registers a descriptor
//! up front declaring where it lives, what capabilities it implements, and
//! which named accessors it exposes. Building a descriptor runs no unit
//! code; accessor closures execute only when the generator asks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::KeyValue;

/// Shared accessor closure. `Arc` keeps descriptors cheaply clonable and
/// the registry shareable across threads.
type Accessor = Arc<dyn Fn() -> KeyValue + Send + Sync>;

// ═══════════════════════════════════════════════════════════════════════════════
// UnitDescriptor
// ═══════════════════════════════════════════════════════════════════════════════

/// Static metadata for one dispatchable unit.
#[derive(Clone)]
pub struct UnitDescriptor {
    name: String,
    source_file: String,
    is_abstract: bool,
    capabilities: Vec<String>,
    accessors: HashMap<String, Accessor>,
}

impl UnitDescriptor {
    /// Creates a descriptor for the unit `name`, declared to live in
    /// `source_file` (a path relative to the scan root, using `/`
    /// separators).
    pub fn new(name: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_file: source_file.into(),
            is_abstract: false,
            capabilities: Vec::new(),
            accessors: HashMap::new(),
        }
    }

    /// Marks the unit abstract. Abstract units are skipped during
    /// generation even when they carry capabilities and accessors.
    #[must_use]
    pub fn abstract_unit(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Declares a capability (an interface the unit implements).
    #[must_use]
    pub fn capability(mut self, name: impl Into<String>) -> Self {
        self.capabilities.push(name.into());
        self
    }

    /// Exposes a named accessor returning a [`KeyValue`].
    #[must_use]
    pub fn accessor(
        mut self,
        name: impl Into<String>,
        get: impl Fn() -> KeyValue + Send + Sync + 'static,
    ) -> Self {
        self.accessors.insert(name.into(), Arc::new(get));
        self
    }

    /// Fully qualified unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared source file, relative to the scan root.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Whether the unit is abstract.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Whether the unit declares the given capability.
    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| c == name)
    }

    /// Invokes the named accessor, if the unit exposes it.
    pub fn get(&self, accessor: &str) -> Option<KeyValue> {
        self.accessors.get(accessor).map(|f| f())
    }
}

// Closures are opaque; show the declarative fields and the accessor names.
impl fmt::Debug for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut accessors: Vec<&str> = self.accessors.keys().map(String::as_str).collect();
        accessors.sort_unstable();
        f.debug_struct("UnitDescriptor")
            .field("name", &self.name)
            .field("source_file", &self.source_file)
            .field("is_abstract", &self.is_abstract)
            .field("capabilities", &self.capabilities)
            .field("accessors", &accessors)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
