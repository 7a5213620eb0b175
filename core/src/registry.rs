//! Unit registration.
//!
//! The registry is the explicit inventory of dispatchable units: built once
//! from descriptors, immutable afterwards, and consulted by the generator
//! to resolve names derived from scanned files. Registration happens in a
//! composition root (typically `main`), so a build's unit population is
//! visible in one place rather than discovered by introspection.

use std::collections::HashMap;

use crate::UnitDescriptor;

// ═══════════════════════════════════════════════════════════════════════════════
// UnitRegistryBuilder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for a [`UnitRegistry`].
///
/// Re-registering a name replaces the earlier descriptor; the last
/// registration wins.
#[derive(Debug, Default)]
pub struct UnitRegistryBuilder {
    units: HashMap<String, UnitDescriptor>,
}

impl UnitRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its own qualified name.
    #[must_use]
    pub fn register(mut self, unit: UnitDescriptor) -> Self {
        self.units.insert(unit.name().to_owned(), unit);
        self
    }

    /// Finalizes registration into an immutable registry.
    pub fn build(self) -> UnitRegistry {
        UnitRegistry { units: self.units }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// UnitRegistry
// ═══════════════════════════════════════════════════════════════════════════════

/// An immutable name → descriptor inventory.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: HashMap<String, UnitDescriptor>,
}

impl UnitRegistry {
    /// Looks up a descriptor by qualified name.
    pub fn get(&self, name: &str) -> Option<&UnitDescriptor> {
        self.units.get(name)
    }

    /// Whether a unit is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Registered unit names, sorted. For diagnostics.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
