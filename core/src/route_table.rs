//! Insertion-ordered nested route tables.
//!
//! A [`RouteTable`] is an ordered map from pattern keys to [`RouteNode`]s,
//! where each node is either a terminal handler name or a nested table.
//! Order is load-bearing: the mapper commits to the first entry whose
//! pattern matches, so iteration must reproduce insertion order exactly.
//! That rules out hash maps; entries live in a plain vector and lookups
//! scan it, which is fine at the sizes route tables reach.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved top-level key carrying the generation timestamp.
///
/// The leading `@` cannot occur in a derived route or category key, so the
/// marker can never collide with real table content.
pub const GENERATED_KEY: &str = "@generated";

// ═══════════════════════════════════════════════════════════════════════════════
// RouteNode
// ═══════════════════════════════════════════════════════════════════════════════

/// A value in a route table: a terminal handler or a nested level.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteNode {
    /// A terminal entry naming the handler for this pattern.
    Leaf(String),
    /// A nested table introduced by a category or a route prefix.
    Table(RouteTable),
}

impl RouteNode {
    /// Convenience constructor for a terminal entry.
    pub fn leaf(handler: impl Into<String>) -> Self {
        Self::Leaf(handler.into())
    }

    /// Returns the handler name if this node is terminal.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(handler) => Some(handler),
            Self::Table(_) => None,
        }
    }

    /// Returns the nested table if this node is one.
    pub fn as_table(&self) -> Option<&RouteTable> {
        match self {
            Self::Leaf(_) => None,
            Self::Table(table) => Some(table),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RouteTable
// ═══════════════════════════════════════════════════════════════════════════════

/// An ordered pattern → node map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    entries: Vec<(String, RouteNode)>,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this level has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a key at this level.
    pub fn get(&self, key: &str) -> Option<&RouteNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Inserts or replaces an entry.
    ///
    /// A new key appends, preserving insertion order; an existing key is
    /// overwritten in place, keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, node: RouteNode) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = node,
            None => self.entries.push((key, node)),
        }
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walks to the nested table under `key`, creating it if absent.
    ///
    /// Fails with the occupying handler's name when `key` already holds a
    /// terminal entry, since a pattern cannot be both a dispatch target and
    /// a prefix of deeper patterns.
    pub(crate) fn descend_mut(&mut self, key: &str) -> Result<&mut RouteTable, String> {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(i) => i,
            None => {
                self.entries
                    .push((key.to_owned(), RouteNode::Table(RouteTable::new())));
                self.entries.len() - 1
            }
        };
        match &mut self.entries[index].1 {
            RouteNode::Table(table) => Ok(table),
            RouteNode::Leaf(handler) => Err(handler.clone()),
        }
    }

    /// Flattens the table to `pattern path → handler` pairs, depth first in
    /// insertion order. The generation marker is skipped. Mostly useful for
    /// diagnostics and tests.
    pub fn flatten(&self) -> Vec<(Vec<String>, String)> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.flatten_into(&mut prefix, &mut out);
        out
    }

    fn flatten_into(&self, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, String)>) {
        for (key, node) in &self.entries {
            if key == GENERATED_KEY {
                continue;
            }
            prefix.push(key.clone());
            match node {
                RouteNode::Leaf(handler) => out.push((prefix.clone(), handler.clone())),
                RouteNode::Table(table) => table.flatten_into(prefix, out),
            }
            prefix.pop();
        }
    }
}

impl FromIterator<(String, RouteNode)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (String, RouteNode)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, node) in iter {
            table.insert(key, node);
        }
        table
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Serde
// ═══════════════════════════════════════════════════════════════════════════════
//
// Tables serialize as plain maps and leaves as plain strings so that the
// on-disk artifact is an ordinary nested object, readable by anything that
// speaks the container format. Deserialization relies on self-describing
// input (a value is a string or a map, never ambiguous).

impl Serialize for RouteTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for RouteNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(handler) => serializer.serialize_str(handler),
            Self::Table(table) => table.serialize(serializer),
        }
    }
}

struct RouteTableVisitor;

impl<'de> Visitor<'de> for RouteTableVisitor {
    type Value = RouteTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of route patterns")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = RouteTable::new();
        while let Some((key, node)) = access.next_entry::<String, RouteNode>()? {
            table.insert(key, node);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for RouteTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RouteTableVisitor)
    }
}

struct RouteNodeVisitor;

impl<'de> Visitor<'de> for RouteNodeVisitor {
    type Value = RouteNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a handler name or a nested map")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RouteNode::Leaf(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(RouteNode::Leaf(value))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        RouteTableVisitor.visit_map(access).map(RouteNode::Table)
    }
}

impl<'de> Deserialize<'de> for RouteNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RouteNodeVisitor)
    }
}

/// Parameters captured during a search, keyed by capture-group name.
pub(crate) type Params = HashMap<String, String>;

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
