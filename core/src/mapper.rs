//! Route table lookup.
//!
//! [`RouteMapper`] resolves an input string against a (possibly nested)
//! [`RouteTable`]. Keys are regex fragments; nested tables act as pattern
//! prefixes and leaves must match the whole input. Entries are tried in
//! table order, and once a nested table's prefix matches, the search
//! commits to that subtree — a failed descent does not resume with later
//! siblings. The absence of a match is a `None`, never an error.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::warn;

use crate::route_table::{Params, RouteNode, RouteTable, GENERATED_KEY};
use crate::serialize::{decode, Format};
use crate::MapError;

// ═══════════════════════════════════════════════════════════════════════════════
// RouteMatch
// ═══════════════════════════════════════════════════════════════════════════════

/// A successful lookup: the handler name plus named captures gathered
/// along the matched pattern path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Qualified name of the matched handler unit.
    pub handler: String,
    /// Named capture groups from the full matched pattern. Positional
    /// groups are not reported.
    pub params: Params,
}

// ═══════════════════════════════════════════════════════════════════════════════
// RouteMapper
// ═══════════════════════════════════════════════════════════════════════════════

/// A lookup engine over one route table.
#[derive(Debug)]
pub struct RouteMapper {
    table: RouteTable,
    filters: VecDeque<String>,
}

impl RouteMapper {
    /// Wraps an in-memory table.
    pub fn from_table(table: RouteTable) -> Self {
        Self { table, filters: VecDeque::new() }
    }

    /// Loads a table from a serialized map file, with the format decided
    /// by the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let format = Format::from_extension(path)?;
        let text = fs::read_to_string(path).map_err(|e| MapError::InvalidSource {
            path: path.display().to_string(),
            source: e.to_string(),
        })?;
        let table = decode(&text, format).map_err(|e| MapError::InvalidSource {
            path: path.display().to_string(),
            source: e.to_string(),
        })?;
        Ok(Self::from_table(table))
    }

    /// Queues a filter key. Before the next search runs, the mapper
    /// descends through each queued key in FIFO order, narrowing the
    /// search to that subtree. Filters are consumed by that search and do
    /// not affect later ones.
    pub fn filter(&mut self, key: impl Into<String>) -> &mut Self {
        self.filters.push_back(key.into());
        self
    }

    /// Resolves `input` to a handler, or `None` when nothing matches.
    ///
    /// Queued filters are drained first; a filter key with no nested
    /// table at its position leaves an empty view, and the search simply
    /// finds nothing.
    pub fn search(&mut self, input: &str) -> Option<RouteMatch> {
        let mut view = Some(&self.table);
        while let Some(key) = self.filters.pop_front() {
            view = view
                .and_then(|table| table.get(&key))
                .and_then(RouteNode::as_table);
        }
        search_level(view?, "", input, true)
    }
}

/// One level of descent. `base` is the accumulated pattern prefix of the
/// committed ancestors. The reserved timestamp key lives at the top level
/// only, so it is excluded solely where the search starts (`root`); the
/// same spelling at a deeper level is an ordinary pattern.
fn search_level(table: &RouteTable, base: &str, input: &str, root: bool) -> Option<RouteMatch> {
    for (key, node) in table.iter() {
        if root && key == GENERATED_KEY {
            continue;
        }
        match node {
            RouteNode::Table(nested) => {
                let prefix = format!("{base}{key}");
                let re = match Regex::new(&format!("^{prefix}")) {
                    Ok(re) => re,
                    Err(e) => {
                        warn!(pattern = %prefix, error = %e, "skipping uncompilable pattern");
                        continue;
                    }
                };
                if re.is_match(input) {
                    // Prefix matched: commit to this subtree.
                    return search_level(nested, &prefix, input, false);
                }
            }
            RouteNode::Leaf(handler) => {
                let pattern = format!("^{base}{key}$");
                let re = match Regex::new(&pattern) {
                    Ok(re) => re,
                    Err(e) => {
                        warn!(pattern = %pattern, error = %e, "skipping uncompilable pattern");
                        continue;
                    }
                };
                if let Some(caps) = re.captures(input) {
                    let params = re
                        .capture_names()
                        .flatten()
                        .filter_map(|name| {
                            caps.name(name).map(|m| (name.to_owned(), m.as_str().to_owned()))
                        })
                        .collect();
                    return Some(RouteMatch { handler: handler.to_owned(), params });
                }
            }
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
