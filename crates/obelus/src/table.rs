//! Route table derivation and snapshots
//!
//! The [`RouteTable`] is an immutable view of every registered route with
//! the staticness of each element resolved. It is a pure function of the
//! sealed registry, derived once and cached, or supplied as a precomputed
//! external snapshot (a production build artifact) that bypasses
//! recomputation entirely. Matching never mutates it.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use obelus_router::PathSpec;
use serde::{Deserialize, Serialize};

use crate::component::ElementId;
use crate::layout::layouts_for;
use crate::registry::Registry;

/// Staticness of one element in a route's element set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub is_static: bool,
}

/// One route in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// The matchable path: literal for expanded/static routes, the pattern
    /// itself for dynamic ones
    pub path: PathSpec,
    /// For expanded static entries, the original slugged pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_pattern: Option<PathSpec>,
    /// Whether the root element is static
    pub root_is_static: bool,
    /// Whether the route wrapper is static (all elements static)
    pub route_is_static: bool,
    /// ElementId → staticness, deterministic order
    pub elements: BTreeMap<ElementId, ElementInfo>,
    /// Skip server-side rendering for this route
    pub no_ssr: bool,
}

#[derive(Clone, Serialize, Deserialize)]
struct RouteTableData {
    entries: Vec<RouteEntry>,
    has_404: bool,
}

/// Immutable, queryable table of every registered route
///
/// Entries are ordered by match precedence: static concrete entries first
/// (registration order), then dynamic, then wildcard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RouteTableData", into = "RouteTableData")]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    has_404: bool,
    /// Literal path → entry index, rebuilt on deserialization
    literal_index: HashMap<String, usize>,
}

impl From<RouteTableData> for RouteTable {
    fn from(data: RouteTableData) -> Self {
        Self::new(data.entries, data.has_404)
    }
}

impl From<RouteTable> for RouteTableData {
    fn from(table: RouteTable) -> Self {
        Self {
            entries: table.entries,
            has_404: table.has_404,
        }
    }
}

impl PartialEq for RouteTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.has_404 == other.has_404
    }
}

impl RouteTable {
    pub(crate) fn new(entries: Vec<RouteEntry>, has_404: bool) -> Self {
        // Table order encodes precedence, so the first entry at a literal
        // path keeps the index slot. A dynamic page registered at a fully
        // literal pattern must not shadow a static concrete entry there.
        let mut literal_index = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            if entry.path.is_literal() {
                literal_index.entry(entry.path.render()).or_insert(idx);
            }
        }
        Self {
            entries,
            has_404,
            literal_index,
        }
    }

    /// Derives the table from a sealed registry (pure function)
    pub fn derive(registry: &Registry) -> Self {
        let root_is_static = registry.root_is_static();
        let mut entries = Vec::new();
        let mut has_404 = false;

        for page in &registry.concrete {
            let literal = page.literal.render();
            if literal == "/404" {
                has_404 = true;
            }

            let mut elements = layout_elements(registry, &page.original);
            elements.insert(ElementId::page(&literal), ElementInfo { is_static: true });

            entries.push(RouteEntry {
                path: page.literal.clone(),
                path_pattern: (page.original != page.literal).then(|| page.original.clone()),
                root_is_static,
                route_is_static: elements.values().all(|e| e.is_static),
                elements,
                no_ssr: page.no_ssr,
            });
        }

        for page in registry.dynamic.iter().chain(registry.wildcard.iter()) {
            if page.pattern == "/404" {
                has_404 = true;
            }

            let mut elements = layout_elements(registry, &page.spec);
            elements.insert(
                ElementId::page(&page.pattern),
                ElementInfo { is_static: false },
            );

            entries.push(RouteEntry {
                path: page.spec.clone(),
                path_pattern: None,
                root_is_static,
                route_is_static: false,
                elements,
                no_ssr: page.no_ssr,
            });
        }

        Self::new(entries, has_404)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// True iff a literal `/404` route is registered anywhere
    pub fn has_404(&self) -> bool {
        self.has_404
    }

    /// Finds the entry matching a concrete request path
    ///
    /// Literal entries are an O(1) lookup; pattern entries are scanned in
    /// table order, which already encodes the static > dynamic > wildcard,
    /// first-registered-wins precedence.
    pub fn entry_for(&self, path: &str) -> Option<&RouteEntry> {
        if let Some(&idx) = self.literal_index.get(path) {
            return Some(&self.entries[idx]);
        }
        self.entries
            .iter()
            .filter(|entry| !entry.path.is_literal())
            .find(|entry| entry.path.matches(path).is_some())
    }

    /// Loads a precomputed snapshot emitted by the build pipeline
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route snapshot {}", path.display()))?;
        let table: RouteTable = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse route snapshot {}", path.display()))?;
        tracing::info!(
            routes = table.entries.len(),
            "loaded precomputed route table snapshot"
        );
        Ok(table)
    }
}

/// The layout element set for a pattern spec
fn layout_elements(
    registry: &Registry,
    spec: &PathSpec,
) -> BTreeMap<ElementId, ElementInfo> {
    layouts_for(registry, spec)
        .into_iter()
        .map(|path| {
            // layouts_for only yields registered prefixes
            let is_static = registry.layout(&path).map(|l| l.is_static).unwrap_or(false);
            (ElementId::layout(&path), ElementInfo { is_static })
        })
        .collect()
}
