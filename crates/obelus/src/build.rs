//! Build manifest emission
//!
//! Converts the finalized registry into the immutable manifest consumed by
//! the build pipeline: which routes are fully precomputable, which need
//! per-request work, and which content modules each pattern prefetches.

use std::collections::{BTreeSet, HashMap};

use obelus_router::{PathSegment, PathSpec, SlugMapping};
use serde::{Deserialize, Serialize};

use crate::component::ElementId;
use crate::layout::layouts_for;
use crate::registry::Registry;

/// Resolves the content-module identifiers needed to render one concrete
/// path; injected by the build pipeline
pub type ModuleCollector<'a> = &'a dyn Fn(&str) -> Vec<String>;

/// A materializable render input for a fully-literal path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildInput {
    pub path: String,
    /// Nesting chain, outermost layout first, page last
    pub elements: Vec<ElementId>,
    pub slugs: SlugMapping,
}

/// One route in the build manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEntry {
    pub path: PathSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_pattern: Option<PathSpec>,
    /// True only if the root, the route wrapper, and every element in the
    /// route's set are all static
    pub is_static: bool,
    /// Present for fully-literal paths; patterns with unresolved slugs or a
    /// wildcard cannot be precomputed without request data
    pub entries: Vec<BuildInput>,
    /// Generated snippet mapping this pattern's regex-string form to the
    /// content modules needed to render any of its expansions
    pub custom_code: String,
}

/// The manifest handed to the build pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub routes: Vec<BuildEntry>,
    /// Signals the request layer to retarget unmatched paths to `/404`
    pub has_404: bool,
}

/// One registered API route, as seen by the build pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRouteInfo {
    pub path: String,
    pub is_static: bool,
}

/// Anchored regex-string form of a pattern
///
/// Literals are escaped, a group matches one component, the wildcard
/// matches any remainder.
pub fn path_spec_regex(spec: &PathSpec) -> String {
    if spec.is_root() {
        return "^/$".to_string();
    }
    let body: String = spec
        .segments()
        .iter()
        .map(|segment| match segment {
            PathSegment::Literal(text) => format!("/{}", regex::escape(text)),
            PathSegment::Group(_) => "/([^/]+)".to_string(),
            PathSegment::Wildcard(_) => "(/.*)?".to_string(),
        })
        .collect();
    format!("^{body}$")
}

/// Emits the build manifest for every registered route
pub fn emit_build_config(registry: &Registry, collector: ModuleCollector<'_>) -> BuildConfig {
    let table = registry.route_table();
    let root_is_static = registry.root_is_static();

    // One snippet per original pattern, shared by all of its expansions
    let mut snippets: HashMap<String, String> = HashMap::new();
    let mut routes = Vec::new();

    for page in &registry.concrete {
        let literal = page.literal.render();
        let pattern_key = page.original.render();

        let custom_code = snippets
            .entry(pattern_key)
            .or_insert_with(|| {
                let expansions: Vec<String> = registry
                    .concrete
                    .iter()
                    .filter(|other| other.original == page.original)
                    .map(|other| other.literal.render())
                    .collect();
                custom_code_snippet(&page.original, &expansions, collector)
            })
            .clone();

        let elements = element_chain(registry, &page.original, &literal);
        let entry_is_static = root_is_static
            && table
                .entry_for(&literal)
                .map(|e| e.route_is_static)
                .unwrap_or(false);

        routes.push(BuildEntry {
            path: page.literal.clone(),
            path_pattern: (page.original != page.literal).then(|| page.original.clone()),
            is_static: entry_is_static,
            entries: vec![BuildInput {
                path: literal,
                elements,
                slugs: page.slugs.clone(),
            }],
            custom_code,
        });
    }

    for page in registry.dynamic.iter().chain(registry.wildcard.iter()) {
        routes.push(BuildEntry {
            path: page.spec.clone(),
            path_pattern: None,
            is_static: false,
            // Cannot be precomputed without request data
            entries: Vec::new(),
            custom_code: custom_code_snippet(&page.spec, &[page.pattern.clone()], collector),
        });
    }

    tracing::debug!(routes = routes.len(), "emitted build config");
    BuildConfig {
        routes,
        has_404: table.has_404(),
    }
}

/// The API portion of the manifest
pub fn emit_api_config(registry: &Registry) -> Vec<ApiRouteInfo> {
    registry
        .apis
        .iter()
        .map(|api| ApiRouteInfo {
            path: api.path.clone(),
            is_static: api.is_static,
        })
        .collect()
}

fn element_chain(registry: &Registry, pattern: &PathSpec, literal: &str) -> Vec<ElementId> {
    let mut chain: Vec<ElementId> = layouts_for(registry, pattern)
        .iter()
        .map(|path| ElementId::layout(path))
        .collect();
    chain.push(ElementId::page(literal));
    chain
}

/// One client-side snippet covers every concrete expansion of a pattern
fn custom_code_snippet(
    pattern: &PathSpec,
    expansions: &[String],
    collector: ModuleCollector<'_>,
) -> String {
    let modules: BTreeSet<String> = expansions
        .iter()
        .flat_map(|path| collector(path))
        .collect();
    let module_list = modules
        .iter()
        .map(|m| format!("\"{m}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "globalThis.__OBELUS_ROUTE_MODULES ||= {{}}; globalThis.__OBELUS_ROUTE_MODULES[{:?}] = [{}];",
        path_spec_regex(pattern),
        module_list
    )
}
