//! Request-time route matching
//!
//! Matching is synchronous and pure: the static concrete map is checked
//! first (O(1)), then dynamic no-wildcard entries, then one-wildcard
//! entries, each in registration order. First structural match wins;
//! static > dynamic > wildcard is a fixed precedence rule.

use std::collections::BTreeMap;

use obelus_router::{PathSpec, SlugMapping};

use crate::component::{ContentNode, ElementId, PageProps};
use crate::layout::layouts_for;
use crate::registry::Registry;
use crate::table::RouteTable;

/// Outcome of an existence probe; a miss is expected traffic, not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteExistence {
    NotFound,
    Found { is_static: bool, no_ssr: bool },
}

/// A matched route with its extracted slug bindings
pub struct RouteMatch<'a> {
    /// Concrete path that matched
    pub path: String,
    /// The pattern spec layouts resolve against (the original slugged
    /// pattern for expanded static entries)
    pub pattern: PathSpec,
    /// Id of the page element
    pub element_id: ElementId,
    /// Slug bindings: pre-bound values for expanded entries, extracted from
    /// the request path for dynamic ones
    pub slugs: SlugMapping,
    pub is_static: bool,
    pub no_ssr: bool,
    pub(crate) component: &'a crate::component::Component,
}

/// A rendered route: the element payloads plus the nesting structure
///
/// `route_element` is the ordered nesting chain (outermost layout first,
/// page last); the render layer composes actual output from it. Skipped
/// element ids stay in the chain but carry no payload in `elements`.
#[derive(Debug)]
pub struct RenderedRoute {
    pub elements: BTreeMap<ElementId, ContentNode>,
    pub root_element: Option<ContentNode>,
    pub route_element: Vec<ElementId>,
}

/// Read-only matcher over a sealed registry and its route table
pub struct Matcher<'a> {
    registry: &'a Registry,
    table: &'a RouteTable,
}

/// Strips trailing slashes so `/about/` and `/about` resolve identically
/// through both the concrete map and pattern matching
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

impl<'a> Matcher<'a> {
    pub fn new(registry: &'a Registry, table: &'a RouteTable) -> Self {
        Self { registry, table }
    }

    /// True iff a literal `/404` route is registered anywhere
    pub fn has_404(&self) -> bool {
        self.table.has_404()
    }

    /// Probes whether any route matches `path`
    ///
    /// Answered from the route table alone, so a precomputed snapshot is
    /// transparent here.
    pub fn exists_route(&self, path: &str) -> RouteExistence {
        match self.table.entry_for(normalize_path(path)) {
            None => RouteExistence::NotFound,
            Some(entry) => RouteExistence::Found {
                is_static: entry.root_is_static && entry.route_is_static,
                no_ssr: entry.no_ssr,
            },
        }
    }

    /// Finds the best-matching registered route for a concrete path
    pub fn match_route(&self, path: &str) -> Option<RouteMatch<'a>> {
        let path = normalize_path(path);

        // Static concrete map first
        if let Some(&idx) = self.registry.concrete_index.get(path) {
            let page = &self.registry.concrete[idx];
            return Some(RouteMatch {
                path: path.to_string(),
                pattern: page.original.clone(),
                element_id: ElementId::page(path),
                slugs: page.slugs.clone(),
                is_static: true,
                no_ssr: page.no_ssr,
                component: &page.component,
            });
        }

        // Then dynamic entries, then wildcard entries, in registration order
        self.registry
            .dynamic
            .iter()
            .chain(self.registry.wildcard.iter())
            .find_map(|page| {
                let slugs = page.spec.matches(path)?;
                Some(RouteMatch {
                    path: path.to_string(),
                    pattern: page.spec.clone(),
                    element_id: ElementId::page(&page.pattern),
                    slugs,
                    is_static: false,
                    no_ssr: page.no_ssr,
                    component: &page.component,
                })
            })
    }

    /// Matches and renders a route into its element payloads
    ///
    /// `skip` lists element ids the caller already holds; a skip request is
    /// honored only for ids in the matched route's **static** element set:
    /// a dynamic element can never be skipped, since skipping presumes
    /// reuse of unchanging content. An unmatched path retargets to `/404`
    /// when one is registered, before giving up.
    pub fn render_route(
        &self,
        path: &str,
        query: Option<&str>,
        skip: &[ElementId],
    ) -> Option<RenderedRoute> {
        let matched = match self.match_route(path) {
            Some(matched) => matched,
            None if self.has_404() && path != "/404" => {
                tracing::debug!(path, "no route matched, retargeting to /404");
                self.match_route("/404")?
            }
            None => {
                tracing::debug!(path, "no route matched");
                return None;
            }
        };

        let props = PageProps {
            slugs: matched.slugs.clone(),
            query: query.map(str::to_string),
        };

        let mut elements = BTreeMap::new();
        let mut route_element = Vec::new();

        for layout_path in layouts_for(self.registry, &matched.pattern) {
            let id = ElementId::layout(&layout_path);
            // layouts_for only yields registered prefixes
            let layout = self.registry.layout(&layout_path)?;
            route_element.push(id.clone());
            if skip.contains(&id) && layout.is_static {
                continue;
            }
            elements.insert(id, (layout.component)(&props));
        }

        route_element.push(matched.element_id.clone());
        if !(skip.contains(&matched.element_id) && matched.is_static) {
            elements.insert(matched.element_id.clone(), (matched.component)(&props));
        }

        let root_element = self
            .registry
            .root
            .as_ref()
            .map(|root| (root.component)(&props));

        Some(RenderedRoute {
            elements,
            root_element,
            route_element,
        })
    }
}
