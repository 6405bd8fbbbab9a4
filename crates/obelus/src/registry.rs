//! Route registry
//!
//! A [`RouteBuilder`] accumulates page/layout/root/API registrations made by
//! the one-time configuration callback, classifying each into a kind-specific
//! collection (the same shape as a file-router's per-kind route maps). When
//! the callback finishes, sealing consumes the builder into an immutable
//! [`Registry`] snapshot, so no registration can happen afterwards; a second
//! configuration attempt is reported as
//! [`RouteError::ConfigurationClosed`](crate::error::RouteError::ConfigurationClosed)
//! by the application facade.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use obelus_router::{PathSpec, SlugMapping};
use once_cell::sync::OnceCell;

use crate::component::{ApiHandler, Component, PageProps};
use crate::error::RouteError;
use crate::expand::expand_tuple;
use crate::table::RouteTable;

/// How a route is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Fully precomputable without request data
    Static,
    /// Computed per incoming request
    Dynamic,
}

/// Classification of a page registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// Static page at a fully-literal pattern
    StaticNoSlug,
    /// Static slugged page with enumerated concrete value tuples
    StaticWithSlugs { static_paths: Vec<Vec<String>> },
    /// Per-request page without a wildcard segment
    DynamicNoWildcard,
    /// Per-request page with one wildcard segment
    DynamicOneWildcard,
}

/// One declared concrete path for a slugged static page
///
/// A flat string is treated as a 1-tuple.
#[derive(Debug, Clone)]
pub enum StaticPath {
    Single(String),
    Tuple(Vec<String>),
}

impl StaticPath {
    fn into_tuple(self) -> Vec<String> {
        match self {
            StaticPath::Single(value) => vec![value],
            StaticPath::Tuple(values) => values,
        }
    }
}

impl From<&str> for StaticPath {
    fn from(value: &str) -> Self {
        StaticPath::Single(value.to_string())
    }
}

impl From<Vec<&str>> for StaticPath {
    fn from(values: Vec<&str>) -> Self {
        StaticPath::Tuple(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for StaticPath {
    fn from(values: Vec<String>) -> Self {
        StaticPath::Tuple(values)
    }
}

/// Arguments to [`RouteBuilder::create_page`]
pub struct PageConfig {
    pub render: RenderMode,
    pub path: String,
    pub component: Component,
    /// Concrete value tuples for a slugged static page
    pub static_paths: Option<Vec<StaticPath>>,
    /// Skip server-side rendering for this page
    pub disable_ssr: bool,
}

/// Arguments to [`RouteBuilder::create_layout`]
pub struct LayoutConfig {
    pub render: RenderMode,
    pub path: String,
    pub component: Component,
}

/// Arguments to [`RouteBuilder::create_root`]
pub struct RootConfig {
    pub render: RenderMode,
    pub component: Component,
}

/// Arguments to [`RouteBuilder::create_api`]
pub struct ApiConfig {
    pub path: String,
    pub mode: RenderMode,
    pub method: String,
    pub handler: ApiHandler,
}

/// A fully-literal route produced by registration or expansion
pub(crate) struct ConcretePage {
    /// The literal path spec
    pub literal: PathSpec,
    /// The slugged pattern it came from (equal to `literal` when no
    /// expansion happened); layout resolution walks this one
    pub original: PathSpec,
    /// Slug values consumed from the static-paths tuple
    pub slugs: SlugMapping,
    /// Component with the slug map pre-bound as fixed input
    pub component: Component,
    pub no_ssr: bool,
}

/// A per-request route keyed by its pattern string
pub(crate) struct DynamicPage {
    pub spec: PathSpec,
    pub pattern: String,
    pub component: Component,
    pub no_ssr: bool,
}

pub(crate) struct LayoutPage {
    pub spec: PathSpec,
    pub component: Component,
    pub is_static: bool,
}

pub(crate) struct RootPage {
    pub component: Component,
    pub is_static: bool,
}

pub(crate) struct ApiRoute {
    pub spec: PathSpec,
    pub path: String,
    pub method: String,
    pub is_static: bool,
    pub handler: ApiHandler,
}

/// Accumulates registrations during the configuration callback
///
/// Exclusively owns its maps; passed into the configuration callback and
/// sealed afterwards. Collections that matching scans in registration order
/// are insertion-ordered vectors with a pattern → index side map for the
/// duplicate checks.
#[derive(Default)]
pub struct RouteBuilder {
    concrete: Vec<ConcretePage>,
    concrete_index: HashMap<String, usize>,

    dynamic: Vec<DynamicPage>,
    dynamic_index: HashMap<String, usize>,

    wildcard: Vec<DynamicPage>,
    wildcard_index: HashMap<String, usize>,

    static_layouts: HashMap<String, LayoutPage>,
    dynamic_layouts: HashMap<String, LayoutPage>,

    root: Option<RootPage>,

    apis: Vec<ApiRoute>,
    api_index: HashMap<(String, String), usize>,
    api_paths: HashSet<String>,
    static_api_paths: HashSet<String>,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a page registration into its [`RouteKind`]
    fn classify(spec: &PathSpec, config: &PageConfig) -> Result<RouteKind, RouteError> {
        match config.render {
            RenderMode::Static => match &config.static_paths {
                None => {
                    if !spec.is_literal() {
                        // A slugged static page must enumerate its paths
                        return Err(RouteError::StaticPathMismatch {
                            pattern: spec.render(),
                            expected: spec.slug_names().len(),
                            got: 0,
                        });
                    }
                    Ok(RouteKind::StaticNoSlug)
                }
                Some(static_paths) => Ok(RouteKind::StaticWithSlugs {
                    static_paths: static_paths
                        .iter()
                        .cloned()
                        .map(StaticPath::into_tuple)
                        .collect(),
                }),
            },
            RenderMode::Dynamic => {
                if config.static_paths.is_some() {
                    // Declared paths carry no meaning for per-request routes
                    tracing::warn!(path = %spec, "static_paths ignored for dynamic page");
                }
                if spec.wildcard_index().is_some() {
                    Ok(RouteKind::DynamicOneWildcard)
                } else {
                    Ok(RouteKind::DynamicNoWildcard)
                }
            }
        }
    }

    /// Registers a page
    ///
    /// Classification into the four route kinds:
    /// - `StaticNoSlug` → one concrete entry at the literal pattern
    /// - `StaticWithSlugs` → one concrete entry per `static_paths` tuple,
    ///   each wrapping the shared component with its slug map pre-bound
    /// - `DynamicNoWildcard` / `DynamicOneWildcard` → kind-specific pattern
    ///   maps, matched per request in registration order
    pub fn create_page(&mut self, config: PageConfig) -> Result<(), RouteError> {
        let spec = PathSpec::parse(&config.path)?;

        match Self::classify(&spec, &config)? {
            RouteKind::StaticNoSlug => self.insert_concrete(ConcretePage {
                literal: spec.clone(),
                original: spec,
                slugs: SlugMapping::new(),
                component: config.component,
                no_ssr: config.disable_ssr,
            }),
            RouteKind::StaticWithSlugs { static_paths } => {
                for tuple in static_paths {
                    let expanded = expand_tuple(&spec, &tuple)?;

                    // Pre-bind the slug map so one authored component serves
                    // every expanded literal path
                    let inner = Arc::clone(&config.component);
                    let bound = expanded.slugs.clone();
                    let component: Component = Arc::new(move |props: &PageProps| {
                        let props = PageProps {
                            slugs: bound.clone(),
                            query: props.query.clone(),
                        };
                        inner(&props)
                    });

                    self.insert_concrete(ConcretePage {
                        literal: expanded.literal,
                        original: expanded.original,
                        slugs: expanded.slugs,
                        component,
                        no_ssr: config.disable_ssr,
                    })?;
                }
                Ok(())
            }
            kind @ (RouteKind::DynamicNoWildcard | RouteKind::DynamicOneWildcard) => {
                let pattern = spec.render();
                let page = DynamicPage {
                    spec,
                    pattern: pattern.clone(),
                    component: config.component,
                    no_ssr: config.disable_ssr,
                };
                let (routes, index) = if kind == RouteKind::DynamicOneWildcard {
                    (&mut self.wildcard, &mut self.wildcard_index)
                } else {
                    (&mut self.dynamic, &mut self.dynamic_index)
                };
                if index.contains_key(&pattern) {
                    return Err(RouteError::DuplicateRoute(pattern));
                }
                index.insert(pattern, routes.len());
                routes.push(page);
                Ok(())
            }
        }
    }

    fn insert_concrete(&mut self, page: ConcretePage) -> Result<(), RouteError> {
        let path = page.literal.render();
        if self.concrete_index.contains_key(&path) {
            return Err(RouteError::DuplicateComponent(path));
        }
        self.concrete_index.insert(path, self.concrete.len());
        self.concrete.push(page);
        Ok(())
    }

    /// Registers a layout wrapping every route under its path prefix
    pub fn create_layout(&mut self, config: LayoutConfig) -> Result<(), RouteError> {
        let spec = PathSpec::parse(&config.path)?;
        let path = spec.render();

        if self.static_layouts.contains_key(&path) || self.dynamic_layouts.contains_key(&path) {
            return Err(RouteError::DuplicateRoute(path));
        }

        let layout = LayoutPage {
            spec,
            component: config.component,
            is_static: config.render == RenderMode::Static,
        };
        match config.render {
            RenderMode::Static => self.static_layouts.insert(path, layout),
            RenderMode::Dynamic => self.dynamic_layouts.insert(path, layout),
        };
        Ok(())
    }

    /// Registers the root element (at most one)
    pub fn create_root(&mut self, config: RootConfig) -> Result<(), RouteError> {
        if self.root.is_some() {
            return Err(RouteError::DuplicateRoot);
        }
        self.root = Some(RootPage {
            component: config.component,
            is_static: config.render == RenderMode::Static,
        });
        Ok(())
    }

    /// Registers an API handler keyed by `(method, path)`
    ///
    /// A static-mode path must be globally unique across all methods: a
    /// static response is materialized once at a fixed location, so two
    /// methods cannot share it.
    pub fn create_api(&mut self, config: ApiConfig) -> Result<(), RouteError> {
        let spec = PathSpec::parse(&config.path)?;
        let path = spec.render();
        let method = config.method.to_ascii_uppercase();
        let is_static = config.mode == RenderMode::Static;

        let duplicate = self.api_index.contains_key(&(method.clone(), path.clone()))
            || self.static_api_paths.contains(&path)
            || (is_static && self.api_paths.contains(&path));
        if duplicate {
            return Err(RouteError::DuplicateApi { method, path });
        }

        self.api_index
            .insert((method.clone(), path.clone()), self.apis.len());
        self.api_paths.insert(path.clone());
        if is_static {
            self.static_api_paths.insert(path.clone());
        }
        self.apis.push(ApiRoute {
            spec,
            path,
            method,
            is_static,
            handler: config.handler,
        });
        Ok(())
    }

    /// Seals the builder into an immutable registry snapshot
    ///
    /// Consumes the builder, so no registration can follow.
    pub fn seal(self) -> Registry {
        tracing::info!(
            static_routes = self.concrete.len(),
            dynamic_routes = self.dynamic.len(),
            wildcard_routes = self.wildcard.len(),
            layouts = self.static_layouts.len() + self.dynamic_layouts.len(),
            apis = self.apis.len(),
            "route registry sealed"
        );
        Registry {
            concrete: self.concrete,
            concrete_index: self.concrete_index,
            dynamic: self.dynamic,
            wildcard: self.wildcard,
            static_layouts: self.static_layouts,
            dynamic_layouts: self.dynamic_layouts,
            root: self.root,
            apis: self.apis,
            api_index: self.api_index,
            table: OnceCell::new(),
        }
    }
}

/// Immutable snapshot of a sealed [`RouteBuilder`]
///
/// Matching reads this and never mutates it. The derived route table is
/// memoized here: it is a pure function of the registry, so recomputing it
/// is always safe and computing it once is always enough.
pub struct Registry {
    pub(crate) concrete: Vec<ConcretePage>,
    pub(crate) concrete_index: HashMap<String, usize>,
    pub(crate) dynamic: Vec<DynamicPage>,
    pub(crate) wildcard: Vec<DynamicPage>,
    pub(crate) static_layouts: HashMap<String, LayoutPage>,
    pub(crate) dynamic_layouts: HashMap<String, LayoutPage>,
    pub(crate) root: Option<RootPage>,
    pub(crate) apis: Vec<ApiRoute>,
    pub(crate) api_index: HashMap<(String, String), usize>,
    table: OnceCell<RouteTable>,
}

impl Registry {
    /// The derived route table, computed once and cached
    pub fn route_table(&self) -> &RouteTable {
        self.table.get_or_init(|| {
            tracing::debug!("deriving route table from registry");
            RouteTable::derive(self)
        })
    }

    /// Layout registered at exactly `path`, if any
    pub(crate) fn layout(&self, path: &str) -> Option<&LayoutPage> {
        self.static_layouts
            .get(path)
            .or_else(|| self.dynamic_layouts.get(path))
    }

    pub(crate) fn root_is_static(&self) -> bool {
        self.root.as_ref().map(|r| r.is_static).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{component, ContentNode};

    fn page() -> Component {
        component(|_| ContentNode::new("page"))
    }

    #[test]
    fn static_literal_page_registers_one_concrete_entry() {
        let mut builder = RouteBuilder::new();
        builder
            .create_page(PageConfig {
                render: RenderMode::Static,
                path: "/test".to_string(),
                component: page(),
                static_paths: None,
                disable_ssr: false,
            })
            .unwrap();
        let registry = builder.seal();
        assert_eq!(registry.concrete.len(), 1);
        assert!(registry.concrete_index.contains_key("/test"));
    }

    #[test]
    fn static_slugged_page_without_paths_is_rejected() {
        let mut builder = RouteBuilder::new();
        let err = builder
            .create_page(PageConfig {
                render: RenderMode::Static,
                path: "/test/[a]".to_string(),
                component: page(),
                static_paths: None,
                disable_ssr: false,
            })
            .unwrap_err();
        assert!(matches!(err, RouteError::StaticPathMismatch { .. }));
    }

    #[test]
    fn duplicate_dynamic_pattern_is_rejected() {
        let mut builder = RouteBuilder::new();
        for expected_err in [false, true] {
            let result = builder.create_page(PageConfig {
                render: RenderMode::Dynamic,
                path: "/users/[id]".to_string(),
                component: page(),
                static_paths: None,
                disable_ssr: false,
            });
            if expected_err {
                assert!(matches!(result, Err(RouteError::DuplicateRoute(_))));
            } else {
                result.unwrap();
            }
        }
    }

    #[test]
    fn second_root_is_rejected() {
        let mut builder = RouteBuilder::new();
        builder
            .create_root(RootConfig {
                render: RenderMode::Static,
                component: page(),
            })
            .unwrap();
        let err = builder
            .create_root(RootConfig {
                render: RenderMode::Dynamic,
                component: page(),
            })
            .unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoot));
    }
}
