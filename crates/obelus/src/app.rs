//! Application facade and configuration lifecycle
//!
//! Registration happens once, inside a user-supplied async configuration
//! callback. The callback is memoized: the first caller triggers it, and
//! every caller (including the trigger) awaits the identical result, so
//! concurrent startups never run it twice. Once it completes the registry
//! is sealed; matching and manifest emission are synchronous and pure from
//! then on.

use tokio::sync::{Mutex, OnceCell};

use crate::build::{emit_api_config, emit_build_config, ApiRouteInfo, BuildConfig, ModuleCollector};
use crate::component::{ApiRequest, ApiResponse, BoxFuture, ElementId};
use crate::error::RouteError;
use crate::matcher::{Matcher, RenderedRoute, RouteExistence, RouteMatch};
use crate::registry::{Registry, RouteBuilder};
use crate::table::RouteTable;

type ConfigureFn =
    Box<dyn FnOnce(RouteBuilder) -> BoxFuture<'static, Result<RouteBuilder, RouteError>> + Send>;

struct Engine {
    registry: Registry,
    table: RouteTable,
}

/// Environment variable naming a route table snapshot file
///
/// Checked when no snapshot was injected explicitly; an unset or empty
/// value falls back to deriving the table from the sealed registry.
pub const SNAPSHOT_ENV: &str = "OBELUS_ROUTES_SNAPSHOT";

/// Entry point of the engine
///
/// ```no_run
/// use obelus::{App, PageConfig, RenderMode, component, ContentNode};
///
/// # async fn demo() -> Result<(), obelus::RouteError> {
/// let app = App::new(|mut builder| async move {
///     builder.create_page(PageConfig {
///         render: RenderMode::Static,
///         path: "/test".to_string(),
///         component: component(|_| ContentNode::new("hello")),
///         static_paths: None,
///         disable_ssr: false,
///     })?;
///     Ok(builder)
/// });
///
/// let config = app.get_route_config().await?;
/// assert_eq!(config.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct App {
    callback: Mutex<Option<ConfigureFn>>,
    snapshot: Mutex<Option<RouteTable>>,
    engine: OnceCell<Engine>,
}

impl App {
    /// Creates an app around a one-time configuration callback
    ///
    /// The callback receives the builder by value and returns it; the app
    /// seals it afterwards. It runs at most once, on first use.
    pub fn new<F, Fut>(configure: F) -> Self
    where
        F: FnOnce(RouteBuilder) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<RouteBuilder, RouteError>> + Send + 'static,
    {
        Self {
            callback: Mutex::new(Some(Box::new(move |builder| Box::pin(configure(builder))))),
            snapshot: Mutex::new(None),
            engine: OnceCell::new(),
        }
    }

    /// Injects a precomputed route table (production build artifact)
    ///
    /// Checked before recomputation and fully transparent to the matcher.
    pub fn with_snapshot(mut self, table: RouteTable) -> Self {
        *self.snapshot.get_mut() = Some(table);
        self
    }

    /// Injects a precomputed route table loaded from a JSON snapshot file
    pub fn with_snapshot_file(self, path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let table = RouteTable::from_json_file(path)?;
        Ok(self.with_snapshot(table))
    }

    async fn engine(&self) -> Result<&Engine, RouteError> {
        self.engine
            .get_or_try_init(|| async {
                let callback = self
                    .callback
                    .lock()
                    .await
                    .take()
                    .ok_or(RouteError::ConfigurationClosed)?;

                tracing::debug!("running route configuration callback");
                let builder = callback(RouteBuilder::new()).await?;
                let registry = builder.seal();

                let table = match self.snapshot.lock().await.take() {
                    Some(table) => {
                        tracing::info!("using injected route table snapshot");
                        table
                    }
                    None => match std::env::var(SNAPSHOT_ENV) {
                        Ok(path) if !path.is_empty() => {
                            tracing::info!(%path, "loading route table snapshot from environment");
                            RouteTable::from_json_file(&path)
                                .map_err(|source| RouteError::SnapshotLoad { path, source })?
                        }
                        _ => registry.route_table().clone(),
                    },
                };

                tracing::info!(routes = table.entries().len(), "routes configured");
                Ok(Engine { registry, table })
            })
            .await
    }

    /// Ensures configuration has completed
    pub async fn ready(&self) -> Result<(), RouteError> {
        self.engine().await.map(|_| ())
    }

    /// The emitted route contract: one entry per registered route
    ///
    /// Pure function of the sealed registry: calling it twice returns
    /// structurally identical output.
    pub async fn get_route_config(&self) -> Result<Vec<crate::table::RouteEntry>, RouteError> {
        Ok(self.engine().await?.table.entries().to_vec())
    }

    /// Probes whether any route matches `path`
    pub async fn exists_route(&self, path: &str) -> Result<RouteExistence, RouteError> {
        let engine = self.engine().await?;
        Ok(Matcher::new(&engine.registry, &engine.table).exists_route(path))
    }

    /// True iff a literal `/404` route is registered anywhere
    pub async fn has_404(&self) -> Result<bool, RouteError> {
        Ok(self.engine().await?.table.has_404())
    }

    /// Finds the best-matching route and its slug bindings
    pub async fn match_route(&self, path: &str) -> Result<Option<OwnedRouteMatch>, RouteError> {
        let engine = self.engine().await?;
        Ok(Matcher::new(&engine.registry, &engine.table)
            .match_route(path)
            .map(OwnedRouteMatch::from))
    }

    /// Matches and renders a route into its element payloads
    ///
    /// `skip` ids are honored only for elements in the matched route's
    /// static element set.
    pub async fn render_route(
        &self,
        path: &str,
        query: Option<&str>,
        skip: &[ElementId],
    ) -> Result<Option<RenderedRoute>, RouteError> {
        let engine = self.engine().await?;
        Ok(Matcher::new(&engine.registry, &engine.table).render_route(path, query, skip))
    }

    /// The API portion of the emitted contract
    pub async fn get_api_config(&self) -> Result<Vec<ApiRouteInfo>, RouteError> {
        Ok(emit_api_config(&self.engine().await?.registry))
    }

    /// Dispatches an API request to its registered handler
    ///
    /// Exact `(method, path)` lookup first, then patterned API paths in
    /// registration order. `None` is the not-found outcome.
    pub async fn handle_api(
        &self,
        path: &str,
        request: ApiRequest,
    ) -> Result<Option<ApiResponse>, RouteError> {
        let engine = self.engine().await?;
        let registry = &engine.registry;
        let method = request.method.to_ascii_uppercase();

        let api = registry
            .api_index
            .get(&(method.clone(), path.to_string()))
            .map(|&idx| &registry.apis[idx])
            .or_else(|| {
                registry.apis.iter().find(|api| {
                    api.method == method
                        && !api.spec.is_literal()
                        && api.spec.matches(path).is_some()
                })
            });

        match api {
            Some(api) => Ok(Some((api.handler)(request).await)),
            None => {
                tracing::debug!(%method, path, "no api route matched");
                Ok(None)
            }
        }
    }

    /// Emits the build manifest for the build pipeline
    pub async fn emit_build_config(
        &self,
        collector: ModuleCollector<'_>,
    ) -> Result<BuildConfig, RouteError> {
        Ok(emit_build_config(&self.engine().await?.registry, collector))
    }
}

/// Owned variant of [`RouteMatch`] for callers outliving the borrow
#[derive(Debug, Clone)]
pub struct OwnedRouteMatch {
    pub path: String,
    pub pattern: String,
    pub element_id: ElementId,
    pub slugs: obelus_router::SlugMapping,
    pub is_static: bool,
    pub no_ssr: bool,
}

impl From<RouteMatch<'_>> for OwnedRouteMatch {
    fn from(m: RouteMatch<'_>) -> Self {
        Self {
            path: m.path,
            pattern: m.pattern.render(),
            element_id: m.element_id,
            slugs: m.slugs,
            is_static: m.is_static,
            no_ssr: m.no_ssr,
        }
    }
}
