//! Component and element types
//!
//! The engine never renders anything itself: a [`Component`] is an opaque
//! callback supplied at registration time, and a [`ContentNode`] is
//! whatever that callback produced. The surrounding render layer decides
//! what the payload means.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use obelus_router::SlugMapping;
use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// Boxed future alias used for async handlers
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opaque content produced by a component
///
/// The engine carries this payload through without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode(String);

impl ContentNode {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Input handed to a page or layout component
#[derive(Debug, Clone, Default)]
pub struct PageProps {
    /// Slug bindings: pre-bound at expansion time for static slugged pages,
    /// extracted from the request path for dynamic ones
    pub slugs: SlugMapping,
    /// Raw query string of the request, if any
    pub query: Option<String>,
}

/// A registered page/layout/root component
pub type Component = Arc<dyn Fn(&PageProps) -> ContentNode + Send + Sync>;

/// Wraps a plain closure into a [`Component`]
pub fn component<F>(f: F) -> Component
where
    F: Fn(&PageProps) -> ContentNode + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Request passed to an API handler
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

/// Response returned by an API handler
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

/// A registered API handler
pub type ApiHandler = Arc<dyn Fn(ApiRequest) -> BoxFuture<'static, ApiResponse> + Send + Sync>;

/// Wraps an async closure into an [`ApiHandler`]
pub fn api_handler<F, Fut>(f: F) -> ApiHandler
where
    F: Fn(ApiRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResponse> + Send + 'static,
{
    Arc::new(move |req| Box::pin(f(req)))
}

/// Key of one element in a route's element set
///
/// Format: `page:{path}` or `layout:{path}`. The `route:` prefix is
/// reserved for internal use; constructing it from user input is a hard
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    const RESERVED_PREFIX: &'static str = "route:";

    /// Id of a page element at `path`
    pub fn page(path: &str) -> Self {
        Self(format!("page:{path}"))
    }

    /// Id of a layout element at `path`
    pub fn layout(path: &str) -> Self {
        Self(format!("layout:{path}"))
    }

    /// Parses an externally supplied id, rejecting the reserved prefix
    pub fn try_new(id: impl Into<String>) -> Result<Self, RouteError> {
        let id = id.into();
        if id.starts_with(Self::RESERVED_PREFIX) {
            return Err(RouteError::ReservedElementId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
