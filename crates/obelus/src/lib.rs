// Obelus - declarative page/layout/API route engine
// Reconciles static, slug-expanded, dynamic, and wildcard routes into one
// queryable table and emits the build-time manifest for it.

pub mod app;
pub mod build;
pub mod component;
pub mod error;
pub mod expand;
pub mod layout;
pub mod matcher;
pub mod registry;
pub mod table;

// Re-export the path library
pub use obelus_router::{InvalidPathError, PathSegment, PathSpec, SlugMapping, SlugValue};

// Re-export core types and the registration DSL
pub use app::{App, OwnedRouteMatch, SNAPSHOT_ENV};
pub use build::{ApiRouteInfo, BuildConfig, BuildEntry, BuildInput, ModuleCollector};
pub use component::{
    api_handler, component, ApiHandler, ApiRequest, ApiResponse, BoxFuture, Component,
    ContentNode, ElementId, PageProps,
};
pub use error::RouteError;
pub use matcher::{Matcher, RenderedRoute, RouteExistence, RouteMatch};
pub use registry::{
    ApiConfig, LayoutConfig, PageConfig, Registry, RenderMode, RootConfig, RouteBuilder,
    RouteKind, StaticPath,
};
pub use table::{ElementInfo, RouteEntry, RouteTable};
