//! Layout resolution
//!
//! A layout applies to every route sharing its path prefix. Resolution
//! walks the prefixes of the *pattern* spec root-first: for expanded
//! static entries this must be the original slugged spec, never the
//! literalized one, so sibling concrete paths share the same chain.

use obelus_router::PathSpec;

use crate::registry::Registry;

/// Ordered layout prefixes applying to `spec`, root-first and inclusive
///
/// The render layer nests these outward-to-inward, page innermost.
pub fn layouts_for(registry: &Registry, spec: &PathSpec) -> Vec<String> {
    spec.prefixes()
        .map(|prefix| prefix.render())
        .filter(|path| registry.layout(path).is_some())
        .collect()
}
