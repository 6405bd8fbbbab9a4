//! Concrete path matching and slug binding extraction
//!
//! Matches a request path against a [`PathSpec`] and extracts the slug
//! bindings. The wildcard segment may occur at **any** position, so the
//! segments after it are matched from the tail of the path first and the
//! wildcard takes whatever remains in the middle (possibly nothing).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::segment::PathSegment;
use crate::spec::PathSpec;

/// The value bound to one slug name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlugValue {
    /// A group binding: exactly one path component
    One(String),
    /// A wildcard binding: zero-or-more components in path order
    Many(Vec<String>),
}

impl SlugValue {
    /// The single component of a group binding
    pub fn as_one(&self) -> Option<&str> {
        match self {
            SlugValue::One(value) => Some(value),
            SlugValue::Many(_) => None,
        }
    }

    /// The component list of a wildcard binding
    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            SlugValue::One(_) => None,
            SlugValue::Many(values) => Some(values),
        }
    }
}

/// Slug name → bound value, ordered by name for deterministic output
pub type SlugMapping = BTreeMap<String, SlugValue>;

/// Splits a request path into its non-empty components
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl PathSpec {
    /// Matches a concrete request path against this spec
    ///
    /// Returns `None` on any arity or literal mismatch. Groups bind one
    /// component each; the (at most one) wildcard binds every component
    /// not consumed by literals/groups before or after it.
    ///
    /// # Examples
    ///
    /// ```
    /// use obelus_router::{PathSpec, SlugValue};
    ///
    /// let spec = PathSpec::parse("/docs/[...path]/edit").unwrap();
    /// let slugs = spec.matches("/docs/a/b/edit").unwrap();
    /// assert_eq!(
    ///     slugs.get("path"),
    ///     Some(&SlugValue::Many(vec!["a".into(), "b".into()]))
    /// );
    ///
    /// // The wildcard may bind zero components
    /// assert!(spec.matches("/docs/edit").is_some());
    /// assert!(spec.matches("/docs").is_none());
    /// ```
    pub fn matches(&self, path: &str) -> Option<SlugMapping> {
        let actual = split_path(path);
        let segments = self.segments();

        match self.wildcard_index() {
            None => {
                if actual.len() != segments.len() {
                    return None;
                }
                let mut slugs = SlugMapping::new();
                for (segment, component) in segments.iter().zip(&actual) {
                    bind_segment(segment, component, &mut slugs)?;
                }
                Some(slugs)
            }
            Some(wildcard_at) => {
                let fixed = segments.len() - 1;
                if actual.len() < fixed {
                    return None;
                }

                let mut slugs = SlugMapping::new();
                let trailing = segments.len() - wildcard_at - 1;
                let tail_start = actual.len() - trailing;

                // Segments before the wildcard consume from the front
                for (segment, component) in segments[..wildcard_at].iter().zip(&actual) {
                    bind_segment(segment, component, &mut slugs)?;
                }

                // Segments after the wildcard consume from the tail
                for (segment, component) in
                    segments[wildcard_at + 1..].iter().zip(&actual[tail_start..])
                {
                    bind_segment(segment, component, &mut slugs)?;
                }

                // The wildcard takes the middle, in original order
                if let PathSegment::Wildcard(name) = &segments[wildcard_at] {
                    let middle = actual[wildcard_at..tail_start]
                        .iter()
                        .map(|s| s.to_string())
                        .collect();
                    slugs.insert(name.clone(), SlugValue::Many(middle));
                }

                Some(slugs)
            }
        }
    }
}

/// Binds a non-wildcard segment against one path component
fn bind_segment(segment: &PathSegment, component: &str, slugs: &mut SlugMapping) -> Option<()> {
    match segment {
        PathSegment::Literal(text) => (text == component).then_some(()),
        PathSegment::Group(name) => {
            slugs.insert(name.clone(), SlugValue::One(component.to_string()));
            Some(())
        }
        // Callers route wildcards through the two-sided walk above
        PathSegment::Wildcard(_) => None,
    }
}
