//! Route pattern specifications
//!
//! A `PathSpec` is the parsed form of a pattern string such as
//! `/blog/[slug]` or `/docs/[...path]/edit`. Parsing and rendering are
//! exact inverses, and all operations here are **pure**.

use serde::{Deserialize, Serialize};

use crate::error::InvalidPathError;
use crate::segment::PathSegment;

/// An ordered list of pattern segments representing one route pattern
///
/// Invariants (enforced by [`PathSpec::parse`]):
/// - at most one wildcard segment;
/// - no empty segment (the root `/` parses to an empty segment list).
///
/// # Examples
///
/// ```
/// use obelus_router::{PathSpec, PathSegment};
///
/// let spec = PathSpec::parse("/blog/[slug]").unwrap();
/// assert_eq!(spec.segments().len(), 2);
/// assert_eq!(spec.render(), "/blog/[slug]");
/// assert_eq!(spec.slug_names(), vec!["slug"]);
///
/// let root = PathSpec::parse("/").unwrap();
/// assert!(root.is_root());
/// assert_eq!(root.render(), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathSpec {
    segments: Vec<PathSegment>,
}

impl PathSpec {
    /// Parses a pattern string into a `PathSpec`
    ///
    /// Splits on `/`; `[name]` becomes a group, `[...name]` a wildcard,
    /// anything else a literal. The root `/` parses to an empty segment
    /// list.
    ///
    /// # Errors
    ///
    /// - [`InvalidPathError::MissingLeadingSlash`] if the pattern does not
    ///   start with `/`
    /// - [`InvalidPathError::EmptySegment`] on an empty non-root segment
    ///   (`//`, trailing `/`)
    /// - [`InvalidPathError::MultipleWildcards`] on more than one
    ///   `[...name]` segment
    pub fn parse(pattern: &str) -> Result<Self, InvalidPathError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(InvalidPathError::MissingLeadingSlash {
                pattern: pattern.to_string(),
            });
        };

        // Root parses to the empty segment list
        if rest.is_empty() {
            return Ok(Self { segments: Vec::new() });
        }

        let mut segments = Vec::new();
        let mut wildcard_seen = false;

        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(InvalidPathError::EmptySegment {
                    pattern: pattern.to_string(),
                });
            }

            let segment = PathSegment::classify(raw);
            if segment.is_wildcard() {
                if wildcard_seen {
                    return Err(InvalidPathError::MultipleWildcards {
                        pattern: pattern.to_string(),
                    });
                }
                wildcard_seen = true;
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Builds a spec directly from segments, re-checking the invariants
    pub fn from_segments(segments: Vec<PathSegment>) -> Result<Self, InvalidPathError> {
        let spec = Self { segments };
        let rendered = spec.render();
        if spec.segments.iter().filter(|s| s.is_wildcard()).count() > 1 {
            return Err(InvalidPathError::MultipleWildcards { pattern: rendered });
        }
        if spec
            .segments
            .iter()
            .any(|s| matches!(s, PathSegment::Literal(text) if text.is_empty()))
        {
            return Err(InvalidPathError::EmptySegment { pattern: rendered });
        }
        Ok(spec)
    }

    /// Renders the spec back to its pattern string (exact inverse of `parse`)
    ///
    /// # Examples
    ///
    /// ```
    /// use obelus_router::PathSpec;
    ///
    /// let spec = PathSpec::parse("/shop/[category]/[...rest]").unwrap();
    /// assert_eq!(spec.render(), "/shop/[category]/[...rest]");
    /// ```
    pub fn render(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&segment.render());
        }
        out
    }

    /// The ordered segments of this spec
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the root pattern `/`
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether every segment is a literal (no slugs, no wildcard)
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(PathSegment::is_literal)
    }

    /// All slug names (groups and the wildcard), in pattern order
    pub fn slug_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(PathSegment::slug_name)
            .collect()
    }

    /// Number of group segments
    pub fn group_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::Group(_)))
            .count()
    }

    /// Position of the wildcard segment, if any
    pub fn wildcard_index(&self) -> Option<usize> {
        self.segments.iter().position(PathSegment::is_wildcard)
    }

    /// Whether `self` is a segment-wise prefix of `other` (inclusive)
    pub fn is_prefix_of(&self, other: &PathSpec) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Iterates every prefix of this spec, root-first and inclusive
    ///
    /// For `/a/b` this yields `/`, `/a`, `/a/b`. Layout resolution walks
    /// this order because the render layer nests layouts outward-to-inward.
    ///
    /// # Examples
    ///
    /// ```
    /// use obelus_router::PathSpec;
    ///
    /// let spec = PathSpec::parse("/docs/[section]").unwrap();
    /// let prefixes: Vec<String> = spec.prefixes().map(|p| p.render()).collect();
    /// assert_eq!(prefixes, vec!["/", "/docs", "/docs/[section]"]);
    /// ```
    pub fn prefixes(&self) -> impl Iterator<Item = PathSpec> + '_ {
        (0..=self.segments.len()).map(move |len| PathSpec {
            segments: self.segments[..len].to_vec(),
        })
    }
}

impl std::fmt::Display for PathSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
