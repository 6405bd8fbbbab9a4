//! Segment classification for route patterns
//!
//! Pure functional parsing of pattern segments into typed variants.
//! All functions are **pure**: same input → same output, no side effects.

use serde::{Deserialize, Serialize};

/// One segment of a route pattern
///
/// Sum type over the three segment kinds a pattern may contain.
///
/// # Examples
///
/// ```
/// use obelus_router::PathSegment;
///
/// // Literal segment
/// let seg = PathSegment::classify("about");
/// assert!(matches!(seg, PathSegment::Literal(_)));
///
/// // Group: captures exactly one path component
/// let seg = PathSegment::classify("[id]");
/// assert!(matches!(seg, PathSegment::Group(_)));
///
/// // Wildcard: captures zero-or-more components
/// let seg = PathSegment::classify("[...rest]");
/// assert!(matches!(seg, PathSegment::Wildcard(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum PathSegment {
    /// Fixed text segment
    Literal(String),
    /// Named segment capturing exactly one path component: `[name]`
    Group(String),
    /// Named segment capturing zero-or-more components: `[...name]`
    Wildcard(String),
}

impl PathSegment {
    /// Classifies a raw segment into a pattern segment (pure function)
    ///
    /// # Parsing Rules (evaluated in order)
    ///
    /// 1. **Wildcard**: `[...name]`
    /// 2. **Group**: `[name]`
    /// 3. **Literal**: any other text
    ///
    /// # Examples
    ///
    /// ```
    /// use obelus_router::PathSegment;
    ///
    /// assert_eq!(PathSegment::classify("blog"), PathSegment::Literal("blog".into()));
    /// assert_eq!(PathSegment::classify("[slug]"), PathSegment::Group("slug".into()));
    /// assert_eq!(PathSegment::classify("[...path]"), PathSegment::Wildcard("path".into()));
    /// ```
    pub fn classify(segment: &str) -> Self {
        match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            Some(inner) => match inner.strip_prefix("...") {
                Some(name) => PathSegment::Wildcard(name.to_string()),
                None => PathSegment::Group(inner.to_string()),
            },
            None => PathSegment::Literal(segment.to_string()),
        }
    }

    /// Renders the segment back to its pattern form (exact inverse of `classify`)
    pub fn render(&self) -> String {
        match self {
            PathSegment::Literal(text) => text.clone(),
            PathSegment::Group(name) => format!("[{}]", name),
            PathSegment::Wildcard(name) => format!("[...{}]", name),
        }
    }

    /// The slug name, if this segment is dynamic
    pub fn slug_name(&self) -> Option<&str> {
        match self {
            PathSegment::Literal(_) => None,
            PathSegment::Group(name) | PathSegment::Wildcard(name) => Some(name),
        }
    }

    /// Whether this segment is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, PathSegment::Literal(_))
    }

    /// Whether this segment is a wildcard
    pub fn is_wildcard(&self) -> bool {
        matches!(self, PathSegment::Wildcard(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_literal() {
        assert_eq!(
            PathSegment::classify("about"),
            PathSegment::Literal("about".to_string())
        );
    }

    #[test]
    fn classify_group() {
        assert_eq!(
            PathSegment::classify("[id]"),
            PathSegment::Group("id".to_string())
        );
    }

    #[test]
    fn classify_wildcard() {
        assert_eq!(
            PathSegment::classify("[...slug]"),
            PathSegment::Wildcard("slug".to_string())
        );
    }

    #[test]
    fn render_is_inverse_of_classify() {
        for raw in ["about", "[id]", "[...slug]", "hello-world"] {
            assert_eq!(PathSegment::classify(raw).render(), raw);
        }
    }

    #[test]
    fn unterminated_bracket_is_literal() {
        assert!(PathSegment::classify("[id").is_literal());
        assert!(PathSegment::classify("id]").is_literal());
    }
}
