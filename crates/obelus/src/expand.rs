//! Static path expansion
//!
//! A slugged static page declares concrete value tuples; each tuple is
//! expanded into one fully-literal path plus the slug bindings that produced
//! it. The wildcard may sit anywhere in the pattern, so expansion reserves
//! enough trailing tuple values for the slugs that come after it before
//! letting the wildcard consume the middle.

use obelus_router::{PathSegment, PathSpec, SlugMapping, SlugValue};

use crate::error::RouteError;

/// Sanitizes one declared slug value: `.` stripped, spaces become `-`
pub fn sanitize_slug_value(value: &str) -> String {
    value.replace('.', "").replace(' ', "-")
}

/// A fully-literal path produced by expansion
///
/// Keeps the `original` (slugged) spec alongside the literalized one:
/// layout resolution must walk *pattern* prefixes, never literalized ones,
/// so sibling concrete paths correctly share a layout chain.
#[derive(Debug, Clone)]
pub struct ExpandedPath {
    /// The literal path, e.g. `/test/w/x`
    pub literal: PathSpec,
    /// The slugged pattern it came from, e.g. `/test/[a]/[b]`
    pub original: PathSpec,
    /// Slug name → value(s) consumed from the tuple
    pub slugs: SlugMapping,
}

/// Expands one tuple of per-slug values against a pattern
///
/// Literal segments pass through unchanged; a group consumes exactly one
/// tuple value; the wildcard consumes all values from the cursor up to
/// `tuple len − (slugs after the wildcard)`.
///
/// # Errors
///
/// [`RouteError::StaticPathMismatch`] when the tuple arity does not fit:
/// for patterns without a wildcard the tuple length must equal the slug
/// count exactly; with a wildcard it must be at least the non-wildcard slug
/// count.
pub fn expand_tuple(spec: &PathSpec, values: &[String]) -> Result<ExpandedPath, RouteError> {
    let group_count = spec.group_count();
    let has_wildcard = spec.wildcard_index().is_some();

    let arity_ok = if has_wildcard {
        values.len() >= group_count
    } else {
        values.len() == group_count
    };
    if !arity_ok {
        return Err(RouteError::StaticPathMismatch {
            pattern: spec.render(),
            expected: group_count,
            got: values.len(),
        });
    }

    let mut literal = Vec::with_capacity(values.len());
    let mut slugs = SlugMapping::new();
    let mut cursor = 0usize;

    for (idx, segment) in spec.segments().iter().enumerate() {
        match segment {
            PathSegment::Literal(text) => literal.push(PathSegment::Literal(text.clone())),
            PathSegment::Group(name) => {
                let value = sanitize_slug_value(&values[cursor]);
                cursor += 1;
                literal.push(PathSegment::Literal(value.clone()));
                slugs.insert(name.clone(), SlugValue::One(value));
            }
            PathSegment::Wildcard(name) => {
                // Reserve one tuple value for each slug after the wildcard
                let trailing = spec.segments()[idx + 1..]
                    .iter()
                    .filter(|s| s.slug_name().is_some())
                    .count();
                let take_until = values.len() - trailing;
                let consumed: Vec<String> = values[cursor..take_until]
                    .iter()
                    .map(|v| sanitize_slug_value(v))
                    .collect();
                cursor = take_until;
                for value in &consumed {
                    literal.push(PathSegment::Literal(value.clone()));
                }
                slugs.insert(name.clone(), SlugValue::Many(consumed));
            }
        }
    }

    let literal = PathSpec::from_segments(literal)?;
    Ok(ExpandedPath {
        literal,
        original: spec.clone(),
        slugs,
    })
}
