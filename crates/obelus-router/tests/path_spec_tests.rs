//! Integration tests for obelus-router
//!
//! Covers pattern parsing/rendering, the parse/render round-trip property,
//! and concrete path matching with slug extraction.

use obelus_router::{InvalidPathError, PathSegment, PathSpec, SlugValue};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_static_pattern() {
    let spec = PathSpec::parse("/test").unwrap();
    assert_eq!(
        spec.segments(),
        &[PathSegment::Literal("test".to_string())]
    );
    assert!(spec.is_literal());
    assert!(spec.slug_names().is_empty());
}

#[test]
fn test_parse_grouped_pattern() {
    let spec = PathSpec::parse("/test/[a]/[b]").unwrap();
    assert_eq!(spec.slug_names(), vec!["a", "b"]);
    assert_eq!(spec.group_count(), 2);
    assert_eq!(spec.wildcard_index(), None);
}

#[test]
fn test_parse_wildcard_pattern() {
    let spec = PathSpec::parse("/test/[...path]").unwrap();
    assert_eq!(spec.wildcard_index(), Some(1));
    assert_eq!(spec.slug_names(), vec!["path"]);
}

#[test]
fn test_root_pattern() {
    let spec = PathSpec::parse("/").unwrap();
    assert!(spec.is_root());
    assert_eq!(spec.render(), "/");
}

#[test]
fn test_reparse_of_render_is_identity() {
    let patterns = [
        "/",
        "/about",
        "/blog/[slug]",
        "/shop/[category]/[item]",
        "/docs/[...path]",
        "/files/[...dirs]/[name]",
        "/a/[b]/c/[...d]/e",
    ];
    for pattern in patterns {
        let parsed = PathSpec::parse(pattern).unwrap();
        let reparsed = PathSpec::parse(&parsed.render()).unwrap();
        assert_eq!(parsed, reparsed, "round-trip failed for {pattern}");
    }
}

#[test]
fn test_invalid_patterns() {
    assert!(matches!(
        PathSpec::parse("/a//b"),
        Err(InvalidPathError::EmptySegment { .. })
    ));
    assert!(matches!(
        PathSpec::parse("/[...a]/x/[...b]"),
        Err(InvalidPathError::MultipleWildcards { .. })
    ));
    assert!(matches!(
        PathSpec::parse(""),
        Err(InvalidPathError::MissingLeadingSlash { .. })
    ));
}

#[test]
fn test_match_literal_spec_yields_empty_mapping() {
    let spec = PathSpec::parse("/blog/posts").unwrap();
    assert_eq!(spec.matches("/blog/posts").unwrap().len(), 0);
}

#[test]
fn test_match_groups_extract_in_name_order() {
    let spec = PathSpec::parse("/shop/[category]/[item]").unwrap();
    let slugs = spec.matches("/shop/tools/saw").unwrap();
    assert_eq!(slugs.len(), 2);
    assert_eq!(
        slugs.get("category"),
        Some(&SlugValue::One("tools".to_string()))
    );
    assert_eq!(slugs.get("item"), Some(&SlugValue::One("saw".to_string())));
}

#[test]
fn test_match_wildcard_in_middle() {
    let spec = PathSpec::parse("/a/[...mid]/z").unwrap();

    let slugs = spec.matches("/a/b/c/d/z").unwrap();
    assert_eq!(
        slugs.get("mid"),
        Some(&SlugValue::Many(vec![
            "b".to_string(),
            "c".to_string(),
            "d".to_string()
        ]))
    );

    let slugs = spec.matches("/a/z").unwrap();
    assert_eq!(slugs.get("mid"), Some(&SlugValue::Many(Vec::new())));

    assert!(spec.matches("/a").is_none());
    assert!(spec.matches("/a/b/c").is_none(), "tail literal must match");
}

#[test]
fn test_match_arity_mismatch_is_none() {
    let spec = PathSpec::parse("/users/[id]").unwrap();
    assert!(spec.matches("/users").is_none());
    assert!(spec.matches("/users/1/extra").is_none());
}
