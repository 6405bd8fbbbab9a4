//! Registration and route-config tests
//!
//! Covers the four route kinds, static path expansion through the DSL,
//! duplicate detection, and the sealed-registry contract.

use obelus::{
    component, App, ContentNode, ElementId, PageConfig, PathSpec, RenderMode, RouteBuilder,
    RouteError, SlugValue, StaticPath,
};
use pretty_assertions::assert_eq;

fn text_page(payload: &'static str) -> obelus::Component {
    component(move |_| ContentNode::new(payload))
}

fn page_config(render: RenderMode, path: &str) -> PageConfig {
    PageConfig {
        render,
        path: path.to_string(),
        component: text_page("page"),
        static_paths: None,
        disable_ssr: false,
    }
}

#[tokio::test]
async fn static_page_yields_one_entry() {
    // createPage({render:'static', path:'/test', component:C})
    let app = App::new(|mut builder| async move {
        builder.create_page(page_config(RenderMode::Static, "/test"))?;
        Ok(builder)
    });

    let config = app.get_route_config().await.unwrap();
    assert_eq!(config.len(), 1);

    let entry = &config[0];
    assert_eq!(entry.path, PathSpec::parse("/test").unwrap());
    assert_eq!(entry.path_pattern, None);
    assert_eq!(entry.elements.len(), 1);
    let info = entry.elements.get(&ElementId::page("/test")).unwrap();
    assert!(info.is_static);
    assert!(entry.route_is_static);
}

#[tokio::test]
async fn slugged_static_page_expands_each_tuple() {
    // createPage({render:'static', path:'/test/[a]/[b]',
    //             staticPaths:[['w','x'],['y','z']], component:C})
    let app = App::new(|mut builder| async move {
        builder.create_page(PageConfig {
            render: RenderMode::Static,
            path: "/test/[a]/[b]".to_string(),
            component: text_page("page"),
            static_paths: Some(vec![
                StaticPath::from(vec!["w", "x"]),
                StaticPath::from(vec!["y", "z"]),
            ]),
            disable_ssr: false,
        })?;
        Ok(builder)
    });

    let config = app.get_route_config().await.unwrap();
    assert_eq!(config.len(), 2);

    let pattern = PathSpec::parse("/test/[a]/[b]").unwrap();
    for (entry, path) in config.iter().zip(["/test/w/x", "/test/y/z"]) {
        assert_eq!(entry.path.render(), path);
        // Each expansion retains the original slugged pattern
        assert_eq!(entry.path_pattern.as_ref(), Some(&pattern));
        assert!(entry.elements.contains_key(&ElementId::page(path)));
    }
}

#[tokio::test]
async fn expanded_entries_carry_exact_slug_bindings() {
    let app = App::new(|mut builder| async move {
        builder.create_page(PageConfig {
            render: RenderMode::Static,
            path: "/shop/[category]/[item]".to_string(),
            component: text_page("page"),
            static_paths: Some(vec![
                StaticPath::from(vec!["tools", "saw"]),
                StaticPath::from(vec!["books", "atlas"]),
            ]),
            disable_ssr: false,
        })?;
        Ok(builder)
    });

    let matched = app.match_route("/shop/tools/saw").await.unwrap().unwrap();
    assert_eq!(matched.slugs.len(), 2);
    assert_eq!(
        matched.slugs.get("category"),
        Some(&SlugValue::One("tools".to_string()))
    );
    assert_eq!(
        matched.slugs.get("item"),
        Some(&SlugValue::One("saw".to_string()))
    );
}

#[test]
fn flat_static_path_is_a_one_tuple() {
    let mut builder = RouteBuilder::new();
    builder
        .create_page(PageConfig {
            render: RenderMode::Static,
            path: "/blog/[slug]".to_string(),
            component: text_page("page"),
            static_paths: Some(vec![StaticPath::from("hello"), StaticPath::from("world")]),
            disable_ssr: false,
        })
        .unwrap();
    let registry = builder.seal();
    let table = registry.route_table();
    let paths: Vec<String> = table.entries().iter().map(|e| e.path.render()).collect();
    assert_eq!(paths, vec!["/blog/hello", "/blog/world"]);
}

#[test]
fn static_path_values_are_sanitized() {
    let mut builder = RouteBuilder::new();
    builder
        .create_page(PageConfig {
            render: RenderMode::Static,
            path: "/releases/[tag]".to_string(),
            component: text_page("page"),
            static_paths: Some(vec![StaticPath::from("v1.2 beta")]),
            disable_ssr: false,
        })
        .unwrap();
    let registry = builder.seal();
    assert_eq!(registry.route_table().entries()[0].path.render(), "/releases/v12-beta");
}

#[test]
fn tuple_arity_must_match_slug_count_exactly() {
    let mut builder = RouteBuilder::new();
    let err = builder
        .create_page(PageConfig {
            render: RenderMode::Static,
            path: "/test/[a]/[b]".to_string(),
            component: text_page("page"),
            static_paths: Some(vec![StaticPath::from(vec!["w"])]),
            disable_ssr: false,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RouteError::StaticPathMismatch { expected: 2, got: 1, .. }
    ));
}

#[test]
fn duplicate_concrete_path_fails() {
    let mut builder = RouteBuilder::new();
    builder
        .create_page(PageConfig {
            render: RenderMode::Static,
            path: "/blog/[slug]".to_string(),
            component: text_page("page"),
            static_paths: Some(vec![StaticPath::from("same"), StaticPath::from("same")]),
            disable_ssr: false,
        })
        .map(|_| ())
        .unwrap_err();

    // Also across registrations
    let mut builder = RouteBuilder::new();
    builder
        .create_page(page_config(RenderMode::Static, "/about"))
        .unwrap();
    let err = builder
        .create_page(page_config(RenderMode::Static, "/about"))
        .unwrap_err();
    assert!(matches!(err, RouteError::DuplicateComponent(path) if path == "/about"));
}

#[test]
fn duplicate_dynamic_pattern_fails() {
    let mut builder = RouteBuilder::new();
    builder
        .create_page(page_config(RenderMode::Dynamic, "/users/[id]"))
        .unwrap();
    let err = builder
        .create_page(page_config(RenderMode::Dynamic, "/users/[id]"))
        .unwrap_err();
    assert!(matches!(err, RouteError::DuplicateRoute(pattern) if pattern == "/users/[id]"));
}

#[test]
fn malformed_pattern_fails_fast() {
    let mut builder = RouteBuilder::new();
    let err = builder
        .create_page(page_config(RenderMode::Dynamic, "/a//b"))
        .unwrap_err();
    assert!(matches!(err, RouteError::InvalidPath(_)));

    let err = builder
        .create_page(page_config(RenderMode::Dynamic, "/[...a]/[...b]"))
        .unwrap_err();
    assert!(matches!(err, RouteError::InvalidPath(_)));
}

#[tokio::test]
async fn route_config_is_structurally_stable() {
    let app = App::new(|mut builder| async move {
        builder.create_page(page_config(RenderMode::Static, "/test"))?;
        builder.create_page(page_config(RenderMode::Dynamic, "/users/[id]"))?;
        Ok(builder)
    });

    let first = app.get_route_config().await.unwrap();
    let second = app.get_route_config().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn pre_bound_slugs_reach_the_shared_component() {
    // One authored component serves every expanded literal path, seeing the
    // tuple values it was expanded with
    let app = App::new(|mut builder| async move {
        builder.create_page(PageConfig {
            render: RenderMode::Static,
            path: "/greet/[name]".to_string(),
            component: component(|props| {
                let name = props
                    .slugs
                    .get("name")
                    .and_then(SlugValue::as_one)
                    .unwrap_or("nobody");
                ContentNode::new(format!("hello {name}"))
            }),
            static_paths: Some(vec![StaticPath::from("ada"), StaticPath::from("grace")]),
            disable_ssr: false,
        })?;
        Ok(builder)
    });

    let rendered = app.render_route("/greet/ada", None, &[]).await.unwrap().unwrap();
    assert_eq!(
        rendered.elements.get(&ElementId::page("/greet/ada")).unwrap(),
        &ContentNode::new("hello ada")
    );

    let rendered = app.render_route("/greet/grace", None, &[]).await.unwrap().unwrap();
    assert_eq!(
        rendered.elements.get(&ElementId::page("/greet/grace")).unwrap(),
        &ContentNode::new("hello grace")
    );
}
