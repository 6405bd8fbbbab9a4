//! Configuration lifecycle tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use obelus::{component, App, ContentNode, PageConfig, RenderMode, RouteError};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn static_page(path: &str) -> PageConfig {
    PageConfig {
        render: RenderMode::Static,
        path: path.to_string(),
        component: component(|_| ContentNode::new("page")),
        static_paths: None,
        disable_ssr: false,
    }
}

#[tokio::test]
async fn configuration_callback_runs_exactly_once() {
    init_tracing();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);

    let app = Arc::new(App::new(move |mut builder| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            // Yield so concurrent callers pile up on the same init
            tokio::task::yield_now().await;
            builder.create_page(static_page("/test"))?;
            Ok(builder)
        }
    }));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = Arc::clone(&app);
            tokio::spawn(async move { app.ready().await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(app.get_route_config().await.unwrap().len(), 1);
}

#[tokio::test]
async fn callback_failure_surfaces_and_closes_configuration() {
    let app = App::new(|mut builder| async move {
        builder.create_page(static_page("/dup"))?;
        builder.create_page(static_page("/dup"))?;
        Ok(builder)
    });

    let err = app.ready().await.unwrap_err();
    assert!(matches!(err, RouteError::DuplicateComponent(_)));

    // The callback was consumed; later calls report the closed phase
    let err = app.ready().await.unwrap_err();
    assert!(matches!(err, RouteError::ConfigurationClosed));
}

#[tokio::test]
async fn empty_configuration_is_valid() {
    let app = App::new(|builder| async move { Ok(builder) });
    app.ready().await.unwrap();
    assert!(app.get_route_config().await.unwrap().is_empty());
    assert!(!app.has_404().await.unwrap());
    assert!(app.match_route("/anything").await.unwrap().is_none());
}
