#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds the real router over an in-memory store seeded from the demo
//! fixture file, so tests exercise the same code the server runs.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use showcase_kernel::block::{BlockRegistry, dynamic_content};
use showcase_kernel::content::{ContentStore, MemoryContentStore};
use showcase_kernel::fixtures::Fixtures;
use showcase_kernel::render::DEFAULT_NO_RESULTS_TEXT;
use showcase_kernel::routes;
use showcase_kernel::state::AppState;
use showcase_kernel::taxonomy::TaxonomyRegistry;

/// Path of the demo fixture file.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/showcase.json")
}

pub fn fixtures() -> Fixtures {
    Fixtures::load(&fixture_path()).expect("demo fixtures load")
}

/// In-memory store holding the demo items.
pub fn memory_store() -> MemoryContentStore {
    fixtures().into_store()
}

/// Taxonomy registry with core types plus the demo fixture's.
pub fn taxonomies() -> TaxonomyRegistry {
    let registry = TaxonomyRegistry::with_core_types();
    fixtures().register_into(&registry);
    registry.apply_term_counts(&memory_store().term_counts());
    registry
}

/// Test application wrapping the real router.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    /// App over the demo fixtures.
    pub fn new() -> Self {
        let state = AppState::from_fixtures(fixtures(), DEFAULT_NO_RESULTS_TEXT)
            .expect("state from fixtures");
        Self::from_state(state)
    }

    /// App over an arbitrary store, with the demo taxonomies.
    pub fn with_store(store: Arc<dyn ContentStore>) -> Self {
        let mut blocks = BlockRegistry::new();
        blocks
            .register(dynamic_content::definition(DEFAULT_NO_RESULTS_TEXT))
            .expect("register showcase block");
        Self::from_state(AppState::from_parts(blocks, store, taxonomies()))
    }

    /// App over already-built state.
    pub fn from_state(state: AppState) -> Self {
        let router = routes::app(state.clone());
        Self { state, router }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// Read a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
