//! Fake ESGF facet search endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1, driven by its own tokio runtime so that the blocking
//! `FacetSearch` client can be called from a plain `#[test]`. Serves:
//! - `GET /esg-search?project=..&limit=0&facets=a,b`: the configured facet
//!   counts of that project, restricted to the requested facets
//!
//! Failures are injected with [`FakeFacetApi::fail_next`] and
//! [`FakeFacetApi::serve_html_next`]; every request's
//! query parameters are recorded for inspection.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeFacetApi::start().unwrap();
//! api.serve_project("CMIP6", serde_json::json!({"source_id": ["CESM2", 12]}));
//! let search = FacetSearch::new(api.base_url(), std::time::Duration::from_secs(5)).unwrap();
//! ```

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    /// Per-project `facet_fields` objects.
    projects: HashMap<String, Map<String, Value>>,
    /// Statuses returned, in order, before any successful response.
    failures: VecDeque<StatusCode>,
    /// Bodies answered with `200 OK` as `text/html`, in order, after any
    /// failures.
    html_bodies: VecDeque<String>,
    requests: Vec<HashMap<String, String>>,
}

/// Handle to the running fake facet search server.
pub struct FakeFacetApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
    _runtime: tokio::runtime::Runtime,
}

impl FakeFacetApi {
    /// Start the server on a random port. Returns once it is listening.
    pub fn start() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let listener = runtime.block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/esg-search", get(facet_search))
            .with_state(state.clone());

        runtime.spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            addr,
            state,
            _runtime: runtime,
        })
    }

    /// Search URL to hand to `FacetSearch` (e.g. `http://127.0.0.1:PORT/esg-search`).
    pub fn base_url(&self) -> String {
        format!("http://{}/esg-search", self.addr)
    }

    /// Serve `facet_fields` (a JSON object of facet → `[term, count, ...]`)
    /// for `project`.
    pub fn serve_project(&self, project: &str, facet_fields: Value) {
        let fields = match facet_fields {
            Value::Object(map) => map,
            other => panic!("facet_fields must be a JSON object, got {other}"),
        };
        self.state
            .lock()
            .unwrap()
            .projects
            .insert(project.to_string(), fields);
    }

    /// Answer the next `times` requests with `status`.
    pub fn fail_next(&self, status: u16, times: usize) {
        let status = StatusCode::from_u16(status).unwrap();
        let mut state = self.state.lock().unwrap();
        state.failures.extend(std::iter::repeat(status).take(times));
    }

    /// Answer the next request with `200 OK` and an HTML page instead of JSON.
    pub fn serve_html_next(&self, body: &str) {
        self.state
            .lock()
            .unwrap()
            .html_bodies
            .push_back(body.to_string());
    }

    /// Query parameters of every request received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().unwrap().requests.clone()
    }
}

/// Facet counts for the two projects of [`small_plan`](crate::common::small_plan).
pub fn fake_facet_fields(project: &str) -> Value {
    match project {
        "CMIP5" => json!({
            "model": ["CCSM4", 310, "MIROC5", 122],
            "variable": ["tas", 9001, "pr", 8700]
        }),
        "CMIP6" => json!({
            "source_id": ["CESM2", 5000, "CESM2-WACCM", 2100, "MIROC6", 4300],
            "variable_id": ["tas", 20000]
        }),
        other => panic!("no fake facet fields for {other}"),
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn facet_search(
    State(state): State<Arc<Mutex<ApiState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(params.clone());

    if let Some(status) = state.failures.pop_front() {
        return status.into_response();
    }
    if let Some(body) = state.html_bodies.pop_front() {
        return (StatusCode::OK, [(header::CONTENT_TYPE, "text/html")], body).into_response();
    }

    let requested: Vec<&str> = params
        .get("facets")
        .map(|f| f.split(',').collect())
        .unwrap_or_default();
    let facet_fields: Map<String, Value> = params
        .get("project")
        .and_then(|p| state.projects.get(p))
        .map(|fields| {
            fields
                .iter()
                .filter(|(facet, _)| requested.contains(&facet.as_str()))
                .map(|(facet, values)| (facet.clone(), values.clone()))
                .collect()
        })
        .unwrap_or_default();

    Json(json!({
        "responseHeader": {"status": 0},
        "response": {"numFound": 0, "docs": []},
        "facet_counts": {"facet_queries": {}, "facet_fields": facet_fields}
    }))
    .into_response()
}
