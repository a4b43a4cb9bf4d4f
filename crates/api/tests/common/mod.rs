#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Map, Value};
use sqlx::PgPool;
use tempfile::TempDir;
use thermoscan_core::storage::UploadStore;
use thermoscan_core::thermal::{
    AnalysisError, AnalyzerConfig, BoundingBox, ThermalAnalyzer, ThermalFinding,
};
use tower::ServiceExt;

use thermoscan_api::config::ServerConfig;
use thermoscan_api::router::build_app_router;
use thermoscan_api::state::AppState;
use thermoscan_api::thermal::ThermalService;

pub const BOUNDARY: &str = "thermoscan-test-boundary";

// ---------------------------------------------------------------------------
// Stub analyzer
// ---------------------------------------------------------------------------

/// Records the paths it is called with and answers with a fixed result.
pub struct StubAnalyzer {
    outcome: fn() -> Result<ThermalFinding, AnalysisError>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl StubAnalyzer {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::with(|| Ok(sample_finding())))
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::with(|| {
            Err(AnalysisError::Failed {
                exit_code: 2,
                stderr: "Traceback: boom".into(),
            })
        }))
    }

    fn with(outcome: fn() -> Result<ThermalFinding, AnalysisError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ThermalAnalyzer for StubAnalyzer {
    fn label(&self) -> &str {
        "stub.py"
    }

    async fn compare(
        &self,
        baseline: &Path,
        candidate: &Path,
    ) -> Result<ThermalFinding, AnalysisError> {
        thermoscan_core::thermal::validate_inputs(baseline, candidate)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((baseline.to_path_buf(), candidate.to_path_buf()));
        (self.outcome)()
    }
}

/// Never finishes within a test's lifetime; used to abandon requests
/// mid-analysis.
pub struct SlowAnalyzer;

#[async_trait::async_trait]
impl ThermalAnalyzer for SlowAnalyzer {
    fn label(&self) -> &str {
        "slow.py"
    }

    async fn compare(
        &self,
        _baseline: &Path,
        _candidate: &Path,
    ) -> Result<ThermalFinding, AnalysisError> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Ok(sample_finding())
    }
}

pub fn sample_finding() -> ThermalFinding {
    let mut info = Map::new();
    info.insert("boxFault".into(), json!("loose_joint"));
    ThermalFinding {
        prob: 0.82,
        hist_distance: 0.31,
        dv95: 12.4,
        warm_fraction: 0.05,
        image_width: 640,
        image_height: 480,
        fault_type: "loose_joint".into(),
        annotated: None,
        boxes: vec![BoundingBox { x: 1, y: 2, w: 3, h: 4 }],
        box_info: vec![info],
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` rooted at `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    let mut analysis = AnalyzerConfig::with_base_dir(upload_dir);
    analysis.scratch_dir = upload_dir.to_path_buf();
    analysis.timeout = Duration::from_secs(5);

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 5 * 1024 * 1024,
        upload_dir: upload_dir.to_path_buf(),
        analysis,
    }
}

/// A fully wired application over a temporary upload directory.
pub struct TestApp {
    pub state: AppState,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        Self::with_analyzer(pool, StubAnalyzer::succeeding())
    }

    pub fn with_analyzer(pool: PgPool, analyzer: Arc<dyn ThermalAnalyzer>) -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let config = test_config(uploads.path());
        let store = UploadStore::new(uploads.path());

        let state = AppState {
            pool,
            config: Arc::new(config),
            uploads: store.clone(),
            thermal: Arc::new(ThermalService::new(analyzer, store)),
        };
        Self { state, uploads }
    }

    /// The production router and middleware stack over this app's state.
    pub fn router(&self) -> Router {
        build_app_router(self.state.clone(), &self.state.config)
    }

    pub fn upload_dir(&self) -> &Path {
        self.uploads.path()
    }

    /// Write a file into the upload directory and return its path.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.uploads.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Files currently in the upload directory.
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.uploads.path()).unwrap().count()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn json_request(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

/// One part of a multipart body: `(name, Some(file name), bytes)` for files,
/// `(name, None, text)` for plain fields.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_transformer(app: Router, no: &str) -> Value {
    let response = post_json(
        app,
        "/api/transformers",
        json!({"transformerNo": no, "region": "Kandy", "type": "Distribution"}),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}

/// Register a transformer and one inspection on it, returning the
/// inspection id.
pub async fn create_inspection(test: &TestApp, transformer_no: &str) -> i64 {
    create_transformer(test.router(), transformer_no).await;
    let response = post_json(
        test.router(),
        "/api/inspections",
        json!({"transformerNo": transformer_no, "branch": "Kandy", "date": "2025-03-14", "time": "09:30"}),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Upload an image for an inspection, returning the new image id.
pub async fn upload_image(test: &TestApp, inspection_id: i64, file_name: &str, bytes: &[u8]) -> i64 {
    let id = inspection_id.to_string();
    let response = post_multipart(
        test.router(),
        "/api/images",
        &[
            ("inspectionId", None, id.as_bytes()),
            ("file", Some(file_name), bytes),
        ],
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
