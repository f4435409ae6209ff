//! Full-router integration tests with both external dependencies simulated.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use corpus_rag::config::RagConfig;
use corpus_rag::server::{build_router, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration pointing both backends at mock servers.
fn config_for(qdrant_uri: &str, ollama_uri: &str, data_dir: &std::path::Path) -> RagConfig {
    let mut config = RagConfig::default();

    let trimmed = qdrant_uri.trim_start_matches("http://");
    let (host, port) = trimmed.split_once(':').expect("host:port uri");
    config.vector_db.host = host.to_string();
    config.vector_db.port = port.parse().expect("numeric port");

    config.llm.base_url = ollama_uri.to_string();
    config.llm.timeout_secs = 2;
    config.ingest.data_dir = data_dir.to_path_buf();
    config
}

/// Mount the collection-exists probe that `AppState::new` performs.
async fn mount_collection_probe(qdrant: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/collections/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .mount(qdrant)
        .await;
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn root_returns_liveness_banner() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn health_reports_both_backends_down() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    // Remove every mounted mock: both probes now come back as failures.
    qdrant.reset().await;
    ollama.reset().await;

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"qdrant": false, "ollama": false}));
}

#[tokio::test]
async fn health_reports_both_backends_up() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"collections": []}})),
        )
        .mount(&qdrant)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(&ollama)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let body = body_json(response).await;
    assert_eq!(body, json!({"qdrant": true, "ollama": true}));
}

#[tokio::test]
async fn query_answers_from_retrieved_context() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"embedding": [0.1, 0.2, 0.3]})),
        )
        .expect(1)
        .mount(&ollama)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/documents/points/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{
                "id": "5fbe4d49-6d2a-4dbd-9b5e-9cbdc8782198",
                "version": 0,
                "score": 0.88,
                "payload": {
                    "text": "Vacation accrues at 1.66 days per month.",
                    "metadata": {"filename": "handbook.txt", "chunk_id": 2, "area": "hr"}
                }
            }]
        })))
        .expect(1)
        .mount(&qdrant)
        .await;

    // The retrieved chunk text must appear in the generation prompt.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_string_contains("Vacation accrues at 1.66 days per month."))
        .and(body_string_contains("how does vacation accrue?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Vacation accrues monthly at 1.66 days."
        })))
        .expect(1)
        .mount(&ollama)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let request = Request::post("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"question": "how does vacation accrue?", "top_k": 3}).to_string(),
        ))
        .expect("request");

    let response = router.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["answer"], "Vacation accrues monthly at 1.66 days.");
    assert_eq!(body["sources"], json!([{"filename": "handbook.txt", "score": 0.88}]));
}

#[tokio::test]
async fn query_on_empty_collection_returns_no_sources() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"embedding": [0.1]})))
        .mount(&ollama)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/documents/points/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .mount(&qdrant)
        .await;

    // The generator still runs, with empty context.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "I do not have that information."
        })))
        .expect(1)
        .mount(&ollama)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let request = Request::post("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"question": "anything?"}).to_string()))
        .expect("request");

    let response = router.oneshot(request).await.expect("response");
    let body = body_json(response).await;

    assert_eq!(body["answer"], "I do not have that information.");
    assert_eq!(body["sources"], json!([]));
}

#[tokio::test]
async fn query_with_zero_top_k_skips_retrieval() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"embedding": [0.1]})))
        .mount(&ollama)
        .await;

    // No search mock: a search request would error the whole request.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "I do not have that information."
        })))
        .mount(&ollama)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let request = Request::post("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"question": "anything?", "top_k": 0}).to_string(),
        ))
        .expect("request");

    let response = router.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["sources"], json!([]));
}

#[tokio::test]
async fn query_fails_with_500_when_retrieval_fails() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    // Embedding backend rejects the request: the query path propagates.
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ollama)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let request = Request::post("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"question": "anything?"}).to_string()))
        .expect("request");

    let response = router.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "embedding_error");
}

fn multipart_request(filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "corpus-rag-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn upload_writes_file_and_ingests_it() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"embedding": [0.4, 0.5]})),
        )
        .expect(1)
        .mount(&ollama)
        .await;

    Mock::given(method("PUT"))
        .and(path("/collections/documents/points"))
        .and(body_string_contains("notes.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .expect(1)
        .mount(&qdrant)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let response = router
        .oneshot(multipart_request("notes.txt", b"remote work needs approval"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["files"],
        json!([{"filename": "notes.txt", "status": "processed"}])
    );

    // The raw file lands in the data directory before ingestion.
    let written = std::fs::read(dir.path().join("notes.txt")).expect("uploaded file on disk");
    assert_eq!(written, b"remote work needs approval");
}

#[tokio::test]
async fn upload_of_unsupported_format_stores_no_chunks() {
    let qdrant = MockServer::start().await;
    let ollama = MockServer::start().await;
    mount_collection_probe(&qdrant).await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ollama)
        .await;
    Mock::given(method("PUT"))
        .and(path("/collections/documents/points"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&qdrant)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&qdrant.uri(), &ollama.uri(), dir.path()))
        .await
        .expect("state");
    let router = build_router(state, 1024 * 1024);

    let response = router
        .oneshot(multipart_request("photo.png", &[0xFF, 0xD8, 0xFF]))
        .await
        .expect("response");

    // Silently skipped, still reported as processed.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["files"][0]["status"], "processed");
}
