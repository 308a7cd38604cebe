//! Unit tests for CLI commands.

use super::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PACKUMENT_CID: &str = "QmT78zSuBmuS4z925WZfrqQ1qHaJ56DQaTfyMUF7F8ff5o";
const TARBALL_CID: &str = "bafybeifprvl6iqk3oj6a5yw74v5ggmdc7orhyibcz437kdont5tuj7pjfc";

/// Create a temporary directory for testing
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test command context in a temporary directory
fn create_test_context(temp_dir: &TempDir, endpoint: Option<String>) -> CommandContext {
    CommandContext {
        cwd: Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap(),
        output: crate::output::OutputHandler::new(),
        options: FetchOptions {
            endpoint_url: endpoint,
            ..FetchOptions::default()
        },
        fetch: Arc::new(FetchContext::default()),
    }
}

/// Mock daemon serving one IPNS name, its packument and one tarball
async fn mock_daemon(tarball: &[u8]) -> MockServer {
    let server = MockServer::start().await;
    let packument = serde_json::json!({
        "name": "some-module",
        "dist-tags": { "latest": "1.1.0" },
        "versions": {
            "1.0.0": { "name": "some-module", "version": "1.0.0", "dist": {} },
            "1.1.0": { "name": "some-module", "version": "1.1.0", "dist": { "cid": TARBALL_CID } }
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/v0/name/resolve"))
        .and(query_param("arg", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Path": format!("/ipfs/{}", PACKUMENT_CID)
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .and(query_param("arg", format!("/ipfs/{}", PACKUMENT_CID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(packument))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .and(query_param("arg", format!("/ipfs/{}", TARBALL_CID)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tarball.to_vec()))
        .mount(&server)
        .await;

    server
}

#[test]
fn test_suggest_protocol() {
    assert_eq!(suggest_protocol("ipsf"), Some("ipfs"));
    assert_eq!(suggest_protocol("IPNSS"), Some("ipns"));
    assert_eq!(suggest_protocol("ipf"), Some("ipfs"));

    // Exact and unrelated inputs get no suggestion
    assert_eq!(suggest_protocol("ipfs"), None);
    assert_eq!(suggest_protocol("https"), None);
}

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("ipfs", "ipfs"), 0);
    assert_eq!(edit_distance("ipfs", "ipns"), 1);
    assert_eq!(edit_distance("ipsf", "ipfs"), 2);
}

#[test]
fn test_parse_spec() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, None);

    let spec = parse_spec("ipns://example.com#^1.0.0", &ctx).unwrap();
    assert_eq!(spec.protocol(), pea_ipfs::Protocol::Ipns);

    let err = parse_spec("ipsf://example.com", &ctx).unwrap_err();
    assert_eq!(err.code(), "EINVALIDSPEC");
}

#[test]
fn test_render_json() {
    let rendered = render_json(&serde_json::json!({ "name": "some-module" })).unwrap();
    assert!(rendered.contains("\"name\": \"some-module\""));
}

#[tokio::test]
async fn test_missing_endpoint() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, None);

    let err = packument::execute("ipns://example.com", &ctx).await.unwrap_err();
    assert_eq!(err.code(), "ENOIPFSURL");
}

#[tokio::test]
async fn test_manifest_command() {
    let server = mock_daemon(b"tarball").await;
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, Some(server.uri()));

    manifest::execute("ipns://example.com#^1.0.0", &ctx).await.unwrap();
    packument::execute("ipns://example.com", &ctx).await.unwrap();

    // Direct requests have no manifest
    manifest::execute(&format!("ipfs://{}", TARBALL_CID), &ctx).await.unwrap();
}

#[tokio::test]
async fn test_manifest_command_no_match() {
    let server = mock_daemon(b"tarball").await;
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, Some(server.uri()));

    let err = manifest::execute("ipns://example.com#^2.0.0", &ctx).await.unwrap_err();
    assert_eq!(err.code(), "ETARGET");
}

#[tokio::test]
async fn test_tarball_command_writes_file() {
    let tarball = vec![42u8; 20_000];
    let server = mock_daemon(&tarball).await;
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, Some(server.uri()));

    tarball::execute("ipns://example.com#^1.0.0", Some("pkg.tgz".into()), &ctx)
        .await
        .unwrap();
    assert_eq!(fs::read(temp_dir.path().join("pkg.tgz")).unwrap(), tarball);

    tarball::execute(&format!("ipfs://{}", TARBALL_CID), Some("direct.tgz".into()), &ctx)
        .await
        .unwrap();
    assert_eq!(fs::read(temp_dir.path().join("direct.tgz")).unwrap(), tarball);
}

#[tokio::test]
async fn test_tarball_failure_removes_file() {
    let server = mock_daemon(b"tarball").await;
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, Some(server.uri()));

    // 1.0.0 has no dist.cid
    let err = tarball::execute("ipns://example.com#1.0.0", Some("pkg.tgz".into()), &ctx)
        .await
        .unwrap_err();

    assert_eq!(err.code(), "ENOCID");
    assert!(!temp_dir.path().join("pkg.tgz").exists());
}

#[tokio::test]
async fn test_copy_counts_bytes() {
    let chunks = vec![
        Ok(bytes::Bytes::from_static(b"abc")),
        Ok(bytes::Bytes::from_static(b"defg")),
    ];
    let mut stream: pea_ipfs::ByteStream = futures::StreamExt::boxed(futures::stream::iter(chunks));
    let mut sink = Vec::new();

    let written = tarball::copy(&mut stream, &mut sink).await.unwrap();

    assert_eq!(written, 7);
    assert_eq!(sink, b"abcdefg");
}

#[tokio::test]
async fn test_resolve_command_uses_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/name/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Path": format!("/ipfs/{}", PACKUMENT_CID)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir, Some(server.uri()));
    let names = vec!["example.com".to_string(), "ipns://example.com#latest".to_string()];

    resolve::execute(&names, &ctx).await.unwrap();

    assert!(ctx.fetch.cache().has("example.com"));
}
