//! Unit tests for the IPFS daemon client

use super::*;

use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

const CID: &str = "QmT78zSuBmuS4z925WZfrqQ1qHaJ56DQaTfyMUF7F8ff5o";

#[test]
fn test_multiaddr_endpoints() {
    assert_eq!(endpoint_to_base_url("/ip4/127.0.0.1/tcp/5001").unwrap(), "http://127.0.0.1:5001");
    assert_eq!(endpoint_to_base_url("/ip6/::1/tcp/5001").unwrap(), "http://[::1]:5001");
    assert_eq!(endpoint_to_base_url("/dns4/ipfs.local/tcp/443/https").unwrap(), "https://ipfs.local:443");
    assert_eq!(endpoint_to_base_url("/dns/node/tcp/5001/http").unwrap(), "http://node:5001");
    assert_eq!(endpoint_to_base_url(" /ip4/10.0.0.1/tcp/80/ ").unwrap(), "http://10.0.0.1:80");
}

#[test]
fn test_url_endpoints() {
    assert_eq!(endpoint_to_base_url("http://127.0.0.1:5001").unwrap(), "http://127.0.0.1:5001");
    assert_eq!(endpoint_to_base_url("http://127.0.0.1:5001/").unwrap(), "http://127.0.0.1:5001");
    assert_eq!(endpoint_to_base_url("https://ipfs.example.com/api/v0").unwrap(), "https://ipfs.example.com");
}

#[test]
fn test_invalid_endpoints() {
    for endpoint in [
        "localhost:5001",
        "/ip4/127.0.0.1",
        "/tcp/5001",
        "/ip4/127.0.0.1/tcp/notaport",
        "/ip4/127.0.0.1/udp/5001",
        "/ip4",
        "http://",
    ] {
        match endpoint_to_base_url(endpoint).unwrap_err() {
            PeaError::ConfigValidation { field, .. } => assert_eq!(field, "endpoint-url"),
            other => panic!("Expected ConfigValidation for {}, got {:?}", endpoint, other),
        }
    }
}

#[tokio::test]
async fn test_client_creation() {
    let client = IpfsHttpClient::new("/ip4/127.0.0.1/tcp/5001").unwrap();
    assert_eq!(client.base_url(), "http://127.0.0.1:5001");
}

#[tokio::test]
async fn test_resolve_name_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/name/resolve"))
        .and(query_param("arg", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Path": format!("/ipfs/{}", CID)
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();
    let cid = client.resolve_name("example.com").await.unwrap();

    assert_eq!(cid, CID);
}

#[tokio::test]
async fn test_resolve_name_daemon_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/name/resolve"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "Message": "could not resolve name",
            "Code": 0,
            "Type": "error"
        })))
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();

    match client.resolve_name("missing.example").await.unwrap_err() {
        PeaError::NameResolution { name, message } => {
            assert_eq!(name, "missing.example");
            assert_eq!(message, "could not resolve name");
        },
        other => panic!("Expected NameResolution error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cat_success() {
    let mock_server = MockServer::start().await;
    let path_arg = format!("/ipfs/{}", CID);

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .and(query_param("arg", path_arg.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{\"name\":\"pkg\"}".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();
    let bytes = client.cat(&path_arg).await.unwrap();

    assert_eq!(&bytes[..], b"{\"name\":\"pkg\"}");
}

#[tokio::test]
async fn test_cat_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("merkledag: not found"))
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();

    match client.cat("/ipfs/missing").await.unwrap_err() {
        PeaError::Network { message, .. } => assert!(message.contains("merkledag: not found")),
        other => panic!("Expected Network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cat_stream_collects_body() {
    let mock_server = MockServer::start().await;
    let tarball = vec![7u8; 64 * 1024];

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tarball.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();
    let chunks: Vec<Bytes> = client
        .cat_stream(&format!("/ipfs/{}", CID))
        .try_collect()
        .await
        .unwrap();

    let body: Vec<u8> = chunks.concat();
    assert_eq!(body, tarball);
}

#[tokio::test]
async fn test_cat_stream_short_body_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .and(query_param("arg", "/ipfs/short"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Content-Length", "100")
                .set_body_bytes(vec![1u8; 40]),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .and(query_param("arg", "/ipfs/whole"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Content-Length", "40")
                .set_body_bytes(vec![1u8; 40]),
        )
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();

    let items: Vec<IpfsResult<Bytes>> = client.cat_stream("/ipfs/short").collect().await;
    match items.last() {
        Some(Err(PeaError::Network { message, .. })) => {
            assert!(message.contains("40 of 100 bytes"), "{}", message)
        },
        other => panic!("Expected Network error, got {:?}", other),
    }
    assert_eq!(items.iter().filter(|item| item.is_err()).count(), 1);

    let chunks: Vec<Bytes> = client.cat_stream("/ipfs/whole").try_collect().await.unwrap();
    assert_eq!(chunks.concat().len(), 40);
}

#[tokio::test]
async fn test_cat_stream_is_lazy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();
    let stream = client.cat_stream("/ipfs/unused");
    drop(stream);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_cat_stream_error_is_terminal_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/cat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "Message": "invalid path"
        })))
        .mount(&mock_server)
        .await;

    let client = IpfsHttpClient::new(&mock_server.uri()).unwrap();
    let items: Vec<IpfsResult<Bytes>> = client.cat_stream("/ipfs/bad").collect().await;

    assert_eq!(items.len(), 1);
    match &items[0] {
        Err(PeaError::Network { message, .. }) => assert_eq!(message, "invalid path"),
        other => panic!("Expected Network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_daemon() {
    let client = IpfsHttpClient::new("/ip4/127.0.0.1/tcp/1").unwrap();

    let err = client.cat("/ipfs/anything").await.unwrap_err();
    assert_eq!(err.code(), "ENETWORK");
    assert!(err.is_recoverable());

    let err = client.resolve_name("example.com").await.unwrap_err();
    assert_eq!(err.code(), "ENAMERESOLVE");
}
