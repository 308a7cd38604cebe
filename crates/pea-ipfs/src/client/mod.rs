//! Storage client trait and the HTTP client for an IPFS daemon

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::{Client, ClientBuilder, Response};
use tracing::debug;
use url::Url;

use pea_core::error::PeaError;
use crate::api::{DaemonError, NameResolveResponse};
use crate::IpfsResult;

pub mod accessor;

pub use accessor::ClientAccessor;

/// Chunks of fetched content; a failure is the stream's last item
///
/// The daemon reports failures after the body has started in an
/// `X-Stream-Error` trailer, which the HTTP client cannot read. A body
/// shorter than the announced `X-Content-Length` is reported as an error;
/// without that header a truncated body ends like a complete one.
pub type ByteStream = BoxStream<'static, IpfsResult<Bytes>>;

/// Length header the daemon sets on `cat` responses
const CONTENT_LENGTH_HEADER: &str = "x-content-length";

/// Operations the fetchers need from the storage network
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Resolve a mutable name to a content id
    async fn resolve_name(&self, name: &str) -> IpfsResult<String>;

    /// Read a whole object into memory
    async fn cat(&self, path: &str) -> IpfsResult<Bytes>;

    /// Read an object as a stream; nothing is sent until first poll
    fn cat_stream(&self, path: &str) -> ByteStream;
}

/// Client for the daemon's `/api/v0` RPC interface
#[derive(Debug, Clone)]
pub struct IpfsHttpClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// `http(s)://host:port` of the daemon
    base_url: String,
}

impl IpfsHttpClient {
    /// Connect to a daemon given as a multiaddr or an http(s) URL
    pub fn new(endpoint: &str) -> IpfsResult<Self> {
        let base_url = endpoint_to_base_url(endpoint)?;

        let client = ClientBuilder::new()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .user_agent("pea/0.1.0")
            .build()
            .map_err(|e| PeaError::network(format!("Failed to create HTTP client: {}", e), e))?;

        debug!("IPFS daemon at {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST an RPC command with a single `arg`, failing on non-success statuses
    async fn call(&self, command: &str, arg: &str) -> IpfsResult<Response> {
        let url = format!("{}/api/v0/{}", self.base_url, command);

        let response = self
            .client
            .post(&url)
            .query(&[("arg", arg)])
            .send()
            .await
            .map_err(|e| PeaError::network(format!("Failed to reach {}: {}", url, e), e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<DaemonError>(&body) {
            Ok(error) => error.message,
            Err(_) if !body.trim().is_empty() => format!("daemon returned {}: {}", status, body.trim()),
            Err(_) => format!("daemon returned {}", status),
        };

        Err(PeaError::Network {
            message,
            source: None,
        })
    }
}

#[async_trait]
impl StorageClient for IpfsHttpClient {
    async fn resolve_name(&self, name: &str) -> IpfsResult<String> {
        let to_resolution_error = |e: PeaError| match e {
            PeaError::Network { message, .. } => PeaError::NameResolution {
                name: name.to_string(),
                message,
            },
            other => other,
        };

        let response = self.call("name/resolve", name).await.map_err(to_resolution_error)?;
        let resolved = response
            .json::<NameResolveResponse>()
            .await
            .map_err(|e| PeaError::NameResolution {
                name: name.to_string(),
                message: format!("unexpected daemon response: {}", e),
            })?;

        let cid = resolved.content_id();
        if cid.is_empty() {
            return Err(PeaError::NameResolution {
                name: name.to_string(),
                message: "daemon returned an empty path".to_string(),
            });
        }
        Ok(cid.to_string())
    }

    async fn cat(&self, path: &str) -> IpfsResult<Bytes> {
        let response = self.call("cat", path).await?;
        response
            .bytes()
            .await
            .map_err(|e| PeaError::network(format!("Failed to read {}: {}", path, e), e))
    }

    fn cat_stream(&self, path: &str) -> ByteStream {
        let client = self.clone();
        let path = path.to_string();

        stream::once(async move {
            debug!("Streaming {}", path);
            let response = client.call("cat", &path).await?;
            Ok::<_, PeaError>(checked_body(response, path))
        })
        .try_flatten()
        .boxed()
    }
}

/// Response body as a stream, failing when it ends short of the announced length
fn checked_body(response: Response, path: String) -> ByteStream {
    let expected = response
        .headers()
        .get(CONTENT_LENGTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    let body = response
        .bytes_stream()
        .map_err(|e| PeaError::network(format!("Failed to read content: {}", e), e))
        .boxed();

    let Some(expected) = expected else {
        return body;
    };

    stream::unfold((body, 0u64, false), move |(mut body, received, done)| {
        let path = path.clone();
        async move {
            if done {
                return None;
            }
            match body.next().await {
                Some(Ok(chunk)) => {
                    let received = received + chunk.len() as u64;
                    Some((Ok(chunk), (body, received, false)))
                },
                Some(Err(e)) => Some((Err(e), (body, received, true))),
                None if received < expected => {
                    let err = PeaError::Network {
                        message: format!("{} ended after {} of {} bytes", path, received, expected),
                        source: None,
                    };
                    Some((Err(err), (body, received, true)))
                },
                None => None,
            }
        }
    })
    .boxed()
}

/// Turn a daemon endpoint into an `http(s)://host:port` base URL
///
/// Accepts `http(s)://` URLs and multiaddrs such as `/ip4/127.0.0.1/tcp/5001`,
/// `/dns4/ipfs.local/tcp/443/https` or `/ip6/::1/tcp/5001`.
pub fn endpoint_to_base_url(endpoint: &str) -> IpfsResult<String> {
    let endpoint = endpoint.trim();
    let invalid = |reason: String| PeaError::ConfigValidation {
        field: "endpoint-url".to_string(),
        reason,
    };

    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        let url = Url::parse(endpoint).map_err(|e| invalid(format!("'{}' is not a valid URL: {}", endpoint, e)))?;
        let base = url.as_str().trim_end_matches('/');
        return Ok(base.strip_suffix("/api/v0").unwrap_or(base).to_string());
    }

    if !endpoint.starts_with('/') {
        return Err(invalid(format!(
            "'{}' is neither a multiaddr nor an http(s) URL",
            endpoint
        )));
    }

    let mut host = None;
    let mut port = None;
    let mut scheme = "http";
    let mut parts = endpoint.split('/').filter(|part| !part.is_empty());

    while let Some(protocol) = parts.next() {
        let mut value = || {
            parts
                .next()
                .ok_or_else(|| invalid(format!("'{}' is missing a value for /{}", endpoint, protocol)))
        };

        match protocol {
            "ip4" | "dns" | "dns4" | "dns6" => host = Some(value()?.to_string()),
            "ip6" => host = Some(format!("[{}]", value()?)),
            "tcp" => {
                let raw = value()?;
                port = Some(
                    raw.parse::<u16>()
                        .map_err(|_| invalid(format!("'{}' is not a valid port", raw)))?,
                );
            },
            "http" => scheme = "http",
            "https" | "tls" => scheme = "https",
            other => {
                return Err(invalid(format!("unsupported multiaddr protocol /{}", other)));
            },
        }
    }

    let host = host.ok_or_else(|| invalid(format!("'{}' has no host", endpoint)))?;
    let port = port.ok_or_else(|| invalid(format!("'{}' has no /tcp port", endpoint)))?;

    Ok(format!("{}://{}:{}", scheme, host, port))
}

#[cfg(test)]
mod tests;
