//! Mutable name fetcher for `ipns://<name>#<version-or-tag>`
//!
//! A request walks through name resolution, packument fetch, version
//! selection and finally the tarball read for the selected manifest's
//! `dist.cid`. Resolutions are memoized in the context's cache; nothing is
//! retried.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use pea_config::FetchOptions;
use pea_core::error::PeaError;
use pea_core::types::{Manifest, Packument};
use pea_resolver::pick_manifest;
use tracing::{debug, info, warn};

use super::{pick_options, FetchContext, Fetcher};
use crate::client::{ByteStream, StorageClient};
use crate::spec::{ContentPath, FetchSpec};
use crate::IpfsResult;

#[derive(Debug, Clone)]
pub struct IpnsFetcher {
    context: Arc<FetchContext>,
}

impl IpnsFetcher {
    pub fn new(context: Arc<FetchContext>) -> Self {
        Self { context }
    }

    /// Resolve `name`, consulting the cache first
    ///
    /// The result may point below a directory root (`<cid>/packument.json`).
    pub async fn resolve_name(&self, name: &str, client: &dyn StorageClient) -> IpfsResult<ContentPath> {
        if let Some(cid) = self.context.cache().get(name) {
            debug!("Resolved {} to {} from cache", name, cid);
            return ContentPath::parse(&cid);
        }

        info!("Resolving {}", name);
        let start = Instant::now();

        let resolved = client.resolve_name(name).await?;
        let cid = ContentPath::parse(&resolved)?;

        info!("Resolved {} to {} in {}ms", name, cid, start.elapsed().as_millis());

        self.context.cache().put(name, &cid.to_string());
        Ok(cid)
    }

    /// Resolve `name` with the client configured by `opts`
    pub async fn resolve(&self, name: &str, opts: &FetchOptions) -> IpfsResult<ContentPath> {
        let client = self.context.client(opts)?;
        self.resolve_name(name, client.as_ref()).await
    }

    /// Forget every cached resolution
    pub fn clear_memoized(&self) {
        self.context.reset_cache();
    }

    async fn select(&self, spec: &FetchSpec, opts: &FetchOptions) -> IpfsResult<Manifest> {
        let name_spec = spec.name_spec()?;
        let packument = self.packument(spec, opts).await?;

        let wanted = match name_spec.fragment {
            Some(fragment) => fragment,
            None => packument.latest().unwrap_or("*").to_string(),
        };

        let manifest = pick_manifest(&packument, &wanted, &pick_options(opts))?;
        debug!("{} selected {}@{}", spec, manifest.name, manifest.version);
        Ok(manifest)
    }
}

#[async_trait]
impl Fetcher for IpnsFetcher {
    async fn packument(&self, spec: &FetchSpec, opts: &FetchOptions) -> IpfsResult<Packument> {
        let name_spec = spec.name_spec()?;
        let client = self.context.client(opts)?;

        let cid = self.resolve_name(&name_spec.name, client.as_ref()).await?;
        let bytes = client.cat(&cid.path()).await?;
        let packument = parse_packument(&bytes)?;

        self.context.cache().reweigh(&name_spec.name, bytes.len() as u64);

        Ok(packument)
    }

    async fn manifest(&self, spec: &FetchSpec, opts: &FetchOptions) -> IpfsResult<Option<Manifest>> {
        self.select(spec, opts).await.map(Some)
    }

    /// Nothing happens until the stream is first polled; dropping it
    /// abandons the request
    fn tarball(&self, spec: &FetchSpec, opts: &FetchOptions) -> ByteStream {
        let fetcher = self.clone();
        let spec = spec.clone();
        let opts = opts.clone();
        let label = spec.to_string();

        stream::once(async move {
            let manifest = fetcher.select(&spec, &opts).await?;
            fetcher.from_manifest(&manifest, &spec, &opts)
        })
        .try_flatten()
        .inspect_err(move |e| warn!("Tarball for {} failed: {}", label, e))
        .boxed()
    }

    fn from_manifest(
        &self,
        manifest: &Manifest,
        _spec: &FetchSpec,
        opts: &FetchOptions,
    ) -> IpfsResult<ByteStream> {
        let cid = manifest.content_id().ok_or_else(|| PeaError::MissingContentId {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
        })?;
        let cid = ContentPath::parse(cid)?;

        let client = self.context.client(opts)?;
        Ok(client.cat_stream(&cid.path()))
    }
}

/// Decode a packument document
fn parse_packument(bytes: &[u8]) -> IpfsResult<Packument> {
    let text = std::str::from_utf8(bytes).map_err(|e| PeaError::PackumentParse {
        message: format!("invalid UTF-8: {}", e),
    })?;
    serde_json::from_str(text).map_err(|e| PeaError::PackumentParse {
        message: e.to_string(),
    })
}
