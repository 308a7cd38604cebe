//! Direct content fetcher for `ipfs://<cid>`

use std::sync::Arc;

use async_trait::async_trait;
use pea_config::FetchOptions;
use pea_core::error::PeaError;
use pea_core::types::{Manifest, Packument};
use tracing::debug;

use super::{error_stream, FetchContext, Fetcher};
use crate::client::ByteStream;
use crate::spec::{ContentId, FetchSpec};
use crate::IpfsResult;

/// Fetches content by an immutable content id; nothing is cached
#[derive(Debug, Clone)]
pub struct IpfsFetcher {
    context: Arc<FetchContext>,
}

impl IpfsFetcher {
    pub fn new(context: Arc<FetchContext>) -> Self {
        Self { context }
    }

    fn open(&self, identifier: &str, opts: &FetchOptions) -> IpfsResult<ByteStream> {
        let client = self.context.client(opts)?;
        let cid = ContentId::parse(identifier)?;
        debug!("Opening {}", cid.path());
        Ok(client.cat_stream(&cid.path()))
    }
}

#[async_trait]
impl Fetcher for IpfsFetcher {
    async fn packument(&self, _spec: &FetchSpec, _opts: &FetchOptions) -> IpfsResult<Packument> {
        Err(PeaError::NotImplemented {
            operation: "packument".to_string(),
        })
    }

    async fn manifest(&self, _spec: &FetchSpec, _opts: &FetchOptions) -> IpfsResult<Option<Manifest>> {
        Ok(None)
    }

    fn tarball(&self, spec: &FetchSpec, opts: &FetchOptions) -> ByteStream {
        self.open(spec.payload(), opts).unwrap_or_else(error_stream)
    }

    fn from_manifest(
        &self,
        manifest: &Manifest,
        spec: &FetchSpec,
        opts: &FetchOptions,
    ) -> IpfsResult<ByteStream> {
        let identifier = manifest.content_id().unwrap_or_else(|| spec.payload());
        Ok(self.open(identifier, opts).unwrap_or_else(error_stream))
    }
}
