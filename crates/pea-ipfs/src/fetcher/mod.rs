//! Fetchers for `ipfs://` and `ipns://` requests
//!
//! Both fetchers share a [`FetchContext`]: the memoized storage client and
//! the name resolution cache. Contexts are independent of each other, so
//! tests and embedders can run several side by side.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use pea_config::FetchOptions;
use pea_core::types::{Manifest, Packument};
use pea_resolver::PickOptions;

use crate::cache::{CachePolicy, ResolutionCache};
use crate::client::{ByteStream, ClientAccessor, StorageClient};
use crate::spec::{FetchSpec, Protocol};
use crate::IpfsResult;

mod ipfs;
mod ipns;

pub use ipfs::IpfsFetcher;
pub use ipns::IpnsFetcher;

/// Operations a package fetcher exposes to its caller
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Full package document
    async fn packument(&self, spec: &FetchSpec, opts: &FetchOptions) -> IpfsResult<Packument>;

    /// Selected version's manifest; `None` when the protocol has no metadata
    async fn manifest(&self, spec: &FetchSpec, opts: &FetchOptions) -> IpfsResult<Option<Manifest>>;

    /// Tarball bytes; failures arrive as the stream's last item
    ///
    /// Work starts when the stream is first polled, so callers need no
    /// runtime until then.
    fn tarball(&self, spec: &FetchSpec, opts: &FetchOptions) -> ByteStream;

    /// Tarball for an already selected manifest
    fn from_manifest(
        &self,
        manifest: &Manifest,
        spec: &FetchSpec,
        opts: &FetchOptions,
    ) -> IpfsResult<ByteStream>;
}

/// State shared by the fetchers of one context
#[derive(Debug)]
pub struct FetchContext {
    clients: ClientAccessor,
    cache: ResolutionCache,
}

impl FetchContext {
    pub fn new(clients: ClientAccessor, cache: ResolutionCache) -> Self {
        Self { clients, cache }
    }

    /// Context using the HTTP daemon client and the given cache bounds
    pub fn with_policy(policy: CachePolicy) -> Self {
        Self::new(ClientAccessor::new(), ResolutionCache::new(policy))
    }

    pub fn clients(&self) -> &ClientAccessor {
        &self.clients
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Forget every cached name resolution
    pub fn reset_cache(&self) {
        self.cache.reset();
    }

    /// Fetcher handling `protocol`
    pub fn fetcher_for(self: &Arc<Self>, protocol: Protocol) -> Box<dyn Fetcher> {
        match protocol {
            Protocol::Ipfs => Box::new(IpfsFetcher::new(Arc::clone(self))),
            Protocol::Ipns => Box::new(IpnsFetcher::new(Arc::clone(self))),
        }
    }

    /// Storage client for `opts`, failing fast without an endpoint
    pub(crate) fn client(&self, opts: &FetchOptions) -> IpfsResult<Arc<dyn StorageClient>> {
        self.clients.get_client(opts)
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::with_policy(CachePolicy::default())
    }
}

/// Selection options carried by fetch options
pub fn pick_options(opts: &FetchOptions) -> PickOptions {
    PickOptions {
        default_tag: opts.default_tag.clone(),
        enjoy_by: opts.enjoy_by,
        include_deprecated: opts.include_deprecated,
    }
}

/// Stream yielding only `error`
pub(crate) fn error_stream(error: pea_core::error::PeaError) -> ByteStream {
    stream::once(async move { Err::<Bytes, _>(error) }).boxed()
}
