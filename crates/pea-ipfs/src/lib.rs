//! IPFS and IPNS package fetchers for Pea
//!
//! This crate resolves package metadata and tarballs from an IPFS daemon:
//! `ipfs://<cid>` reads content directly, `ipns://<name>#<version>` resolves
//! a mutable name to a packument, selects a version and reads its tarball.

pub mod api;
pub mod cache;
pub mod client;
pub mod fetcher;
pub mod spec;

// Re-export main types
pub use cache::{CacheEntry, CachePolicy, CacheStats, ResolutionCache};
pub use client::{ByteStream, ClientAccessor, IpfsHttpClient, StorageClient};
pub use fetcher::{pick_options, FetchContext, Fetcher, IpfsFetcher, IpnsFetcher};
pub use spec::{ContentId, ContentPath, FetchSpec, NameSpec, Protocol};

use pea_core::error::PeaError;

/// Result type for fetcher operations
pub type IpfsResult<T> = Result<T, PeaError>;
