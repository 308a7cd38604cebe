//! Lazily created, memoized storage client

use std::sync::Arc;

use parking_lot::Mutex;
use pea_config::FetchOptions;
use pea_core::error::PeaError;
use tracing::debug;

use super::{IpfsHttpClient, StorageClient};
use crate::IpfsResult;

type ClientFactory = dyn Fn(&str) -> IpfsResult<Arc<dyn StorageClient>> + Send + Sync;

/// Hands out one storage client per accessor, built on first use
pub struct ClientAccessor {
    client: Mutex<Option<Arc<dyn StorageClient>>>,
    factory: Box<ClientFactory>,
}

impl ClientAccessor {
    /// Accessor building [`IpfsHttpClient`]s
    pub fn new() -> Self {
        Self::with_factory(|endpoint| {
            let client = IpfsHttpClient::new(endpoint)?;
            Ok(Arc::new(client) as Arc<dyn StorageClient>)
        })
    }

    /// Accessor building clients with `factory`
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> IpfsResult<Arc<dyn StorageClient>> + Send + Sync + 'static,
    {
        Self {
            client: Mutex::new(None),
            factory: Box::new(factory),
        }
    }

    /// The memoized client, creating it on first call
    ///
    /// Fails with `NoEndpointConfigured` whenever `opts` has no endpoint,
    /// even if a client already exists. Once created the client is reused
    /// regardless of the endpoint later options carry.
    pub fn get_client(&self, opts: &FetchOptions) -> IpfsResult<Arc<dyn StorageClient>> {
        let endpoint = opts.endpoint().ok_or_else(no_endpoint_configured)?;

        let mut slot = self.client.lock();
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let client = (self.factory)(endpoint)?;
        debug!("Created storage client for {}", endpoint);
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Drop the memoized client
    pub fn reset(&self) {
        self.client.lock().take();
    }

    pub fn is_initialized(&self) -> bool {
        self.client.lock().is_some()
    }
}

impl Default for ClientAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClientAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientAccessor")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

fn no_endpoint_configured() -> PeaError {
    PeaError::NoEndpointConfigured {
        message: "Please specify an IPFS daemon to connect to, e.g. \
                  --endpoint-url=/ip4/127.0.0.1/tcp/5001 or endpoint-url = \"/ip4/127.0.0.1/tcp/5001\" \
                  in the [fetch] section of pea.toml"
            .to_string(),
    }
}
