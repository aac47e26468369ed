//! File-event search client
//!
//! Wires configuration, authentication, transport and pagination together.
//!
//! ```no_run
//! use ffs_client::{ClientConfig, FfsClient, Query};
//!
//! # async fn run() -> ffs_client::Result<()> {
//! let client = FfsClient::from_config(ClientConfig::from_path("ffs.yaml")?)?;
//! let credential = client.authenticate().await?;
//! let events = client.search(&Query::builder().build(), &credential).await?;
//! println!("{} events", events.len());
//! # Ok(())
//! # }
//! ```

use crate::auth::{Authenticator, BasicAuthenticator, Credential};
use crate::config::ClientConfig;
use crate::decode::{FileEvent, JsonPageDecoder, PageDecoder, TabularReader};
use crate::error::Result;
use crate::http::{HttpTransport, Transport};
use crate::pagination::Paginator;
use crate::query::Query;
use std::sync::Arc;
use tracing::info;

/// Client for the file-event search service
pub struct FfsClient<T> {
    config: ClientConfig,
    transport: Arc<T>,
    authenticator: BasicAuthenticator<Arc<T>>,
}

impl FfsClient<HttpTransport> {
    /// Create a client with an HTTP transport built from `config`
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(config.transport_config())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> FfsClient<T> {
    /// Create a client over any transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let transport = Arc::new(transport);
        let authenticator =
            BasicAuthenticator::new(Arc::clone(&transport)).with_method(config.auth_method);
        Self {
            config,
            transport,
            authenticator,
        }
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exchange the configured username and password for a credential
    pub async fn authenticate(&self) -> Result<Credential> {
        self.authenticator
            .authenticate(
                &self.config.auth_url,
                &self.config.username,
                &self.config.password,
            )
            .await
    }

    /// Run a JSON search through every page
    pub async fn search(&self, query: &Query, credential: &Credential) -> Result<Vec<FileEvent>> {
        info!(page_size = query.page_size(), "Starting file-event search");
        self.paginator(JsonPageDecoder::new())
            .run(query, credential)
            .await
    }

    /// Run a tabular export; the service returns it as one page
    pub async fn export_csv(
        &self,
        query: &Query,
        credential: &Credential,
    ) -> Result<Vec<FileEvent>> {
        info!("Starting file-event export");
        self.paginator(TabularReader::new())
            .run(query, credential)
            .await
    }

    fn paginator<D: PageDecoder>(&self, decoder: D) -> Paginator<'_, T, D> {
        Paginator::new(self.transport.as_ref(), decoder, &self.config.search_url)
            .authorization_scheme(&self.config.authorization_scheme)
    }
}
