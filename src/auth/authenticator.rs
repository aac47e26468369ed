//! Authenticator implementation
//!
//! Exchanges a username and password for a search token over HTTP Basic.

use super::types::{AuthResponse, Credential};
use crate::error::{Error, Result};
use crate::http::{Transport, TransportRequest};
use crate::types::Method;
use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, info, warn};

/// Marker the token endpoint returns while it is down for maintenance
const MAINTENANCE_MARKER: &str = "Service Under Maintenance";

/// Obtains a credential for the search service
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate `username` against `endpoint`
    async fn authenticate(&self, endpoint: &str, username: &str, password: &str)
        -> Result<Credential>;
}

/// Basic-auth token exchange
///
/// Sends `Authorization: Basic ...` and `Accept: application/json` and
/// accepts either token response generation.
pub struct BasicAuthenticator<T> {
    transport: T,
    method: Method,
}

impl<T: Transport> BasicAuthenticator<T> {
    /// Create an authenticator using POST, as the current endpoint expects
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            method: Method::POST,
        }
    }

    /// Use a different HTTP method (GET for the legacy endpoint)
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// HTTP method in use
    pub fn method(&self) -> Method {
        self.method
    }
}

#[async_trait]
impl<T: Transport> Authenticator for BasicAuthenticator<T> {
    async fn authenticate(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<Credential> {
        let basic = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        let request = TransportRequest::new(self.method, endpoint)
            .header("Authorization", format!("Basic {basic}"))
            .header("Accept", "application/json");

        debug!(method = %self.method, endpoint, "Requesting auth token");
        let response = self.transport.send(request).await?;
        let body = response.text();

        if body.contains(MAINTENANCE_MARKER) {
            return Err(Error::ServiceMaintenance);
        }
        if !response.is_success() {
            return Err(Error::auth(format!(
                "token request failed: {}",
                response.status_text
            )));
        }

        let parsed: AuthResponse = serde_json::from_slice(&response.body)
            .map_err(|e| Error::auth(format!("unrecognized token response: {e}")))?;

        if let Some(warnings) = parsed.warnings() {
            warn!("Token endpoint returned warnings: {warnings}");
        }
        if let Some(error) = parsed.error() {
            return Err(Error::auth(error));
        }

        let credential = parsed
            .into_credential()
            .ok_or_else(|| Error::auth("token response contained no token"))?;

        info!(expires_at = ?credential.expires_at, "Obtained auth token");
        Ok(credential)
    }
}
