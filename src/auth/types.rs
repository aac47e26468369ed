//! Auth types
//!
//! The token endpoint has shipped two response shapes. Both are modelled
//! here and translated into one [`Credential`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Lifetime assumed for legacy `v3_user_token` tokens, which carry no expiry
pub const LEGACY_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Bearer credential used to authorize search requests
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a new credential
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Create a credential that expires in N seconds from now
    pub fn expires_in(token: impl Into<String>, seconds: i64) -> Self {
        Self::new(token, Some(Utc::now() + chrono::Duration::seconds(seconds)))
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }

    /// Whether there is no usable token at all
    pub fn is_empty(&self) -> bool {
        self.token.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token endpoint response, by API generation
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AuthResponse {
    /// `{access_token, token_type, expires_in, error, warnings}`
    Bearer(BearerAuthResponse),
    /// `{data: {v3_user_token}, error, warnings}`
    Legacy(LegacyAuthResponse),
}

#[derive(Debug, Deserialize)]
pub(crate) struct BearerAuthResponse {
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub warnings: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyAuthResponse {
    #[serde(default)]
    pub data: Option<LegacyAuthData>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub warnings: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyAuthData {
    #[serde(default)]
    pub v3_user_token: Option<String>,
}

impl AuthResponse {
    /// Error reported by the server, if any
    pub fn error(&self) -> Option<String> {
        match self {
            Self::Bearer(r) => describe(r.error.as_ref()),
            Self::Legacy(r) => describe(r.error.as_ref()),
        }
    }

    /// Warnings reported by the server, if any
    pub fn warnings(&self) -> Option<String> {
        match self {
            Self::Bearer(r) => describe(r.warnings.as_ref()),
            Self::Legacy(r) => describe(r.warnings.as_ref()),
        }
    }

    /// Translate into a credential; `None` if the response has no token
    pub fn into_credential(self) -> Option<Credential> {
        match self {
            Self::Bearer(r) => {
                let token = Some(r.access_token).filter(|t| !t.is_empty())?;
                Some(match r.expires_in {
                    Some(secs) => Credential::expires_in(token, secs),
                    None => Credential::new(token, None),
                })
            }
            Self::Legacy(r) => {
                let token = r
                    .data
                    .and_then(|d| d.v3_user_token)
                    .filter(|t| !t.is_empty())?;
                Some(Credential::expires_in(token, LEGACY_TOKEN_LIFETIME_SECS))
            }
        }
    }
}

/// Render an `error`/`warnings` value, treating null and empty as absent
fn describe(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}
