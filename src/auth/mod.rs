//! Authentication module
//!
//! Supports: the current OAuth-style token endpoint (`access_token`) and the
//! legacy `v3_user_token` endpoint.
//!
//! The [`Authenticator`] trait is the seam the client depends on; the
//! shipped [`BasicAuthenticator`] performs the exchange over any
//! [`Transport`](crate::http::Transport).

mod authenticator;
mod types;

pub use authenticator::{Authenticator, BasicAuthenticator};
pub use types::{Credential, LEGACY_TOKEN_LIFETIME_SECS};

#[cfg(test)]
mod tests;
