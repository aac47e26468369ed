//! HTTP transport module
//!
//! The core never talks to reqwest directly: it hands a [`TransportRequest`]
//! to a [`Transport`] and classifies the returned status itself.
//!
//! # Features
//!
//! - **Pluggable transport**: any `Transport` impl (tests use scripted fakes)
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Opt-in retries**: Constant, linear, and exponential backoff for 429/5xx,
//!   disabled by default

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpTransport, HttpTransportConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{Transport, TransportRequest, TransportResponse};

#[cfg(test)]
mod tests;
