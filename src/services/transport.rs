//! REST transport seam.
//!
//! The workflow talks to Gerrit through this trait rather than through a
//! concrete HTTP client, mirroring the host-provided transport object it
//! replaces. Production uses [`GerritClient`](crate::services::GerritClient);
//! tests substitute a recording double.

use crate::error::Error;
use async_trait::async_trait;

pub use reqwest::Method;

/// A completed HTTP exchange: status plus raw body text.
///
/// Bodies stay raw because Gerrit frames JSON responses with an
/// anti-hijacking prefix that must be stripped before parsing.
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous request sender.
///
/// One call, one request: no retry, no redirect policy beyond the
/// implementation's defaults. Errors distinguish transport failures from
/// everything the caller can read off the returned status.
#[async_trait]
pub trait RestTransport: Send + Sync {
    /// Send a request with an optional JSON body (Content-Type is always
    /// application/json when a body is present).
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<RestResponse, Error>;
}
