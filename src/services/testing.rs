//! Transport test double.
//!
//! A scripted [`RestTransport`] that records every request and answers by
//! fragment rules matched against the URL or the body (cherry-picks to
//! different branches share one URL and differ only in the body). Used by
//! this crate's own tests and available to hosts that want to exercise
//! workflows without a Gerrit instance.

use crate::error::Error;
use crate::services::transport::{Method, RestResponse, RestTransport};
use async_trait::async_trait;
use std::sync::Mutex;

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Status(u16, String),
    NetworkError(String),
}

impl MockReply {
    fn to_result(&self) -> Result<RestResponse, Error> {
        match self {
            MockReply::Status(status, body) => Ok(RestResponse {
                status: *status,
                body: body.clone(),
            }),
            MockReply::NetworkError(message) => Err(Error::network(message.clone())),
        }
    }
}

/// Recording transport with per-URL scripted replies.
pub struct MockTransport {
    requests: Mutex<Vec<SentRequest>>,
    rules: Vec<(String, MockReply)>,
    default: MockReply,
}

impl MockTransport {
    /// Reply to every request with the given status and body.
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            rules: Vec::new(),
            default: MockReply::Status(status, body.into()),
        }
    }

    /// Fail every request with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            rules: Vec::new(),
            default: MockReply::NetworkError(message.into()),
        }
    }

    /// Reply with `status`/`body` to requests whose URL or request body
    /// contains `fragment`. Rules are matched in insertion order, before
    /// the default reply.
    pub fn on(mut self, fragment: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.rules
            .push((fragment.into(), MockReply::Status(status, body.into())));
        self
    }

    /// Fail requests whose URL or body contains `fragment` with a network
    /// error.
    pub fn on_network_error(
        mut self,
        fragment: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.rules
            .push((fragment.into(), MockReply::NetworkError(message.into())));
        self
    }

    /// Everything sent so far, in send order.
    pub fn requests(&self) -> Vec<SentRequest> {
        self.requests.lock().expect("mock transport poisoned").clone()
    }

    /// URLs of everything sent so far, in send order.
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl RestTransport for MockTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<RestResponse, Error> {
        self.requests
            .lock()
            .expect("mock transport poisoned")
            .push(SentRequest {
                method,
                url: url.to_string(),
                body: body.clone(),
            });

        let body_text = body.as_deref().unwrap_or("");
        self.rules
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()) || body_text.contains(fragment.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default)
            .to_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rules_take_precedence_over_default() {
        let transport = MockTransport::replying(200, "ok").on("/cherrypick", 409, "conflict");

        let hit = transport
            .send(Method::POST, "https://g/a/changes/1/revisions/current/cherrypick", None)
            .await
            .unwrap();
        assert_eq!(hit.status, 409);

        let miss = transport
            .send(Method::POST, "https://g/a/changes/1/revisions/current/review", None)
            .await
            .unwrap();
        assert_eq!(miss.status, 200);

        assert_eq!(transport.requests().len(), 2);
    }
}
