//! Review dispatcher.
//!
//! One request per dispatch: adds the reviewer roster and votes
//! `Code-Review +1` on the change's current revision. Failures are
//! published and returned; there is no retry.

use crate::error::Error;
use crate::models::ReviewInput;
use crate::services::events::{EventSink, WorkflowEvent};
use crate::services::gerrit_client::GerritEndpoints;
use crate::services::transport::{Method, RestResponse, RestTransport};

/// Post a review on the current revision of `change_id`.
///
/// The body always carries the fixed +1 vote, even for an empty roster.
/// Whether a duplicate reviewer-add is a no-op is left to the server.
pub async fn submit_review(
    transport: &dyn RestTransport,
    endpoints: &GerritEndpoints,
    change_id: &str,
    reviewers: &[String],
    sink: &dyn EventSink,
) -> Result<RestResponse, Error> {
    let input = ReviewInput::plus_one(reviewers.iter().cloned());
    let body = serde_json::to_string(&input)?;
    let url = endpoints.review(change_id);

    let response = match transport.send(Method::POST, &url, Some(body)).await {
        Ok(response) => response,
        Err(e) => {
            sink.publish(WorkflowEvent::ReviewFailed {
                change_id: change_id.to_string(),
                error: e.to_string(),
            });
            return Err(e);
        }
    };

    if !response.is_success() {
        let err = Error::gerrit_api_full("Failed to post review", response.status, &url);
        sink.publish(WorkflowEvent::ReviewFailed {
            change_id: change_id.to_string(),
            error: err.to_string(),
        });
        return Err(err);
    }

    sink.publish(WorkflowEvent::ReviewPosted {
        change_id: change_id.to_string(),
        reviewer_count: reviewers.len(),
    });
    Ok(response)
}
