//! Cherry-pick orchestrator.
//!
//! Dispatches one cherry-pick per destination branch as an independent
//! asynchronous chain: pick, decode the new change id, then review the new
//! change with the batch's reviewer snapshot. Branches neither wait on nor
//! cancel one another, and there is no rollback across the batch.

use crate::error::Error;
use crate::models::{ChangeInfo, CherryPickInput};
use crate::services::events::{EventSink, WorkflowEvent};
use crate::services::gerrit_client::{decode_prefixed_json, GerritEndpoints};
use crate::services::review::submit_review;
use crate::services::transport::{Method, RestTransport};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One orchestration run: source change, commit message, destinations, and
/// the reviewer snapshot reused for every spawned follow-up review.
#[derive(Debug, Clone)]
pub struct CherryPickBatch {
    /// Change whose current revision gets picked.
    pub change_id: String,

    /// Commit message for each picked commit.
    pub message: String,

    /// Destination branches, already roster-filtered.
    pub branches: Vec<String>,

    /// Reviewer roster snapshot, taken once at batch construction and
    /// reused for every new change the batch creates.
    pub reviewers: Vec<String>,
}

impl CherryPickBatch {
    pub fn new(
        change_id: impl Into<String>,
        message: impl Into<String>,
        branches: Vec<String>,
        reviewers: Vec<String>,
    ) -> Self {
        Self {
            change_id: change_id.into(),
            message: message.into(),
            branches,
            reviewers,
        }
    }
}

/// Result of one branch's pick-and-review chain.
#[derive(Debug)]
pub struct BranchOutcome {
    pub branch: String,

    /// Id of the change created by a successful pick.
    pub new_change_id: Option<String>,

    /// Why the pick failed, when it did.
    pub error: Option<Error>,

    /// A pick can succeed while its follow-up review fails; that failure
    /// does not fail the branch.
    pub review_error: Option<Error>,
}

impl BranchOutcome {
    fn failed(branch: String, error: Error) -> Self {
        Self {
            branch,
            new_change_id: None,
            error: Some(error),
            review_error: None,
        }
    }

    /// Whether the cherry-pick itself succeeded.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// One branch's full chain: cherry-pick, decode, follow-up review.
async fn pick_branch(
    transport: Arc<dyn RestTransport>,
    endpoints: GerritEndpoints,
    change_id: Arc<String>,
    message: Arc<String>,
    branch: String,
    reviewers: Arc<Vec<String>>,
    sink: Arc<dyn EventSink>,
) -> BranchOutcome {
    let input = CherryPickInput::to_branch(message.as_str(), &branch);
    let body = match serde_json::to_string(&input) {
        Ok(body) => body,
        Err(e) => {
            let error = Error::from(e);
            sink.publish(WorkflowEvent::CherryPickFailed {
                branch: branch.clone(),
                error: error.to_string(),
            });
            return BranchOutcome::failed(branch, error);
        }
    };

    let url = endpoints.cherry_pick(&change_id);
    let response = match transport.send(Method::POST, &url, Some(body)).await {
        Ok(response) => response,
        Err(error) => {
            sink.publish(WorkflowEvent::CherryPickFailed {
                branch: branch.clone(),
                error: error.to_string(),
            });
            return BranchOutcome::failed(branch, error);
        }
    };

    if !response.is_success() {
        let error = Error::gerrit_api_full(
            format!("Failed to cherry-pick to {}", branch),
            response.status,
            &url,
        );
        sink.publish(WorkflowEvent::CherryPickFailed {
            branch: branch.clone(),
            error: error.to_string(),
        });
        return BranchOutcome::failed(branch, error);
    }

    let info: ChangeInfo = match decode_prefixed_json(&response.body) {
        Ok(info) => info,
        Err(error) => {
            sink.publish(WorkflowEvent::CherryPickFailed {
                branch: branch.clone(),
                error: error.to_string(),
            });
            return BranchOutcome::failed(branch, error);
        }
    };

    sink.publish(WorkflowEvent::CherryPicked {
        branch: branch.clone(),
        new_change_id: info.id.clone(),
    });

    // Review the newly created change with the batch's snapshot. The
    // dispatcher publishes its own failure event; the pick stands either way.
    let review_error = submit_review(
        transport.as_ref(),
        &endpoints,
        &info.id,
        &reviewers,
        sink.as_ref(),
    )
    .await
    .err();

    BranchOutcome {
        branch,
        new_change_id: Some(info.id),
        error: None,
        review_error,
    }
}

/// Build the independent per-branch chains for a batch.
fn branch_futures(
    transport: &Arc<dyn RestTransport>,
    endpoints: &GerritEndpoints,
    batch: &CherryPickBatch,
    sink: &Arc<dyn EventSink>,
) -> Vec<impl Future<Output = BranchOutcome> + Send + 'static> {
    let change_id = Arc::new(batch.change_id.clone());
    let message = Arc::new(batch.message.clone());
    let reviewers = Arc::new(batch.reviewers.clone());

    sink.publish(WorkflowEvent::CherryPickStarted {
        change_id: batch.change_id.clone(),
        branch_count: batch.branches.len(),
    });

    batch
        .branches
        .iter()
        .cloned()
        .map(|branch| {
            pick_branch(
                Arc::clone(transport),
                endpoints.clone(),
                Arc::clone(&change_id),
                Arc::clone(&message),
                branch,
                Arc::clone(&reviewers),
                Arc::clone(sink),
            )
        })
        .collect()
}

/// Fire-and-forget dispatch: one detached task per branch.
///
/// Callers may drop the returned handles (the original behavior) or await
/// them for completion.
pub fn dispatch_all(
    transport: Arc<dyn RestTransport>,
    endpoints: &GerritEndpoints,
    batch: &CherryPickBatch,
    sink: Arc<dyn EventSink>,
) -> Vec<JoinHandle<BranchOutcome>> {
    branch_futures(&transport, endpoints, batch, &sink)
        .into_iter()
        .map(tokio::spawn)
        .collect()
}

/// Deterministic gather: run every branch chain concurrently and collect
/// outcomes in branch order.
pub async fn run_all(
    transport: Arc<dyn RestTransport>,
    endpoints: &GerritEndpoints,
    batch: &CherryPickBatch,
    sink: Arc<dyn EventSink>,
) -> Vec<BranchOutcome> {
    futures::future::join_all(branch_futures(&transport, endpoints, batch, &sink)).await
}
