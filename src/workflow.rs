//! Workflow entry points.
//!
//! Thin layer tying the pieces together the way the action buttons do:
//! "+1" runs the review dispatcher alone; "+1&CP" runs it and then the
//! cherry-pick orchestrator. Rosters are read from the store at dispatch
//! time, never cached across runs.

use crate::dom::{locate, Element};
use crate::error::Error;
use crate::models::ChangeRef;
use crate::services::orchestrator::{dispatch_all, BranchOutcome, CherryPickBatch};
use crate::services::review::submit_review;
use crate::services::settings::{SettingsKeys, SettingsStore};
use crate::services::{EventSink, GerritEndpoints, RestResponse, RestTransport};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Selector of the element whose text carries the change's commit message.
pub const COMMIT_MESSAGE_SELECTOR: &str = "#output";

/// Per-page-view workflow state.
///
/// The settings-key namespace is derived once from the change's project
/// when the context is built and stays fixed for the context's lifetime.
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    pub change: ChangeRef,
    pub keys: SettingsKeys,
}

impl WorkflowContext {
    pub fn new(change: ChangeRef) -> Self {
        let keys = SettingsKeys::for_project(&change.project);
        Self { change, keys }
    }
}

/// Extract the commit message from a rendered change page.
pub fn commit_message_from(root: &Element) -> Result<String, Error> {
    locate(root, COMMIT_MESSAGE_SELECTOR)
        .map(Element::text_content)
        .ok_or_else(|| Error::not_found("commit message element"))
}

/// The "+1" action: read the reviewer roster and post one review on the
/// current change.
pub async fn run_review_only(
    ctx: &WorkflowContext,
    store: &SettingsStore,
    transport: &dyn RestTransport,
    endpoints: &GerritEndpoints,
    sink: &dyn EventSink,
) -> Result<RestResponse, Error> {
    let reviewers = store.load_roster(&ctx.keys.reviewers)?;
    submit_review(transport, endpoints, &ctx.change.id, &reviewers, sink).await
}

/// The "+1&CP" action: post a review on the current change, then dispatch
/// one detached cherry-pick chain per configured branch.
///
/// A failed review on the source change does not cancel the picks; the
/// failure is published through the sink. Both rosters are read here, once,
/// and the reviewer snapshot rides along into every follow-up review.
pub async fn run_review_and_cherry_pick(
    ctx: &WorkflowContext,
    store: &SettingsStore,
    transport: Arc<dyn RestTransport>,
    endpoints: &GerritEndpoints,
    commit_message: &str,
    sink: Arc<dyn EventSink>,
) -> Result<Vec<JoinHandle<BranchOutcome>>, Error> {
    let reviewers = store.load_roster(&ctx.keys.reviewers)?;
    let branches = store.load_roster(&ctx.keys.branches)?;

    let _ = submit_review(
        transport.as_ref(),
        endpoints,
        &ctx.change.id,
        &reviewers,
        sink.as_ref(),
    )
    .await;

    let batch = CherryPickBatch::new(
        ctx.change.id.clone(),
        commit_message,
        branches,
        reviewers,
    );
    Ok(dispatch_all(transport, endpoints, &batch, sink))
}
