//! Automated review voting and multi-branch cherry-pick workflows for
//! Gerrit.
//!
//! Two actions, modeled after the buttons this crate's host injects into a
//! change page: post a `Code-Review +1` with a configured reviewer roster,
//! and cherry-pick the change's current revision to a configured set of
//! branches, reviewing each newly created change. Element lookup pierces
//! the UI's nested shadow roots; network calls go through a swappable REST
//! transport.

pub mod dom;
pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use error::Error;
pub use models::{ChangeInfo, ChangeRef, CherryPickInput, ReviewInput};
pub use services::{
    CherryPickBatch, EventSink, GerritClient, GerritClientConfig, GerritEndpoints, LogSink,
    MemorySink, RestTransport, SettingsKeys, SettingsStore, WorkflowEvent,
};
pub use workflow::WorkflowContext;
