//! Business logic services.
//!
//! The transport seam and its production Gerrit client, the persisted
//! roster settings, the event layer, and the two operations built on top
//! of them: the review dispatcher and the cherry-pick orchestrator.

pub mod events;
pub mod gerrit_client;
pub mod orchestrator;
pub mod review;
pub mod settings;
pub mod testing;
pub mod transport;

pub use events::{EventRecord, EventSink, LogSink, MemorySink, WorkflowEvent};
pub use gerrit_client::{
    decode_prefixed_json, strip_xssi_prefix, GerritClient, GerritClientConfig, GerritEndpoints,
    XSSI_PREFIX,
};
pub use orchestrator::{dispatch_all, run_all, BranchOutcome, CherryPickBatch};
pub use review::submit_review;
pub use settings::{parse_roster, SettingsKeys, SettingsStore};
pub use transport::{Method, RestResponse, RestTransport};
