//! Workflow event types and sinks.
//!
//! Every operation reports its outcome as a typed event so the host can
//! render an on-screen log panel. The default sink forwards to the `log`
//! facade when no panel is attached.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;

/// Something that happened during a workflow run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// Review vote and reviewer additions posted successfully.
    ReviewPosted {
        change_id: String,
        reviewer_count: usize,
    },

    /// Review request failed (transport or API).
    ReviewFailed { change_id: String, error: String },

    /// Cherry-pick batch started.
    CherryPickStarted {
        change_id: String,
        branch_count: usize,
    },

    /// One branch was picked successfully.
    CherryPicked {
        branch: String,
        new_change_id: String,
    },

    /// One branch's pick failed (transport, API, or decode).
    CherryPickFailed { branch: String, error: String },
}

impl WorkflowEvent {
    /// Whether this event reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::ReviewFailed { .. } | Self::CherryPickFailed { .. }
        )
    }

    /// Human-readable form for log panels.
    pub fn message(&self) -> String {
        match self {
            Self::ReviewPosted {
                change_id,
                reviewer_count,
            } => format!(
                "Reviewers added ({}) and Code-Review +1 posted on {}",
                reviewer_count, change_id
            ),
            Self::ReviewFailed { change_id, error } => {
                format!("Failed to post review on {}: {}", change_id, error)
            }
            Self::CherryPickStarted {
                change_id,
                branch_count,
            } => format!(
                "Starting cherry-pick of {} to {} branch(es)",
                change_id, branch_count
            ),
            Self::CherryPicked {
                branch,
                new_change_id,
            } => format!("Cherry-pick to {} created change {}", branch, new_change_id),
            Self::CherryPickFailed { branch, error } => {
                format!("Error during cherry-pick to {}: {}", branch, error)
            }
        }
    }
}

/// An event with the moment it was published.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub occurred_at: DateTime<Utc>,

    #[serde(flatten)]
    pub event: WorkflowEvent,
}

/// Receiver for workflow events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: WorkflowEvent);
}

/// Sink that forwards events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: WorkflowEvent) {
        if event.is_error() {
            log::error!("{}", event.message());
        } else {
            log::info!("{}", event.message());
        }
    }
}

/// Sink that records events in memory, for tests and log panels.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<EventRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything published so far, in publication order.
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.records.lock().expect("event sink poisoned").clone()
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: WorkflowEvent) {
        let record = EventRecord {
            occurred_at: Utc::now(),
            event,
        };
        self.records.lock().expect("event sink poisoned").push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(WorkflowEvent::ReviewFailed {
            change_id: "1".into(),
            error: "x".into()
        }
        .is_error());
        assert!(!WorkflowEvent::ReviewPosted {
            change_id: "1".into(),
            reviewer_count: 0
        }
        .is_error());
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.publish(WorkflowEvent::CherryPickStarted {
            change_id: "1".into(),
            branch_count: 2,
        });
        sink.publish(WorkflowEvent::CherryPicked {
            branch: "stable-1.0".into(),
            new_change_id: "X".into(),
        });

        let records = sink.snapshot();
        assert_eq!(records.len(), 2);
        assert!(matches!(
            records[0].event,
            WorkflowEvent::CherryPickStarted { .. }
        ));
        assert!(matches!(records[1].event, WorkflowEvent::CherryPicked { .. }));
    }

    #[test]
    fn test_event_serialization() {
        let event = WorkflowEvent::CherryPickFailed {
            branch: "stable-1.0".into(),
            error: "409".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"cherry_pick_failed\""));
        assert!(json.contains("stable-1.0"));
    }
}
