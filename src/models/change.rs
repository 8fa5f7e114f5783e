//! Change metadata models.

use serde::{Deserialize, Serialize};

/// Reference to the change the workflow operates on.
///
/// Supplied by the host page (or caller); this crate never creates or
/// mutates the referenced change record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRef {
    /// Opaque Gerrit change identifier, used verbatim in endpoint paths.
    pub id: String,

    /// Project the change belongs to. Drives settings-key namespacing.
    pub project: String,
}

impl ChangeRef {
    pub fn new(id: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project: project.into(),
        }
    }
}

/// Subset of Gerrit's ChangeInfo returned by the cherry-pick endpoint.
///
/// Only the fields the workflow consumes; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeInfo {
    /// Full change identifier (`project~branch~Change-Id` form).
    pub id: String,

    pub project: Option<String>,

    /// Branch the new change was created on.
    pub branch: Option<String>,

    pub subject: Option<String>,

    /// Change status, e.g. `NEW`.
    pub status: Option<String>,
}
