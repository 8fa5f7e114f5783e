//! Request body for the cherry-pick endpoint.

use serde::{Deserialize, Serialize};

/// Body for `POST /a/changes/{id}/revisions/current/cherrypick`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CherryPickInput {
    /// Let Gerrit create the new change even when the pick conflicts.
    pub allow_conflicts: bool,

    /// Commit message for the picked commit.
    pub message: String,

    /// Destination branch name.
    pub destination: String,
}

impl CherryPickInput {
    /// Build the standard workflow body for one destination branch.
    /// Conflicts are always allowed so a pick never silently disappears.
    pub fn to_branch(message: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            allow_conflicts: true,
            message: message.into(),
            destination: destination.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let input = CherryPickInput::to_branch("Fix crash on resume", "stable-1.0");
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains(r#""allow_conflicts":true"#));
        assert!(json.contains(r#""message":"Fix crash on resume""#));
        assert!(json.contains(r#""destination":"stable-1.0""#));
    }
}
