//! Request bodies for the review endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The review label this workflow votes on.
pub const CODE_REVIEW_LABEL: &str = "Code-Review";

/// The fixed approval value posted with every review.
pub const APPROVAL_VALUE: i32 = 1;

/// A single reviewer entry in a review request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerInput {
    /// Account identifier: username, email, or numeric account id.
    pub reviewer: String,
}

/// Body for `POST /a/changes/{id}/revisions/current/review`.
///
/// Adds reviewers and sets label votes in a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub reviewers: Vec<ReviewerInput>,

    /// Label votes keyed by label name. BTreeMap keeps the wire form stable.
    pub labels: BTreeMap<String, i32>,
}

impl ReviewInput {
    /// Build the standard workflow body: the given reviewers plus a fixed
    /// `Code-Review +1` vote. The vote is set regardless of roster size,
    /// including an empty roster.
    pub fn plus_one<I, S>(reviewers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels = BTreeMap::new();
        labels.insert(CODE_REVIEW_LABEL.to_string(), APPROVAL_VALUE);

        Self {
            reviewers: reviewers
                .into_iter()
                .map(|r| ReviewerInput { reviewer: r.into() })
                .collect(),
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_one_wraps_reviewers() {
        let input = ReviewInput::plus_one(["alice", "bob"]);
        assert_eq!(input.reviewers.len(), 2);
        assert_eq!(input.reviewers[0].reviewer, "alice");
        assert_eq!(input.reviewers[1].reviewer, "bob");
        assert_eq!(input.labels.get(CODE_REVIEW_LABEL), Some(&1));
    }

    #[test]
    fn test_plus_one_empty_roster_still_votes() {
        let input = ReviewInput::plus_one(Vec::<String>::new());
        assert!(input.reviewers.is_empty());
        assert_eq!(input.labels.get(CODE_REVIEW_LABEL), Some(&1));
    }

    #[test]
    fn test_wire_format() {
        let input = ReviewInput::plus_one(["alice"]);
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains(r#""reviewers":[{"reviewer":"alice"}]"#));
        assert!(json.contains(r#""labels":{"Code-Review":1}"#));
    }
}
