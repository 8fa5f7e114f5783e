//! Data models for the workflow.
//!
//! Wire bodies for the two Gerrit endpoints this crate drives, plus the
//! change metadata the host supplies and the response subset it reads back.

pub mod change;
pub mod cherry_pick;
pub mod review;

// Re-exports for convenient access
pub use change::{ChangeInfo, ChangeRef};
pub use cherry_pick::CherryPickInput;
pub use review::{ReviewInput, ReviewerInput, APPROVAL_VALUE, CODE_REVIEW_LABEL};
