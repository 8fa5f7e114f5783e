//! Shadow-piercing tree queries and UI injection.
//!
//! Gerrit's web UI nests custom elements behind shadow roots with no fixed
//! depth, so element lookup needs a traversal that crosses those boundaries.
//! This module provides the traversal ([`locate`]) over a small node
//! abstraction ([`QueryNode`]), a concrete [`Element`] tree, and the guarded
//! action-button injection built on top of them.

pub mod inject;
pub mod locate;
pub mod tree;

pub use inject::{ensure_action_buttons, ACTION_CONTAINER_SELECTOR, COMBINED_BUTTON_ID};
pub use locate::{locate, QueryNode};
pub use tree::Element;
