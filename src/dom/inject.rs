//! Action-button injection boundary.
//!
//! The host page re-renders its action row freely, so injection is driven
//! by repeated mutation callbacks. Presence of the combined button is the
//! idempotence guard: re-running against an already-injected tree is a
//! no-op.

use crate::dom::{locate, Element};
use crate::error::Error;

/// Id of the combined review + cherry-pick button; doubles as the guard.
pub const COMBINED_BUTTON_ID: &str = "ReviewCP";

/// Selector for Gerrit's primary change-action container.
pub const ACTION_CONTAINER_SELECTOR: &str = "#primaryActions";

fn action_button(label: &str, caption: &str, title: &str) -> Element {
    Element::new("gr-button")
        .with_attr("link", "")
        .with_attr("position-below", "")
        .with_attr("data-label", label)
        .with_attr("data-action-type", "customAction")
        .with_attr("data-action-key", "reviewCherryPick")
        .with_attr("title", title)
        .with_attr("role", "button")
        .with_attr("tabindex", "0")
        .with_text(caption)
}

/// Inject the "+1" and "+1&CP" buttons into the action container.
///
/// Returns `Ok(false)` when the buttons are already present, `Ok(true)`
/// after injecting, and `Err(NotFound)` when the action container is not
/// yet rendered (the caller simply retries on the next mutation).
pub fn ensure_action_buttons(root: &mut Element) -> Result<bool, Error> {
    if locate(root, &format!("#{}", COMBINED_BUTTON_ID)).is_some() {
        log::debug!("action buttons already present, skipping injection");
        return Ok(false);
    }

    let container = root
        .find_mut(ACTION_CONTAINER_SELECTOR)
        .ok_or_else(|| Error::not_found("action container"))?;

    container.append_child(action_button("Review", "+1", "Post review vote"));
    container.append_child(
        action_button("Review&CP", "+1&CP", "Post review vote and cherry-pick")
            .with_id(COMBINED_BUTTON_ID),
    );

    log::info!("injected review and cherry-pick action buttons");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::QueryNode;

    fn change_page() -> Element {
        Element::new("body").child(Element::new("gr-app").shadow(vec![Element::new(
            "gr-change-actions",
        )
        .shadow(vec![Element::new("div").with_id("primaryActions")])]))
    }

    #[test]
    fn test_injects_both_buttons() {
        let mut page = change_page();
        assert!(ensure_action_buttons(&mut page).unwrap());
        assert!(locate(&page, "#ReviewCP").is_some());
        let container = page.find_mut("#primaryActions").unwrap();
        assert_eq!(QueryNode::children(&*container).len(), 2);
    }

    #[test]
    fn test_reinjection_is_guarded() {
        let mut page = change_page();
        assert!(ensure_action_buttons(&mut page).unwrap());
        // Mutation observers fire repeatedly; the second pass must not
        // duplicate the buttons.
        assert!(!ensure_action_buttons(&mut page).unwrap());
        let container = page.find_mut("#primaryActions").unwrap();
        assert_eq!(QueryNode::children(&*container).len(), 2);
    }

    #[test]
    fn test_missing_container_is_reported() {
        let mut page = Element::new("body");
        let err = ensure_action_buttons(&mut page).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
