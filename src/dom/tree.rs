//! Concrete element tree.
//!
//! A minimal DOM-shaped tree used by the injection boundary and by tests.
//! Selector support covers what the workflow actually queries: tag names,
//! `#id`, and `.class`.

use crate::dom::locate::QueryNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// An element (or shadow-root fragment) in the tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Element {
    /// Tag name; empty for shadow-root fragments, which never self-match.
    pub tag: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    /// Attributes beyond id/class, e.g. `data-label`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    /// Own text, not including descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    shadow: Option<Box<Element>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Create a shadow-root fragment holding the given children.
    fn fragment(children: Vec<Element>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a light-tree child (builder form).
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Attach a shadow root containing the given children (builder form).
    pub fn shadow(mut self, children: Vec<Element>) -> Self {
        self.shadow = Some(Box::new(Element::fragment(children)));
        self
    }

    /// Append a child to an existing node.
    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Own text plus descendant light-tree text, in document order.
    /// Shadow content is not included, matching `textContent` semantics
    /// as seen from the light tree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Mutable shadow-piercing lookup, same visit order as
    /// [`locate`](crate::dom::locate): self, shadow subtree, then children.
    ///
    /// Recursive rather than stack-based; `&mut` nodes cannot be queued
    /// without splitting borrows, and injection targets sit near the root.
    pub fn find_mut(&mut self, selector: &str) -> Option<&mut Element> {
        if self.matches(selector) {
            return Some(self);
        }
        if let Some(shadow) = self.shadow.as_deref_mut() {
            if let Some(found) = shadow.find_mut(selector) {
                return Some(found);
            }
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(selector) {
                return Some(found);
            }
        }
        None
    }
}

impl QueryNode for Element {
    fn matches(&self, selector: &str) -> bool {
        if self.tag.is_empty() {
            // Shadow-root fragments have no element identity.
            return false;
        }
        if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else {
            self.tag == selector
        }
    }

    fn shadow_root(&self) -> Option<&Self> {
        self.shadow.as_deref()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_tag_id_class() {
        let el = Element::new("gr-button").with_id("send").with_class("primary");
        assert!(el.matches("gr-button"));
        assert!(el.matches("#send"));
        assert!(el.matches(".primary"));
        assert!(!el.matches("gr-dialog"));
        assert!(!el.matches("#other"));
        assert!(!el.matches(".secondary"));
    }

    #[test]
    fn test_fragment_never_matches() {
        let host = Element::new("host").shadow(vec![]);
        let fragment = host.shadow_root().unwrap();
        assert!(!fragment.matches("host"));
        assert!(!fragment.matches("#x"));
    }

    #[test]
    fn test_text_content_concatenates_light_tree() {
        let el = Element::new("div")
            .with_text("Fix ")
            .child(Element::new("b").with_text("crash"))
            .child(Element::new("span").with_text(" on resume"))
            .shadow(vec![Element::new("slot").with_text("hidden")]);
        assert_eq!(el.text_content(), "Fix crash on resume");
    }

    #[test]
    fn test_find_mut_reaches_into_shadow() {
        let mut root = Element::new("body").child(
            Element::new("gr-app").shadow(vec![Element::new("div").with_id("container")]),
        );
        let container = root.find_mut("#container").unwrap();
        container.append_child(Element::new("gr-button").with_id("added"));
        assert!(crate::dom::locate(&root, "#added").is_some());
    }
}
