//! Shadow-piercing element lookup.
//!
//! Ordinary selector queries stop at shadow-root boundaries; Gerrit's UI is
//! built almost entirely from nested custom elements, so every lookup here
//! has to cross those boundaries explicitly.

/// A node in a tree that may host an encapsulated shadow subtree.
///
/// Implemented by [`Element`](crate::dom::Element) and by any host-page
/// adapter that wants to reuse [`locate`].
pub trait QueryNode: Sized {
    /// Whether this node matches a CSS-style selector.
    fn matches(&self, selector: &str) -> bool;

    /// The shadow subtree attached to this node, if any.
    fn shadow_root(&self) -> Option<&Self>;

    /// Light-tree children in document order.
    fn children(&self) -> &[Self];
}

/// Find the first node matching `selector`, piercing shadow roots.
///
/// Visit order per node: the node itself, then its entire shadow subtree,
/// then each child subtree in document order. The first match wins and
/// traversal stops. Returns `None` when nothing in the reachable tree
/// matches.
///
/// Uses an explicit stack: component trees have no fixed nesting depth, so
/// the traversal must not be bounded by call-stack depth.
pub fn locate<'a, N: QueryNode>(root: &'a N, selector: &str) -> Option<&'a N> {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.matches(selector) {
            return Some(node);
        }

        // Children go on first so the shadow root, pushed last, pops first
        // and its subtree is exhausted before any light-tree child.
        for child in node.children().iter().rev() {
            stack.push(child);
        }
        if let Some(shadow) = node.shadow_root() {
            stack.push(shadow);
        }
    }

    None
}
