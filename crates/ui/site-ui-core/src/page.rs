//! Host capabilities the controller is written against.
//!
//! Adapters (the wasm crate, the in-memory test page) implement these; the
//! controller never reaches for browser globals itself.

use std::time::Duration;

/// The document and window as seen by the controller.
///
/// `Node` is an opaque handle; equality must mean "same element".
pub trait Page {
    type Node: Clone + PartialEq + 'static;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// Inline style property, `None` when unset.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn remove_style(&self, node: &Self::Node, property: &str);

    fn is_hidden(&self, node: &Self::Node) -> bool;
    fn set_hidden(&self, node: &Self::Node, hidden: bool);

    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
    /// Move `children` to the end of `parent` in one batch, keeping order.
    fn append_children(&self, parent: &Self::Node, children: &[Self::Node]);
    fn remove(&self, node: &Self::Node);

    /// Evaluate `(min-width: {px}px)` against the current viewport.
    fn matches_min_width(&self, px: u32) -> bool;
}

/// One-shot timers on the host's event loop.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
    /// Cancelling a handle whose task already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Keyboard handling result for handlers that may want the default action
/// suppressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled { prevent_default: bool },
}

impl KeyOutcome {
    #[inline]
    pub fn prevents_default(self) -> bool {
        matches!(
            self,
            KeyOutcome::Handled {
                prevent_default: true
            }
        )
    }
}

pub const KEY_ESCAPE: &str = "Escape";
pub const KEY_ENTER: &str = "Enter";
pub const KEY_SPACE: &str = " ";
