//! Host UI tree - the external collaborator behind a minimal trait.
//!
//! The engine never talks to a concrete UI toolkit. It depends on exactly
//! the capability set in [`Host`]: create an element of a given kind, create
//! a text node, insert/remove a child, count children, and attach an
//! activation handler. Nodes are opaque index handles owned by the host.
//!
//! Positional insertion ([`Host::insert_child`]) is part of the set because
//! patch-based list reconciliation adds and moves instances at an index;
//! [`Host::append_child`] is the degenerate case and has a default impl.
//!
//! [`MemoryHost`] is the in-crate reference implementation, used by the test
//! suite and the demos.

mod memory;

pub use memory::MemoryHost;

/// Opaque handle to a live UI node, owned by the host tree.
pub type NodeId = usize;

/// The closed set of element kinds the renderer can ask a host to create.
///
/// Text leaves are not element kinds; they go through
/// [`Host::create_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Generic block container (`div`).
    Block,
    /// Inline container (`span`).
    Inline,
    /// Actionable control (`button`).
    Action,
}

/// A user activation, forwarded to `click` sinks unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEvent {
    /// The activated node.
    pub node: NodeId,
}

/// Handler attached to an element for user activation.
pub type ActivationHandler = Box<dyn Fn(&ActivationEvent)>;

/// The minimal mutation surface the renderer requires of a UI tree.
pub trait Host {
    /// Create a detached element of the given kind.
    fn create_element(&mut self, kind: ElementKind) -> NodeId;

    /// Create a detached text node.
    fn create_text(&mut self, content: &str) -> NodeId;

    /// Insert `child` under `parent` at `index` (existing children at and
    /// after `index` shift right).
    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize);

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.child_count(parent);
        self.insert_child(parent, child, index);
    }

    /// Number of children currently under `parent`.
    fn child_count(&self, parent: NodeId) -> usize;

    /// Detach `child` from `parent`. The node itself stays owned by the host.
    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    /// Attach an activation handler to an element.
    fn on_activate(&mut self, node: NodeId, handler: ActivationHandler);
}
