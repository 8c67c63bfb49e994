//! In-memory host tree.
//!
//! An arena of nodes addressed by index, in the same spirit as a component
//! registry: handles are indices, the arena owns the node data. Used by the
//! test suite to assert on rendered structure and by the demos to show
//! output without a real UI toolkit.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{ActivationEvent, ActivationHandler, ElementKind, Host, NodeId};

enum MemoryNode {
    Element {
        kind: ElementKind,
        children: Vec<NodeId>,
    },
    Text(String),
}

/// Arena-backed [`Host`] implementation.
///
/// Detached nodes stay in the arena (handles never dangle); only the child
/// lists change. [`MemoryHost::dispatch`] replays a user activation through
/// any handlers attached to a node.
#[derive(Default)]
pub struct MemoryHost {
    nodes: Vec<MemoryNode>,
    handlers: HashMap<NodeId, Vec<Rc<dyn Fn(&ActivationEvent)>>>,
}

impl MemoryHost {
    /// Create an empty host tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached block element to render into.
    pub fn create_root(&mut self) -> NodeId {
        self.create_element(ElementKind::Block)
    }

    /// Children of a node, in order. Empty for text nodes.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match &self.nodes[node] {
            MemoryNode::Element { children, .. } => children,
            MemoryNode::Text(_) => &[],
        }
    }

    /// The element kind of a node, or `None` for text nodes.
    pub fn element_kind(&self, node: NodeId) -> Option<ElementKind> {
        match &self.nodes[node] {
            MemoryNode::Element { kind, .. } => Some(*kind),
            MemoryNode::Text(_) => None,
        }
    }

    /// The literal content of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node] {
            MemoryNode::Text(content) => Some(content),
            MemoryNode::Element { .. } => None,
        }
    }

    /// Concatenated text content of a subtree, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        match &self.nodes[node] {
            MemoryNode::Text(content) => content.clone(),
            MemoryNode::Element { children, .. } => children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    /// Replay a user activation: fire every handler attached to `node` with
    /// the activation event.
    ///
    /// The handler list is snapshotted under a short borrow, then the borrow
    /// is released before any handler runs. Handlers routinely end in host
    /// mutations (a click feeding a stream that a `bind` re-renders from),
    /// which would otherwise hit a reentrant borrow.
    pub fn dispatch(host: &Rc<RefCell<Self>>, node: NodeId) {
        let handlers = host
            .borrow()
            .handlers
            .get(&node)
            .cloned()
            .unwrap_or_default();
        let event = ActivationEvent { node };
        for handler in handlers {
            handler(&event);
        }
    }

    fn children_mut(&mut self, node: NodeId) -> &mut Vec<NodeId> {
        match &mut self.nodes[node] {
            MemoryNode::Element { children, .. } => children,
            MemoryNode::Text(_) => panic!("text node {node} cannot have children"),
        }
    }
}

impl Host for MemoryHost {
    fn create_element(&mut self, kind: ElementKind) -> NodeId {
        self.nodes.push(MemoryNode::Element {
            kind,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn create_text(&mut self, content: &str) -> NodeId {
        self.nodes.push(MemoryNode::Text(content.to_string()));
        self.nodes.len() - 1
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        self.children_mut(parent).insert(index, child);
    }

    fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).len()
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.children_mut(parent).retain(|c| *c != child);
    }

    fn on_activate(&mut self, node: NodeId, handler: ActivationHandler) {
        self.handlers.entry(node).or_default().push(handler.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_insert_and_remove_children() {
        let mut host = MemoryHost::new();
        let root = host.create_root();
        let a = host.create_text("a");
        let b = host.create_text("b");
        let c = host.create_text("c");

        host.append_child(root, a);
        host.append_child(root, c);
        host.insert_child(root, b, 1);
        assert_eq!(host.children(root), &[a, b, c]);

        host.remove_child(root, b);
        assert_eq!(host.children(root), &[a, c]);
        assert_eq!(host.child_count(root), 2);
    }

    #[test]
    fn test_text_content_walks_subtree() {
        let mut host = MemoryHost::new();
        let root = host.create_root();
        let span = host.create_element(ElementKind::Inline);
        let hello = host.create_text("hello ");
        let world = host.create_text("world");

        host.append_child(root, span);
        host.append_child(span, hello);
        host.append_child(root, world);

        assert_eq!(host.text_content(root), "hello world");
    }

    #[test]
    fn test_dispatch_fires_handlers() {
        let host = Rc::new(RefCell::new(MemoryHost::new()));
        let button = host.borrow_mut().create_element(ElementKind::Action);

        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        host.borrow_mut().on_activate(
            button,
            Box::new(move |event| {
                assert_eq!(event.node, button);
                fired_clone.set(fired_clone.get() + 1);
            }),
        );

        MemoryHost::dispatch(&host, button);
        assert_eq!(fired.get(), 1);

        MemoryHost::dispatch(&host, button);
        assert_eq!(fired.get(), 2, "one firing per activation");
    }

    #[test]
    fn test_dispatch_allows_handlers_to_mutate_the_host() {
        let host = Rc::new(RefCell::new(MemoryHost::new()));
        let button = host.borrow_mut().create_element(ElementKind::Action);

        let host_clone = host.clone();
        host.borrow_mut().on_activate(
            button,
            Box::new(move |event| {
                let mut host = host_clone.borrow_mut();
                let label = host.create_text("clicked");
                host.append_child(event.node, label);
            }),
        );

        MemoryHost::dispatch(&host, button);
        assert_eq!(host.borrow().text_content(button), "clicked");
    }
}
