//! Render scopes - subtree ownership of subscriptions and nodes.
//!
//! Every rendered subtree (the root render, each repeat instance) gets a
//! scope. The scope owns:
//! - the subscriptions created while rendering the subtree
//! - the top-level host nodes attached to the subtree's parent
//! - dispose callbacks registered by directives (repeat uses one to tear
//!   down its live instances when an ancestor goes away)
//!
//! Disposing a scope unsubscribes everything *before* removing nodes, so a
//! torn-down subtree can never re-render into detached UI - the subscription
//! leak the naive teardown renderer suffers from.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::host::{Host, NodeId};
use crate::stream::Subscription;

struct ScopeInner {
    parent: NodeId,
    nodes: RefCell<Vec<NodeId>>,
    subscriptions: RefCell<Vec<Subscription>>,
    cleanups: RefCell<Vec<Box<dyn FnOnce()>>>,
    disposed: Cell<bool>,
}

/// Owner of one rendered subtree's resources. Cheap to clone (shared).
pub(crate) struct RenderScope {
    inner: Rc<ScopeInner>,
}

impl Clone for RenderScope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl RenderScope {
    /// A fresh scope whose top-level nodes attach to `parent`.
    pub(crate) fn new(parent: NodeId) -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                parent,
                nodes: RefCell::new(Vec::new()),
                subscriptions: RefCell::new(Vec::new()),
                cleanups: RefCell::new(Vec::new()),
                disposed: Cell::new(false),
            }),
        }
    }

    /// The host node this scope's top-level nodes attach to.
    pub(crate) fn parent(&self) -> NodeId {
        self.inner.parent
    }

    /// Track a top-level node (attached directly to the scope's parent).
    pub(crate) fn track_node(&self, node: NodeId) {
        self.inner.nodes.borrow_mut().push(node);
    }

    /// Take ownership of a subscription for the subtree's lifetime.
    pub(crate) fn track_subscription(&self, subscription: Subscription) {
        self.inner.subscriptions.borrow_mut().push(subscription);
    }

    /// Run a callback during disposal, after unsubscription and before node
    /// removal.
    pub(crate) fn on_dispose(&self, cleanup: impl FnOnce() + 'static) {
        self.inner.cleanups.borrow_mut().push(Box::new(cleanup));
    }

    /// The scope's top-level nodes, in attachment order.
    pub(crate) fn nodes(&self) -> Vec<NodeId> {
        self.inner.nodes.borrow().clone()
    }

    /// Number of top-level nodes.
    pub(crate) fn node_count(&self) -> usize {
        self.inner.nodes.borrow().len()
    }

    /// Tear the subtree down: unsubscribe, run cleanups (which dispose any
    /// nested instance scopes), then detach the top-level nodes. Idempotent.
    pub(crate) fn dispose<H: Host>(&self, host: &Rc<RefCell<H>>) {
        if self.inner.disposed.replace(true) {
            return;
        }
        for subscription in self.inner.subscriptions.take() {
            subscription.unsubscribe();
        }
        for cleanup in self.inner.cleanups.take() {
            cleanup();
        }
        let nodes = self.inner.nodes.take();
        let mut host = host.borrow_mut();
        for node in nodes {
            host.remove_child(self.inner.parent, node);
        }
    }
}
