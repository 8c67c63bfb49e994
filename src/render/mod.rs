//! The renderer - projects descriptor trees onto a live host tree.
//!
//! [`Renderer::render`] validates a component's descriptor tree and walks
//! it once, creating host nodes and wiring directives to their resolved
//! bindings:
//!
//! - `bind` subscribes the node's text content to a value stream
//! - `repeat` instantiates the node as a per-item template, driven by an
//!   array stream, updating through list patches or full rebuilds
//!   ([`RepeatMode`])
//! - `click` forwards host activation events into an event sink
//!
//! Synchronous failures (invalid descriptor, unresolved binding) abort the
//! render with no partial UI. Failures arriving later through a stream
//! cannot abort anything, so they stop the affected subtree and are logged;
//! the rest of the view stays live.
//!
//! The returned [`RenderHandle`] owns the subtree. Disposing it unsubscribes
//! every stream the render wired up before detaching a single node.

mod scope;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::component::Component;
use crate::context::Context;
use crate::descriptor::{NodeDescriptor, Tag};
use crate::error::RenderError;
use crate::host::{ElementKind, Host, NodeId};
use crate::patch::{self, Patch};
use crate::stream::{StreamObserver, Publisher, ValueStream, subject};
use crate::types::Value;

use scope::RenderScope;

// =============================================================================
// RepeatMode
// =============================================================================

/// How `repeat` regions react to a new array emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Diff the new array against the previous snapshot and apply the
    /// minimal add/move/destroy sequence. Untouched instances keep their
    /// subtrees and subscriptions.
    #[default]
    Patch,
    /// Tear every instance down and re-render from scratch. Simple and
    /// always correct; kept as a baseline the patch path must be
    /// indistinguishable from.
    Rebuild,
}

// =============================================================================
// RenderHandle
// =============================================================================

/// Owner of one rendered component subtree.
///
/// Dropping the handle without calling [`RenderHandle::dispose`] leaves the
/// subtree live; teardown is always explicit.
pub struct RenderHandle<H: Host> {
    scope: RenderScope,
    host: Rc<RefCell<H>>,
}

impl<H: Host> std::fmt::Debug for RenderHandle<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderHandle").finish_non_exhaustive()
    }
}

impl<H: Host> RenderHandle<H> {
    /// Tear the subtree down: unsubscribe everything the render created,
    /// recursively dispose repeat instances, then detach the nodes.
    pub fn dispose(self) {
        self.scope.dispose(&self.host);
    }
}

// =============================================================================
// Renderer
// =============================================================================

struct ItemInstance {
    scope: RenderScope,
    key_publisher: Publisher<Value>,
    key: usize,
}

#[derive(Default)]
struct RepeatState {
    items: Vec<ItemInstance>,
    prev: Vec<Value>,
}

/// Projects components into a container node of a host tree.
///
/// Cheap to clone; clones share the host. One renderer can render any
/// number of components, each returning its own [`RenderHandle`].
pub struct Renderer<H: Host> {
    host: Rc<RefCell<H>>,
    container: NodeId,
    repeat_mode: RepeatMode,
}

impl<H: Host> Clone for Renderer<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            container: self.container,
            repeat_mode: self.repeat_mode,
        }
    }
}

impl<H: Host + 'static> Renderer<H> {
    /// A renderer targeting `container` inside `host`.
    pub fn new(host: Rc<RefCell<H>>, container: NodeId) -> Self {
        Self {
            host,
            container,
            repeat_mode: RepeatMode::default(),
        }
    }

    /// Select how repeat regions handle updates.
    pub fn with_repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.repeat_mode = mode;
        self
    }

    /// Render a component into the container.
    ///
    /// Validates the descriptor tree first, then walks it. On any
    /// synchronous error the nodes created so far are removed again, so a
    /// failed render leaves the container exactly as it was.
    pub fn render(&self, component: &Component) -> Result<RenderHandle<H>, RenderError> {
        component.descriptor().validate()?;

        let scope = RenderScope::new(self.container);
        match self.render_node(component.descriptor(), self.container, component.context(), &scope)
        {
            Ok(()) => Ok(RenderHandle {
                scope,
                host: self.host.clone(),
            }),
            Err(error) => {
                scope.dispose(&self.host);
                Err(error)
            }
        }
    }

    fn render_node(
        &self,
        node: &NodeDescriptor,
        parent: NodeId,
        context: &Context,
        scope: &RenderScope,
    ) -> Result<(), RenderError> {
        if node.attributes.repeat.is_some() {
            return self.render_repeat(node, parent, context, scope);
        }

        if node.tag == Tag::Text {
            return self.render_text(node, parent, scope);
        }

        let kind = match &node.tag {
            Tag::Block => ElementKind::Block,
            Tag::Inline => ElementKind::Inline,
            Tag::Action => ElementKind::Action,
            Tag::Other(name) => {
                // Unknown tags render to nothing; the parent is untouched.
                tracing::warn!(tag = %name, "unknown tag, skipping node");
                return Ok(());
            }
            Tag::Text => return Ok(()),
        };

        // Resolve every directive before touching the host, so an
        // unresolved binding never leaves a half-built element behind.
        let bind = match &node.attributes.bind {
            Some(key) => Some((key.clone(), context.resolve_value("bind", key)?)),
            None => None,
        };
        let click = match &node.attributes.click {
            Some(key) => Some(context.resolve_sink("click", key)?),
            None => None,
        };

        let element = {
            let mut host = self.host.borrow_mut();
            let element = host.create_element(kind);
            host.append_child(parent, element);
            element
        };
        if parent == scope.parent() {
            scope.track_node(element);
        }

        if let Some(sink) = click {
            self.host.borrow_mut().on_activate(
                element,
                Box::new(move |event| sink.send(event.clone())),
            );
        }

        if let Some((key, stream)) = bind {
            if !node.children.is_empty() {
                tracing::warn!(
                    bind = %key,
                    "`bind` owns the node's content, declared children are dropped"
                );
            }
            self.attach_bind(element, stream, scope);
            return Ok(());
        }

        for child in &node.children {
            self.render_node(child, element, context, scope)?;
        }
        Ok(())
    }

    fn render_text(
        &self,
        node: &NodeDescriptor,
        parent: NodeId,
        scope: &RenderScope,
    ) -> Result<(), RenderError> {
        if node.attributes.click.is_some() {
            tracing::warn!("`click` on a #text leaf is ignored, text produces no element");
        }
        let content = node.attributes.value.as_deref().unwrap_or_default();
        let text = {
            let mut host = self.host.borrow_mut();
            let text = host.create_text(content);
            host.append_child(parent, text);
            text
        };
        if parent == scope.parent() {
            scope.track_node(text);
        }
        Ok(())
    }

    /// Wire a value stream to a node's text content.
    ///
    /// The element exists already and is created exactly once; every
    /// emission only swaps the text child under it. A stream error marks
    /// the wiring dead so a straggling emission can never touch the host
    /// again.
    fn attach_bind(&self, element: NodeId, stream: ValueStream<Value>, scope: &RenderScope) {
        let host = self.host.clone();
        let current: Cell<Option<NodeId>> = Cell::new(None);
        let dead = Rc::new(Cell::new(false));
        let dead_on_error = dead.clone();

        let subscription = stream.subscribe(StreamObserver::new(
            move |value: Value| {
                if dead.get() {
                    return;
                }
                let mut host = host.borrow_mut();
                if let Some(old) = current.take() {
                    host.remove_child(element, old);
                }
                let text = host.create_text(&value.as_text());
                host.append_child(element, text);
                current.set(Some(text));
            },
            move |reason| {
                dead_on_error.set(true);
                tracing::error!(%reason, element, "bind stream errored, content frozen");
            },
            || {},
        ));
        scope.track_subscription(subscription);
    }

    /// Wire a repeat region: subscribe to the array stream and maintain one
    /// rendered instance per element.
    fn render_repeat(
        &self,
        node: &NodeDescriptor,
        parent: NodeId,
        context: &Context,
        scope: &RenderScope,
    ) -> Result<(), RenderError> {
        let key = node
            .attributes
            .repeat
            .clone()
            .ok_or_else(|| RenderError::InvalidDescriptor {
                reason: "repeat region without a repeat key".to_string(),
            })?;
        let list = context.resolve_list("repeat", &key)?;

        let template = Rc::new(node.without_repeat());
        let state = Rc::new(RefCell::new(RepeatState::default()));

        // Ancestor teardown must reach the instances created after this
        // point, not just the array subscription.
        let state_on_dispose = state.clone();
        let host_on_dispose = self.host.clone();
        scope.on_dispose(move || {
            let mut state = state_on_dispose.borrow_mut();
            for item in state.items.drain(..) {
                item.scope.dispose(&host_on_dispose);
            }
        });

        let renderer = self.clone();
        let context = context.clone();
        let dead = Rc::new(Cell::new(false));
        let dead_on_error = dead.clone();
        let state_on_next = state.clone();

        let subscription = list.subscribe(StreamObserver::new(
            move |values: Vec<Value>| {
                if dead.get() {
                    return;
                }
                let mut state = state_on_next.borrow_mut();
                match renderer.repeat_mode {
                    RepeatMode::Patch => {
                        renderer.patch_instances(&mut state, &template, parent, &context, &values);
                    }
                    RepeatMode::Rebuild => {
                        renderer.rebuild_instances(&mut state, &template, parent, &context, &values);
                    }
                }
                state.prev = values;
            },
            move |reason| {
                dead_on_error.set(true);
                tracing::error!(%reason, repeat = %key, "repeat stream errored, region frozen");
            },
            || {},
        ));
        scope.track_subscription(subscription);
        Ok(())
    }

    fn rebuild_instances(
        &self,
        state: &mut RepeatState,
        template: &NodeDescriptor,
        parent: NodeId,
        context: &Context,
        values: &[Value],
    ) {
        for item in state.items.drain(..) {
            item.scope.dispose(&self.host);
        }
        for (index, value) in values.iter().enumerate() {
            let item = self.render_instance(template, parent, context, value, index);
            state.items.push(item);
        }
    }

    fn patch_instances(
        &self,
        state: &mut RepeatState,
        template: &NodeDescriptor,
        parent: NodeId,
        context: &Context,
        values: &[Value],
    ) {
        let patches = patch::diff(&state.prev, values);
        for step in patches {
            match step {
                Patch::Destroy { at } => {
                    let item = state.items.remove(at);
                    item.scope.dispose(&self.host);
                }
                Patch::Move { from, to } => {
                    // diff guarantees from > to, so items[..to] is
                    // untouched by the removal.
                    let item = state.items.remove(from);
                    let target = host_index(&state.items[..to]);
                    self.relocate(parent, &item.scope.nodes(), target);
                    state.items.insert(to, item);
                }
                Patch::Add { at } => {
                    let item = self.render_instance(template, parent, context, &values[at], at);
                    let target = host_index(&state.items[..at]);
                    self.relocate(parent, &item.scope.nodes(), target);
                    state.items.insert(at, item);
                }
            }
        }

        // Surviving instances that changed position get a fresh key
        // emission; their value streams are untouched.
        for (index, item) in state.items.iter_mut().enumerate() {
            if item.key != index {
                item.key = index;
                item.key_publisher.next(Value::from(index));
            }
        }
    }

    /// Render one repeat instance: extend the context with the item's
    /// `nextVal`/`nextKey` bindings and render the template under it.
    ///
    /// A failing instance is logged and yields a zero-node placeholder so
    /// the instance list stays aligned with the array.
    fn render_instance(
        &self,
        template: &NodeDescriptor,
        parent: NodeId,
        context: &Context,
        value: &Value,
        index: usize,
    ) -> ItemInstance {
        let (key_publisher, key_stream) = subject::<Value>();
        let item_context = context.extend([
            ("nextVal", ValueStream::of(value.clone())),
            ("nextKey", key_stream),
        ]);

        let item_scope = RenderScope::new(parent);
        if let Err(error) = self.render_node(template, parent, &item_context, &item_scope) {
            tracing::error!(%error, index, "repeat instance failed, skipping it");
            item_scope.dispose(&self.host);
        }
        // The key arrives after the subtree subscribed to it.
        key_publisher.next(Value::from(index));

        ItemInstance {
            scope: item_scope,
            key_publisher,
            key: index,
        }
    }

    /// Detach an instance's nodes and reinsert them at `index` within the
    /// parent's child list.
    fn relocate(&self, parent: NodeId, nodes: &[NodeId], index: usize) {
        let mut host = self.host.borrow_mut();
        for node in nodes {
            host.remove_child(parent, *node);
        }
        for (offset, node) in nodes.iter().enumerate() {
            host.insert_child(parent, *node, index + offset);
        }
    }
}

/// Host child index where the instance after `preceding` starts.
fn host_index(preceding: &[ItemInstance]) -> usize {
    preceding.iter().map(|item| item.scope.node_count()).sum()
}
