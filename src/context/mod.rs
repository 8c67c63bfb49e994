//! Reactive context - named bindings with immutable extension.
//!
//! A context maps binding names to streams and event sinks. Extension never
//! mutates: [`Context::extend`] produces a child holding its own bindings
//! plus a reference to the parent; lookup checks local bindings first and
//! falls through the chain. This is the explicit-chain replacement for
//! prototype-style inheritance.
//!
//! Resolution is typed. A directive asks for the kind it needs
//! ([`Context::resolve_value`], [`Context::resolve_list`],
//! [`Context::resolve_sink`]) and gets either the binding or a fail-fast
//! error naming the directive and key - absent bindings are never treated
//! as "no stream".

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{BindingKind, RenderError};
use crate::stream::{ArrayStream, EventSink, ValueStream};
use crate::types::Value;

/// One named binding in a context.
pub enum ContextEntry {
    /// A single-value stream, for `bind`.
    Value(ValueStream<Value>),
    /// An array-valued stream, for `repeat`.
    List(ArrayStream<Value>),
    /// An event sink, for `click`.
    Sink(EventSink),
}

impl Clone for ContextEntry {
    fn clone(&self) -> Self {
        match self {
            ContextEntry::Value(stream) => ContextEntry::Value(stream.clone()),
            ContextEntry::List(stream) => ContextEntry::List(stream.clone()),
            ContextEntry::Sink(sink) => ContextEntry::Sink(sink.clone()),
        }
    }
}

impl ContextEntry {
    fn kind(&self) -> BindingKind {
        match self {
            ContextEntry::Value(_) => BindingKind::Value,
            ContextEntry::List(_) => BindingKind::List,
            ContextEntry::Sink(_) => BindingKind::Sink,
        }
    }
}

impl From<ValueStream<Value>> for ContextEntry {
    fn from(stream: ValueStream<Value>) -> Self {
        ContextEntry::Value(stream)
    }
}

impl From<ArrayStream<Value>> for ContextEntry {
    fn from(stream: ArrayStream<Value>) -> Self {
        ContextEntry::List(stream)
    }
}

impl From<EventSink> for ContextEntry {
    fn from(sink: EventSink) -> Self {
        ContextEntry::Sink(sink)
    }
}

struct ContextInner {
    bindings: HashMap<String, ContextEntry>,
    parent: Option<Context>,
}

/// An immutable mapping from binding names to streams and sinks.
///
/// Cloning is cheap (shared inner). One root context per component; one
/// extended context per repeated-item instance.
#[derive(Clone)]
pub struct Context {
    inner: Rc<ContextInner>,
}

impl Context {
    /// An empty root context.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ContextInner {
                bindings: HashMap::new(),
                parent: None,
            }),
        }
    }

    /// A root context holding the given bindings.
    pub fn from_bindings<N, E, I>(bindings: I) -> Self
    where
        N: Into<String>,
        E: Into<ContextEntry>,
        I: IntoIterator<Item = (N, E)>,
    {
        Self {
            inner: Rc::new(ContextInner {
                bindings: bindings
                    .into_iter()
                    .map(|(name, entry)| (name.into(), entry.into()))
                    .collect(),
                parent: None,
            }),
        }
    }

    /// Produce a child context: the extra bindings shadow the parent's, and
    /// lookups fall through to the parent for everything else. The parent is
    /// never mutated.
    pub fn extend<N, E, I>(&self, bindings: I) -> Context
    where
        N: Into<String>,
        E: Into<ContextEntry>,
        I: IntoIterator<Item = (N, E)>,
    {
        Context {
            inner: Rc::new(ContextInner {
                bindings: bindings
                    .into_iter()
                    .map(|(name, entry)| (name.into(), entry.into()))
                    .collect(),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Look a name up through the chain.
    pub fn lookup(&self, name: &str) -> Option<ContextEntry> {
        let mut current = Some(self);
        while let Some(context) = current {
            if let Some(entry) = context.inner.bindings.get(name) {
                return Some(entry.clone());
            }
            current = context.inner.parent.as_ref();
        }
        None
    }

    /// Resolve a `bind` target.
    pub fn resolve_value(
        &self,
        directive: &'static str,
        key: &str,
    ) -> Result<ValueStream<Value>, RenderError> {
        match self.lookup(key) {
            Some(ContextEntry::Value(stream)) => Ok(stream),
            Some(other) => Err(kind_mismatch(directive, key, BindingKind::Value, &other)),
            None => Err(missing(directive, key)),
        }
    }

    /// Resolve a `repeat` target.
    pub fn resolve_list(
        &self,
        directive: &'static str,
        key: &str,
    ) -> Result<ArrayStream<Value>, RenderError> {
        match self.lookup(key) {
            Some(ContextEntry::List(stream)) => Ok(stream),
            Some(other) => Err(kind_mismatch(directive, key, BindingKind::List, &other)),
            None => Err(missing(directive, key)),
        }
    }

    /// Resolve a `click` target.
    pub fn resolve_sink(
        &self,
        directive: &'static str,
        key: &str,
    ) -> Result<EventSink, RenderError> {
        match self.lookup(key) {
            Some(ContextEntry::Sink(sink)) => Ok(sink),
            Some(other) => Err(kind_mismatch(directive, key, BindingKind::Sink, &other)),
            None => Err(missing(directive, key)),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(directive: &'static str, key: &str) -> RenderError {
    RenderError::MissingBinding {
        directive,
        key: key.to_string(),
    }
}

fn kind_mismatch(
    directive: &'static str,
    key: &str,
    expected: BindingKind,
    found: &ContextEntry,
) -> RenderError {
    tracing::debug!(
        directive,
        key,
        found = %found.kind(),
        "binding resolved to wrong kind"
    );
    RenderError::KindMismatch {
        directive,
        key: key.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_through_to_parent() {
        let root = Context::from_bindings([("text", ValueStream::of(Value::from("hi")))]);
        let child = root.extend([("nextKey", ValueStream::of(Value::from(0usize)))]);

        assert!(child.lookup("text").is_some(), "parent binding visible");
        assert!(child.lookup("nextKey").is_some(), "local binding visible");
        assert!(
            root.lookup("nextKey").is_none(),
            "extension must not leak into the parent"
        );
    }

    #[test]
    fn test_extension_shadows_parent() {
        let root = Context::from_bindings([("x", ValueStream::of(Value::from(1i64)))]);
        let child = root.extend([("x", ValueStream::of(Value::from(2i64)))]);

        let stream = child.resolve_value("bind", "x").unwrap();
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = stream.subscribe(crate::stream::StreamObserver::on_next(move |v| {
            seen_clone.borrow_mut().push(v);
        }));
        assert_eq!(*seen.borrow(), vec![Value::Int(2)]);
    }

    #[test]
    fn test_missing_binding_fails_fast() {
        let context = Context::new();
        let err = context.resolve_value("bind", "ghost").unwrap_err();
        assert!(matches!(err, RenderError::MissingBinding { .. }));
    }

    #[test]
    fn test_kind_mismatch_is_an_error() {
        let (sink, _events) = EventSink::channel();
        let context = Context::from_bindings([("tap", sink)]);

        let err = context.resolve_value("bind", "tap").unwrap_err();
        assert!(matches!(
            err,
            RenderError::KindMismatch {
                expected: BindingKind::Value,
                ..
            }
        ));
    }
}
