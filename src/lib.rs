//! # viewflow
//!
//! A minimal reactive view-rendering engine: declarative node descriptors,
//! push-based streams, and a renderer that keeps a live host tree
//! synchronized with them.
//!
//! ## Architecture
//!
//! - **[`descriptor`]** - the serializable node tree (`div`/`span`/`#text`/
//!   `button`) and its directives (`bind`, `repeat`, `click`)
//! - **[`context`]** - named bindings resolved per directive, with
//!   immutable extension for repeated items
//! - **[`stream`]** - cold and hot push streams, array streams, and event
//!   sinks
//! - **[`patch`]** - the list diff engine (`Add`/`Move`/`Destroy`) behind
//!   incremental repeat updates
//! - **[`host`]** - the abstract UI tree the renderer mutates, plus an
//!   in-memory implementation
//! - **[`render`]** - the renderer itself and the scope machinery that
//!   guarantees leak-free teardown
//!
//! ## Quick start
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use viewflow::{
//!     ComponentFactory, Context, MemoryHost, NodeDescriptor, Renderer, Tag, Value, ValueStream,
//! };
//!
//! let host = Rc::new(RefCell::new(MemoryHost::new()));
//! let root = host.borrow_mut().create_root();
//!
//! let descriptor = NodeDescriptor::new(Tag::Block).with_bind("greeting");
//! let context = Context::from_bindings([("greeting", ValueStream::of(Value::from("hello!")))]);
//! let component = ComponentFactory::from_node(descriptor, context);
//!
//! let handle = Renderer::new(host.clone(), root)
//!     .render(&component)
//!     .unwrap();
//! assert_eq!(host.borrow().text_content(root), "hello!");
//!
//! handle.dispose();
//! assert!(host.borrow().children(root).is_empty());
//! ```

pub mod component;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod patch;
pub mod render;
pub mod stream;
pub mod types;

pub use component::{Component, ComponentFactory, JsonTemplate, TemplateAdapter};
pub use context::{Context, ContextEntry};
pub use descriptor::{Attributes, Directive, NodeDescriptor, Tag};
pub use error::{BindingKind, ParseError, RenderError};
pub use host::{ActivationEvent, ActivationHandler, ElementKind, Host, MemoryHost, NodeId};
pub use patch::{Patch, apply, diff};
pub use render::{RenderHandle, Renderer, RepeatMode};
pub use stream::{ArrayStream, EventSink, Publisher, StreamObserver, Subscription, ValueStream, subject};
pub use types::Value;
