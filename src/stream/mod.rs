//! Stream abstraction - the push-based reactive primitive.
//!
//! This module decouples the renderer from any specific reactive library.
//! Everything the engine knows about "data over time" is here:
//! - [`StreamObserver`] - the three consumers: `next`, `error`, `complete`
//! - [`Subscription`] - live registration of interest; `unsubscribe` releases it
//! - [`ValueStream`] - a stream of single values, cold-constructed from a
//!   producer function that receives a [`Publisher`]
//! - [`subject`] - a hot publisher/stream pair for producer-driven sources
//! - [`ArrayStream`] - a stream of ordered sequences, with [`ArrayStream::diff_patch`]
//! - [`EventSink`] - the `next`-equivalent half of an event channel
//!
//! # Delivery model
//!
//! Single-threaded, cooperative, push-driven. All work happens synchronously
//! inside a `next` delivery. Within one subscription, emissions arrive in
//! producer order and each reaction runs to completion before the next
//! emission is processed. There is no buffering or replay: subscribers see
//! only values emitted after they subscribed.
//!
//! A callback may unsubscribe other subscriptions of the same stream
//! mid-batch; dead slots are skipped. Re-entering the *same* subject from
//! inside its own delivery is outside the model (no reentrant overlap on one
//! binding).

mod array;
mod observer;
mod sink;
mod source;
mod subject;

pub use array::ArrayStream;
pub use observer::{StreamObserver, Subscription};
pub use sink::EventSink;
pub use source::ValueStream;
pub use subject::{Publisher, subject};
