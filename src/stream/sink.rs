//! Event sinks - the receiving end of `click` directives.

use crate::host::ActivationEvent;

use super::source::ValueStream;
use super::subject::{Publisher, subject};

/// An event sink bound into a context under a `click` directive.
///
/// [`EventSink::send`] is the sink's `next`-equivalent: the renderer calls
/// it with the triggering activation event, unmodified. The application
/// observes the paired stream from [`EventSink::channel`].
pub struct EventSink {
    publisher: Publisher<ActivationEvent>,
}

impl Clone for EventSink {
    fn clone(&self) -> Self {
        Self {
            publisher: self.publisher.clone(),
        }
    }
}

impl EventSink {
    /// Create a sink plus the stream of events forwarded through it.
    pub fn channel() -> (EventSink, ValueStream<ActivationEvent>) {
        let (publisher, stream) = subject();
        (EventSink { publisher }, stream)
    }

    /// Forward an activation event to the application.
    pub fn send(&self, event: ActivationEvent) {
        self.publisher.next(event);
    }
}
