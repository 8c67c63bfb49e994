//! Observer and subscription handles.

/// The three consumers a stream delivers to.
///
/// Constructed with [`StreamObserver::new`] for the full triple, or
/// [`StreamObserver::on_next`] when only values matter (errors then go to
/// the log, completion is a no-op).
pub struct StreamObserver<T> {
    next: Box<dyn FnMut(T)>,
    error: Box<dyn FnMut(String)>,
    complete: Box<dyn FnMut()>,
}

impl<T> StreamObserver<T> {
    /// Create an observer from the full consumer triple.
    pub fn new(
        next: impl FnMut(T) + 'static,
        error: impl FnMut(String) + 'static,
        complete: impl FnMut() + 'static,
    ) -> Self {
        Self {
            next: Box::new(next),
            error: Box::new(error),
            complete: Box::new(complete),
        }
    }

    /// Create an observer that only consumes values.
    ///
    /// Errors are logged at `warn` so they are never silently swallowed.
    pub fn on_next(next: impl FnMut(T) + 'static) -> Self {
        Self::new(
            next,
            |reason| tracing::warn!(%reason, "unobserved stream error"),
            || {},
        )
    }

    /// Deliver a value.
    pub fn next(&mut self, value: T) {
        (self.next)(value);
    }

    /// Deliver an error. The stream is terminated afterwards.
    pub fn error(&mut self, reason: String) {
        (self.error)(reason);
    }

    /// Deliver completion. The stream is terminated afterwards.
    pub fn complete(&mut self) {
        (self.complete)();
    }
}

/// A live registration of interest in a stream's emissions.
///
/// Must be released via [`Subscription::unsubscribe`] to stop delivery and
/// free upstream producer resources. Dropping the handle without
/// unsubscribing leaves the subscription live (the render scope machinery
/// owns handles for exactly this reason).
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Build a subscription from a cancel action.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that is already spent (terminal streams hand these out).
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Stop delivery and release producer resources.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
