//! Value streams - single-value push sources.

use std::rc::Rc;

use super::observer::{StreamObserver, Subscription};
use super::subject::{Publisher, SubjectInner};

/// A push-based stream of single values.
///
/// Cold by default: [`ValueStream::new`] runs the producer function once per
/// subscription, handing it a [`Publisher`] wired to that subscriber. The
/// producer decides when and whether to emit - it may publish synchronously
/// or stash the publisher and emit later. For a shared, producer-driven
/// source use [`subject`](super::subject).
///
/// Cloning a stream clones the subscription recipe, not any values.
pub struct ValueStream<T> {
    on_subscribe: Rc<dyn Fn(StreamObserver<T>) -> Subscription>,
}

impl<T> std::fmt::Debug for ValueStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueStream").finish_non_exhaustive()
    }
}

impl<T> Clone for ValueStream<T> {
    fn clone(&self) -> Self {
        Self {
            on_subscribe: self.on_subscribe.clone(),
        }
    }
}

impl<T: 'static> ValueStream<T> {
    /// Build a stream from a raw subscribe function. Crate plumbing; public
    /// constructors are [`ValueStream::new`], [`ValueStream::of`] and
    /// [`subject`](super::subject).
    pub(crate) fn from_subscribe(
        on_subscribe: impl Fn(StreamObserver<T>) -> Subscription + 'static,
    ) -> Self {
        Self {
            on_subscribe: Rc::new(on_subscribe),
        }
    }

    /// Register an observer. Returns the handle that stops delivery.
    pub fn subscribe(&self, observer: StreamObserver<T>) -> Subscription {
        (self.on_subscribe)(observer)
    }
}

impl<T: Clone + 'static> ValueStream<T> {
    /// Cold construction from a producer function.
    ///
    /// The producer runs once per subscription and receives the publisher
    /// for that subscriber. This inverts control: the construction site, not
    /// the consumer, decides when to emit.
    pub fn new(producer: impl Fn(Publisher<T>) + 'static) -> Self {
        let producer = Rc::new(producer);
        Self::from_subscribe(move |observer| {
            let inner = Rc::new(SubjectInner::new());
            let subscription = inner.attach(observer);
            producer(Publisher { inner });
            subscription
        })
    }

    /// A stream that emits one value and completes, per subscriber.
    pub fn of(value: T) -> Self {
        Self::new(move |publisher| {
            publisher.next(value.clone());
            publisher.complete();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_of_emits_then_completes() {
        let stream = ValueStream::of(7);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let completed = Rc::new(Cell::new(false));
        let seen_clone = seen.clone();
        let completed_clone = completed.clone();

        let _sub = stream.subscribe(StreamObserver::new(
            move |v| seen_clone.borrow_mut().push(v),
            |_| {},
            move || completed_clone.set(true),
        ));

        assert_eq!(*seen.borrow(), vec![7]);
        assert!(completed.get());
    }

    #[test]
    fn test_of_replays_per_subscriber() {
        let stream = ValueStream::of("x");

        for _ in 0..2 {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let seen_clone = seen.clone();
            let _sub = stream.subscribe(StreamObserver::on_next(move |v| {
                seen_clone.borrow_mut().push(v);
            }));
            assert_eq!(*seen.borrow(), vec!["x"]);
        }
    }

    #[test]
    fn test_producer_runs_per_subscription() {
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();

        let stream = ValueStream::new(move |publisher| {
            runs_clone.set(runs_clone.get() + 1);
            publisher.next(1);
        });

        let _a = stream.subscribe(StreamObserver::on_next(|_| {}));
        let _b = stream.subscribe(StreamObserver::on_next(|_| {}));

        assert_eq!(runs.get(), 2, "cold streams run the producer per subscriber");
    }

    #[test]
    fn test_stashed_publisher_keeps_emitting() {
        let stash: Rc<RefCell<Option<Publisher<i32>>>> = Rc::new(RefCell::new(None));
        let stash_clone = stash.clone();

        let stream = ValueStream::new(move |publisher| {
            *stash_clone.borrow_mut() = Some(publisher);
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let sub = stream.subscribe(StreamObserver::on_next(move |v| {
            seen_clone.borrow_mut().push(v);
        }));

        let publisher = stash.borrow().clone().unwrap();
        publisher.next(10);
        publisher.next(20);
        sub.unsubscribe();
        publisher.next(30);

        assert_eq!(*seen.borrow(), vec![10, 20]);
    }
}
