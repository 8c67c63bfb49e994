//! Array streams - ordered-sequence sources with patch derivation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::patch::{self, Patch};

use super::observer::{StreamObserver, Subscription};
use super::source::ValueStream;
use super::subject::Publisher;

/// A value stream whose element type is an ordered sequence.
///
/// Beyond plain subscription it exposes [`ArrayStream::diff_patch`]: a
/// derived stream of patch batches, one batch per array emission, computed
/// against the previously emitted snapshot.
pub struct ArrayStream<T: Clone + PartialEq + 'static> {
    stream: ValueStream<Vec<T>>,
}

impl<T: Clone + PartialEq + 'static> Clone for ArrayStream<T> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ArrayStream<T> {
    /// Cold construction from a producer function (see [`ValueStream::new`]).
    pub fn new(producer: impl Fn(Publisher<Vec<T>>) + 'static) -> Self {
        Self {
            stream: ValueStream::new(producer),
        }
    }

    /// A stream that emits one array and completes, per subscriber.
    pub fn of(items: Vec<T>) -> Self {
        Self {
            stream: ValueStream::of(items),
        }
    }

    /// Wrap an existing stream of arrays.
    pub fn from_stream(stream: ValueStream<Vec<T>>) -> Self {
        Self { stream }
    }

    /// A hot publisher/stream pair (see [`subject`](super::subject)).
    pub fn subject() -> (Publisher<Vec<T>>, Self) {
        let (publisher, stream) = super::subject();
        (publisher, Self { stream })
    }

    /// Register an observer for raw array snapshots.
    pub fn subscribe(&self, observer: StreamObserver<Vec<T>>) -> Subscription {
        self.stream.subscribe(observer)
    }

    /// Derive a stream of patch batches.
    ///
    /// Each array emission yields the [`Patch`] sequence from the previous
    /// snapshot (initially empty) to the new one. Errors and completion are
    /// forwarded unchanged.
    pub fn diff_patch(&self) -> ValueStream<Vec<Patch>> {
        let source = self.stream.clone();
        ValueStream::from_subscribe(move |observer| {
            let previous: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
            let observer = Rc::new(RefCell::new(observer));
            let observer_error = observer.clone();
            let observer_complete = observer.clone();

            source.subscribe(StreamObserver::new(
                move |snapshot: Vec<T>| {
                    let patches = {
                        let prev = previous.borrow();
                        patch::diff(&prev, &snapshot)
                    };
                    *previous.borrow_mut() = snapshot;
                    observer.borrow_mut().next(patches);
                },
                move |reason| observer_error.borrow_mut().error(reason),
                move || observer_complete.borrow_mut().complete(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_patch_first_emission_is_all_adds() {
        let (publisher, stream) = ArrayStream::<i32>::subject();

        let batches = Rc::new(RefCell::new(Vec::new()));
        let batches_clone = batches.clone();
        let _sub = stream.diff_patch().subscribe(StreamObserver::on_next(move |b| {
            batches_clone.borrow_mut().push(b);
        }));

        publisher.next(vec![10, 20]);

        assert_eq!(
            batches.borrow()[0],
            vec![Patch::Add { at: 0 }, Patch::Add { at: 1 }]
        );
    }

    #[test]
    fn test_diff_patch_tracks_previous_snapshot() {
        let (publisher, stream) = ArrayStream::<i32>::subject();

        let batches = Rc::new(RefCell::new(Vec::new()));
        let batches_clone = batches.clone();
        let _sub = stream.diff_patch().subscribe(StreamObserver::on_next(move |b| {
            batches_clone.borrow_mut().push(b);
        }));

        publisher.next(vec![1, 2, 3]);
        publisher.next(vec![3, 1, 2]);
        publisher.next(vec![3, 1, 2]);

        let batches = batches.borrow();
        assert_eq!(batches[1], vec![Patch::Move { from: 2, to: 0 }]);
        assert!(batches[2].is_empty(), "identical re-emission patches nothing");
    }

    #[test]
    fn test_diff_patch_is_per_subscriber() {
        let (publisher, stream) = ArrayStream::<i32>::subject();
        let patches = stream.diff_patch();

        let first = Rc::new(RefCell::new(Vec::new()));
        let first_clone = first.clone();
        let _a = patches.subscribe(StreamObserver::on_next(move |b: Vec<Patch>| {
            first_clone.borrow_mut().push(b);
        }));

        publisher.next(vec![1]);

        // A subscriber arriving now has no previous snapshot of its own.
        let second = Rc::new(RefCell::new(Vec::new()));
        let second_clone = second.clone();
        let _b = patches.subscribe(StreamObserver::on_next(move |b: Vec<Patch>| {
            second_clone.borrow_mut().push(b);
        }));

        publisher.next(vec![1, 2]);

        assert_eq!(first.borrow()[1], vec![Patch::Add { at: 1 }]);
        assert_eq!(
            second.borrow()[0],
            vec![Patch::Add { at: 0 }, Patch::Add { at: 1 }]
        );
    }
}
