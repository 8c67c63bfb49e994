//! Hot subject: a publisher fanning out to live subscribers.
//!
//! This is the delivery core every stream constructor builds on. Cold
//! streams ([`ValueStream::new`](super::ValueStream::new)) spin up a private
//! subject per subscription; [`subject`] exposes a shared one for
//! producer-driven sources (timers, input queues, event sinks).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::observer::{StreamObserver, Subscription};

/// Terminal state of a subject. Post-terminal subscribers are notified
/// immediately and receive nothing further.
#[derive(Clone)]
enum Terminal {
    Open,
    Completed,
    Errored(String),
}

/// One subscriber slot. `active` is a tombstone so a callback can
/// unsubscribe peers mid-delivery without invalidating the batch snapshot.
struct Slot<T> {
    observer: RefCell<StreamObserver<T>>,
    active: Cell<bool>,
}

struct SlotEntry<T> {
    id: usize,
    slot: Rc<Slot<T>>,
}

pub(super) struct SubjectInner<T> {
    slots: RefCell<Vec<SlotEntry<T>>>,
    next_id: Cell<usize>,
    terminal: RefCell<Terminal>,
}

impl<T: Clone + 'static> SubjectInner<T> {
    pub(super) fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            terminal: RefCell::new(Terminal::Open),
        }
    }

    pub(super) fn attach(self: &Rc<Self>, observer: StreamObserver<T>) -> Subscription {
        let terminal = self.terminal.borrow().clone();
        match terminal {
            Terminal::Completed => {
                let mut observer = observer;
                observer.complete();
                return Subscription::inert();
            }
            Terminal::Errored(reason) => {
                let mut observer = observer;
                observer.error(reason);
                return Subscription::inert();
            }
            Terminal::Open => {}
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let slot = Rc::new(Slot {
            observer: RefCell::new(observer),
            active: Cell::new(true),
        });
        self.slots.borrow_mut().push(SlotEntry {
            id,
            slot: slot.clone(),
        });

        // Weak handles only: the cancel closure must not keep the subject or
        // the observer (and whatever render state it captured) alive.
        let weak_slot = Rc::downgrade(&slot);
        let weak_inner = Rc::downgrade(self);
        Subscription::new(move || {
            if let Some(slot) = weak_slot.upgrade() {
                slot.active.set(false);
            }
            if let Some(inner) = weak_inner.upgrade() {
                inner.slots.borrow_mut().retain(|entry| entry.id != id);
            }
        })
    }

    pub(super) fn next(&self, value: T) {
        if !matches!(*self.terminal.borrow(), Terminal::Open) {
            return;
        }
        // Snapshot before delivering: callbacks may subscribe or unsubscribe.
        let snapshot: Vec<Rc<Slot<T>>> = self
            .slots
            .borrow()
            .iter()
            .map(|entry| entry.slot.clone())
            .collect();
        for slot in snapshot {
            if slot.active.get() {
                slot.observer.borrow_mut().next(value.clone());
            }
        }
    }

    pub(super) fn error(&self, reason: String) {
        if !matches!(*self.terminal.borrow(), Terminal::Open) {
            return;
        }
        *self.terminal.borrow_mut() = Terminal::Errored(reason.clone());
        for entry in self.slots.borrow_mut().drain(..) {
            if entry.slot.active.get() {
                entry.slot.observer.borrow_mut().error(reason.clone());
            }
        }
    }

    pub(super) fn complete(&self) {
        if !matches!(*self.terminal.borrow(), Terminal::Open) {
            return;
        }
        *self.terminal.borrow_mut() = Terminal::Completed;
        for entry in self.slots.borrow_mut().drain(..) {
            if entry.slot.active.get() {
                entry.slot.observer.borrow_mut().complete();
            }
        }
    }

    pub(super) fn subscriber_count(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|entry| entry.slot.active.get())
            .count()
    }
}

/// The emitting half of a stream: `next`, `error`, `complete`.
///
/// Handed to producer functions by cold stream construction, or paired with
/// a stream by [`subject`]. Clone freely; clones publish to the same
/// subscribers.
pub struct Publisher<T> {
    pub(super) inner: Rc<SubjectInner<T>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> Publisher<T> {
    /// Emit a value to every live subscriber.
    pub fn next(&self, value: T) {
        self.inner.next(value);
    }

    /// Terminate the stream with an error. Subsequent emissions are ignored.
    pub fn error(&self, reason: impl Into<String>) {
        self.inner.error(reason.into());
    }

    /// Terminate the stream normally. Subsequent emissions are ignored.
    pub fn complete(&self) {
        self.inner.complete();
    }

    /// Number of live subscriptions. Diagnostic: teardown tests use this to
    /// prove subscriptions were released.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }
}

/// Create a hot publisher/stream pair.
///
/// Values published before a subscriber attaches are lost to it; this is the
/// "no replay" contract.
pub fn subject<T: Clone + 'static>() -> (Publisher<T>, super::ValueStream<T>) {
    let inner = Rc::new(SubjectInner::new());
    let attach_inner = inner.clone();
    let stream =
        super::ValueStream::from_subscribe(move |observer| attach_inner.attach(observer));
    (Publisher { inner }, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_subject_delivers_in_order() {
        let (publisher, stream) = subject::<i32>();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        let _sub = stream.subscribe(StreamObserver::on_next(move |v| {
            seen_clone.borrow_mut().push(v);
        }));

        publisher.next(1);
        publisher.next(2);
        publisher.next(3);

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_values() {
        let (publisher, stream) = subject::<i32>();
        publisher.next(1);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = stream.subscribe(StreamObserver::on_next(move |v| {
            seen_clone.borrow_mut().push(v);
        }));

        publisher.next(2);
        assert_eq!(*seen.borrow(), vec![2], "no replay of earlier emissions");
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let (publisher, stream) = subject::<i32>();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        let sub = stream.subscribe(StreamObserver::on_next(move |v| {
            seen_clone.borrow_mut().push(v);
        }));

        publisher.next(1);
        sub.unsubscribe();
        publisher.next(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn test_error_is_terminal() {
        let (publisher, stream) = subject::<i32>();
        let errors = Rc::new(RefCell::new(Vec::new()));
        let errors_clone = errors.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        let _sub = stream.subscribe(StreamObserver::new(
            move |v| seen_clone.borrow_mut().push(v),
            move |reason| errors_clone.borrow_mut().push(reason),
            || {},
        ));

        publisher.next(1);
        publisher.error("boom");
        publisher.next(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(*errors.borrow(), vec!["boom".to_string()]);
    }

    #[test]
    fn test_subscribe_after_complete_gets_complete() {
        let (publisher, stream) = subject::<i32>();
        publisher.complete();

        let completed = Rc::new(Cell::new(false));
        let completed_clone = completed.clone();
        let _sub = stream.subscribe(StreamObserver::new(
            |_| {},
            |_| {},
            move || completed_clone.set(true),
        ));

        assert!(completed.get());
    }

    #[test]
    fn test_peer_unsubscribe_mid_delivery() {
        let (publisher, stream) = subject::<i32>();

        let second_sub: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let second_seen = Rc::new(RefCell::new(Vec::new()));

        // First subscriber tears down the second one on its first value.
        let sub_handle = second_sub.clone();
        let _first = stream.subscribe(StreamObserver::on_next(move |_| {
            if let Some(sub) = sub_handle.borrow_mut().take() {
                sub.unsubscribe();
            }
        }));

        let second_seen_clone = second_seen.clone();
        *second_sub.borrow_mut() = Some(stream.subscribe(StreamObserver::on_next(move |v| {
            second_seen_clone.borrow_mut().push(v);
        })));

        publisher.next(1);
        publisher.next(2);

        assert!(
            second_seen.borrow().is_empty(),
            "peer unsubscribed during delivery must not receive the batch"
        );
    }
}
