//! Minimal reactive primitives for the selector view-model
//!
//! The component runs on a single logical thread of control (the host's UI
//! dispatcher), so these primitives use interior mutability instead of
//! locks. Delivery is synchronous on the caller's stack.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared cancellation flag handed to every subscription a component
/// registers. Cancelling the token silences all of them at once.
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct Subscriber<T> {
    token: CancellationToken,
    callback: Box<dyn FnMut(&T)>,
}

struct SubjectInner<T> {
    latest: Option<T>,
    subscribers: Vec<Subscriber<T>>,
}

/// Live sequence with a single-slot replay cache
///
/// New subscribers receive the latest value synchronously at subscribe time
/// (if one was ever published), then every subsequent update. Subscriptions
/// registered under a cancelled token are never invoked.
///
/// Values published from within a callback are delivered only to
/// subscribers registered at that point.
pub struct ReplaySubject<T> {
    inner: RefCell<SubjectInner<T>>,
}

impl<T: Clone> ReplaySubject<T> {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(SubjectInner {
                latest: None,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Publishes a value: caches it and delivers it to every live subscriber.
    pub fn next(&self, value: T) {
        let mut active = {
            let mut inner = self.inner.borrow_mut();
            inner.latest = Some(value.clone());
            inner.subscribers.retain(|s| !s.token.is_cancelled());
            std::mem::take(&mut inner.subscribers)
        };
        // The subscriber list is detached while callbacks run so that a
        // callback may subscribe or publish without re-borrowing it.
        for subscriber in active.iter_mut() {
            if !subscriber.token.is_cancelled() {
                (subscriber.callback)(&value);
            }
        }
        let mut inner = self.inner.borrow_mut();
        let added = std::mem::take(&mut inner.subscribers);
        active.extend(added);
        inner.subscribers = active;
    }

    /// Registers a callback under `token`, replaying the cached value first.
    pub fn subscribe(&self, token: &CancellationToken, mut callback: impl FnMut(&T) + 'static) {
        if token.is_cancelled() {
            return;
        }
        let replay = self.inner.borrow().latest.clone();
        if let Some(value) = replay {
            callback(&value);
        }
        self.inner.borrow_mut().subscribers.push(Subscriber {
            token: token.clone(),
            callback: Box::new(callback),
        });
    }

    /// Latest published value, if any.
    pub fn latest(&self) -> Option<T> {
        self.inner.borrow().latest.clone()
    }

    /// Drops every subscriber. The replay cache is kept.
    pub fn clear_subscribers(&self) {
        self.inner.borrow_mut().subscribers.clear();
    }
}

impl<T: Clone> Default for ReplaySubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain event stream: no replay, subscribers only see values emitted after
/// they registered.
pub struct EventEmitter<T> {
    subscribers: RefCell<Vec<Subscriber<T>>>,
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn emit(&self, value: &T) {
        let mut active = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|s| !s.token.is_cancelled());
            std::mem::take(&mut *subscribers)
        };
        for subscriber in active.iter_mut() {
            if !subscriber.token.is_cancelled() {
                (subscriber.callback)(value);
            }
        }
        let mut subscribers = self.subscribers.borrow_mut();
        let added = std::mem::take(&mut *subscribers);
        active.extend(added);
        *subscribers = active;
    }

    pub fn subscribe(&self, token: &CancellationToken, callback: impl FnMut(&T) + 'static) {
        if token.is_cancelled() {
            return;
        }
        self.subscribers.borrow_mut().push(Subscriber {
            token: token.clone(),
            callback: Box::new(callback),
        });
    }

    pub fn clear_subscribers(&self) {
        self.subscribers.borrow_mut().clear();
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_subject_replays_latest_on_subscribe() {
        let subject = ReplaySubject::new();
        subject.next(1);
        subject.next(2);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let token = CancellationToken::new();
        subject.subscribe(&token, move |v| sink.borrow_mut().push(*v));

        subject.next(3);
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_replay_subject_without_value_does_not_replay() {
        let subject: ReplaySubject<i32> = ReplaySubject::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let token = CancellationToken::new();
        subject.subscribe(&token, move |v| sink.borrow_mut().push(*v));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_cancelled_token_stops_delivery() {
        let subject = ReplaySubject::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let token = CancellationToken::new();
        subject.subscribe(&token, move |v| sink.borrow_mut().push(*v));

        subject.next(1);
        token.cancel();
        subject.next(2);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_subscribe_after_cancel_is_inert() {
        let subject = ReplaySubject::new();
        subject.next(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let token = CancellationToken::new();
        token.cancel();
        subject.subscribe(&token, move |v| sink.borrow_mut().push(*v));
        subject.next(2);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_event_emitter_has_no_replay() {
        let emitter = EventEmitter::new();
        emitter.emit(&1);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let token = CancellationToken::new();
        emitter.subscribe(&token, move |v: &i32| sink.borrow_mut().push(*v));

        emitter.emit(&2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_subscriber_registered_during_emission_sees_later_values_only() {
        let subject = Rc::new(ReplaySubject::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let token = CancellationToken::new();

        let inner_subject = Rc::clone(&subject);
        let inner_seen = Rc::clone(&seen);
        let inner_token = token.clone();
        let registered = Cell::new(false);
        subject.subscribe(&token, move |_: &i32| {
            if !registered.get() {
                registered.set(true);
                let sink = Rc::clone(&inner_seen);
                inner_subject.subscribe(&inner_token, move |v| sink.borrow_mut().push(*v));
            }
        });

        subject.next(1);
        subject.next(2);
        // The late subscriber was registered while 1 was being delivered:
        // it replays 1 (the cached value at registration) and then sees 2.
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
