//! The reactive store.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use wlf_model::FieldPath;

use crate::path_ops::{get_at, set_at};

/// Options for path writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Commit the write without notifying any subscriber.
    pub silent: bool,
}

impl SetOptions {
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// How a subscriber is run against a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery {
    /// Call the listener when the selected value changed.
    Fire,
    /// Only record the selected value as seen.
    Sync,
}

type Listener<S> = Rc<RefCell<dyn FnMut(&S, Delivery)>>;

struct Subscriber<S> {
    id: SubscriptionId,
    notify: Listener<S>,
}

struct StoreInner<S> {
    state: RefCell<S>,
    subscribers: RefCell<Vec<Subscriber<S>>>,
    next_subscription: Cell<u64>,
    /// Bumped by every committed write, silent or not.
    revision: Cell<u64>,
    /// Bumped by every notification pass.
    notifications: Cell<u64>,
}

/// Shared, single-threaded container for one state value.
///
/// Cloning a `Store` clones the handle; all clones address the same state
/// and the same subscriber list.
pub struct Store<S> {
    inner: Rc<StoreInner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<S: Clone + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
                revision: Cell::new(0),
                notifications: Cell::new(0),
            }),
        }
    }

    /// Copy of the whole current state.
    ///
    /// The copy is detached: mutating it has no effect on the store.
    pub fn get(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Borrow the current state for the duration of `f`.
    ///
    /// `f` must not write to this store.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Derive a value from the current state with `selector`.
    pub fn select<R>(&self, selector: impl Fn(&S) -> R) -> R {
        self.read(selector)
    }

    /// Replace the whole state and notify.
    pub fn set(&self, state: S) {
        *self.inner.state.borrow_mut() = state;
        self.commit();
        self.notify();
    }

    /// Read-modify-write: run `f` on the live state, commit, then notify.
    ///
    /// Listeners observe every change `f` made.
    pub fn mutate(&self, f: impl FnOnce(&mut S)) {
        {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state);
        }
        self.commit();
        self.notify();
    }

    /// Register `listener` to receive `selector(state)` whenever it changes.
    ///
    /// The selected value is captured now; the listener is not called for the
    /// current state, only for later changes. Listeners run synchronously in
    /// subscription order.
    ///
    /// A listener may write to the store. Its own write is not delivered back
    /// to it; the value it wrote becomes its last seen value instead.
    pub fn subscribe<R, Sel, L>(&self, selector: Sel, mut listener: L) -> SubscriptionId
    where
        R: PartialEq + 'static,
        Sel: Fn(&S) -> R + 'static,
        L: FnMut(&R) + 'static,
    {
        let mut last = self.read(&selector);
        let notify = move |state: &S, delivery: Delivery| {
            let next = selector(state);
            if next != last {
                if delivery == Delivery::Fire {
                    listener(&next);
                }
                last = next;
            }
        };

        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            notify: Rc::new(RefCell::new(notify)),
        });
        id
    }

    /// Remove a subscriber. Returns false when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn commit(&self) {
        self.inner.revision.set(self.inner.revision.get() + 1);
    }

    fn notify(&self) {
        self.inner
            .notifications
            .set(self.inner.notifications.get() + 1);
        let listeners: Vec<Listener<S>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|s| Rc::clone(&s.notify))
            .collect();
        if listeners.is_empty() {
            return;
        }

        // Listeners get a snapshot so they are free to read or write the store.
        // An earlier listener may have written, so the snapshot is refreshed
        // whenever the revision moved.
        let mut snapshot = self.get();
        let mut snapshot_revision = self.inner.revision.get();
        for listener in listeners {
            let Ok(mut notify) = listener.try_borrow_mut() else {
                tracing::warn!("skipping re-entrant store listener");
                continue;
            };
            if snapshot_revision != self.inner.revision.get() {
                snapshot = self.get();
                snapshot_revision = self.inner.revision.get();
            }

            let before = self.inner.notifications.get();
            (&mut *notify)(&snapshot, Delivery::Fire);
            if self.inner.notifications.get() != before {
                // The listener wrote and was skipped by the nested pass.
                snapshot = self.get();
                snapshot_revision = self.inner.revision.get();
                (&mut *notify)(&snapshot, Delivery::Sync);
            }
        }
    }
}

impl Store<Value> {
    /// Copy of the value at `path`, `None` when the slot does not exist.
    pub fn get_path(&self, path: &FieldPath) -> Option<Value> {
        self.read(|state| get_at(state, path).cloned())
    }

    /// Replace the value at `path`, creating intermediate containers.
    ///
    /// See [`set_at`] for the creation rules. With [`SetOptions::silent`] no
    /// subscriber is notified.
    pub fn set_path(&self, path: &FieldPath, value: Value, options: SetOptions) {
        tracing::trace!(path = %path, silent = options.silent, "set path");
        {
            let mut state = self.inner.state.borrow_mut();
            set_at(&mut state, path, value);
        }
        self.commit();
        if !options.silent {
            self.notify();
        }
    }
}
