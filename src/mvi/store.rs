//! The store: single owner of application state.
//!
//! A root [`Store`] owns the current state and the root reducer. Every change
//! goes through [`Store::send`], which runs the reducer, replaces the state
//! and then notifies subscribers, all before returning.
//!
//! [`Store::scope`] derives a child store over a projection of the state. A
//! child holds no state of its own: reading it projects the parent's current
//! value and sending to it forwards to the parent, so children can never
//! drift from the root.
//!
//! Subscribers are notified after every `send`, whether or not the state
//! changed. A reducer that panics leaves the state it was given untouched.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use parking_lot::{Mutex, RwLock};

use super::error::StoreError;
use super::reducer::{BoxReducer, Reducer};

type Observer<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// What a [`Store`] handle talks to: the root state or a projection of it.
trait Source<V, A>: Send + Sync {
    fn try_send(&self, action: A) -> Result<(), StoreError>;

    /// Call `f` exactly once with the current value.
    fn visit(&self, f: &mut dyn FnMut(&V));

    fn subscribe(&self, observer: Observer<V>) -> Subscription;

    fn dispose(&self);

    fn is_disposed(&self) -> bool;
}

/// Handle to a root or scoped store.
///
/// Cloning a handle is cheap and yields another handle to the same store.
pub struct Store<V, A> {
    source: Arc<dyn Source<V, A>>,
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: 'static,
{
    /// Create a live root store.
    pub fn new<R>(initial: S, reducer: R) -> Self
    where
        R: Reducer<State = S, Action = A> + Send + Sync + 'static,
    {
        let root = Root {
            state: RwLock::new(initial),
            reducer: Box::new(reducer),
            observers: Arc::new(Observers::new()),
            dispatch: Mutex::new(()),
            dispatching_on: Mutex::new(None),
            disposed: AtomicBool::new(false),
        };
        Self {
            source: Arc::new(root),
        }
    }
}

impl<V: 'static, A: 'static> Store<V, A> {
    /// Dispatch `action` through the root reducer.
    ///
    /// Actions sent to a disposed store are dropped with a warning.
    ///
    /// # Panics
    ///
    /// Panics when called re-entrantly, i.e. from a subscriber or reducer
    /// while this store is dispatching on the same thread.
    pub fn send(&self, action: A) {
        match self.try_send(action) {
            Ok(()) => {}
            Err(StoreError::Disposed) => {
                tracing::warn!("action sent to a disposed store was ignored");
            }
            Err(err @ StoreError::Reentrant) => {
                panic!("store contract violation: {err}");
            }
        }
    }

    /// Like [`send`](Self::send), but reports contract violations.
    pub fn try_send(&self, action: A) -> Result<(), StoreError> {
        self.source.try_send(action)
    }

    /// Current value.
    pub fn value(&self) -> V
    where
        V: Clone,
    {
        self.with_value(V::clone)
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with_value<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        let mut f = Some(f);
        let mut result = None;
        self.source.visit(&mut |value| {
            if let Some(f) = f.take() {
                result = Some(f(value));
            }
        });
        result.expect("store source visits its value exactly once")
    }

    /// Register `observer` to be called with the new value after every send.
    ///
    /// The observer stays registered until the returned handle is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.source.subscribe(Arc::new(observer))
    }

    /// Child store exposing `project(value)` and forwarding actions verbatim.
    pub fn scope<L, P>(&self, project: P) -> Store<L, A>
    where
        L: 'static,
        P: Fn(&V) -> L + Send + Sync + 'static,
    {
        self.scope_with(project, |action: A| action)
    }

    /// Child store over a projected value and a narrower action type.
    ///
    /// Actions sent to the child are embedded into the parent's action type
    /// with `embed` and forwarded.
    pub fn scope_with<L, LA, P, E>(&self, project: P, embed: E) -> Store<L, LA>
    where
        L: 'static,
        LA: 'static,
        P: Fn(&V) -> L + Send + Sync + 'static,
        E: Fn(LA) -> A + Send + Sync + 'static,
    {
        let scoped = Scoped {
            parent: self.clone(),
            project: Arc::new(project),
            embed: Arc::new(embed),
            disposed: Arc::new(AtomicBool::new(false)),
        };
        Store {
            source: Arc::new(scoped),
        }
    }

    /// Stop accepting actions.
    ///
    /// Disposing the root disposes every scope derived from it. Disposing a
    /// scope only affects that scope and the scopes derived from it.
    pub fn dispose(&self) {
        self.source.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.source.is_disposed()
    }
}

impl<V, A> Clone for Store<V, A> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<V, A> fmt::Debug for Store<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &std::any::type_name::<V>())
            .field("action", &std::any::type_name::<A>())
            .field("disposed", &self.source.is_disposed())
            .finish()
    }
}

/// Handle returned by [`Store::subscribe`]; unsubscribes when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle with nothing to cancel, returned by disposed stores.
    fn inert() -> Self {
        Self { cancel: None }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Ordered observer registry shared between a root store and its
/// subscription handles.
struct Observers<V> {
    entries: Mutex<Vec<(u64, Observer<V>)>>,
    next_id: AtomicU64,
}

impl<V: 'static> Observers<V> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    fn insert(self: &Arc<Self>, observer: Observer<V>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push((id, observer));
        tracing::debug!(id, "observer subscribed");

        let registry: Weak<Self> = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.remove(id);
            }
        })
    }

    fn remove(&self, id: u64) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        if entries.len() < before {
            tracing::debug!(id, "observer unsubscribed");
        }
    }

    /// Observers registered right now, in registration order.
    fn snapshot(&self) -> Vec<Observer<V>> {
        self.entries
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}

struct Root<S, A> {
    state: RwLock<S>,
    reducer: BoxReducer<S, A>,
    observers: Arc<Observers<S>>,
    /// Serializes sends coming from different threads.
    dispatch: Mutex<()>,
    /// Thread currently inside `try_send`, for re-entrancy detection.
    dispatching_on: Mutex<Option<ThreadId>>,
    disposed: AtomicBool,
}

impl<S, A> Root<S, A>
where
    S: Clone + Send + Sync + 'static,
{
    fn notify(&self) {
        let observers = self.observers.snapshot();
        tracing::trace!(observers = observers.len(), "notifying observers");
        let state = self.state.read_recursive();
        for observer in &observers {
            observer(&state);
        }
    }
}

impl<S, A> Source<S, A> for Root<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: 'static,
{
    fn try_send(&self, action: A) -> Result<(), StoreError> {
        let current = thread::current().id();
        if *self.dispatching_on.lock() == Some(current) {
            return Err(StoreError::Reentrant);
        }

        let _dispatch = self.dispatch.lock();
        if self.disposed.load(Ordering::Acquire) {
            return Err(StoreError::Disposed);
        }
        *self.dispatching_on.lock() = Some(current);
        let _dispatching = scopeguard::guard((), |()| {
            *self.dispatching_on.lock() = None;
        });

        // The reducer works on a copy; the stored state is only replaced once
        // it returns, so a panicking reducer leaves it as it was.
        let previous = self.state.read().clone();
        let next = self.reducer.reduce(previous, &action);
        *self.state.write() = next;
        tracing::trace!(action = std::any::type_name::<A>(), "action reduced");

        self.notify();
        Ok(())
    }

    fn visit(&self, f: &mut dyn FnMut(&S)) {
        let state = self.state.read_recursive();
        f(&state);
    }

    fn subscribe(&self, observer: Observer<S>) -> Subscription {
        if self.is_disposed() {
            return Subscription::inert();
        }
        self.observers.insert(observer)
    }

    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            self.observers.clear();
            tracing::debug!("store disposed");
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

struct Scoped<G, L, A, LA> {
    parent: Store<G, A>,
    project: Arc<dyn Fn(&G) -> L + Send + Sync>,
    embed: Arc<dyn Fn(LA) -> A + Send + Sync>,
    disposed: Arc<AtomicBool>,
}

impl<G, L, A, LA> Source<L, LA> for Scoped<G, L, A, LA>
where
    G: 'static,
    L: 'static,
    A: 'static,
    LA: 'static,
{
    fn try_send(&self, action: LA) -> Result<(), StoreError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(StoreError::Disposed);
        }
        self.parent.try_send((self.embed)(action))
    }

    fn visit(&self, f: &mut dyn FnMut(&L)) {
        self.parent.source.visit(&mut |global| {
            let local = (self.project)(global);
            f(&local);
        });
    }

    fn subscribe(&self, observer: Observer<L>) -> Subscription {
        if self.is_disposed() {
            return Subscription::inert();
        }
        let project = Arc::clone(&self.project);
        let disposed = Arc::clone(&self.disposed);
        self.parent.source.subscribe(Arc::new(move |global: &G| {
            if !disposed.load(Ordering::Acquire) {
                observer(&project(global));
            }
        }))
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire) || self.parent.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvi::reducer::from_fn;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter {
        count: i64,
        label: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Add(i64),
        Rename(String),
        Ignored,
    }

    fn store() -> Store<Counter, Action> {
        Store::new(
            Counter::default(),
            from_fn(|mut state: Counter, action: &Action| {
                match action {
                    Action::Add(n) => state.count += n,
                    Action::Rename(label) => state.label = label.clone(),
                    Action::Ignored => {}
                }
                state
            }),
        )
    }

    #[test]
    fn send_replaces_state() {
        let store = store();
        store.send(Action::Add(2));
        store.send(Action::Add(3));
        assert_eq!(store.value().count, 5);
    }

    #[test]
    fn observers_called_once_per_send() {
        let store = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let _subscription = store.subscribe(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        store.send(Action::Add(1));
        store.send(Action::Ignored);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn observer_receives_new_state() {
        let store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |state: &Counter| sink.lock().push(state.count));

        store.send(Action::Add(4));
        store.send(Action::Add(-1));
        assert_eq!(*seen.lock(), vec![4, 3]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let subscription = store.subscribe(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        store.send(Action::Add(1));
        drop(subscription);
        store.send(Action::Add(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn observers_run_in_subscription_order() {
        let store = store();
        let order = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&order);
        let second = Arc::clone(&order);
        let _a = store.subscribe(move |_| first.lock().push("first"));
        let _b = store.subscribe(move |_| second.lock().push("second"));

        store.send(Action::Ignored);
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn observer_can_read_store() {
        let store = store();
        let reader = store.clone();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |_| {
            *sink.lock() = Some(reader.value().count);
        });

        store.send(Action::Add(9));
        assert_eq!(*seen.lock(), Some(9));
    }

    #[test]
    fn reentrant_send_is_rejected() {
        let store = store();
        let inner = store.clone();
        let outcome = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&outcome);
        let subscription = store.subscribe(move |_| {
            *sink.lock() = Some(inner.try_send(Action::Add(100)));
        });

        store.send(Action::Add(1));
        assert_eq!(*outcome.lock(), Some(Err(StoreError::Reentrant)));
        assert_eq!(store.value().count, 1);

        // The guard is released once the outer send returns.
        drop(subscription);
        assert_eq!(store.try_send(Action::Add(1)), Ok(()));
    }

    #[test]
    #[should_panic(expected = "re-entrant")]
    fn reentrant_send_panics() {
        let store = store();
        let inner = store.clone();
        let _subscription = store.subscribe(move |_| inner.send(Action::Ignored));
        store.send(Action::Ignored);
    }

    #[test]
    fn panicking_reducer_keeps_previous_state() {
        let store = Store::new(
            vec![1, 2, 3],
            from_fn(|mut state: Vec<i64>, action: &i64| {
                assert!(*action >= 0, "negative action");
                state.push(*action);
                state
            }),
        );
        let sender = store.clone();
        let outcome = thread::spawn(move || sender.send(-1)).join();
        assert!(outcome.is_err());
        assert_eq!(store.value(), vec![1, 2, 3]);

        // Locks and the re-entrancy marker are released on unwind.
        store.send(4);
        assert_eq!(store.value(), vec![1, 2, 3, 4]);
    }

    type Slot = Arc<Mutex<Option<Store<i64, i64>>>>;

    /// Store whose reducer sends `action` back to whatever store is in the
    /// returned slot before adding it.
    fn self_sending_store(initial: i64) -> (Store<i64, i64>, Slot) {
        let slot: Slot = Arc::new(Mutex::new(None));
        let target = Arc::clone(&slot);
        let store = Store::new(
            initial,
            from_fn(move |state: i64, action: &i64| {
                let target = target.lock().clone();
                if let Some(target) = target {
                    target.send(*action);
                }
                state + action
            }),
        );
        *slot.lock() = Some(store.clone());
        (store, slot)
    }

    #[test]
    fn reentrant_send_from_reducer_panics_without_touching_state() {
        let (store, slot) = self_sending_store(41);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| store.send(1)));
        assert!(outcome.is_err());
        assert_eq!(store.value(), 41);
        assert!(!store.is_disposed());

        *slot.lock() = None;
        store.send(1);
        assert_eq!(store.value(), 42);
    }

    #[test]
    fn reentrant_try_send_from_reducer_is_rejected() {
        let outcome = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&outcome);
        let slot: Slot = Arc::new(Mutex::new(None));
        let target = Arc::clone(&slot);
        let store = Store::new(
            0,
            from_fn(move |state: i64, action: &i64| {
                let target = target.lock().clone();
                if let Some(target) = target {
                    *sink.lock() = Some(target.try_send(*action));
                }
                state + action
            }),
        );
        *slot.lock() = Some(store.clone());

        store.send(5);
        assert_eq!(*outcome.lock(), Some(Err(StoreError::Reentrant)));
        assert_eq!(store.value(), 5);
        *slot.lock() = None;
    }

    #[test]
    fn subscribing_to_disposed_store_is_inert() {
        let store = store();
        let count = store.scope(|state: &Counter| state.count);
        store.dispose();

        let root = store.subscribe(|_| {});
        let scoped = count.subscribe(|_| {});
        assert!(format!("{root:?}").contains("active: false"));
        assert!(format!("{scoped:?}").contains("active: false"));
    }

    #[test]
    fn subscribing_to_disposed_scope_leaves_root_registry_alone() {
        let store = store();
        let count = store.scope(|state: &Counter| state.count);
        count.dispose();

        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let scoped = count.subscribe(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        });
        assert!(format!("{scoped:?}").contains("active: false"));

        let live = store.subscribe(|_| {});
        assert!(format!("{live:?}").contains("active: true"));
        store.send(Action::Add(1));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn disposed_store_rejects_sends() {
        let store = store();
        store.send(Action::Add(1));
        store.dispose();

        assert!(store.is_disposed());
        assert_eq!(store.try_send(Action::Add(1)), Err(StoreError::Disposed));
        store.send(Action::Add(1));
        assert_eq!(store.value().count, 1);
    }

    #[test]
    fn scope_projects_latest_value() {
        let store = store();
        let count = store.scope(|state: &Counter| state.count);

        store.send(Action::Add(3));
        assert_eq!(count.value(), 3);
        count.send(Action::Add(2));
        assert_eq!(count.value(), 5);
        assert_eq!(store.value().count, 5);
    }

    #[test]
    fn scope_with_embeds_local_actions() {
        let store = store();
        let label = store.scope_with(|state: &Counter| state.label.clone(), Action::Rename);

        label.send("renamed".to_string());
        assert_eq!(store.value().label, "renamed");
        assert_eq!(label.value(), "renamed");
    }

    #[test]
    fn disposing_scope_leaves_parent_live() {
        let store = store();
        let count = store.scope(|state: &Counter| state.count);
        count.dispose();

        assert!(count.is_disposed());
        assert_eq!(count.try_send(Action::Add(1)), Err(StoreError::Disposed));
        store.send(Action::Add(1));
        assert!(!store.is_disposed());
        assert_eq!(store.value().count, 1);
    }

    #[test]
    fn disposing_root_disposes_scopes() {
        let store = store();
        let count = store.scope(|state: &Counter| state.count);
        store.dispose();
        assert!(count.is_disposed());
        assert_eq!(count.try_send(Action::Add(1)), Err(StoreError::Disposed));
    }

    #[test]
    fn concurrent_sends_are_serialized() {
        let store = store();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        store.send(Action::Add(1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.value().count, 800);
    }
}
