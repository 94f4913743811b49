//! Scoped reactive translation store.
//!
//! Holds one [`Dictionary`] per scope id and notifies subscribers after every
//! mutation. The store is single-threaded: state lives behind a `RefCell`, and
//! no borrow is held while listeners run, so a listener may read snapshots,
//! subscribe, unsubscribe or even mutate the store from inside a notification.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::interpreter::LoadError;
use crate::loader::{load_bundle, parse_bundle};

/// Translation key to template.
pub type Dictionary = BTreeMap<String, String>;

/// Scope id to dictionary. The full state of a store.
pub type StoreState = BTreeMap<String, Rc<Dictionary>>;

/// A change callback. Identity is pointer identity of the `Rc`.
pub type Listener = Rc<dyn Fn()>;

type ListenerList = RefCell<Vec<Listener>>;

/// Store of translation dictionaries keyed by opaque scope ids.
///
/// Mutations are copy-on-write: a snapshot obtained before a mutation never
/// changes, and [`TranslationStore::get_snapshot_all`] keeps returning the
/// same `Rc` until the next mutation.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use easy_intl::{Listener, TranslationStore};
///
/// let store = TranslationStore::new();
/// let calls = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&calls);
/// let listener: Listener = Rc::new(move || seen.set(seen.get() + 1));
/// let subscription = store.subscribe(listener);
///
/// let dict = [("title".to_string(), "Dashboard".to_string())].into();
/// store.update("app/header", dict);
/// assert_eq!(calls.get(), 1);
/// assert_eq!(store.get_snapshot("app/header").unwrap()["title"], "Dashboard");
///
/// subscription.unsubscribe();
/// store.clear();
/// assert_eq!(calls.get(), 1);
/// ```
#[derive(Default)]
pub struct TranslationStore {
    state: RefCell<Rc<StoreState>>,
    listeners: Rc<ListenerList>,
}

impl TranslationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dictionary for `scope_id` and notify.
    ///
    /// Does nothing, and does not notify, when the new dictionary is equal to
    /// the current one.
    pub fn update(&self, scope_id: impl Into<String>, dictionary: Dictionary) {
        let scope_id = scope_id.into();
        let unchanged = self
            .state
            .borrow()
            .get(&scope_id)
            .is_some_and(|current| **current == dictionary);
        if unchanged {
            trace!(scope = %scope_id, "Skipping update with identical dictionary");
            return;
        }

        debug!(scope = %scope_id, keys = dictionary.len(), "Updating scope");
        {
            let mut state = self.state.borrow_mut();
            Rc::make_mut(&mut state).insert(scope_id, Rc::new(dictionary));
        }
        self.notify();
    }

    /// Apply every entry, then notify exactly once.
    ///
    /// Entries are written unconditionally; there is no equality check.
    pub fn update_batch<I, K>(&self, batch: I)
    where
        I: IntoIterator<Item = (K, Dictionary)>,
        K: Into<String>,
    {
        // Drain the caller's iterator before borrowing: it may read the store.
        let entries: Vec<(String, Dictionary)> = batch
            .into_iter()
            .map(|(scope_id, dictionary)| (scope_id.into(), dictionary))
            .collect();
        let applied = entries.len();
        {
            let mut state = self.state.borrow_mut();
            let state = Rc::make_mut(&mut state);
            for (scope_id, dictionary) in entries {
                state.insert(scope_id, Rc::new(dictionary));
            }
        }
        debug!(scopes = applied, "Applied batch update");
        self.notify();
    }

    /// Remove every scope and notify.
    pub fn clear(&self) {
        debug!("Clearing all scopes");
        *self.state.borrow_mut() = Rc::default();
        self.notify();
    }

    /// Register a listener.
    ///
    /// Registering the same `Rc` twice keeps a single registration. The
    /// listener stays registered until [`Subscription::unsubscribe`] is called;
    /// dropping the subscription does not remove it.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        {
            let mut listeners = self.listeners.borrow_mut();
            if !listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
                listeners.push(Rc::clone(&listener));
            }
        }
        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            listener,
        }
    }

    /// The dictionary currently stored for `scope_id`.
    pub fn get_snapshot(&self, scope_id: &str) -> Option<Rc<Dictionary>> {
        self.state.borrow().get(scope_id).cloned()
    }

    /// The full state. Referentially stable between mutations.
    pub fn get_snapshot_all(&self) -> Rc<StoreState> {
        Rc::clone(&self.state.borrow())
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of populated scopes.
    pub fn scope_count(&self) -> usize {
        self.state.borrow().len()
    }

    /// Load a JSON bundle file (`{ scope: { key: template } }`) as one batch.
    ///
    /// Returns the number of scopes applied.
    pub fn load_bundle_file(&self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let bundle = load_bundle(path)?;
        let count = bundle.len();
        self.update_batch(bundle);
        Ok(count)
    }

    /// Load a JSON bundle from a string as one batch.
    pub fn load_bundle_str(&self, json: &str) -> Result<usize, LoadError> {
        let bundle = parse_bundle("<string>", json)?;
        let count = bundle.len();
        self.update_batch(bundle);
        Ok(count)
    }

    /// Invoke every listener once, in registration order.
    ///
    /// Iterates a copy of the listener list: listeners added or removed during
    /// this notification take effect from the next one.
    fn notify(&self) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        trace!(listeners = listeners.len(), "Notifying listeners");
        for listener in listeners {
            listener();
        }
    }
}

/// Handle returned by [`TranslationStore::subscribe`].
#[must_use = "dropping a Subscription keeps the listener registered with no way to remove it"]
pub struct Subscription {
    listeners: Weak<ListenerList>,
    listener: Listener,
}

impl Subscription {
    /// Remove the listener from the store. Safe to call more than once, and
    /// after the store has been dropped.
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .retain(|l| !Rc::ptr_eq(l, &self.listener));
        }
    }
}
