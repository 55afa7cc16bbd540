//! A value holder that notifies listeners on every write.
//!
//! Listeners are called synchronously, in registration order, with the new
//! value. The last write wins; there is no equality check.
//!
//! Delivery is serialized: one writer at a time walks the listener list. A
//! write that lands while another delivery is running (from another thread,
//! or from inside a listener) is handed to that delivery, which finishes by
//! sending the latest value. Listeners therefore always end on the stored
//! value, but a write superseded mid-delivery may be skipped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::trace;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    value: T,
    version: u64,
    delivering: bool,
}

struct Inner<T> {
    slot: Mutex<Slot<T>>,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T> Inner<T> {
    fn slot(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn remove(&self, id: u64) {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Clears the delivering flag if a listener panics mid-delivery.
struct DeliveryGuard<'a, T> {
    inner: &'a Inner<T>,
    finished: bool,
}

impl<T> Drop for DeliveryGuard<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            self.inner.slot().delivering = false;
        }
    }
}

pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.inner.slot();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .finish_non_exhaustive()
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(Slot {
                    value,
                    version: 0,
                    delivering: false,
                }),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.slot().value.clone()
    }

    /// Number of writes so far.
    pub fn version(&self) -> u64 {
        self.inner.slot().version
    }

    pub fn set(&self, value: T) {
        let start = Self::store(&mut self.inner.slot(), value);
        if start {
            self.deliver();
        }
    }

    /// Write under the slot lock. True if the caller must run the delivery.
    fn store(slot: &mut Slot<T>, value: T) -> bool {
        slot.value = value;
        slot.version += 1;
        if slot.delivering {
            trace!("Write {} handed to running delivery", slot.version);
            return false;
        }
        slot.delivering = true;
        true
    }

    /// Replace the value with `f(current)`.
    ///
    /// `f` runs without any lock held and may read this observable. If another
    /// write lands while `f` runs, `f` is called again on the newer value.
    pub fn update(&self, mut f: impl FnMut(&T) -> T) {
        loop {
            let (current, version) = {
                let slot = self.inner.slot();
                (slot.value.clone(), slot.version)
            };
            let next = f(&current);
            let start = {
                let mut slot = self.inner.slot();
                if slot.version != version {
                    continue;
                }
                Self::store(&mut slot, next)
            };
            if start {
                self.deliver();
            }
            return;
        }
    }

    /// Register `listener` and call it once with the current value.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let listener: Listener<T> = Arc::new(listener);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::clone(&listener)));

        listener(&self.get());

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.remove(id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Called by the writer that set `delivering`. Keeps going until no write
    /// arrived during the last pass.
    fn deliver(&self) {
        let mut guard = DeliveryGuard {
            inner: &self.inner,
            finished: false,
        };

        'outer: loop {
            let (value, version) = {
                let slot = self.inner.slot();
                (slot.value.clone(), slot.version)
            };
            // snapshot so listeners may subscribe, unsubscribe or write re-entrantly
            let listeners: Vec<Listener<T>> = self
                .inner
                .listeners
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();

            trace!("Notifying {} listeners of write {}", listeners.len(), version);
            for listener in listeners {
                if self.inner.slot().version != version {
                    continue 'outer;
                }
                listener(&value);
            }

            let mut slot = self.inner.slot();
            if slot.version == version {
                // cleared under the same lock as the check, so no write is lost
                slot.delivering = false;
                guard.finished = true;
                return;
            }
        }
    }
}

/// Handle returned by [`Observable::subscribe`].
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
