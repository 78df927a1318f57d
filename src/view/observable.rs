//! Observable view properties and the handles returned by `watch`
//!
//! Single-threaded: values live in `Rc<RefCell<..>>` and callbacks run
//! synchronously on the thread that calls `set`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<Box<dyn FnMut(&T, &T)>>>;

/// Registration for property-change notifications
///
/// Dropping a handle does not remove the watcher; call [`WatchHandle::remove`].
pub struct WatchHandle {
    remove: Option<Box<dyn FnOnce()>>,
}

impl WatchHandle {
    pub fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Deregister the watcher. Later calls do nothing.
    pub fn remove(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    pub fn is_active(&self) -> bool {
        self.remove.is_some()
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

struct Watcher<T> {
    id: u64,
    callback: Callback<T>,
}

struct Shared<T> {
    value: T,
    next_id: u64,
    watchers: Vec<Watcher<T>>,
}

/// A value cell that notifies watchers with `(new, old)` when it changes
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value,
                next_id: 0,
                watchers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Store `value` and notify watchers in registration order.
    ///
    /// Returns false without notifying when the value is unchanged.
    pub fn set(&self, value: T) -> bool {
        let (old, snapshot) = {
            let mut shared = self.shared.borrow_mut();
            if shared.value == value {
                return false;
            }
            let old = std::mem::replace(&mut shared.value, value.clone());
            let snapshot: Vec<(u64, Callback<T>)> = shared
                .watchers
                .iter()
                .map(|w| (w.id, Rc::clone(&w.callback)))
                .collect();
            (old, snapshot)
        };

        for (id, callback) in snapshot {
            // A watcher removed by an earlier callback in this cycle is skipped
            let registered = self.shared.borrow().watchers.iter().any(|w| w.id == id);
            if !registered {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => (callback)(&value, &old),
                Err(_) => {
                    tracing::warn!(watcher = id, "skipping re-entrant property notification")
                }
            }
        }

        true
    }

    pub fn watch(&self, callback: impl FnMut(&T, &T) + 'static) -> WatchHandle {
        let id = {
            let mut shared = self.shared.borrow_mut();
            let id = shared.next_id;
            shared.next_id += 1;
            shared.watchers.push(Watcher {
                id,
                callback: Rc::new(RefCell::new(Box::new(callback))),
            });
            id
        };

        let weak: Weak<RefCell<Shared<T>>> = Rc::downgrade(&self.shared);
        WatchHandle::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.borrow_mut().watchers.retain(|w| w.id != id);
            }
        })
    }

    #[cfg(test)]
    pub fn watcher_count(&self) -> usize {
        self.shared.borrow().watchers.len()
    }
}

/// Run `callback` once the flag is true: immediately if it already is,
/// otherwise on the first change to true. The internal watch is released
/// after it fires.
pub fn when_true(flag: &Observable<bool>, callback: impl FnOnce() + 'static) {
    if flag.get() {
        callback();
        return;
    }

    let handle: Rc<RefCell<Option<WatchHandle>>> = Rc::new(RefCell::new(None));
    let mut callback = Some(callback);
    let own_handle = Rc::clone(&handle);
    let watch = flag.watch(move |now, _| {
        if !*now {
            return;
        }
        if let Some(mut watch) = own_handle.borrow_mut().take() {
            watch.remove();
        }
        if let Some(callback) = callback.take() {
            callback();
        }
    });
    *handle.borrow_mut() = Some(watch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_notifies_with_new_and_old_value() {
        let value = Observable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _handle = value.watch(move |new, old| sink.borrow_mut().push((*new, *old)));

        assert!(value.set(2));
        assert!(value.set(5));

        assert_eq!(*seen.borrow(), vec![(2, 1), (5, 2)]);
        assert_eq!(value.get(), 5);
    }

    #[test]
    fn setting_equal_value_does_not_notify() {
        let value = Observable::new("a".to_string());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _handle = value.watch(move |_, _| counter.set(counter.get() + 1));

        assert!(!value.set("a".to_string()));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn removed_watcher_is_not_called_and_remove_is_idempotent() {
        let value = Observable::new(0);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut handle = value.watch(move |_, _| counter.set(counter.get() + 1));

        value.set(1);
        handle.remove();
        handle.remove();
        value.set(2);

        assert_eq!(calls.get(), 1);
        assert!(!handle.is_active());
        assert_eq!(value.watcher_count(), 0);
    }

    #[test]
    fn dropping_a_handle_keeps_the_watcher() {
        let value = Observable::new(0);
        drop(value.watch(|_, _| {}));
        assert_eq!(value.watcher_count(), 1);
    }

    #[test]
    fn watcher_removed_mid_cycle_is_skipped() {
        let value = Observable::new(0);
        let later: Rc<RefCell<Option<WatchHandle>>> = Rc::new(RefCell::new(None));
        let later_calls = Rc::new(Cell::new(0));

        let to_remove = Rc::clone(&later);
        let _first = value.watch(move |_, _| {
            if let Some(mut handle) = to_remove.borrow_mut().take() {
                handle.remove();
            }
        });
        let counter = Rc::clone(&later_calls);
        *later.borrow_mut() = Some(value.watch(move |_, _| counter.set(counter.get() + 1)));

        value.set(1);
        assert_eq!(later_calls.get(), 0);
    }

    #[test]
    fn re_entrant_set_skips_nested_delivery() {
        let value = Observable::new(0);
        let inner = value.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _handle = value.watch(move |new, _| {
            sink.borrow_mut().push(*new);
            if *new < 10 {
                inner.set(*new + 10);
            }
        });

        value.set(1);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(value.get(), 11);
    }

    #[test]
    fn when_true_fires_immediately_when_already_true() {
        let flag = Observable::new(true);
        let fired = Rc::new(Cell::new(false));
        let mark = Rc::clone(&fired);
        when_true(&flag, move || mark.set(true));

        assert!(fired.get());
        assert_eq!(flag.watcher_count(), 0);
    }

    #[test]
    fn when_true_fires_once_and_releases_its_watch() {
        let flag = Observable::new(false);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        when_true(&flag, move || counter.set(counter.get() + 1));

        flag.set(false);
        assert_eq!(calls.get(), 0);
        flag.set(true);
        flag.set(false);
        flag.set(true);

        assert_eq!(calls.get(), 1);
        assert_eq!(flag.watcher_count(), 0);
    }
}
