use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::Dispose;

new_key_type! {
    pub struct SubId;
}

type Callback<T> = Rc<dyn Fn(&T)>;

/// Observable value with synchronous, ordered delivery.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: SlotMap<SubId, (u64, Callback<T>)>,
    next_seq: u64,
}

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
            next_seq: 0,
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T)
    where
        T: Clone,
    {
        self.store(v);
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Replace the value without telling anyone. Readers see it immediately.
    pub(crate) fn store(&self, v: T) {
        self.0.borrow_mut().value = v;
    }

    /// Deliver the current value to every subscriber, oldest first.
    ///
    /// No borrow is held across callbacks: subscribers may read the signal,
    /// write it, or unsubscribe while being notified.
    pub(crate) fn notify(&self)
    where
        T: Clone,
    {
        let (value, mut subs) = {
            let inner = self.0.borrow();
            let subs: SmallVec<[(u64, SubId, Callback<T>); 4]> = inner
                .subs
                .iter()
                .map(|(id, (seq, cb))| (*seq, id, cb.clone()))
                .collect();
            (inner.value.clone(), subs)
        };
        subs.sort_by_key(|(seq, _, _)| *seq);

        for (_, id, cb) in subs {
            // unsubscribed by an earlier callback in this round
            if !self.0.borrow().subs.contains_key(id) {
                continue;
            }
            cb(&value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription<T> {
        let mut inner = self.0.borrow_mut();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let id = inner.subs.insert((seq, Rc::new(f)));
        Subscription {
            signal: Rc::downgrade(&self.0),
            id: Some(id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }

    /// A read-only handle onto this signal.
    pub fn publisher(&self) -> ValuePublisher<T> {
        ValuePublisher(self.clone())
    }
}

pub fn signal<T: 'static>(t: T) -> Signal<T> {
    Signal::new(t)
}

/// Teardown handle returned by [`Signal::subscribe`].
///
/// Dropping it unsubscribes. Call [`Subscription::detach`] to keep the
/// subscriber for as long as the signal lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<T: 'static> {
    signal: Weak<RefCell<Inner<T>>>,
    id: Option<SubId>,
}

impl<T: 'static> Subscription<T> {
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    pub fn detach(mut self) {
        self.id = None;
    }

    pub fn is_active(&self) -> bool {
        let (Some(inner), Some(id)) = (self.signal.upgrade(), self.id) else {
            return false;
        };
        inner.borrow().subs.contains_key(id)
    }

    /// Turn the subscription into a [`Dispose`] for hosts that collect
    /// cleanups.
    pub fn into_dispose(self) -> Dispose {
        Dispose::new(move || self.unsubscribe())
    }

    fn remove(&mut self) {
        let (Some(inner), Some(id)) = (self.signal.upgrade(), self.id.take()) else {
            return;
        };
        let removed = inner.borrow_mut().subs.remove(id);
        drop(removed);
    }
}

impl<T: 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Read-only view of a [`Signal`]: observe and read, never write.
pub struct ValuePublisher<T: 'static>(Signal<T>);

impl<T: 'static> Clone for ValuePublisher<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: 'static> ValuePublisher<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with(f)
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription<T> {
        self.0.subscribe(f)
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.subscriber_count()
    }
}
