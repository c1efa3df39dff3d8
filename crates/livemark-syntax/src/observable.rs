//! # Observable Primitives
//!
//! Containers grow while a renderer is already showing them. These two types
//! let a renderer follow that growth without knowing anything about the
//! tokenizer or the tree:
//!
//! - [`Collection`] - append-only sequence; every subscriber sees every item,
//!   in order, whether it subscribed before or after the item arrived.
//! - [`Slot`] - single-assignment value; subscribers see it exactly once.
//!
//! Both are single-threaded. Subscribers are plain closures and must not
//! call back into the structure they observe.

use std::fmt;

type Subscriber<T> = Box<dyn FnMut(&T)>;
type OnceSubscriber<T> = Box<dyn FnOnce(&T)>;

/// An append-only ordered sequence with live subscribers.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use livemark_syntax::observable::Collection;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut items = Collection::new();
/// items.push("a");
///
/// let sink = Rc::clone(&seen);
/// items.subscribe(move |item| sink.borrow_mut().push(*item));
/// items.push("b");
///
/// assert_eq!(*seen.borrow(), vec!["a", "b"]);
/// ```
pub struct Collection<T> {
    items: Vec<T>,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Append an item and notify every subscriber, in subscription order.
    pub fn push(&mut self, item: T) {
        for subscriber in &mut self.subscribers {
            subscriber(&item);
        }
        self.items.push(item);
    }

    /// Observe every existing item now, then every future item as it is pushed.
    pub fn subscribe(&mut self, mut subscriber: impl FnMut(&T) + 'static) {
        for item in &self.items {
            subscriber(item);
        }
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A value that can be assigned exactly once.
pub struct Slot<T> {
    value: Option<T>,
    subscribers: Vec<OnceSubscriber<T>>,
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self {
            value: None,
            subscribers: Vec::new(),
        }
    }

    /// Assign the value, notifying waiting subscribers.
    ///
    /// A second assignment is refused and hands the value back.
    pub fn set(&mut self, value: T) -> Result<(), T> {
        if self.value.is_some() {
            return Err(value);
        }
        for subscriber in self.subscribers.drain(..) {
            subscriber(&value);
        }
        self.value = Some(value);
        Ok(())
    }

    /// Observe the value once: immediately if already set, otherwise on `set`.
    pub fn subscribe(&mut self, subscriber: impl FnOnce(&T) + 'static) {
        match &self.value {
            Some(value) => subscriber(value),
            None => self.subscribers.push(Box::new(subscriber)),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("value", &self.value)
            .field("waiting", &self.subscribers.len())
            .finish()
    }
}
