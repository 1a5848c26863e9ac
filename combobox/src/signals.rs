//! Environment signal subscriptions.
//!
//! Widgets that float content over the screen need to hear about things that
//! happen elsewhere: the terminal resizing, the form scrolling, a click
//! landing somewhere else. Rather than every widget reacting to every event,
//! widgets subscribe to the signals they currently care about and the host
//! routes those signals only to subscribers.
//!
//! Subscriptions are keyed by owner (the widget's field name) and are
//! idempotent: subscribing twice leaves one entry.

use std::collections::{BTreeMap, BTreeSet};

/// An environment change a widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    /// The viewport changed size.
    Resize,
    /// Content scrolled, so anchors may have moved.
    Scroll,
    /// A pointer press landed outside the subscriber's own areas.
    PointerDownOutside,
}

#[derive(Debug, Default)]
pub struct SignalRegistry {
    subscriptions: BTreeMap<Signal, BTreeSet<String>>,
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `owner` to `signal`. Returns false if it was already subscribed.
    pub fn subscribe(&mut self, owner: &str, signal: Signal) -> bool {
        let added = self
            .subscriptions
            .entry(signal)
            .or_default()
            .insert(owner.to_string());
        if added {
            log::trace!("{} subscribed to {:?}", owner, signal);
        }
        added
    }

    /// Remove one subscription. Returns false if there was none.
    pub fn unsubscribe(&mut self, owner: &str, signal: Signal) -> bool {
        let removed = self
            .subscriptions
            .get_mut(&signal)
            .is_some_and(|owners| owners.remove(owner));
        if removed {
            log::trace!("{} unsubscribed from {:?}", owner, signal);
        }
        removed
    }

    /// Remove every subscription held by `owner`.
    pub fn unsubscribe_all(&mut self, owner: &str) {
        for owners in self.subscriptions.values_mut() {
            owners.remove(owner);
        }
        log::trace!("{} unsubscribed from all signals", owner);
    }

    pub fn is_subscribed(&self, owner: &str, signal: Signal) -> bool {
        self.subscriptions
            .get(&signal)
            .is_some_and(|owners| owners.contains(owner))
    }

    /// Owners to notify for `signal`, in name order.
    pub fn subscribers(&self, signal: Signal) -> Vec<String> {
        self.subscriptions
            .get(&signal)
            .map(|owners| owners.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
