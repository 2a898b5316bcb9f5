//! Event dispatch.
//!
//! The [`Monitor`](crate::monitor::Monitor) pushes every decoded event through an
//! [`EventBus`]. Listeners register with an [`EventFilter`] and can be muted or
//! removed later by [`ListenerId`].

use crate::event::{ButtonEvent, EventKind};
use std::collections::BTreeMap;

/// Trait for reacting to decoded button events.
pub trait EventListener: Send {
    fn on_event(&mut self, event: &ButtonEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&ButtonEvent) + Send,
{
    fn on_event(&mut self, event: &ButtonEvent) {
        self(event)
    }
}

/// Determines which events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    /// Key-down and key-up only.
    KeysOnly,
    WakeOnly,
    /// Key events for one 1-indexed button.
    Button(u8),
    Custom(fn(&ButtonEvent) -> bool),
}

impl EventFilter {
    pub fn accepts(&self, event: &ButtonEvent) -> bool {
        match *self {
            EventFilter::All => true,
            EventFilter::KeysOnly => event.is_key(),
            EventFilter::WakeOnly => event.kind() == EventKind::WakeUp,
            EventFilter::Button(b) => event.is_key() && event.target() == Some(b),
            EventFilter::Custom(f) => f(event),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

struct ListenerEntry {
    listener: Box<dyn EventListener>,
    enabled: bool,
    filter: EventFilter,
}

/// Registered listeners, notified in registration order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: BTreeMap<ListenerId, ListenerEntry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &mut self,
        listener: impl EventListener + 'static,
        filter: EventFilter,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
            },
        );
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Emits one event to all active and matching listeners.
    pub fn emit(&mut self, event: &ButtonEvent) {
        for entry in self.listeners.values_mut() {
            if entry.enabled && entry.filter.accepts(event) {
                entry.listener.on_event(event);
            }
        }
    }

    pub fn emit_all(&mut self, events: &[ButtonEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<ButtonEvent>>>, impl EventListener + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |e: &ButtonEvent| sink.lock().unwrap().push(*e))
    }

    #[test]
    fn filters_route_events() {
        let mut bus = EventBus::new();
        let (all, l) = recorder();
        bus.add_listener(l, EventFilter::All);
        let (keys, l) = recorder();
        bus.add_listener(l, EventFilter::KeysOnly);
        let (wake, l) = recorder();
        bus.add_listener(l, EventFilter::WakeOnly);
        let (two, l) = recorder();
        bus.add_listener(l, EventFilter::Button(2));

        bus.emit_all(&[
            ButtonEvent::key_down(2),
            ButtonEvent::key_up(2),
            ButtonEvent::key_down(5),
            ButtonEvent::wake_up(),
        ]);

        assert_eq!(all.lock().unwrap().len(), 4);
        assert_eq!(keys.lock().unwrap().len(), 3);
        assert_eq!(*wake.lock().unwrap(), vec![ButtonEvent::wake_up()]);
        assert_eq!(
            *two.lock().unwrap(),
            vec![ButtonEvent::key_down(2), ButtonEvent::key_up(2)]
        );
    }

    #[test]
    fn custom_filter() {
        fn downs(e: &ButtonEvent) -> bool {
            e.kind() == EventKind::KeyDown
        }
        let mut bus = EventBus::new();
        let (seen, l) = recorder();
        bus.add_listener(l, EventFilter::Custom(downs));
        bus.emit_all(&[ButtonEvent::key_down(1), ButtonEvent::key_up(1)]);
        assert_eq!(*seen.lock().unwrap(), vec![ButtonEvent::key_down(1)]);
    }

    #[test]
    fn disabled_listener_is_skipped_until_enabled() {
        let mut bus = EventBus::new();
        let (seen, l) = recorder();
        let id = bus.add_listener(l, EventFilter::All);

        bus.disable(id);
        bus.emit(&ButtonEvent::key_down(1));
        assert!(seen.lock().unwrap().is_empty());

        bus.enable(id);
        bus.emit(&ButtonEvent::key_down(1));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn removed_listener_is_gone() {
        let mut bus = EventBus::new();
        let (seen, l) = recorder();
        let id = bus.add_listener(l, EventFilter::All);
        assert!(bus.remove_listener(id));
        assert!(!bus.remove_listener(id));
        assert!(bus.is_empty());
        bus.emit(&ButtonEvent::wake_up());
        assert!(seen.lock().unwrap().is_empty());
    }
}
