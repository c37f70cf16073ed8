//! Explicit observer channel replacing bubbling DOM events.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex};

use super::address::AddressField;
use crate::units::AreaUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Input,
    Change,
    Focus,
    Blur,
    /// Validity of a field flipped, or the field announced itself at attach.
    ValidityChange,
}

/// Payload carried by every widget event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventDetail {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<AreaUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<AddressField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl EventDetail {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetEvent {
    pub kind: EventKind,
    /// `name` of the emitting widget, when it has one.
    pub source: Option<String>,
    pub detail: EventDetail,
}

pub trait EventSubscriber: Send + Sync {
    fn notify(&self, event: &WidgetEvent);
}

/// Shared subscribe/notify channel. Clones share the subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Arc<dyn EventSubscriber>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) {
        self.subscribers
            .lock()
            .expect("event bus mutex poisoned")
            .push(subscriber);
    }

    pub fn emit(&self, event: WidgetEvent) {
        // Snapshot so subscribers may subscribe further listeners while notified.
        let subscribers = self
            .subscribers
            .lock()
            .expect("event bus mutex poisoned")
            .clone();
        for subscriber in subscribers {
            subscriber.notify(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("event bus mutex poisoned")
            .len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Recorder subscriber, handy for hosts that replay events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<WidgetEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log already subscribed to `bus`.
    pub fn attach(bus: &EventBus) -> Self {
        let log = Self::new();
        bus.subscribe(Arc::new(log.clone()));
        log
    }

    pub fn events(&self) -> Vec<WidgetEvent> {
        self.events.lock().expect("event log mutex poisoned").clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events
            .lock()
            .expect("event log mutex poisoned")
            .iter()
            .map(|event| event.kind)
            .collect()
    }

    pub fn of_kind(&self, kind: EventKind) -> Vec<WidgetEvent> {
        self.events
            .lock()
            .expect("event log mutex poisoned")
            .iter()
            .filter(|event| event.kind == kind)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().expect("event log mutex poisoned").clear();
    }
}

impl EventSubscriber for EventLog {
    fn notify(&self, event: &WidgetEvent) {
        self.events
            .lock()
            .expect("event log mutex poisoned")
            .push(event.clone());
    }
}
