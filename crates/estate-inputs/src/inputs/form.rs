//! Form participation: how a widget hands its canonical value and validity to
//! the enclosing form, and how the form aggregates its fields.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::events::{EventBus, EventKind, EventSubscriber, WidgetEvent};
use super::registry::AnyWidget;

/// Validity pushed to the form, mirroring `ElementInternals.setValidity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub valid: bool,
    /// Every failure joined with `", "`; empty while valid.
    pub message: String,
}

impl Default for Validity {
    fn default() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }
}

impl Validity {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Per-widget bridge state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInternals {
    value: Option<String>,
    validity: Validity,
    disabled: bool,
}

impl FormInternals {
    pub fn set_form_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn form_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns `true` when the validity flag flipped.
    pub fn set_validity(&mut self, validity: Validity) -> bool {
        let flipped = self.validity.valid != validity.valid;
        self.validity = validity;
        flipped
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Value contributed to submission. Disabled fields contribute nothing.
    pub fn submission_value(&self) -> Option<&str> {
        if self.disabled {
            None
        } else {
            self.form_value()
        }
    }

    /// Disabled fields are barred from constraint validation.
    pub fn will_validate(&self) -> bool {
        !self.disabled
    }
}

/// Contract every widget implements to take part in a [`Form`].
pub trait FormAssociated {
    fn name(&self) -> Option<&str>;
    fn internals(&self) -> &FormInternals;
    fn check_validity(&mut self) -> bool;
    /// Like [`FormAssociated::check_validity`], but focuses the field when invalid.
    fn report_validity(&mut self) -> bool;
    fn form_reset(&mut self);
    fn set_disabled(&mut self, disabled: bool);
}

/// Name/value pairs a submission carries, in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.entries {
            object.insert(name.clone(), Value::String(value.clone()));
        }
        Value::Object(object)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidField {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("{} field(s) failed validation: {}", .fields.len(), describe(.fields))]
    Invalid { fields: Vec<InvalidField> },
}

fn describe(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(|field| format!("{} ({})", field.name, field.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Enclosing form owning heterogeneous widgets.
#[derive(Debug, Default)]
pub struct Form {
    fields: Vec<AnyWidget>,
    bus: EventBus,
}

impl Form {
    pub fn new(bus: EventBus) -> Self {
        Self {
            fields: Vec::new(),
            bus,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn push(&mut self, widget: AnyWidget) {
        self.fields.push(widget);
    }

    pub fn fields(&self) -> &[AnyWidget] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&AnyWidget> {
        self.fields.iter().find(|field| field.name() == Some(name))
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut AnyWidget> {
        self.fields.iter_mut().find(|field| field.name() == Some(name))
    }

    /// Collects submission entries. Unnamed and disabled fields are skipped.
    pub fn data(&self) -> FormData {
        let entries = self
            .fields
            .iter()
            .filter_map(|field| {
                let name = field.name()?;
                let value = field.internals().submission_value()?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        FormData { entries }
    }

    /// Validates every participating field; does not stop at the first failure.
    pub fn check_validity(&mut self) -> bool {
        self.fields
            .iter_mut()
            .filter(|field| field.internals().will_validate())
            .fold(true, |valid, field| field.check_validity() && valid)
    }

    /// Validates all fields, focusing the first invalid one, and returns the
    /// data only when every field passed.
    pub fn submit(&mut self) -> Result<FormData, SubmitError> {
        let mut invalid = Vec::new();
        for field in self.fields.iter_mut() {
            if !field.internals().will_validate() {
                continue;
            }
            let valid = if invalid.is_empty() {
                field.report_validity()
            } else {
                field.check_validity()
            };
            if !valid {
                invalid.push(InvalidField {
                    name: field.name().unwrap_or_default().to_string(),
                    message: field.internals().validity().message.clone(),
                });
            }
        }

        if !invalid.is_empty() {
            warn!(invalid = invalid.len(), "form submission refused");
            return Err(SubmitError::Invalid { fields: invalid });
        }

        let data = self.data();
        debug!(entries = data.len(), "form submitted");
        Ok(data)
    }

    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.form_reset();
        }
    }
}

/// Aggregates per-field validity announcements to drive a submit control.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    fields: Arc<Mutex<BTreeMap<String, bool>>>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gate already subscribed to `bus`. Attach it before the widgets
    /// so their initial announcements are seen.
    pub fn attach(bus: &EventBus) -> Self {
        let gate = Self::new();
        bus.subscribe(Arc::new(gate.clone()));
        gate
    }

    pub fn can_submit(&self) -> bool {
        self.fields
            .lock()
            .expect("submit gate mutex poisoned")
            .values()
            .all(|valid| *valid)
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        self.fields
            .lock()
            .expect("submit gate mutex poisoned")
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn tracked(&self) -> usize {
        self.fields.lock().expect("submit gate mutex poisoned").len()
    }
}

impl EventSubscriber for SubmitGate {
    fn notify(&self, event: &WidgetEvent) {
        if event.kind != EventKind::ValidityChange {
            return;
        }
        if let (Some(name), Some(valid)) = (&event.source, event.detail.valid) {
            self.fields
                .lock()
                .expect("submit gate mutex poisoned")
                .insert(name.clone(), valid);
        }
    }
}
