use tracing::{debug, warn};

use super::attributes::Attributes;
use super::config::{AttributeError, WidgetConfig};
use super::context::WidgetContext;
use super::events::{EventDetail, EventKind, WidgetEvent};
use super::form::{FormInternals, Validity};
use super::state::{InternalState, VisualState};
use crate::validation::{ValidationEngine, ValidationReport};

/// State and plumbing shared by every widget, composite ones included.
#[derive(Debug)]
pub struct WidgetCore {
    pub(crate) attributes: Attributes,
    pub(crate) config: WidgetConfig,
    pub(crate) state: InternalState,
    pub(crate) internals: FormInternals,
    pub(crate) context: WidgetContext,
    pub(crate) engine: ValidationEngine,
    pub(crate) focused: bool,
    /// Display value when focus was gained; drives `change` on blur.
    focus_snapshot: String,
}

impl WidgetCore {
    pub(crate) fn new(attributes: Attributes, context: &WidgetContext) -> Result<Self, AttributeError> {
        let config = WidgetConfig::from_attributes(&attributes)?;
        let mut internals = FormInternals::default();
        internals.set_disabled(config.disabled);
        Ok(Self {
            attributes,
            config,
            state: InternalState::default(),
            internals,
            context: context.clone(),
            engine: ValidationEngine::new(),
            focused: false,
            focus_snapshot: String::new(),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn state(&self) -> &InternalState {
        &self.state
    }

    pub fn internals(&self) -> &FormInternals {
        &self.internals
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn visual_state(&self) -> VisualState {
        self.state.visual_state()
    }

    /// User edits are refused while the control is disabled or readonly.
    pub(crate) fn accepts_input(&self) -> bool {
        if self.config.disabled || self.config.readonly {
            debug!(field = ?self.config.name, "ignoring input on locked control");
            return false;
        }
        true
    }

    pub(crate) fn emit(&self, kind: EventKind, detail: EventDetail) {
        self.context.bus.emit(WidgetEvent {
            kind,
            source: self.config.name.clone(),
            detail,
        });
    }

    /// Applies an attribute mutation. A value that fails to parse is rejected and
    /// the previous configuration stays in force.
    pub(crate) fn update_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), AttributeError> {
        let previous = self.attributes.clone();
        match value {
            Some(value) => self.attributes.set(name, value),
            None => {
                self.attributes.remove(name);
            }
        }

        let config = match WidgetConfig::from_attributes(&self.attributes) {
            Ok(config) => config,
            Err(error) => {
                warn!(attribute = name, %error, "rejected widget attribute");
                self.attributes = previous;
                return Err(error);
            }
        };

        let was_disabled = self.config.disabled;
        self.config = config;
        if was_disabled != self.config.disabled {
            self.internals.set_disabled(self.config.disabled);
            self.announce_validity();
        }
        Ok(())
    }

    /// Stores a finished report in state and pushes validity to the form.
    pub(crate) fn commit_report(&mut self, report: ValidationReport) -> bool {
        let (valid, flipped) = self.store_report(report);
        if flipped {
            self.announce_validity();
        }
        valid
    }

    /// Like [`WidgetCore::commit_report`] without announcing; returns
    /// `(valid, flipped)`.
    pub(crate) fn store_report(&mut self, report: ValidationReport) -> (bool, bool) {
        let valid = report.is_valid();
        let validity = if valid {
            Validity::default()
        } else {
            Validity::invalid(report.message())
        };
        self.state.errors = report.errors;
        self.state.warnings = report.warnings;
        self.state.is_valid = valid;
        (valid, self.internals.set_validity(validity))
    }

    /// Tells subscribers whether this field currently blocks submission.
    pub(crate) fn announce_validity(&self) {
        let valid = self.internals.validity().valid || self.internals.is_disabled();
        self.emit(
            EventKind::ValidityChange,
            EventDetail {
                valid: Some(valid),
                ..EventDetail::value(self.state.display_value.clone())
            },
        );
    }

    pub(crate) fn begin_focus(&mut self) {
        self.focused = true;
        self.focus_snapshot = self.state.display_value.clone();
    }

    /// Marks the field touched and reports whether its value changed since focus.
    pub(crate) fn end_focus(&mut self) -> bool {
        self.focused = false;
        self.state.touched = true;
        self.focus_snapshot != self.state.display_value
    }

    /// First error once the user has interacted, otherwise the helper text.
    pub(crate) fn inline_message(&self) -> Option<InlineMessage> {
        if self.state.touched && !self.state.is_valid {
            if let Some(error) = self.state.errors.first() {
                return Some(InlineMessage::Error(error.to_string()));
            }
        }
        self.config.helper_text.clone().map(InlineMessage::Helper)
    }

    pub(crate) fn icon(&self, name: Option<&str>) -> Option<String> {
        name.and_then(|name| self.context.icons.get(name))
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InlineMessage {
    Error(String),
    Helper(String),
}
