//! Composite address widget: six sub-fields behind one form value.

mod components;
mod lookup;
mod parser;

pub use components::{AddressComponents, AddressField, FormattedAddress};
pub use lookup::{
    resolve_lookup, LookupError, LookupOutcome, LookupResolution, LookupTicket, PostalCodeLookup,
    PostalPlace, StaticPostalDirectory,
};
pub use parser::{is_house_number, is_postal_code, parse_address};

use serde::Serialize;
use tracing::{debug, warn};

use super::attributes::Attributes;
use super::config::{AttributeError, WidgetConfig};
use super::context::WidgetContext;
use super::events::{EventDetail, EventKind};
use super::form::{FormAssociated, FormInternals, Validity};
use super::state::{InternalState, VisualState};
use super::widget::{InlineMessage, WidgetCore};

const EMPTY_PREVIEW: &str = "Address will appear here...";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressFieldView {
    pub field: AddressField,
    pub value: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressView {
    pub label: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub fields: Vec<AddressFieldView>,
    pub preview: String,
    pub message: Option<InlineMessage>,
    pub visual_state: VisualState,
}

/// `estate-address-input` widget.
#[derive(Debug)]
pub struct AddressInput {
    core: WidgetCore,
    components: AddressComponents,
    focused_field: Option<AddressField>,
}

impl AddressInput {
    pub fn new(attributes: Attributes, context: &WidgetContext) -> Result<Self, AttributeError> {
        let core = WidgetCore::new(attributes, context)?;
        let mut widget = Self {
            components: AddressComponents::with_country(core.config.default_country()),
            core,
            focused_field: None,
        };
        widget.load_default_value();
        let report = widget.components.validate(widget.core.config.required);
        widget.core.store_report(report);
        widget.core.announce_validity();
        if widget.core.config.autofocus {
            widget.focus();
        }
        Ok(widget)
    }

    fn load_default_value(&mut self) {
        let country = self.core.config.default_country().to_string();
        self.components = if self.core.config.initial_value.trim().is_empty() {
            AddressComponents::with_country(country)
        } else {
            parse_address(&self.core.config.initial_value, &country)
        };
        self.sync();
    }

    pub fn name(&self) -> Option<&str> {
        self.core.name()
    }

    pub fn config(&self) -> &WidgetConfig {
        self.core.config()
    }

    pub fn state(&self) -> &InternalState {
        self.core.state()
    }

    pub fn components(&self) -> &AddressComponents {
        &self.components
    }

    pub fn formatted_address(&self) -> FormattedAddress {
        self.components.formatted()
    }

    /// Single-line form of the address; this is what the form submits.
    pub fn value_text(&self) -> String {
        self.formatted_address().to_string()
    }

    pub fn focused_field(&self) -> Option<AddressField> {
        self.focused_field
    }

    /// Replaces every component with what `parse_address` reads from `text`.
    pub fn set_value_text(&mut self, text: &str) {
        self.components = parse_address(text, self.core.config.default_country());
        self.after_assignment();
    }

    pub fn set_components(&mut self, components: AddressComponents) {
        self.components = components;
        self.after_assignment();
    }

    fn after_assignment(&mut self) {
        self.sync();
        self.validate();
        self.core.emit(EventKind::Input, self.event_detail(None));
    }

    pub fn handle_field_input(&mut self, field: AddressField, text: &str) -> bool {
        if !self.core.accepts_input() {
            return false;
        }
        self.core.state.dirty = true;
        self.components.set(field, text);
        self.sync();
        self.validate();
        self.core.emit(EventKind::Input, self.event_detail(Some(field)));
        true
    }

    pub fn handle_field_focus(&mut self, field: AddressField) {
        self.focused_field = Some(field);
        self.core.begin_focus();
        self.core.emit(EventKind::Focus, self.event_detail(Some(field)));
    }

    /// Blur of one sub-field. Leaving a complete postal code with autocomplete
    /// enabled yields a ticket for the caller to resolve.
    pub fn handle_field_blur(&mut self, field: AddressField) -> Option<LookupTicket> {
        self.focused_field = None;
        let changed = self.core.end_focus();
        self.validate();
        if changed {
            self.core.emit(EventKind::Change, self.event_detail(Some(field)));
        }

        let postal_code = self.components.postal_code.trim();
        let ticket = (field == AddressField::PostalCode
            && self.autocomplete_enabled()
            && is_postal_code(postal_code))
        .then(|| LookupTicket::new(postal_code));

        self.core.emit(EventKind::Blur, self.event_detail(Some(field)));
        ticket
    }

    pub fn autocomplete_enabled(&self) -> bool {
        self.core.config.enable_autocomplete && self.core.context.postal_autocomplete
    }

    /// Applies a finished lookup unless the postal code moved on since it was
    /// issued.
    pub fn apply_lookup(&mut self, resolution: LookupResolution) -> LookupOutcome {
        let LookupResolution { ticket, result } = resolution;
        if ticket.postal_code() != self.components.postal_code.trim() {
            debug!(
                issued_for = ticket.postal_code(),
                current = %self.components.postal_code,
                "discarding stale postal lookup"
            );
            return LookupOutcome::Stale;
        }

        match result {
            Ok(Some(place)) => {
                self.components.city = place.city.clone();
                self.components.state = place.state.clone();
                self.after_assignment();
                LookupOutcome::Applied(place)
            }
            Ok(None) => {
                debug!(postal_code = ticket.postal_code(), "postal code not found");
                LookupOutcome::NotFound
            }
            Err(error) => {
                warn!(postal_code = ticket.postal_code(), %error, "postal lookup failed");
                LookupOutcome::Failed(error)
            }
        }
    }

    /// Moves focus to the street sub-field.
    pub fn focus(&mut self) {
        if self.core.config.disabled || self.core.focused {
            return;
        }
        self.handle_field_focus(AddressField::Street);
    }

    pub fn blur(&mut self) -> Option<LookupTicket> {
        let field = self.focused_field?;
        self.handle_field_blur(field)
    }

    pub fn clear(&mut self) {
        let country = self.core.config.default_country().to_string();
        self.set_components(AddressComponents::with_country(country));
        self.focus();
    }

    pub fn validate(&mut self) -> bool {
        let report = self.components.validate(self.core.config.required);
        self.core.commit_report(report)
    }

    pub fn check_validity(&mut self) -> bool {
        self.validate()
    }

    pub fn report_validity(&mut self) -> bool {
        let valid = self.validate();
        if !valid {
            self.focus();
        }
        valid
    }

    pub fn validation_message(&self) -> &str {
        &self.core.internals.validity().message
    }

    pub fn validity(&self) -> &Validity {
        self.core.internals.validity()
    }

    pub fn visual_state(&self) -> VisualState {
        self.core.visual_state()
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttributeError> {
        self.apply_attribute(name, Some(value))
    }

    pub fn remove_attribute(&mut self, name: &str) -> Result<(), AttributeError> {
        self.apply_attribute(name, None)
    }

    fn apply_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), AttributeError> {
        self.core.update_attribute(name, value)?;
        if name == "value" && !self.core.state.dirty {
            self.load_default_value();
        }
        self.validate();
        Ok(())
    }

    pub fn view(&self) -> AddressView {
        let config = &self.core.config;
        let preview = self.value_text();
        AddressView {
            label: config.label.clone(),
            description: config.description.clone(),
            required: config.required,
            disabled: config.disabled,
            readonly: config.readonly,
            fields: AddressField::ALL
                .iter()
                .map(|field| AddressFieldView {
                    field: *field,
                    value: self.components.get(*field).to_string(),
                    placeholder: field.placeholder(),
                })
                .collect(),
            preview: if preview.is_empty() {
                EMPTY_PREVIEW.to_string()
            } else {
                preview
            },
            message: self.core.inline_message(),
            visual_state: self.visual_state(),
        }
    }

    pub fn form_reset(&mut self) {
        self.core.state = InternalState::default();
        self.focused_field = None;
        self.load_default_value();
        self.validate();
    }

    fn sync(&mut self) {
        let text = self.value_text();
        self.core.state.raw_value = text.clone();
        self.core.state.display_value = text.clone();
        self.core.internals.set_form_value(text);
    }

    fn event_detail(&self, field: Option<AddressField>) -> EventDetail {
        let formatted = self.value_text();
        EventDetail {
            value: field
                .map(|field| self.components.get(field).to_string())
                .unwrap_or_else(|| formatted.clone()),
            field,
            formatted_address: Some(formatted),
            ..EventDetail::default()
        }
    }
}

impl FormAssociated for AddressInput {
    fn name(&self) -> Option<&str> {
        self.core.name()
    }

    fn internals(&self) -> &FormInternals {
        &self.core.internals
    }

    fn check_validity(&mut self) -> bool {
        AddressInput::check_validity(self)
    }

    fn report_validity(&mut self) -> bool {
        AddressInput::report_validity(self)
    }

    fn form_reset(&mut self) {
        AddressInput::form_reset(self)
    }

    fn set_disabled(&mut self, disabled: bool) {
        let result = if disabled {
            self.set_attribute("disabled", "")
        } else {
            self.remove_attribute("disabled")
        };
        if let Err(error) = result {
            warn!(%error, "failed to toggle disabled");
        }
    }
}
