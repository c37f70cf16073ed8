//! Generic input widget built by composition.
//!
//! An [`InputWidget`] pairs the shared [`WidgetCore`] with a [`Formattable`]
//! capability (how text is displayed and submitted) and an ordered list of
//! [`Validatable`] rules. Specialised widgets are type aliases over the same
//! struct with their own formatter and rules.

use serde::Serialize;
use std::fmt;

use super::attributes::Attributes;
use super::config::{AttributeError, InputType, Size, Variant, WidgetConfig};
use super::context::WidgetContext;
use super::events::{EventDetail, EventKind};
use super::form::{FormAssociated, FormInternals, Validity};
use super::state::{InternalState, VisualState};
use super::widget::{InlineMessage, WidgetCore};
use crate::numeric::NumberLocale;
use crate::units::AreaUnit;
use crate::validation::{
    Constraints, FieldValue, NumericMode, SanityMode, ValidationEngine, ValidationReport,
};

/// Display/submission behaviour of a widget.
pub trait Formattable: Send + fmt::Debug {
    /// Rebuilds cached policy after the configuration changed.
    fn reconfigure(&mut self, config: &WidgetConfig, locale: NumberLocale);

    /// Text shown after a programmatic assignment.
    fn display_for(&self, text: &str) -> String {
        text.to_string()
    }

    /// Text shown for a number assigned directly, bypassing parsing.
    fn display_number(&self, value: f64) -> String {
        crate::numeric::canonical(value)
    }

    /// Blur-time reformat of the raw typed text.
    fn reformat(&self, raw: &str) -> String {
        raw.to_string()
    }

    /// Value submitted to the form for the given display text.
    fn canonical(&self, display: &str) -> String {
        display.to_string()
    }

    fn numeric_value(&self, _display: &str) -> Option<f64> {
        None
    }

    fn unit(&self) -> Option<AreaUnit> {
        None
    }

    /// How numbers are written into validation messages.
    fn render_number(&self, value: f64) -> String {
        value.to_string()
    }

    fn adjust_control(&self, _control: &mut ControlAttributes) {}
}

/// Defaults and affordances a widget type contributes to its view.
pub trait Presentable {
    fn defaults(&self, _config: &WidgetConfig) -> FieldDefaults {
        FieldDefaults::default()
    }

    fn suggestions(&self, _config: &WidgetConfig) -> Vec<Suggestion> {
        Vec::new()
    }
}

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub config: &'a WidgetConfig,
    pub value: FieldValue<'a>,
    pub unit: Option<AreaUnit>,
    pub sanity_mode: SanityMode,
    pub engine: &'a ValidationEngine,
    pub render_number: &'a dyn Fn(f64) -> String,
}

/// One validation rule. Rules append failures and never stop the pass.
pub trait Validatable: Send + fmt::Debug {
    fn validate(&self, context: &RuleContext<'_>, report: &mut ValidationReport);
}

/// The attribute-driven constraints (`required`, `pattern`, lengths, bounds).
#[derive(Debug, Clone, Copy)]
pub struct AttributeConstraints {
    formatted: bool,
    noun: Option<&'static str>,
}

impl AttributeConstraints {
    /// Plain text semantics; bounds apply only for `type="number"`.
    pub fn text() -> Self {
        Self {
            formatted: false,
            noun: None,
        }
    }

    /// Formatted numeric semantics with a subject for messages ("Price").
    pub fn formatted(noun: &'static str) -> Self {
        Self {
            formatted: true,
            noun: Some(noun),
        }
    }
}

impl Validatable for AttributeConstraints {
    fn validate(&self, context: &RuleContext<'_>, report: &mut ValidationReport) {
        let config = context.config;
        let numeric = if self.formatted {
            NumericMode::Formatted
        } else if config.input_type == InputType::Number {
            NumericMode::Native
        } else {
            NumericMode::Off
        };
        let constraints = Constraints {
            required: config.required,
            pattern: if self.formatted {
                None
            } else {
                config.pattern.as_ref().map(|pattern| pattern.regex())
            },
            min_length: config.min_length,
            max_length: config.max_length,
            min: config.min,
            max: config.max,
            numeric,
            noun: self.noun,
        };
        context
            .engine
            .evaluate_into(&constraints, &context.value, report, context.render_number);
    }
}

/// Label, icon, placeholder and suffix used when the attributes leave them unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDefaults {
    pub label: Option<String>,
    pub icon: Option<&'static str>,
    pub placeholder: Option<String>,
    pub suffix: Option<String>,
}

/// One-click fill value offered below a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub value: f64,
    pub label: String,
}

/// Attributes of the underlying native control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlAttributes {
    #[serde(rename = "type")]
    pub input_type: String,
    pub value: String,
    pub placeholder: String,
    pub disabled: bool,
    pub readonly: bool,
    pub required: bool,
    pub autocomplete: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minlength: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// Render model of a single-control widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputView {
    pub label: Option<String>,
    pub required: bool,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub icon_left: Option<String>,
    pub icon_right: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub variant: Variant,
    pub size: Size,
    pub full_width: bool,
    pub message: Option<InlineMessage>,
    pub counter: Option<String>,
    pub show_clear: bool,
    pub visual_state: VisualState,
    pub suggestions: Vec<Suggestion>,
    pub control: ControlAttributes,
}

/// Generic text formatter: what is shown is what is submitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Formattable for PlainText {
    fn reconfigure(&mut self, _config: &WidgetConfig, _locale: NumberLocale) {}
}

impl Presentable for PlainText {}

#[derive(Debug)]
pub struct InputWidget<F> {
    pub(crate) core: WidgetCore,
    pub(crate) formatter: F,
    rules: Vec<Box<dyn Validatable>>,
}

/// Plain `estate-input` widget.
pub type TextInput = InputWidget<PlainText>;

impl TextInput {
    pub fn new(attributes: Attributes, context: &WidgetContext) -> Result<Self, AttributeError> {
        Self::assemble(
            attributes,
            context,
            PlainText,
            vec![Box::new(AttributeConstraints::text())],
        )
    }
}

impl<F: Formattable + Presentable> InputWidget<F> {
    pub(crate) fn assemble(
        attributes: Attributes,
        context: &WidgetContext,
        mut formatter: F,
        rules: Vec<Box<dyn Validatable>>,
    ) -> Result<Self, AttributeError> {
        let core = WidgetCore::new(attributes, context)?;
        formatter.reconfigure(&core.config, core.context.locale);
        let mut widget = Self {
            core,
            formatter,
            rules,
        };
        widget.attach();
        Ok(widget)
    }

    fn attach(&mut self) {
        self.load_default_value();
        let report = self.evaluate();
        self.core.store_report(report);
        self.core.announce_validity();
        if self.core.config.autofocus {
            self.focus();
        }
    }

    fn load_default_value(&mut self) {
        let initial = self.core.config.initial_value.clone();
        let display = if initial.is_empty() {
            String::new()
        } else {
            self.formatter.display_for(&initial)
        };
        self.core.state.raw_value = initial;
        self.core.state.display_value = display;
        self.sync_form_value();
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

    pub fn attributes(&self) -> &Attributes {
        self.core.attributes()
    }

    /// Displayed text.
    pub fn value(&self) -> &str {
        &self.core.state.display_value
    }

    pub fn raw_value(&self) -> &str {
        &self.core.state.raw_value
    }

    /// Value the form receives for this field.
    pub fn canonical_value(&self) -> String {
        self.formatter.canonical(&self.core.state.display_value)
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.formatter.numeric_value(&self.core.state.display_value)
    }

    pub fn is_focused(&self) -> bool {
        self.core.is_focused()
    }

    /// Programmatic assignment.
    pub fn set_value(&mut self, value: &str) {
        let display = self.formatter.display_for(value);
        self.assign(value.to_string(), display);
    }

    /// Assigns a number directly, without going through text parsing.
    pub fn set_numeric_value(&mut self, value: f64) {
        let display = self.formatter.display_number(value);
        self.assign(display.clone(), display);
    }

    pub(crate) fn assign(&mut self, raw: String, display: String) {
        let old_value = std::mem::replace(&mut self.core.state.display_value, display);
        self.core.state.raw_value = raw;
        self.sync_form_value();
        let detail = EventDetail {
            old_value: Some(old_value),
            ..self.event_detail()
        };
        self.core.emit(EventKind::Input, detail);
        self.validate();
    }

    /// Keystroke from the control. Text is kept verbatim while typing.
    pub fn handle_input(&mut self, text: &str) -> bool {
        if !self.core.accepts_input() {
            return false;
        }
        self.core.state.dirty = true;
        let old_value = std::mem::replace(&mut self.core.state.display_value, text.to_string());
        self.core.state.raw_value = text.to_string();
        self.sync_form_value();
        let detail = EventDetail {
            old_value: Some(old_value),
            ..self.event_detail()
        };
        self.core.emit(EventKind::Input, detail);
        self.validate();
        true
    }

    pub fn handle_focus(&mut self) {
        self.core.begin_focus();
        self.core.emit(EventKind::Focus, EventDetail::value(self.value()));
    }

    /// Focus loss: marks the field touched, applies `format-on-blur`, validates and
    /// emits `change` when the value differs from the one at focus time.
    pub fn handle_blur(&mut self) {
        if self.core.config.format_on_blur && !self.core.state.raw_value.trim().is_empty() {
            let formatted = self.formatter.reformat(&self.core.state.raw_value);
            self.core.state.display_value = formatted;
            self.sync_form_value();
        }
        let changed = self.core.end_focus();
        self.validate();
        if changed {
            self.handle_change();
        }
        self.core.emit(EventKind::Blur, self.event_detail());
    }

    pub fn handle_change(&mut self) {
        self.core.emit(EventKind::Change, self.event_detail());
    }

    pub fn focus(&mut self) {
        if self.core.config.disabled || self.core.focused {
            return;
        }
        self.handle_focus();
    }

    pub fn blur(&mut self) {
        if self.core.focused {
            self.handle_blur();
        }
    }

    /// Empties the field and puts the cursor back into it.
    pub fn clear(&mut self) {
        self.set_value("");
        self.focus();
    }

    /// Runs every rule and returns whether the field is valid.
    pub fn validate(&mut self) -> bool {
        let report = self.evaluate();
        self.core.commit_report(report)
    }

    fn evaluate(&self) -> ValidationReport {
        let display = self.core.state.display_value.as_str();
        let value = match self.formatter.numeric_value(display) {
            Some(number) => FieldValue::numeric(display, number),
            None => FieldValue::text(display),
        };
        let render_number = |number: f64| self.formatter.render_number(number);
        let context = RuleContext {
            config: &self.core.config,
            value,
            unit: self.formatter.unit(),
            sanity_mode: self.core.context.sanity_mode,
            engine: &self.core.engine,
            render_number: &render_number,
        };
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            rule.validate(&context, &mut report);
        }
        report
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
        self.formatter
            .reconfigure(&self.core.config, self.core.context.locale);
        // The default value only wins while the user has not edited the field.
        if name == "value" && !self.core.state.dirty {
            self.load_default_value();
        } else {
            self.sync_form_value();
        }
        self.validate();
        Ok(())
    }

    pub fn control_attributes(&self) -> ControlAttributes {
        let config = &self.core.config;
        let mut control = ControlAttributes {
            input_type: config.input_type.as_str().to_string(),
            value: self.core.state.display_value.clone(),
            placeholder: self.placeholder().unwrap_or_default(),
            disabled: config.disabled,
            readonly: config.readonly,
            required: config.required,
            autocomplete: config
                .autocomplete
                .clone()
                .unwrap_or_else(|| "off".to_string()),
            inputmode: None,
            pattern: config.pattern.as_ref().map(|pattern| pattern.as_str().to_string()),
            min: config.min,
            max: config.max,
            minlength: config.min_length,
            maxlength: config.max_length,
            step: config.step,
        };
        self.formatter.adjust_control(&mut control);
        control
    }

    fn placeholder(&self) -> Option<String> {
        self.core
            .config
            .placeholder
            .clone()
            .or_else(|| self.formatter.defaults(&self.core.config).placeholder)
    }

    /// Suggestions offered below the field; empty with `hide-suggestions`.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        if self.core.config.hide_suggestions {
            return Vec::new();
        }
        self.formatter.suggestions(&self.core.config)
    }

    pub fn view(&self) -> InputView {
        let config = &self.core.config;
        let defaults = self.formatter.defaults(config);
        let value = &self.core.state.display_value;
        let icon_left = config.icon_left.as_deref().or(defaults.icon);

        InputView {
            label: config.label.clone().or(defaults.label),
            required: config.required,
            description: config.description.clone(),
            placeholder: config.placeholder.clone().or(defaults.placeholder),
            icon_left: self.core.icon(icon_left),
            icon_right: self.core.icon(config.icon_right.as_deref()),
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone().or(defaults.suffix),
            variant: config.variant,
            size: config.size,
            full_width: config.full_width,
            message: self.core.inline_message(),
            counter: match (config.show_counter, config.max_length) {
                (true, Some(max)) => Some(format!("{}/{}", value.chars().count(), max)),
                _ => None,
            },
            show_clear: config.clearable && !value.is_empty() && !config.disabled,
            visual_state: self.visual_state(),
            suggestions: self.suggestions(),
            control: self.control_attributes(),
        }
    }

    /// Restores the default value and forgets interaction history.
    pub fn form_reset(&mut self) {
        self.core.state = InternalState::default();
        self.load_default_value();
        self.validate();
    }

    pub(crate) fn sync_form_value(&mut self) {
        let canonical = self.formatter.canonical(&self.core.state.display_value);
        self.core.internals.set_form_value(canonical);
    }

    fn event_detail(&self) -> EventDetail {
        let display = &self.core.state.display_value;
        EventDetail {
            numeric_value: self.formatter.numeric_value(display),
            unit: self.formatter.unit(),
            ..EventDetail::value(display.clone())
        }
    }
}

impl<F: Formattable + Presentable> FormAssociated for InputWidget<F> {
    fn name(&self) -> Option<&str> {
        self.core.name()
    }

    fn internals(&self) -> &FormInternals {
        &self.core.internals
    }

    fn check_validity(&mut self) -> bool {
        InputWidget::check_validity(self)
    }

    fn report_validity(&mut self) -> bool {
        InputWidget::report_validity(self)
    }

    fn form_reset(&mut self) {
        InputWidget::form_reset(self)
    }

    fn set_disabled(&mut self, disabled: bool) {
        let result = if disabled {
            self.set_attribute("disabled", "")
        } else {
            self.remove_attribute("disabled")
        };
        if let Err(error) = result {
            tracing::warn!(%error, "failed to toggle disabled");
        }
    }
}
