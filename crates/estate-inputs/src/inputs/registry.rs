//! Tag-name registry: builds widgets from markup-style tag names.

use std::collections::BTreeMap;
use tracing::debug;

use super::address::AddressInput;
use super::area::AreaInput;
use super::attributes::Attributes;
use super::base::TextInput;
use super::config::AttributeError;
use super::context::WidgetContext;
use super::form::{FormAssociated, FormInternals};
use super::price::PriceInput;
use super::state::VisualState;

pub const TEXT_TAG: &str = "estate-input";
pub const PRICE_TAG: &str = "estate-price-input";
pub const AREA_TAG: &str = "estate-area-input";
pub const ADDRESS_TAG: &str = "estate-address-input";

/// Any registered widget, so a form can hold heterogeneous fields.
#[derive(Debug)]
pub enum AnyWidget {
    Text(TextInput),
    Price(PriceInput),
    Area(AreaInput),
    Address(AddressInput),
}

macro_rules! dispatch {
    ($widget:expr, $inner:ident => $body:expr) => {
        match $widget {
            AnyWidget::Text($inner) => $body,
            AnyWidget::Price($inner) => $body,
            AnyWidget::Area($inner) => $body,
            AnyWidget::Address($inner) => $body,
        }
    };
}

impl AnyWidget {
    pub fn tag(&self) -> &'static str {
        match self {
            AnyWidget::Text(_) => TEXT_TAG,
            AnyWidget::Price(_) => PRICE_TAG,
            AnyWidget::Area(_) => AREA_TAG,
            AnyWidget::Address(_) => ADDRESS_TAG,
        }
    }

    pub fn name(&self) -> Option<&str> {
        dispatch!(self, widget => widget.name())
    }

    pub fn internals(&self) -> &FormInternals {
        dispatch!(self, widget => FormAssociated::internals(widget))
    }

    /// Text as the user sees it.
    pub fn value_text(&self) -> String {
        match self {
            AnyWidget::Text(widget) => widget.value().to_string(),
            AnyWidget::Price(widget) => widget.value().to_string(),
            AnyWidget::Area(widget) => widget.value().to_string(),
            AnyWidget::Address(widget) => widget.value_text(),
        }
    }

    /// Programmatic assignment; addresses are parsed from their one-line form.
    pub fn set_value(&mut self, value: &str) {
        match self {
            AnyWidget::Text(widget) => widget.set_value(value),
            AnyWidget::Price(widget) => widget.set_value(value),
            AnyWidget::Area(widget) => widget.set_value(value),
            AnyWidget::Address(widget) => widget.set_value_text(value),
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttributeError> {
        dispatch!(self, widget => widget.set_attribute(name, value))
    }

    pub fn visual_state(&self) -> VisualState {
        dispatch!(self, widget => widget.visual_state())
    }

    pub fn validation_message(&self) -> &str {
        dispatch!(self, widget => widget.validation_message())
    }

    pub fn as_text(&self) -> Option<&TextInput> {
        match self {
            AnyWidget::Text(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            AnyWidget::Text(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_price(&self) -> Option<&PriceInput> {
        match self {
            AnyWidget::Price(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_price_mut(&mut self) -> Option<&mut PriceInput> {
        match self {
            AnyWidget::Price(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_area(&self) -> Option<&AreaInput> {
        match self {
            AnyWidget::Area(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_area_mut(&mut self) -> Option<&mut AreaInput> {
        match self {
            AnyWidget::Area(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&AddressInput> {
        match self {
            AnyWidget::Address(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn as_address_mut(&mut self) -> Option<&mut AddressInput> {
        match self {
            AnyWidget::Address(widget) => Some(widget),
            _ => None,
        }
    }
}

impl FormAssociated for AnyWidget {
    fn name(&self) -> Option<&str> {
        AnyWidget::name(self)
    }

    fn internals(&self) -> &FormInternals {
        AnyWidget::internals(self)
    }

    fn check_validity(&mut self) -> bool {
        dispatch!(self, widget => widget.check_validity())
    }

    fn report_validity(&mut self) -> bool {
        dispatch!(self, widget => widget.report_validity())
    }

    fn form_reset(&mut self) {
        dispatch!(self, widget => widget.form_reset())
    }

    fn set_disabled(&mut self, disabled: bool) {
        dispatch!(self, widget => FormAssociated::set_disabled(widget, disabled))
    }
}

impl From<TextInput> for AnyWidget {
    fn from(widget: TextInput) -> Self {
        AnyWidget::Text(widget)
    }
}

impl From<PriceInput> for AnyWidget {
    fn from(widget: PriceInput) -> Self {
        AnyWidget::Price(widget)
    }
}

impl From<AreaInput> for AnyWidget {
    fn from(widget: AreaInput) -> Self {
        AnyWidget::Area(widget)
    }
}

impl From<AddressInput> for AnyWidget {
    fn from(widget: AddressInput) -> Self {
        AnyWidget::Address(widget)
    }
}

pub type WidgetConstructor = fn(Attributes, &WidgetContext) -> Result<AnyWidget, AttributeError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("no widget registered for tag `{0}`")]
    UnknownTag(String),
    #[error("tag `{0}` is already registered")]
    Duplicate(String),
    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

/// Explicit tag table; nothing registers itself on import.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    constructors: BTreeMap<String, WidgetConstructor>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in widgets.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let builtins: [(&str, WidgetConstructor); 4] = [
            (TEXT_TAG, |attributes, context| {
                TextInput::new(attributes, context).map(AnyWidget::from)
            }),
            (PRICE_TAG, |attributes, context| {
                PriceInput::new(attributes, context).map(AnyWidget::from)
            }),
            (AREA_TAG, |attributes, context| {
                AreaInput::new(attributes, context).map(AnyWidget::from)
            }),
            (ADDRESS_TAG, |attributes, context| {
                AddressInput::new(attributes, context).map(AnyWidget::from)
            }),
        ];
        for (tag, constructor) in builtins {
            registry
                .constructors
                .insert(tag.to_string(), constructor);
        }
        registry
    }

    pub fn register(
        &mut self,
        tag: impl Into<String>,
        constructor: WidgetConstructor,
    ) -> Result<(), RegistryError> {
        let tag = tag.into();
        if self.constructors.contains_key(&tag) {
            return Err(RegistryError::Duplicate(tag));
        }
        debug!(%tag, "registered widget tag");
        self.constructors.insert(tag, constructor);
        Ok(())
    }

    pub fn create(
        &self,
        tag: &str,
        attributes: Attributes,
        context: &WidgetContext,
    ) -> Result<AnyWidget, RegistryError> {
        let constructor = self
            .constructors
            .get(tag)
            .ok_or_else(|| RegistryError::UnknownTag(tag.to_string()))?;
        Ok(constructor(attributes, context)?)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_knows_the_builtin_tags() {
        let registry = WidgetRegistry::standard();
        let tags: Vec<_> = registry.tags().collect();
        assert_eq!(
            tags,
            vec![ADDRESS_TAG, AREA_TAG, TEXT_TAG, PRICE_TAG]
        );
    }

    #[test]
    fn creates_widgets_by_tag() {
        let registry = WidgetRegistry::standard();
        let context = WidgetContext::default();
        let widget = registry
            .create(
                PRICE_TAG,
                Attributes::new().with("name", "rent").with("price-type", "rent"),
                &context,
            )
            .expect("price widget");
        assert_eq!(widget.tag(), PRICE_TAG);
        assert_eq!(widget.name(), Some("rent"));
        assert!(widget.as_price().is_some());
        assert!(widget.as_area().is_none());
    }

    #[test]
    fn unknown_and_duplicate_tags_are_rejected() {
        let mut registry = WidgetRegistry::standard();
        let context = WidgetContext::default();
        let error = registry
            .create("estate-date-input", Attributes::new(), &context)
            .expect_err("unknown tag");
        assert_eq!(error, RegistryError::UnknownTag("estate-date-input".into()));

        let error = registry
            .register(TEXT_TAG, |attributes, context| {
                TextInput::new(attributes, context).map(AnyWidget::from)
            })
            .expect_err("duplicate tag");
        assert_eq!(error, RegistryError::Duplicate(TEXT_TAG.into()));
    }

    #[test]
    fn attribute_errors_surface_through_the_registry() {
        let registry = WidgetRegistry::standard();
        let context = WidgetContext::default();
        let error = registry
            .create(
                TEXT_TAG,
                Attributes::new().with("min", "5").with("max", "1"),
                &context,
            )
            .expect_err("inverted range");
        assert!(matches!(
            error,
            RegistryError::Attribute(AttributeError::InvertedRange { .. })
        ));
    }
}
