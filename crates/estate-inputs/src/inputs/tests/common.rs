use crate::inputs::{
    AddressInput, AreaInput, Attributes, EventBus, EventLog, PriceInput, TextInput, WidgetContext,
};
use crate::numeric::NumberLocale;
use crate::validation::SanityMode;

/// German-locale context with a recorder attached to its bus.
pub(super) fn context() -> (WidgetContext, EventLog) {
    let bus = EventBus::new();
    let log = EventLog::attach(&bus);
    (WidgetContext::new(bus), log)
}

pub(super) fn english_context() -> (WidgetContext, EventLog) {
    let (context, log) = context();
    (context.with_locale(NumberLocale::English), log)
}

pub(super) fn warning_context() -> (WidgetContext, EventLog) {
    let (context, log) = context();
    (context.with_sanity_mode(SanityMode::Warn), log)
}

pub(super) fn text(attributes: Attributes, context: &WidgetContext) -> TextInput {
    TextInput::new(attributes, context).expect("text widget attributes")
}

pub(super) fn price(attributes: Attributes, context: &WidgetContext) -> PriceInput {
    PriceInput::new(attributes, context).expect("price widget attributes")
}

pub(super) fn area(attributes: Attributes, context: &WidgetContext) -> AreaInput {
    AreaInput::new(attributes, context).expect("area widget attributes")
}

pub(super) fn address(attributes: Attributes, context: &WidgetContext) -> AddressInput {
    AddressInput::new(attributes, context).expect("address widget attributes")
}

pub(super) fn rent_attributes() -> Attributes {
    Attributes::new()
        .with("name", "rent")
        .with("price-type", "rent")
}
