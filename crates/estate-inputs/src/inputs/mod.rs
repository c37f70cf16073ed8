//! Form-associated input widgets for property listing forms.
//!
//! Widgets are plain values built from an [`Attributes`] set and a shared
//! [`WidgetContext`]. They publish interaction and validity events on an
//! [`EventBus`] and hand their canonical value to an enclosing [`Form`].
//! Specialised widgets ([`PriceInput`], [`AreaInput`]) reuse the generic
//! [`InputWidget`] with their own formatter and rules; [`AddressInput`] is a
//! composite of six sub-fields sharing the same core.

pub mod address;
pub mod area;
mod attributes;
mod base;
mod config;
mod context;
mod events;
pub mod form;
mod icons;
mod numeric;
pub mod price;
mod registry;
mod state;
mod widget;

#[cfg(test)]
mod tests;

pub use address::{
    parse_address, resolve_lookup, AddressComponents, AddressField, AddressFieldView,
    AddressInput, AddressView, FormattedAddress, LookupError, LookupOutcome, LookupResolution,
    LookupTicket, PostalCodeLookup, PostalPlace, StaticPostalDirectory,
};
pub use area::{AreaEquivalent, AreaFormatter, AreaInput, AreaSanity, UnitOption};
pub use attributes::Attributes;
pub use base::{
    AttributeConstraints, ControlAttributes, FieldDefaults, Formattable, InputView, InputWidget,
    PlainText, Presentable, RuleContext, Suggestion, TextInput, Validatable,
};
pub use config::{
    AreaType, AttributeError, InputType, Pattern, PriceType, Size, Variant, WidgetConfig,
    DEFAULT_COUNTRY, DEFAULT_CURRENCY,
};
pub use context::WidgetContext;
pub use events::{EventBus, EventDetail, EventKind, EventLog, EventSubscriber, WidgetEvent};
pub use form::{
    Form, FormAssociated, FormData, FormInternals, InvalidField, SubmitError, SubmitGate, Validity,
};
pub use icons::{IconRegistry, StaticIconRegistry};
pub use price::{PriceFormatter, PriceInput, PriceSanity};
pub use registry::{
    AnyWidget, RegistryError, WidgetConstructor, WidgetRegistry, ADDRESS_TAG, AREA_TAG,
    PRICE_TAG, TEXT_TAG,
};
pub use state::{InternalState, VisualState};
pub use widget::{InlineMessage, WidgetCore};
