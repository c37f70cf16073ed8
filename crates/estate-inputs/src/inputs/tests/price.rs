use super::common::*;

use crate::inputs::{Attributes, EventKind, FormAssociated, PriceType};
use crate::validation::{ErrorKind, ValidationError};

#[test]
fn rent_below_floor_is_blocked_without_min_attribute() {
    let (context, _) = context();
    let mut widget = price(rent_attributes(), &context);

    widget.handle_input("50");

    assert!(!widget.state().is_valid);
    assert_eq!(
        widget.state().errors,
        vec![ValidationError::SanityThreshold {
            message: "Rental price seems unusually low".to_string()
        }]
    );
    assert_eq!(widget.state().errors[0].kind(), ErrorKind::SanityThreshold);
    assert!(!widget.internals().validity().valid);
}

#[test]
fn warn_mode_keeps_sanity_findings_non_blocking() {
    let (context, _) = warning_context();
    let mut widget = price(rent_attributes(), &context);

    widget.handle_input("50");

    assert!(widget.state().is_valid);
    assert_eq!(widget.state().warnings.len(), 1);
    assert!(widget.internals().validity().valid);
}

#[test]
fn sale_floor_and_zero_value() {
    let (context, _) = context();
    let mut widget = price(Attributes::new().with("price-type", "sale"), &context);

    widget.handle_input("999");
    assert_eq!(widget.validation_message(), "Sale price seems unusually low");

    widget.handle_input("0");
    assert!(widget.state().is_valid);

    let (estimate_context, _) = super::common::context();
    let mut estimate = price(
        Attributes::new().with("price-type", "estimate"),
        &estimate_context,
    );
    estimate.handle_input("1");
    assert!(estimate.state().is_valid);
}

#[test]
fn zero_counts_as_empty_for_required() {
    let (context, _) = context();
    let mut widget = price(rent_attributes().flag("required"), &context);

    widget.handle_input("0");

    assert_eq!(widget.validation_message(), "Price is required");
}

#[test]
fn bounds_are_rendered_in_display_format() {
    let (context, _) = context();
    let mut widget = price(
        Attributes::new().with("min", "2000").with("max", "500000"),
        &context,
    );

    widget.handle_input("600000");
    assert_eq!(widget.validation_message(), "Price cannot exceed 500.000");

    widget.handle_input("1500");
    assert_eq!(widget.validation_message(), "Price must be at least 2.000");
}

#[test]
fn blur_formats_and_form_receives_canonical_number() {
    let (context, _) = context();
    let mut widget = price(
        Attributes::new().with("name", "price").flag("format-on-blur"),
        &context,
    );

    widget.focus();
    widget.handle_input("450000");
    assert_eq!(widget.value(), "450000");
    widget.blur();

    assert_eq!(widget.value(), "450.000");
    assert_eq!(widget.raw_value(), "450000");
    assert_eq!(widget.canonical_value(), "450000");
    assert_eq!(widget.internals().form_value(), Some("450000"));
    assert_eq!(widget.numeric_value(), Some(450_000.0));
}

#[test]
fn currency_symbol_and_code_are_shown_when_requested() {
    let (context, _) = context();
    let widget = price(
        Attributes::new()
            .with("value", "450000")
            .with("currency", "usd")
            .flag("show-currency"),
        &context,
    );

    assert_eq!(widget.currency(), "USD");
    assert_eq!(widget.value(), "450.000 $");
    assert_eq!(widget.canonical_value(), "450000");
    assert_eq!(widget.view().suffix.as_deref(), Some("USD"));
}

#[test]
fn decimals_round_trip_through_the_english_locale() {
    let (context, _) = english_context();
    let mut widget = price(Attributes::new().flag("allow-decimals"), &context);

    widget.handle_input("1,234.5");
    assert_eq!(widget.numeric_value(), Some(1234.5));

    widget.format_current_value();
    assert_eq!(widget.value(), "1,234.5");
    assert_eq!(widget.canonical_value(), "1234.5");
}

#[test]
fn rent_defaults_and_suggestions() {
    let (context, _) = context();
    let widget = price(rent_attributes(), &context);
    assert_eq!(widget.price_type(), PriceType::Rent);

    let view = widget.view();
    assert_eq!(view.label.as_deref(), Some("Monthly Rent"));
    assert_eq!(view.placeholder.as_deref(), Some("1.500"));
    assert!(view
        .icon_left
        .as_deref()
        .is_some_and(|markup| markup.contains("icon-key")));
    assert_eq!(view.control.input_type, "text");
    assert_eq!(view.control.inputmode.as_deref(), Some("decimal"));

    let labels: Vec<_> = view
        .suggestions
        .iter()
        .map(|suggestion| suggestion.label.as_str())
        .collect();
    assert_eq!(labels, vec!["800 €", "1.200 €", "1.500 €", "2.000 €", "2.500 €"]);
}

#[test]
fn hidden_suggestions_and_estimate_have_none() {
    let (context, _) = context();
    let hidden = price(rent_attributes().flag("hide-suggestions"), &context);
    assert!(hidden.suggestions().is_empty());

    let estimate = price(Attributes::new().with("price-type", "estimate"), &context);
    assert!(estimate.suggestions().is_empty());
}

#[test]
fn applying_a_suggestion_fills_and_focuses() {
    let (context, log) = context();
    let mut widget = price(rent_attributes(), &context);
    log.clear();

    widget.apply_suggestion(1500.0);

    assert_eq!(widget.value(), "1.500");
    assert_eq!(widget.numeric_value(), Some(1500.0));
    assert!(widget.is_focused());
    let input = &log.of_kind(EventKind::Input)[0];
    assert_eq!(input.detail.numeric_value, Some(1500.0));
    assert_eq!(input.detail.unit, None);
}

#[test]
fn unknown_price_type_is_an_attribute_error() {
    let (context, _) = context();
    assert!(crate::inputs::PriceInput::new(
        Attributes::new().with("price-type", "lease"),
        &context
    )
    .is_err());
}
