use std::future::Future;
use std::time::Duration;

use super::common::*;

use crate::inputs::{
    resolve_lookup, AddressComponents, AddressField, Attributes, EventKind, FormAssociated,
    LookupError, LookupOutcome, PostalCodeLookup, PostalPlace, StaticPostalDirectory,
    VisualState,
};

const TIMEOUT: Option<Duration> = Some(Duration::from_secs(2));

fn autofill() -> Attributes {
    Attributes::new()
        .with("name", "address")
        .flag("enable-autocomplete")
}

struct UnavailableLookup;

impl PostalCodeLookup for UnavailableLookup {
    fn lookup(
        &self,
        _postal_code: &str,
    ) -> impl Future<Output = Result<Option<PostalPlace>, LookupError>> + Send {
        async { Err(LookupError::Unavailable("directory offline".to_string())) }
    }
}

struct SlowLookup;

impl PostalCodeLookup for SlowLookup {
    fn lookup(
        &self,
        _postal_code: &str,
    ) -> impl Future<Output = Result<Option<PostalPlace>, LookupError>> + Send {
        async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(None)
        }
    }
}

#[test]
fn initial_value_is_parsed_into_components() {
    let (context, _) = context();
    let widget = address(
        Attributes::new().with("value", "Hauptstraße 12, 80331 München, Germany"),
        &context,
    );

    let components = widget.components();
    assert_eq!(components.street, "Hauptstraße");
    assert_eq!(components.house_number, "12");
    assert_eq!(components.postal_code, "80331");
    assert_eq!(components.city, "München");
    assert_eq!(components.country, "Germany");
    assert_eq!(widget.value_text(), "Hauptstraße 12, 80331 München");
    assert_eq!(
        widget.internals().form_value(),
        Some("Hauptstraße 12, 80331 München")
    );
}

#[test]
fn required_address_lists_every_missing_part() {
    let (context, _) = context();
    let widget = address(Attributes::new().flag("required"), &context);

    assert_eq!(
        widget.validation_message(),
        "Street is required, City is required, Postal code is required"
    );
    assert_eq!(widget.visual_state(), VisualState::Neutral);
}

#[test]
fn sub_field_formats_are_checked() {
    let (context, _) = context();
    let mut widget = address(Attributes::new(), &context);

    widget.handle_field_input(AddressField::PostalCode, "8033");
    assert_eq!(widget.validation_message(), "Postal code must be 5 digits");

    widget.handle_field_input(AddressField::PostalCode, "80331");
    widget.handle_field_input(AddressField::HouseNumber, "12ab");
    assert_eq!(widget.validation_message(), "Invalid house number format");

    widget.handle_field_input(AddressField::HouseNumber, "12a");
    assert!(widget.state().is_valid);
}

#[test]
fn field_input_emits_field_and_formatted_address() {
    let (context, log) = context();
    let mut widget = address(Attributes::new().with("name", "address"), &context);
    log.clear();

    widget.handle_field_input(AddressField::Street, "Marktplatz");
    widget.handle_field_input(AddressField::City, "Bonn");

    let inputs = log.of_kind(EventKind::Input);
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[1].detail.field, Some(AddressField::City));
    assert_eq!(inputs[1].detail.value, "Bonn");
    assert_eq!(
        inputs[1].detail.formatted_address.as_deref(),
        Some("Marktplatz, Bonn")
    );
    assert!(widget.state().dirty);
}

#[test]
fn foreign_country_and_state_are_appended() {
    let (context, _) = context();
    let mut widget = address(Attributes::new().with("country", "Austria"), &context);
    assert_eq!(widget.components().country, "Austria");

    widget.handle_field_input(AddressField::Street, "Ring");
    widget.handle_field_input(AddressField::HouseNumber, "1");
    widget.handle_field_input(AddressField::City, "Wien");
    widget.handle_field_input(AddressField::State, "Wien");

    let formatted = widget.formatted_address();
    assert_eq!(formatted.street_line, "Ring 1");
    assert_eq!(formatted.city_line, "Wien, Wien, Austria");
}

#[test]
fn set_value_text_replaces_every_component() {
    let (context, _) = context();
    let mut widget = address(
        Attributes::new().with("value", "Hauptstraße 12, 80331 München, Germany"),
        &context,
    );

    widget.set_value_text("Marktplatz 1, 53111 Bonn");

    assert_eq!(widget.components().street, "Marktplatz");
    assert_eq!(widget.components().postal_code, "53111");
    assert_eq!(widget.components().state, "");
    assert_eq!(widget.value_text(), "Marktplatz 1, 53111 Bonn");
}

#[test]
fn clear_keeps_country_and_focuses_street() {
    let (context, _) = context();
    let mut widget = address(
        Attributes::new()
            .with("country", "Austria")
            .with("value", "Ring 1, 1010 Wien"),
        &context,
    );

    widget.clear();

    assert_eq!(widget.components(), &AddressComponents::with_country("Austria"));
    assert_eq!(widget.focused_field(), Some(AddressField::Street));
}

#[test]
fn report_validity_focuses_the_street() {
    let (context, _) = context();
    let mut widget = address(Attributes::new().flag("required"), &context);

    assert!(!widget.report_validity());
    assert_eq!(widget.focused_field(), Some(AddressField::Street));
}

#[test]
fn view_shows_placeholder_preview_until_filled() {
    let (context, _) = context();
    let mut widget = address(Attributes::new().with("label", "Address"), &context);

    let view = widget.view();
    assert_eq!(view.preview, "Address will appear here...");
    assert_eq!(view.fields.len(), 6);
    assert_eq!(view.fields[4].placeholder, "State (optional)");

    widget.handle_field_input(AddressField::City, "Bonn");
    assert_eq!(widget.view().preview, "Bonn");
}

#[test]
fn postal_blur_issues_a_ticket_only_when_enabled() {
    let (context, _) = context();
    let mut plain = address(Attributes::new(), &context);
    plain.handle_field_input(AddressField::PostalCode, "80331");
    assert!(plain.handle_field_blur(AddressField::PostalCode).is_none());

    let mut widget = address(autofill(), &context);
    widget.handle_field_input(AddressField::PostalCode, "8033");
    assert!(widget.handle_field_blur(AddressField::PostalCode).is_none());

    widget.handle_field_input(AddressField::PostalCode, "80331");
    assert!(widget.handle_field_blur(AddressField::City).is_none());
    let ticket = widget
        .handle_field_blur(AddressField::PostalCode)
        .expect("ticket");
    assert_eq!(ticket.postal_code(), "80331");

    let disabled_context = context.with_postal_autocomplete(false);
    let mut switched_off = address(autofill(), &disabled_context);
    switched_off.handle_field_input(AddressField::PostalCode, "80331");
    assert!(switched_off
        .handle_field_blur(AddressField::PostalCode)
        .is_none());
}

#[tokio::test]
async fn lookup_fills_city_and_state() {
    let (context, log) = context();
    let mut widget = address(autofill(), &context);
    widget.handle_field_focus(AddressField::PostalCode);
    widget.handle_field_input(AddressField::PostalCode, "80331");
    let ticket = widget
        .handle_field_blur(AddressField::PostalCode)
        .expect("ticket");
    log.clear();

    let directory = StaticPostalDirectory::germany();
    let resolution = resolve_lookup(&directory, ticket, TIMEOUT).await;
    let outcome = widget.apply_lookup(resolution);

    assert_eq!(
        outcome,
        LookupOutcome::Applied(PostalPlace {
            city: "München".to_string(),
            state: "Bayern".to_string(),
        })
    );
    assert_eq!(widget.components().city, "München");
    assert_eq!(widget.components().state, "Bayern");
    assert_eq!(widget.value_text(), "80331 München, Bayern");
    assert_eq!(log.kinds(), vec![EventKind::Input]);
}

#[tokio::test]
async fn stale_lookup_is_discarded() {
    let (context, _) = context();
    let mut widget = address(autofill(), &context);
    widget.handle_field_input(AddressField::PostalCode, "80331");
    let ticket = widget
        .handle_field_blur(AddressField::PostalCode)
        .expect("ticket");

    widget.handle_field_input(AddressField::PostalCode, "10115");

    let directory = StaticPostalDirectory::germany();
    let outcome = widget.apply_lookup(resolve_lookup(&directory, ticket, TIMEOUT).await);

    assert_eq!(outcome, LookupOutcome::Stale);
    assert_eq!(widget.components().city, "");
    assert_eq!(widget.components().postal_code, "10115");
}

#[tokio::test]
async fn unknown_postal_code_changes_nothing() {
    let (context, _) = context();
    let mut widget = address(autofill(), &context);
    widget.handle_field_input(AddressField::PostalCode, "99999");
    widget.handle_field_input(AddressField::City, "Nirgendwo");
    let ticket = widget
        .handle_field_blur(AddressField::PostalCode)
        .expect("ticket");

    let directory = StaticPostalDirectory::germany();
    let outcome = widget.apply_lookup(resolve_lookup(&directory, ticket, TIMEOUT).await);

    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(widget.components().city, "Nirgendwo");
}

#[tokio::test]
async fn lookup_failures_are_reported_not_applied() {
    let (context, _) = context();
    let mut widget = address(autofill(), &context);
    widget.handle_field_input(AddressField::PostalCode, "80331");

    let ticket = widget
        .handle_field_blur(AddressField::PostalCode)
        .expect("ticket");
    let outcome = widget.apply_lookup(resolve_lookup(&UnavailableLookup, ticket, TIMEOUT).await);
    assert_eq!(
        outcome,
        LookupOutcome::Failed(LookupError::Unavailable("directory offline".to_string()))
    );

    let ticket = widget
        .handle_field_blur(AddressField::PostalCode)
        .expect("ticket");
    let limit = Duration::from_millis(20);
    let outcome = widget.apply_lookup(resolve_lookup(&SlowLookup, ticket, Some(limit)).await);
    assert_eq!(outcome, LookupOutcome::Failed(LookupError::Timeout(limit)));
    assert_eq!(widget.components().city, "");
}

#[test]
fn form_reset_restores_the_attribute_address() {
    let (context, _) = context();
    let mut widget = address(
        Attributes::new().with("value", "Hauptstraße 12, 80331 München"),
        &context,
    );
    widget.handle_field_input(AddressField::Street, "Nebenstraße");

    widget.form_reset();

    assert_eq!(widget.components().street, "Hauptstraße");
    assert!(!widget.state().dirty);
    assert_eq!(widget.focused_field(), None);
}

#[test]
fn locked_address_ignores_field_input() {
    let (context, _) = context();
    let mut widget = address(Attributes::new().flag("readonly"), &context);
    assert!(!widget.handle_field_input(AddressField::Street, "Ring"));
    assert_eq!(widget.components().street, "");
}
