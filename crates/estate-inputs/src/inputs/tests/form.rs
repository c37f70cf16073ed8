use super::common::*;

use serde_json::json;

use crate::inputs::{
    AnyWidget, Attributes, Form, FormAssociated, InvalidField, SubmitError, SubmitGate,
    WidgetContext, WidgetRegistry, ADDRESS_TAG, AREA_TAG, PRICE_TAG, TEXT_TAG,
};

fn listing_form(context: &WidgetContext) -> Form {
    let registry = WidgetRegistry::standard();
    let fields = [
        (TEXT_TAG, Attributes::new().with("name", "title").flag("required")),
        (PRICE_TAG, rent_attributes().flag("required")),
        (
            AREA_TAG,
            Attributes::new().with("name", "living_area").with("area-type", "living"),
        ),
        (ADDRESS_TAG, Attributes::new().with("name", "address")),
        (TEXT_TAG, Attributes::new().with("value", "not submitted")),
    ];

    let mut form = Form::new(context.bus.clone());
    for (tag, attributes) in fields {
        form.push(registry.create(tag, attributes, context).expect("widget"));
    }
    form
}

fn fill(form: &mut Form) {
    form.field_mut("title")
        .and_then(AnyWidget::as_text_mut)
        .expect("title")
        .handle_input("Altbau mit Balkon");
    form.field_mut("rent").expect("rent").set_value("1.500");
    form.field_mut("living_area").expect("area").set_value("85");
    form.field_mut("address")
        .expect("address")
        .set_value("Hauptstraße 12, 80331 München");
}

#[test]
fn submit_reports_every_invalid_field_and_focuses_the_first() {
    let (context, _) = context();
    let mut form = listing_form(&context);

    let error = form.submit().expect_err("empty required fields");

    let SubmitError::Invalid { fields } = &error;
    assert_eq!(
        fields,
        &vec![
            InvalidField {
                name: "title".to_string(),
                message: "This field is required".to_string(),
            },
            InvalidField {
                name: "rent".to_string(),
                message: "Price is required".to_string(),
            },
        ]
    );
    assert_eq!(
        error.to_string(),
        "2 field(s) failed validation: title (This field is required); rent (Price is required)"
    );
    assert!(form
        .field("title")
        .and_then(AnyWidget::as_text)
        .is_some_and(|title| title.is_focused()));
    assert!(!form
        .field("rent")
        .and_then(AnyWidget::as_price)
        .is_some_and(|rent| rent.is_focused()));
}

#[test]
fn valid_form_submits_canonical_values_of_named_fields() {
    let (context, _) = context();
    let mut form = listing_form(&context);
    fill(&mut form);

    assert!(form.check_validity());
    let data = form.submit().expect("valid form");

    assert_eq!(data.len(), 4);
    assert_eq!(data.get("title"), Some("Altbau mit Balkon"));
    assert_eq!(data.get("rent"), Some("1500"));
    assert_eq!(data.get("living_area"), Some("85"));
    assert_eq!(data.get("address"), Some("Hauptstraße 12, 80331 München"));
    assert_eq!(
        data.to_json(),
        json!({
            "title": "Altbau mit Balkon",
            "rent": "1500",
            "living_area": "85",
            "address": "Hauptstraße 12, 80331 München",
        })
    );
}

#[test]
fn sanity_failure_blocks_submission() {
    let (context, _) = context();
    let mut form = listing_form(&context);
    fill(&mut form);
    form.field_mut("rent").expect("rent").set_value("50");

    let SubmitError::Invalid { fields } = form.submit().expect_err("implausible rent");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].message, "Rental price seems unusually low");
}

#[test]
fn disabled_fields_are_neither_validated_nor_submitted() {
    let (context, _) = context();
    let mut form = listing_form(&context);
    fill(&mut form);
    let rent = form.field_mut("rent").expect("rent");
    rent.set_value("");
    rent.set_disabled(true);

    let data = form.submit().expect("rent is disabled");

    assert_eq!(data.get("rent"), None);
    assert_eq!(data.len(), 3);
}

#[test]
fn reset_restores_defaults_on_every_field() {
    let (context, _) = context();
    let mut form = listing_form(&context);
    fill(&mut form);

    form.reset();

    assert_eq!(form.field("title").map(AnyWidget::value_text).as_deref(), Some(""));
    assert_eq!(form.field("rent").map(AnyWidget::value_text).as_deref(), Some(""));
    assert!(!form.check_validity());
}

#[test]
fn submit_gate_follows_validity_announcements() {
    let (context, _) = context();
    let gate = SubmitGate::attach(&context.bus);
    let mut form = listing_form(&context);

    assert_eq!(gate.tracked(), 4);
    assert!(!gate.can_submit());
    assert_eq!(gate.invalid_fields(), vec!["rent".to_string(), "title".to_string()]);

    fill(&mut form);
    assert!(gate.can_submit());

    form.field_mut("title").expect("title").set_value("");
    assert_eq!(gate.invalid_fields(), vec!["title".to_string()]);

    form.field_mut("title").expect("title").set_disabled(true);
    assert!(gate.can_submit());
}

#[test]
fn registry_widgets_share_the_form_bus() {
    let (context, log) = context();
    let form = listing_form(&context);

    assert_eq!(form.fields().len(), 5);
    assert_eq!(form.bus().subscriber_count(), 1);
    let sources: Vec<_> = log
        .events()
        .into_iter()
        .filter_map(|event| event.source)
        .collect();
    assert_eq!(sources, vec!["title", "rent", "living_area", "address"]);
}
