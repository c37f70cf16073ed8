use clap::Args;
use estate_inputs::config::InputDefaults;
use estate_inputs::error::AppError;
use estate_inputs::inputs::{
    resolve_lookup, AddressComponents, AddressField, AddressInput, Attributes, LookupOutcome,
    StaticPostalDirectory, WidgetContext,
};
use estate_inputs::numeric::{self, currency_symbol, NumberFormat, NumberLocale};
use estate_inputs::units::{convert, AreaUnit};
use serde::Serialize;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct PriceArgs {
    /// Price text as a user would type it, e.g. "450.000" or "€ 1.234,56"
    pub(crate) text: String,
    /// Number locale (de-DE or en-US); defaults to APP_LOCALE
    #[arg(long)]
    pub(crate) locale: Option<NumberLocale>,
    /// Keep up to two fraction digits
    #[arg(long)]
    pub(crate) decimals: bool,
    /// ISO currency code appended to the formatted value
    #[arg(long)]
    pub(crate) currency: Option<String>,
}

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    input: &'a str,
    locale: &'static str,
    parsed: f64,
    canonical: String,
    formatted: String,
}

pub(crate) fn run_price(args: PriceArgs, defaults: &InputDefaults) -> Result<(), AppError> {
    let locale = args.locale.unwrap_or(defaults.locale);
    let mut format = NumberFormat::new(locale).with_decimals(args.decimals);
    if let Some(code) = args.currency.as_deref() {
        format = format.with_unit(currency_symbol(&code.trim().to_ascii_uppercase()), true);
    }

    let parsed = format.parse(&args.text);
    let normalized = format.normalize(parsed);
    let report = PriceReport {
        input: &args.text,
        locale: locale.tag(),
        parsed,
        canonical: numeric::canonical(normalized),
        formatted: format.format(parsed),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Args, Debug)]
pub(crate) struct ConvertArgs {
    /// Area value; locale punctuation is accepted
    pub(crate) value: String,
    /// Source unit (m², sqft, acre, ha)
    #[arg(long)]
    pub(crate) from: AreaUnit,
    /// Target unit (m², sqft, acre, ha)
    #[arg(long)]
    pub(crate) to: AreaUnit,
    /// Number locale (de-DE or en-US); defaults to APP_LOCALE
    #[arg(long)]
    pub(crate) locale: Option<NumberLocale>,
}

#[derive(Debug, Serialize)]
struct ConversionReport {
    value: f64,
    from: AreaUnit,
    to: AreaUnit,
    converted: f64,
    formatted: String,
}

pub(crate) fn run_convert(args: ConvertArgs, defaults: &InputDefaults) -> Result<(), AppError> {
    let locale = args.locale.unwrap_or(defaults.locale);
    let value = numeric::parse(&args.value, locale);
    let converted = convert(value, args.from, args.to);
    let format = NumberFormat::new(locale)
        .with_decimals(true)
        .with_unit(args.to.symbol(), true);

    let report = ConversionReport {
        value,
        from: args.from,
        to: args.to,
        converted,
        formatted: format.format(converted),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Args, Debug)]
pub(crate) struct AddressArgs {
    /// One-line address, e.g. "Hauptstraße 12, 80331 München, Germany"
    pub(crate) text: String,
    /// Default country when the address names none
    #[arg(long)]
    pub(crate) country: Option<String>,
    /// Fill city and state from the postal code directory
    #[arg(long)]
    pub(crate) autofill: bool,
}

#[derive(Debug, Serialize)]
struct AddressReport {
    components: AddressComponents,
    formatted: String,
    valid: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lookup: Option<String>,
}

pub(crate) async fn run_address(args: AddressArgs, defaults: &InputDefaults) -> Result<(), AppError> {
    let context = WidgetContext::from_defaults(defaults, Default::default());
    let mut attributes = Attributes::new().with("name", "address");
    if let Some(country) = args.country.as_deref() {
        attributes.set("country", country);
    }
    if args.autofill {
        attributes.set("enable-autocomplete", "");
    }

    let mut widget = AddressInput::new(attributes, &context)?;
    widget.set_value_text(&args.text);

    let mut lookup = None;
    if let Some(ticket) = widget.handle_field_blur(AddressField::PostalCode) {
        info!(postal_code = ticket.postal_code(), "resolving postal code");
        let directory = StaticPostalDirectory::germany();
        let resolution = resolve_lookup(&directory, ticket, defaults.lookup_timeout).await;
        lookup = Some(describe_outcome(&widget.apply_lookup(resolution)));
    }

    let report = AddressReport {
        components: widget.components().clone(),
        formatted: widget.value_text(),
        valid: widget.check_validity(),
        message: widget.validation_message().to_string(),
        lookup,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn describe_outcome(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Applied(place) => format!("applied: {}, {}", place.city, place.state),
        LookupOutcome::NotFound => "postal code not found".to_string(),
        LookupOutcome::Stale => "discarded: postal code changed".to_string(),
        LookupOutcome::Failed(error) => format!("failed: {error}"),
    }
}
