use clap::Args;
use estate_inputs::config::InputDefaults;
use estate_inputs::error::AppError;
use estate_inputs::inputs::{
    Attributes, EventBus, Form, SubmitError, WidgetContext, WidgetRegistry, ADDRESS_TAG,
    AREA_TAG, PRICE_TAG,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Listings CSV with columns reference, price_type, price, area_type, area, unit, address
    pub(crate) path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    reference: String,
    #[serde(default)]
    price_type: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    area_type: String,
    #[serde(default)]
    area: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    address: String,
}

#[derive(Debug, Serialize)]
struct RowResult {
    reference: String,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub(crate) fn run_check(args: CheckArgs, defaults: &InputDefaults) -> Result<(), AppError> {
    let file = File::open(&args.path)?;
    let rows = read_rows(file)?;
    let registry = WidgetRegistry::standard();

    let mut rejected = 0usize;
    for row in &rows {
        let result = check_row(&registry, defaults, row)?;
        if !result.accepted {
            rejected += 1;
        }
        println!("{}", serde_json::to_string(&result)?);
    }

    info!(rows = rows.len(), rejected, "listing check finished");
    if rejected > 0 {
        return Err(AppError::Input(format!(
            "{rejected} of {} listings failed validation",
            rows.len()
        )));
    }
    Ok(())
}

fn read_rows<R: Read>(reader: R) -> Result<Vec<ListingRow>, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<ListingRow>() {
        let row = record.map_err(|err| AppError::Input(format!("invalid listings csv: {err}")))?;
        rows.push(row);
    }
    Ok(rows)
}

fn check_row(
    registry: &WidgetRegistry,
    defaults: &InputDefaults,
    row: &ListingRow,
) -> Result<RowResult, AppError> {
    let mut form = listing_form(registry, defaults, row)?;
    if let Some(field) = form.field_mut("price") {
        field.set_value(&row.price);
    }
    if let Some(field) = form.field_mut("area") {
        field.set_value(&row.area);
    }
    if let Some(field) = form.field_mut("address") {
        field.set_value(&row.address);
    }

    let result = match form.submit() {
        Ok(data) => RowResult {
            reference: row.reference.clone(),
            accepted: true,
            data: Some(data.to_json()),
            errors: Vec::new(),
        },
        Err(SubmitError::Invalid { fields }) => {
            warn!(reference = %row.reference, invalid = fields.len(), "listing rejected");
            RowResult {
                reference: row.reference.clone(),
                accepted: false,
                data: None,
                errors: fields
                    .into_iter()
                    .map(|field| format!("{}: {}", field.name, field.message))
                    .collect(),
            }
        }
    };
    Ok(result)
}

fn listing_form(
    registry: &WidgetRegistry,
    defaults: &InputDefaults,
    row: &ListingRow,
) -> Result<Form, AppError> {
    let bus = EventBus::new();
    let context = WidgetContext::from_defaults(defaults, bus.clone());
    let mut price = Attributes::new().with("name", "price").flag("required");
    if !row.price_type.is_empty() {
        price.set("price-type", row.price_type.as_str());
    }
    let mut area = Attributes::new().with("name", "area").flag("allow-decimals");
    if !row.area_type.is_empty() {
        area.set("area-type", row.area_type.as_str());
    }
    if !row.unit.is_empty() {
        area.set("unit", row.unit.as_str());
    }
    let address = Attributes::new().with("name", "address").flag("required");

    let mut form = Form::new(bus);
    for (tag, attributes) in [(PRICE_TAG, price), (AREA_TAG, area), (ADDRESS_TAG, address)] {
        form.push(registry.create(tag, attributes, &context)?);
    }
    Ok(form)
}
