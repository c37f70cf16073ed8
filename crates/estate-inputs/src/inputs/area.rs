//! Area input: numeric field with a unit that converts the stored magnitude.

use serde::Serialize;

use super::attributes::Attributes;
use super::base::{
    AttributeConstraints, ControlAttributes, FieldDefaults, Formattable, InputWidget, Presentable,
    RuleContext, Suggestion, Validatable,
};
use super::config::{AreaType, AttributeError, WidgetConfig};
use super::context::WidgetContext;
use super::numeric::NumericText;
use crate::numeric::{self, round_to, NumberLocale};
use crate::units::{convert, AreaUnit};
use crate::validation::ValidationReport;

/// Above this many square meters a value is flagged as implausible.
const SQUARE_METER_CEILING: f64 = 10_000.0;

/// Units shown in the converter footer.
const EQUIVALENT_UNITS: [AreaUnit; 2] = [AreaUnit::SquareMeter, AreaUnit::SquareFoot];

/// Fraction digits kept on a value carried across a unit switch.
const CARRIED_DIGITS: u32 = 6;

/// Acres and hectares are always shown with fractions; whole numbers would
/// round typical plots to zero.
fn coarse(unit: AreaUnit) -> bool {
    matches!(unit, AreaUnit::Acre | AreaUnit::Hectare)
}

impl AreaType {
    pub fn label(self) -> &'static str {
        match self {
            AreaType::Living => "Living Area",
            AreaType::Total => "Total Area",
            AreaType::Plot => "Plot Area",
            AreaType::Room => "Room Area",
            AreaType::Usable => "Usable Area",
            AreaType::Basement => "Basement Area",
            AreaType::Garage => "Garage Area",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AreaType::Living => "home",
            AreaType::Total => "area",
            AreaType::Plot => "garden",
            AreaType::Room => "bedroom",
            AreaType::Usable => "floor-plan",
            AreaType::Basement => "building",
            AreaType::Garage => "garage",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            AreaType::Plot => "500",
            _ => "85",
        }
    }

    /// Smallest believable surface in square meters.
    pub fn floor(self) -> Option<(f64, &'static str)> {
        match self {
            AreaType::Living => Some((10.0, "Living area seems unusually small")),
            AreaType::Room => Some((5.0, "Room area seems unusually small")),
            AreaType::Plot => Some((50.0, "Plot area seems unusually small")),
            _ => None,
        }
    }

    pub fn suggestions(self, unit: AreaUnit) -> &'static [f64] {
        match (unit, self) {
            (AreaUnit::SquareMeter, AreaType::Living) => &[50.0, 75.0, 100.0, 125.0, 150.0],
            (AreaUnit::SquareMeter, AreaType::Room) => &[12.0, 18.0, 25.0, 30.0, 40.0],
            (AreaUnit::SquareMeter, AreaType::Plot) => &[300.0, 500.0, 800.0, 1_000.0, 1_500.0],
            (AreaUnit::SquareMeter, AreaType::Total) => &[80.0, 120.0, 160.0, 200.0, 250.0],
            (AreaUnit::SquareFoot, AreaType::Living) => &[500.0, 800.0, 1_000.0, 1_300.0, 1_600.0],
            (AreaUnit::SquareFoot, AreaType::Room) => &[130.0, 200.0, 270.0, 320.0, 430.0],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct AreaFormatter {
    numeric: NumericText,
    unit: AreaUnit,
    /// Converted value written by the last unit switch and the text it is shown
    /// as. It stands in for the parsed text until the user edits the field.
    carried: Option<(String, f64)>,
}

impl Default for AreaFormatter {
    fn default() -> Self {
        Self {
            numeric: NumericText::new(NumberLocale::default()),
            unit: AreaUnit::default(),
            carried: None,
        }
    }
}

impl AreaFormatter {
    fn carry(&mut self, value: f64) -> String {
        let display = self.numeric.display_number(value);
        self.carried = Some((display.clone(), round_to(value, CARRIED_DIGITS)));
        display
    }

    fn carried_value(&self, display: &str) -> Option<f64> {
        self.carried
            .as_ref()
            .filter(|(text, _)| text == display)
            .map(|(_, value)| *value)
    }
}

impl Formattable for AreaFormatter {
    fn reconfigure(&mut self, config: &WidgetConfig, locale: NumberLocale) {
        self.unit = config.unit;
        self.carried = None;
        self.numeric.configure(
            locale,
            config.allow_decimals || coarse(config.unit),
            Some(config.unit.symbol().to_string()),
            config.show_unit,
        );
    }

    fn display_for(&self, text: &str) -> String {
        self.numeric.display(text)
    }

    fn display_number(&self, value: f64) -> String {
        self.numeric.display_number(value)
    }

    fn reformat(&self, raw: &str) -> String {
        self.numeric.display(raw)
    }

    fn canonical(&self, display: &str) -> String {
        match self.carried_value(display) {
            Some(value) => numeric::canonical(value),
            None => self.numeric.canonical(display),
        }
    }

    fn numeric_value(&self, display: &str) -> Option<f64> {
        Some(
            self.carried_value(display)
                .unwrap_or_else(|| self.numeric.value_of(display)),
        )
    }

    fn unit(&self) -> Option<AreaUnit> {
        Some(self.unit)
    }

    fn render_number(&self, value: f64) -> String {
        self.numeric.display_number(value)
    }

    fn adjust_control(&self, control: &mut ControlAttributes) {
        self.numeric.adjust(control);
    }
}

impl Presentable for AreaFormatter {
    fn defaults(&self, config: &WidgetConfig) -> FieldDefaults {
        FieldDefaults {
            label: Some(config.area_type.label().to_string()),
            icon: Some(config.area_type.icon()),
            placeholder: Some(config.area_type.placeholder().to_string()),
            suffix: config.show_unit.then(|| config.unit.symbol().to_string()),
        }
    }

    fn suggestions(&self, config: &WidgetConfig) -> Vec<Suggestion> {
        config
            .area_type
            .suggestions(config.unit)
            .iter()
            .map(|value| Suggestion {
                value: *value,
                label: format!("{} {}", self.numeric.plain(*value), config.unit.symbol()),
            })
            .collect()
    }
}

/// Type floors, compared in square meters, and the square meter ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaSanity;

impl Validatable for AreaSanity {
    fn validate(&self, context: &RuleContext<'_>, report: &mut ValidationReport) {
        let Some(value) = context.value.number.filter(|value| *value > 0.0) else {
            return;
        };
        let unit = context.unit.unwrap_or(context.config.unit);

        if let Some((floor, message)) = context.config.area_type.floor() {
            if convert(value, unit, AreaUnit::SquareMeter) < floor {
                report.flag_sanity(context.sanity_mode, message);
            }
        }
        if unit == AreaUnit::SquareMeter && value > SQUARE_METER_CEILING {
            report.flag_sanity(context.sanity_mode, "Area seems unusually large for m²");
        }
    }
}

/// Current value expressed in another unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaEquivalent {
    pub unit: AreaUnit,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitOption {
    pub unit: AreaUnit,
    pub label: &'static str,
    pub active: bool,
}

fn option_label(unit: AreaUnit) -> &'static str {
    match unit {
        AreaUnit::SquareMeter => "Square Meters (m²)",
        AreaUnit::SquareFoot => "Square Feet (sqft)",
        AreaUnit::Acre => "Acres",
        AreaUnit::Hectare => "Hectares (ha)",
    }
}

/// `estate-area-input` widget.
pub type AreaInput = InputWidget<AreaFormatter>;

impl AreaInput {
    pub fn new(attributes: Attributes, context: &WidgetContext) -> Result<Self, AttributeError> {
        Self::assemble(
            attributes,
            context,
            AreaFormatter::default(),
            vec![
                Box::new(AttributeConstraints::formatted("Area")),
                Box::new(AreaSanity),
            ],
        )
    }

    pub fn area_type(&self) -> AreaType {
        self.config().area_type
    }

    pub fn unit(&self) -> AreaUnit {
        self.config().unit
    }

    /// Current value converted to `unit`, if there is a positive value.
    pub fn convert_to_unit(&self, unit: AreaUnit) -> Option<f64> {
        self.numeric_value()
            .filter(|value| *value > 0.0)
            .map(|value| convert(value, self.unit(), unit))
    }

    /// Switches the unit and converts the stored value so the real-world
    /// magnitude stays the same. The converted value is validated once, in the
    /// new unit.
    pub fn set_unit(&mut self, unit: AreaUnit) -> Result<(), AttributeError> {
        if unit == self.unit() {
            return Ok(());
        }
        let converted = self.convert_to_unit(unit);
        self.core.update_attribute("unit", Some(unit.symbol()))?;
        self.formatter
            .reconfigure(&self.core.config, self.core.context.locale);
        match converted {
            Some(value) => {
                let display = self.formatter.carry(value);
                self.assign(display.clone(), display);
            }
            None => {
                self.sync_form_value();
                self.validate();
            }
        }
        Ok(())
    }

    /// Converter footer entries; empty unless `show-converter` is set and the
    /// value is positive.
    pub fn equivalents(&self) -> Vec<AreaEquivalent> {
        if !self.config().show_converter {
            return Vec::new();
        }
        let current = self.unit();
        EQUIVALENT_UNITS
            .iter()
            .filter(|unit| **unit != current)
            .filter_map(|unit| {
                let value = self.convert_to_unit(*unit)?;
                Some(AreaEquivalent {
                    unit: *unit,
                    value,
                    label: format!("{} {}", self.formatter.numeric.plain(value), unit.symbol()),
                })
            })
            .collect()
    }

    pub fn unit_options(&self) -> Vec<UnitOption> {
        let current = self.unit();
        AreaUnit::ALL
            .iter()
            .map(|unit| UnitOption {
                unit: *unit,
                label: option_label(*unit),
                active: *unit == current,
            })
            .collect()
    }

    /// Replaces the typed text with its formatted form.
    pub fn format_current_value(&mut self) {
        let formatted = self.formatter.reformat(self.value());
        self.set_value(&formatted);
    }
}
