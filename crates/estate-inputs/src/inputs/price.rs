//! Price input: currency-aware numeric field with a plausibility floor.

use super::attributes::Attributes;
use super::base::{
    AttributeConstraints, ControlAttributes, FieldDefaults, Formattable, InputWidget, Presentable,
    RuleContext, Suggestion, Validatable,
};
use super::config::{AttributeError, PriceType, WidgetConfig, DEFAULT_CURRENCY};
use super::context::WidgetContext;
use super::numeric::NumericText;
use crate::numeric::{currency_symbol, NumberLocale};
use crate::validation::ValidationReport;

const RENT_FLOOR: f64 = 100.0;
const SALE_FLOOR: f64 = 1_000.0;

const RENT_SUGGESTIONS: [f64; 5] = [800.0, 1_200.0, 1_500.0, 2_000.0, 2_500.0];
const SALE_SUGGESTIONS: [f64; 5] = [300_000.0, 500_000.0, 750_000.0, 1_000_000.0, 1_500_000.0];

impl PriceType {
    pub fn label(self) -> &'static str {
        match self {
            PriceType::Sale => "Purchase Price",
            PriceType::Rent => "Monthly Rent",
            PriceType::Estimate => "Estimated Value",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PriceType::Sale => "home",
            PriceType::Rent => "key",
            PriceType::Estimate => "euro",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            PriceType::Rent => "1.500",
            PriceType::Sale | PriceType::Estimate => "750.000",
        }
    }

    pub fn suggestions(self) -> &'static [f64] {
        match self {
            PriceType::Rent => &RENT_SUGGESTIONS,
            PriceType::Sale => &SALE_SUGGESTIONS,
            PriceType::Estimate => &[],
        }
    }

    /// Lowest value that still looks like a real price of this type.
    pub fn floor(self) -> Option<(f64, &'static str)> {
        match self {
            PriceType::Rent => Some((RENT_FLOOR, "Rental price seems unusually low")),
            PriceType::Sale => Some((SALE_FLOOR, "Sale price seems unusually low")),
            PriceType::Estimate => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceFormatter {
    numeric: NumericText,
    currency: String,
}

impl Default for PriceFormatter {
    fn default() -> Self {
        Self {
            numeric: NumericText::new(NumberLocale::default()),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl PriceFormatter {
    fn symbol(&self) -> &str {
        currency_symbol(&self.currency)
    }
}

impl Formattable for PriceFormatter {
    fn reconfigure(&mut self, config: &WidgetConfig, locale: NumberLocale) {
        self.currency = config.currency.clone();
        let symbol = self.symbol().to_string();
        self.numeric
            .configure(locale, config.allow_decimals, Some(symbol), config.show_currency);
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
        self.numeric.canonical(display)
    }

    fn numeric_value(&self, display: &str) -> Option<f64> {
        Some(self.numeric.value_of(display))
    }

    fn render_number(&self, value: f64) -> String {
        self.numeric.display_number(value)
    }

    fn adjust_control(&self, control: &mut ControlAttributes) {
        self.numeric.adjust(control);
    }
}

impl Presentable for PriceFormatter {
    fn defaults(&self, config: &WidgetConfig) -> FieldDefaults {
        FieldDefaults {
            label: Some(config.price_type.label().to_string()),
            icon: Some(config.price_type.icon()),
            placeholder: Some(config.price_type.placeholder().to_string()),
            suffix: config.show_currency.then(|| config.currency.clone()),
        }
    }

    fn suggestions(&self, config: &WidgetConfig) -> Vec<Suggestion> {
        let labelled = self
            .numeric
            .format()
            .clone()
            .with_unit(self.symbol(), true);
        config
            .price_type
            .suggestions()
            .iter()
            .map(|value| Suggestion {
                value: *value,
                label: labelled.format(*value),
            })
            .collect()
    }
}

/// Flags prices below the floor of their type. Zero counts as empty and is left
/// to the required rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceSanity;

impl Validatable for PriceSanity {
    fn validate(&self, context: &RuleContext<'_>, report: &mut ValidationReport) {
        let Some(value) = context.value.number.filter(|value| *value > 0.0) else {
            return;
        };
        if let Some((floor, message)) = context.config.price_type.floor() {
            if value < floor {
                report.flag_sanity(context.sanity_mode, message);
            }
        }
    }
}

/// `estate-price-input` widget.
pub type PriceInput = InputWidget<PriceFormatter>;

impl PriceInput {
    pub fn new(attributes: Attributes, context: &WidgetContext) -> Result<Self, AttributeError> {
        Self::assemble(
            attributes,
            context,
            PriceFormatter::default(),
            vec![
                Box::new(AttributeConstraints::formatted("Price")),
                Box::new(PriceSanity),
            ],
        )
    }

    pub fn price_type(&self) -> PriceType {
        self.config().price_type
    }

    pub fn currency(&self) -> &str {
        &self.config().currency
    }

    /// Fills the field with a suggested price and focuses it.
    pub fn apply_suggestion(&mut self, value: f64) {
        self.set_numeric_value(value);
        self.focus();
    }

    /// Replaces the typed text with its formatted form.
    pub fn format_current_value(&mut self) {
        let formatted = self.formatter.reformat(self.value());
        self.set_value(&formatted);
    }
}
