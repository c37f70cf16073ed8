use super::base::ControlAttributes;
use crate::numeric::{self, NumberFormat, NumberLocale};

/// Parse/format policy shared by the price and area formatters.
///
/// The canonical value is the parsed, rounded number in plain notation; a
/// blank display submits an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericText {
    format: NumberFormat,
}

impl NumericText {
    pub fn new(locale: NumberLocale) -> Self {
        Self {
            format: NumberFormat::new(locale),
        }
    }

    pub fn configure(
        &mut self,
        locale: NumberLocale,
        allow_decimals: bool,
        unit: Option<String>,
        show_unit: bool,
    ) {
        self.format = NumberFormat {
            locale,
            allow_decimals,
            allow_negative: false,
            unit,
            show_unit,
        };
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    /// Parsed and normalised number; blank or unreadable text is `0`.
    pub fn value_of(&self, text: &str) -> f64 {
        self.format.normalize(self.format.parse(text))
    }

    pub fn display(&self, text: &str) -> String {
        if text.trim().is_empty() {
            String::new()
        } else {
            self.format.format(self.format.parse(text))
        }
    }

    pub fn display_number(&self, value: f64) -> String {
        self.format.format(value)
    }

    /// Grouped number without the unit suffix, as used in messages and labels.
    pub fn plain(&self, value: f64) -> String {
        NumberFormat {
            show_unit: false,
            ..self.format.clone()
        }
        .format(value)
    }

    pub fn canonical(&self, display: &str) -> String {
        if display.trim().is_empty() {
            String::new()
        } else {
            numeric::canonical(self.value_of(display))
        }
    }

    /// Controls accept locale-punctuated free text instead of a strict number.
    pub fn adjust(&self, control: &mut ControlAttributes) {
        control.input_type = "text".to_string();
        control.inputmode = Some("decimal".to_string());
        control.pattern = Some("[0-9]*[.,]?[0-9]*".to_string());
    }
}
