//! Locale-aware parsing and formatting of numbers typed with currency or unit
//! decorations.
//!
//! `parse` never fails: anything it cannot read degrades to `0`. For a fixed
//! [`NumberFormat`] the round trip `parse(format(v)) == normalize(v)` holds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Separator conventions for grouping and decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberLocale {
    /// `de-DE`: `1.234,56`
    #[default]
    #[serde(rename = "de-DE")]
    German,
    /// `en-US`: `1,234.56`
    #[serde(rename = "en-US")]
    English,
}

impl NumberLocale {
    pub fn decimal_separator(self) -> char {
        match self {
            NumberLocale::German => ',',
            NumberLocale::English => '.',
        }
    }

    pub fn group_separator(self) -> char {
        match self {
            NumberLocale::German => '.',
            NumberLocale::English => ',',
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            NumberLocale::German => "de-DE",
            NumberLocale::English => "en-US",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported number locale '{0}'")]
pub struct UnsupportedLocale(pub String);

impl FromStr for NumberLocale {
    type Err = UnsupportedLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "de" | "de-de" | "de-at" | "german" => Ok(Self::German),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::English),
            _ => Err(UnsupportedLocale(value.to_string())),
        }
    }
}

/// Parses free-typed numeric text. Currency symbols, unit suffixes and stray
/// characters are ignored; separators are resolved against `locale`.
pub fn parse(text: &str, locale: NumberLocale) -> f64 {
    let cleaned = strip_decorations(text);
    let normalized = resolve_separators(&cleaned, locale);
    leading_float(&normalized).unwrap_or(0.0)
}

fn strip_decorations(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    for c in text.chars() {
        // "m2" / "ft2" style unit suffixes must not leak their exponent digit.
        let exponent = c == '2' && matches!(previous, Some('m' | 'M' | 't' | 'T'));
        if (c.is_ascii_digit() && !exponent) || matches!(c, ',' | '.' | '-') {
            cleaned.push(c);
        }
        previous = Some(c);
    }
    cleaned
}

fn resolve_separators(cleaned: &str, locale: NumberLocale) -> String {
    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    let decimal_at = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => Some(comma.max(dot)),
        (Some(_), None) => single_kind_decimal(cleaned, ',', locale),
        (None, Some(_)) => single_kind_decimal(cleaned, '.', locale),
        (None, None) => None,
    };

    cleaned
        .char_indices()
        .filter_map(|(index, c)| match c {
            ',' | '.' if Some(index) == decimal_at => Some('.'),
            ',' | '.' => None,
            other => Some(other),
        })
        .collect()
}

/// Decides whether the only separator kind present is grouping (`None`) or marks
/// the decimal point (its byte index).
fn single_kind_decimal(cleaned: &str, separator: char, locale: NumberLocale) -> Option<usize> {
    let occurrences = cleaned.matches(separator).count();
    let grouped = is_thousands_grouping(cleaned, separator);

    let is_grouping = if occurrences > 1 {
        grouped
    } else {
        grouped && separator == locale.group_separator()
    };

    if is_grouping {
        None
    } else {
        cleaned.rfind(separator)
    }
}

fn is_thousands_grouping(cleaned: &str, separator: char) -> bool {
    let mut parts = cleaned.split(separator);
    let lead = parts.next().unwrap_or_default().trim_start_matches('-');
    if lead.is_empty() || lead.len() > 3 {
        return false;
    }
    parts.all(|group| group.len() == 3 && group.bytes().all(|b| b.is_ascii_digit()))
}

/// `parseFloat`-style longest numeric prefix.
pub(crate) fn leading_float(normalized: &str) -> Option<f64> {
    let bytes = normalized.as_bytes();
    let mut cursor = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        cursor = 1;
    }

    let int_start = cursor;
    while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
        cursor += 1;
    }
    let integer = &normalized[int_start..cursor];

    let mut fraction = "";
    if cursor < bytes.len() && bytes[cursor] == b'.' {
        let frac_start = cursor + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        fraction = &normalized[frac_start..frac_end];
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let literal = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if integer.is_empty() { "0" } else { integer },
        if fraction.is_empty() { "0" } else { fraction },
    );
    literal.parse::<f64>().ok()
}

/// Rounds half away from zero to `decimals` fraction digits.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest plain representation submitted to forms: `1235`, `1234.56`.
pub fn canonical(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    value.to_string()
}

/// Display symbol for an ISO currency code; unknown codes are shown verbatim.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        other => other,
    }
}

/// Formatting policy of one numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    pub locale: NumberLocale,
    pub allow_decimals: bool,
    pub allow_negative: bool,
    pub unit: Option<String>,
    pub show_unit: bool,
}

impl NumberFormat {
    pub fn new(locale: NumberLocale) -> Self {
        Self {
            locale,
            allow_decimals: false,
            allow_negative: false,
            unit: None,
            show_unit: false,
        }
    }

    pub fn with_decimals(mut self, allow_decimals: bool) -> Self {
        self.allow_decimals = allow_decimals;
        self
    }

    pub fn with_negatives(mut self, allow_negative: bool) -> Self {
        self.allow_negative = allow_negative;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>, show_unit: bool) -> Self {
        self.unit = Some(unit.into());
        self.show_unit = show_unit;
        self
    }

    pub fn fraction_digits(&self) -> u32 {
        if self.allow_decimals {
            2
        } else {
            0
        }
    }

    pub fn parse(&self, text: &str) -> f64 {
        parse(text, self.locale)
    }

    /// Applies the sign guard and the rounding policy.
    pub fn normalize(&self, value: f64) -> f64 {
        let finite = if value.is_finite() { value } else { 0.0 };
        let guarded = if !self.allow_negative && finite < 0.0 {
            0.0
        } else {
            finite
        };
        round_to(guarded, self.fraction_digits())
    }

    pub fn format(&self, value: f64) -> String {
        let normalized = self.normalize(value);
        let fixed = format!(
            "{:.*}",
            self.fraction_digits() as usize,
            normalized.abs()
        );
        let (integer, fraction) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
            None => (fixed.as_str(), ""),
        };

        let mut out = String::with_capacity(fixed.len() + 8);
        if normalized < 0.0 {
            out.push('-');
        }
        out.push_str(&group_digits(integer, self.locale.group_separator()));
        if !fraction.is_empty() {
            out.push(self.locale.decimal_separator());
            out.push_str(fraction);
        }
        if self.show_unit {
            if let Some(unit) = self.unit.as_deref().filter(|unit| !unit.is_empty()) {
                out.push(' ');
                out.push_str(unit);
            }
        }
        out
    }
}

fn group_digits(integer: &str, separator: char) -> String {
    let digits = integer.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(*digit as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_german_grouping_and_decimal_comma() {
        assert_eq!(parse("1.234,56", NumberLocale::German), 1234.56);
        assert_eq!(parse("1.235", NumberLocale::German), 1235.0);
        assert_eq!(parse("12,5", NumberLocale::German), 12.5);
        assert_eq!(parse("1.234.567", NumberLocale::German), 1_234_567.0);
    }

    #[test]
    fn parses_english_conventions() {
        assert_eq!(parse("1,234.56", NumberLocale::English), 1234.56);
        assert_eq!(parse("1,235", NumberLocale::English), 1235.0);
        assert_eq!(parse("1.235", NumberLocale::English), 1.235);
    }

    #[test]
    fn strips_symbols_and_units() {
        assert_eq!(parse("€ 450.000", NumberLocale::German), 450_000.0);
        assert_eq!(parse("85 m²", NumberLocale::German), 85.0);
        assert_eq!(parse("85 m2", NumberLocale::German), 85.0);
        assert_eq!(parse("1.076 sqft", NumberLocale::German), 1076.0);
    }

    #[test]
    fn degrades_to_zero_on_garbage() {
        assert_eq!(parse("", NumberLocale::German), 0.0);
        assert_eq!(parse("abc", NumberLocale::German), 0.0);
        assert_eq!(parse("-", NumberLocale::German), 0.0);
        assert_eq!(parse("--5", NumberLocale::German), 0.0);
        assert_eq!(parse("12-3", NumberLocale::German), 12.0);
        assert_eq!(parse("-,5", NumberLocale::German), -0.5);
    }

    #[test]
    fn formats_rounded_and_grouped() {
        let format = NumberFormat::new(NumberLocale::German);
        assert_eq!(format.format(1234.5), "1.235");
        assert_eq!(format.format(0.0), "0");
        assert_eq!(format.format(1_500_000.0), "1.500.000");
        assert_eq!(format.format(-20.0), "0", "negatives clamp by default");

        let decimals = NumberFormat::new(NumberLocale::German).with_decimals(true);
        assert_eq!(decimals.format(1234.5), "1.234,5");
        assert_eq!(decimals.format(1234.567), "1.234,57");
        assert_eq!(decimals.format(12.0), "12");

        let english = NumberFormat::new(NumberLocale::English)
            .with_decimals(true)
            .with_negatives(true);
        assert_eq!(english.format(-9876.54), "-9,876.54");
    }

    #[test]
    fn huge_values_survive_decimal_rounding() {
        let format = NumberFormat::new(NumberLocale::German).with_decimals(true);
        assert_eq!(round_to(1e307, 2), 1e307);

        let text = format.format(1e307);
        assert!(text.starts_with("10.000.000"), "got {text}");
        assert_eq!(format.parse(&text), format.normalize(1e307));
    }

    #[test]
    fn unit_suffix_only_when_shown() {
        let hidden = NumberFormat::new(NumberLocale::German).with_unit("m²", false);
        assert_eq!(hidden.format(85.0), "85");
        let shown = NumberFormat::new(NumberLocale::German).with_unit("€", true);
        assert_eq!(shown.format(750_000.0), "750.000 €");
    }

    #[test]
    fn canonical_is_plain_shortest_form() {
        assert_eq!(canonical(1235.0), "1235");
        assert_eq!(canonical(1234.56), "1234.56");
        assert_eq!(canonical(-0.0), "0");
    }

    #[test]
    fn locale_tags_parse() {
        assert_eq!("de-DE".parse::<NumberLocale>(), Ok(NumberLocale::German));
        assert_eq!("en_US".parse::<NumberLocale>(), Ok(NumberLocale::English));
        assert!("fr-FR".parse::<NumberLocale>().is_err());
    }
}
