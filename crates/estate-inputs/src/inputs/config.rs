//! Typed view over the observed attribute set.
//!
//! Attributes are parsed once per mutation. Malformed values surface as
//! [`AttributeError`] instead of being coerced, so a widget never runs with a
//! half-understood configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::attributes::Attributes;
use crate::units::AreaUnit;

pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_COUNTRY: &str = "Germany";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeError {
    #[error("attribute '{name}' expects a number, found '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("attribute '{name}' expects a non-negative whole number, found '{value}'")]
    InvalidLength { name: &'static str, value: String },
    #[error("attribute '{name}' does not accept '{value}'")]
    UnsupportedValue { name: &'static str, value: String },
    #[error("attribute 'pattern' is not a valid expression: '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("attribute 'min' ({min}) is greater than 'max' ({max})")]
    InvertedRange { min: f64, max: f64 },
    #[error("attribute 'minlength' ({min}) is greater than 'maxlength' ({max})")]
    InvertedLength { min: usize, max: usize },
}

/// Native control type requested through the `type` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Tel,
    Url,
    Search,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Tel => "tel",
            InputType::Url => "url",
            InputType::Search => "search",
        }
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "tel" => Ok(Self::Tel),
            "url" => Ok(Self::Url),
            "search" => Ok(Self::Search),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Default,
    Outlined,
    Filled,
    Search,
    Currency,
    Area,
    Error,
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "outlined" | "outline" => Ok(Self::Outlined),
            "filled" => Ok(Self::Filled),
            "search" => Ok(Self::Search),
            "currency" => Ok(Self::Currency),
            "area" => Ok(Self::Area),
            "error" => Ok(Self::Error),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" | "sm" => Ok(Self::Small),
            "medium" | "md" => Ok(Self::Medium),
            "large" | "lg" => Ok(Self::Large),
            other => Err(other.to_string()),
        }
    }
}

/// Kind of price a price input captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    Sale,
    Rent,
    Estimate,
}

impl PriceType {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceType::Sale => "sale",
            PriceType::Rent => "rent",
            PriceType::Estimate => "estimate",
        }
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sale" => Ok(Self::Sale),
            "rent" => Ok(Self::Rent),
            "estimate" => Ok(Self::Estimate),
            other => Err(other.to_string()),
        }
    }
}

/// Kind of surface an area input captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    #[default]
    Living,
    Total,
    Plot,
    Room,
    Usable,
    Basement,
    Garage,
}

impl AreaType {
    pub fn as_str(self) -> &'static str {
        match self {
            AreaType::Living => "living",
            AreaType::Total => "total",
            AreaType::Plot => "plot",
            AreaType::Room => "room",
            AreaType::Usable => "usable",
            AreaType::Basement => "basement",
            AreaType::Garage => "garage",
        }
    }
}

impl FromStr for AreaType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "living" => Ok(Self::Living),
            "total" => Ok(Self::Total),
            "plot" => Ok(Self::Plot),
            "room" => Ok(Self::Room),
            "usable" => Ok(Self::Usable),
            "basement" => Ok(Self::Basement),
            "garage" => Ok(Self::Garage),
            other => Err(other.to_string()),
        }
    }
}

/// Compiled `pattern` attribute, anchored like the native constraint.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self, AttributeError> {
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|source_error| {
            AttributeError::InvalidPattern {
                pattern: source.to_string(),
                source: source_error,
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Strongly typed widget configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub input_type: InputType,
    pub name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub helper_text: Option<String>,
    pub placeholder: Option<String>,
    /// Default value from the `value` attribute; restored on form reset.
    pub initial_value: String,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub pattern: Option<Pattern>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub variant: Variant,
    pub size: Size,
    pub full_width: bool,
    pub icon_left: Option<String>,
    pub icon_right: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub clearable: bool,
    pub show_counter: bool,
    pub autofocus: bool,
    pub autocomplete: Option<String>,
    pub unit: AreaUnit,
    pub area_type: AreaType,
    pub price_type: PriceType,
    pub currency: String,
    pub show_unit: bool,
    pub show_currency: bool,
    pub format_on_blur: bool,
    pub allow_decimals: bool,
    pub hide_suggestions: bool,
    pub show_converter: bool,
    pub show_unit_selector: bool,
    pub enable_autocomplete: bool,
    pub country: Option<String>,
}

impl WidgetConfig {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self, AttributeError> {
        let min = number(attributes, "min")?;
        let max = number(attributes, "max")?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(AttributeError::InvertedRange { min, max });
            }
        }

        let min_length = length(attributes, "minlength")?;
        let max_length = length(attributes, "maxlength")?;
        if let (Some(min), Some(max)) = (min_length, max_length) {
            if min > max {
                return Err(AttributeError::InvertedLength { min, max });
            }
        }

        let pattern = match attributes.get("pattern").filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(Pattern::compile(raw)?),
            None => None,
        };

        let unit = match attributes.get("unit").filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => raw
                .parse::<AreaUnit>()
                .map_err(|_| unsupported("unit", raw))?,
            None => AreaUnit::default(),
        };

        Ok(Self {
            input_type: keyword(attributes, "type")?.unwrap_or_default(),
            name: text(attributes, "name"),
            label: text(attributes, "label"),
            description: text(attributes, "description"),
            helper_text: text(attributes, "helper-text"),
            placeholder: text(attributes, "placeholder"),
            initial_value: attributes.get("value").unwrap_or_default().to_string(),
            required: attributes.has("required"),
            disabled: attributes.has("disabled"),
            readonly: attributes.has("readonly"),
            pattern,
            min,
            max,
            step: number(attributes, "step")?,
            min_length,
            max_length,
            variant: keyword(attributes, "variant")?.unwrap_or_default(),
            size: keyword(attributes, "size")?.unwrap_or_default(),
            full_width: attributes.has("full-width"),
            icon_left: text(attributes, "icon-left"),
            icon_right: text(attributes, "icon-right"),
            prefix: text(attributes, "prefix"),
            suffix: text(attributes, "suffix"),
            clearable: attributes.has("clearable"),
            show_counter: attributes.has("show-counter"),
            autofocus: attributes.has("autofocus"),
            autocomplete: text(attributes, "autocomplete"),
            unit,
            area_type: keyword(attributes, "area-type")?.unwrap_or_default(),
            price_type: keyword(attributes, "price-type")?.unwrap_or_default(),
            currency: currency(attributes)?,
            show_unit: attributes.has("show-unit"),
            show_currency: attributes.has("show-currency"),
            format_on_blur: attributes.has("format-on-blur"),
            allow_decimals: attributes.has("allow-decimals"),
            hide_suggestions: attributes.has("hide-suggestions"),
            show_converter: attributes.has("show-converter"),
            show_unit_selector: attributes.has("show-unit-selector"),
            enable_autocomplete: attributes.has("enable-autocomplete"),
            country: text(attributes, "country"),
        })
    }

    pub fn default_country(&self) -> &str {
        self.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }
}

fn text(attributes: &Attributes, name: &str) -> Option<String> {
    attributes
        .get(name)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn unsupported(name: &'static str, value: &str) -> AttributeError {
    AttributeError::UnsupportedValue {
        name,
        value: value.to_string(),
    }
}

fn number(attributes: &Attributes, name: &'static str) -> Result<Option<f64>, AttributeError> {
    let Some(raw) = attributes.get(name).map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(AttributeError::InvalidNumber {
            name,
            value: raw.to_string(),
        }),
    }
}

fn length(attributes: &Attributes, name: &'static str) -> Result<Option<usize>, AttributeError> {
    let Some(raw) = attributes.get(name).map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<usize>()
        .map(Some)
        .map_err(|_| AttributeError::InvalidLength {
            name,
            value: raw.to_string(),
        })
}

fn keyword<T: FromStr>(attributes: &Attributes, name: &'static str) -> Result<Option<T>, AttributeError> {
    let Some(raw) = attributes.get(name).filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| unsupported(name, raw))
}

fn currency(attributes: &Attributes) -> Result<String, AttributeError> {
    let Some(raw) = attributes.get("currency").map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(DEFAULT_CURRENCY.to_string());
    };
    if raw.len() == 3 && raw.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(raw.to_ascii_uppercase())
    } else {
        Err(unsupported("currency", raw))
    }
}
