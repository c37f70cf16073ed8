use serde::{Deserialize, Serialize};
use std::fmt;

use super::parser::{is_house_number, is_postal_code};
use crate::inputs::config::DEFAULT_COUNTRY;
use crate::validation::{ValidationError, ValidationReport};

/// One of the six coordinated sub-fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Street,
    HouseNumber,
    PostalCode,
    City,
    State,
    Country,
}

impl AddressField {
    pub const ALL: [AddressField; 6] = [
        AddressField::Street,
        AddressField::HouseNumber,
        AddressField::PostalCode,
        AddressField::City,
        AddressField::State,
        AddressField::Country,
    ];

    pub fn placeholder(self) -> &'static str {
        match self {
            AddressField::Street => "Street name",
            AddressField::HouseNumber => "House number",
            AddressField::PostalCode => "Postal code",
            AddressField::City => "City",
            AddressField::State => "State (optional)",
            AddressField::Country => "Country",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Default for AddressComponents {
    fn default() -> Self {
        Self::with_country(DEFAULT_COUNTRY)
    }
}

impl AddressComponents {
    pub fn with_country(country: impl Into<String>) -> Self {
        Self {
            street: String::new(),
            house_number: String::new(),
            postal_code: String::new(),
            city: String::new(),
            state: String::new(),
            country: country.into(),
        }
    }

    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::HouseNumber => &self.house_number,
            AddressField::PostalCode => &self.postal_code,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Country => &self.country,
        }
    }

    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::Street => &mut self.street,
            AddressField::HouseNumber => &mut self.house_number,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Country => &mut self.country,
        };
        *slot = value.into();
    }

    /// Derived two-line projection; also the submitted form value.
    pub fn formatted(&self) -> FormattedAddress {
        let street_line = join_present(&[&self.street, &self.house_number], " ");
        let mut city_line = join_present(&[&self.postal_code, &self.city], " ");
        for extra in [self.state.trim(), self.country_suffix()] {
            if !extra.is_empty() {
                if !city_line.is_empty() {
                    city_line.push_str(", ");
                }
                city_line.push_str(extra);
            }
        }
        FormattedAddress {
            street_line,
            city_line,
        }
    }

    fn country_suffix(&self) -> &str {
        let country = self.country.trim();
        if country == DEFAULT_COUNTRY {
            ""
        } else {
            country
        }
    }

    /// Required and format checks over the sub-fields.
    pub fn validate(&self, required: bool) -> ValidationReport {
        let mut report = ValidationReport::default();
        if required {
            for (value, field) in [
                (&self.street, "Street"),
                (&self.city, "City"),
                (&self.postal_code, "Postal code"),
            ] {
                if value.trim().is_empty() {
                    report.push(ValidationError::Required {
                        field: field.to_string(),
                    });
                }
            }
        }

        if !self.postal_code.is_empty() && !is_postal_code(&self.postal_code) {
            report.push(ValidationError::Format {
                field: "postal_code".to_string(),
                message: "Postal code must be 5 digits".to_string(),
            });
        }
        if !self.house_number.is_empty() && !is_house_number(&self.house_number) {
            report.push(ValidationError::Format {
                field: "house_number".to_string(),
                message: "Invalid house number format".to_string(),
            });
        }
        report
    }
}

fn join_present(parts: &[&String], separator: &str) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedAddress {
    pub street_line: String,
    pub city_line: String,
}

impl FormattedAddress {
    pub fn is_empty(&self) -> bool {
        self.street_line.is_empty() && self.city_line.is_empty()
    }
}

impl fmt::Display for FormattedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.street_line.is_empty(), self.city_line.is_empty()) {
            (false, false) => write!(f, "{}, {}", self.street_line, self.city_line),
            (false, true) => f.write_str(&self.street_line),
            (true, false) => f.write_str(&self.city_line),
            (true, true) => Ok(()),
        }
    }
}
