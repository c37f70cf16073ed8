//! Pure rule evaluation shared by every input widget.
//!
//! Rules never short-circuit: every applicable rule runs and each failure is
//! appended to the report in evaluation order, so the first entry is the one a
//! widget shows inline and the full list backs the joined validation message.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    PatternMismatch,
    Length,
    Range,
    SanityThreshold,
    Format,
}

/// User-correctable validation failure. Carried in reports, never returned as `Err`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },
    #[error("Please match the requested format")]
    PatternMismatch,
    #[error("Minimum {min} characters required")]
    TooShort { min: usize },
    #[error("Maximum {max} characters allowed")]
    TooLong { max: usize },
    #[error("{field} must be at least {bound}")]
    BelowMinimum { field: String, bound: String },
    #[error("{field} cannot exceed {bound}")]
    AboveMaximum { field: String, bound: String },
    #[error("{field} must be at most {bound}")]
    AboveLimit { field: String, bound: String },
    #[error("{message}")]
    SanityThreshold { message: String },
    #[error("{message}")]
    Format { field: String, message: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Required { .. } => ErrorKind::Required,
            ValidationError::PatternMismatch => ErrorKind::PatternMismatch,
            ValidationError::TooShort { .. } | ValidationError::TooLong { .. } => {
                ErrorKind::Length
            }
            ValidationError::BelowMinimum { .. }
            | ValidationError::AboveMaximum { .. }
            | ValidationError::AboveLimit { .. } => ErrorKind::Range,
            ValidationError::SanityThreshold { .. } => ErrorKind::SanityThreshold,
            ValidationError::Format { .. } => ErrorKind::Format,
        }
    }
}

/// Whether plausibility heuristics block the field or only warn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanityMode {
    #[default]
    Block,
    Warn,
}

impl FromStr for SanityMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "block" | "error" | "hard" => Ok(Self::Block),
            "warn" | "warning" | "soft" => Ok(Self::Warn),
            other => Err(other.to_string()),
        }
    }
}

/// Ordered outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records a plausibility finding according to the configured mode.
    pub fn flag_sanity(&mut self, mode: SanityMode, message: impl Into<String>) {
        let finding = ValidationError::SanityThreshold {
            message: message.into(),
        };
        match mode {
            SanityMode::Block => self.errors.push(finding),
            SanityMode::Warn => self.warnings.push(finding),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn message(&self) -> String {
        join_messages(&self.errors)
    }
}

pub(crate) fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// How numeric bounds apply to a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericMode {
    /// Plain text, no range checks.
    #[default]
    Off,
    /// `type="number"`: range checks on the plainly parsed text.
    Native,
    /// Formatted numeric widgets: a zero value counts as empty and bounds only
    /// apply to positive values.
    Formatted,
}

/// Constraint set evaluated by [`ValidationEngine`].
#[derive(Debug, Clone, Default)]
pub struct Constraints<'a> {
    pub required: bool,
    pub pattern: Option<&'a Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub numeric: NumericMode,
    /// Subject used in messages ("Price is required"); generic wording when unset.
    pub noun: Option<&'a str>,
}

/// Value under validation: the displayed text plus what the widget parsed from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldValue<'a> {
    pub text: &'a str,
    pub number: Option<f64>,
}

impl<'a> FieldValue<'a> {
    pub fn text(text: &'a str) -> Self {
        Self { text, number: None }
    }

    pub fn numeric(text: &'a str, number: f64) -> Self {
        Self {
            text,
            number: Some(number),
        }
    }
}

/// Stateless evaluator for the attribute-driven constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationEngine;

impl ValidationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, constraints: &Constraints<'_>, value: &FieldValue<'_>) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.evaluate_into(constraints, value, &mut report, &|bound: f64| bound.to_string());
        report
    }

    /// Appends failures to an existing report; `render_bound` controls how range
    /// bounds are written into messages.
    pub fn evaluate_into(
        &self,
        constraints: &Constraints<'_>,
        value: &FieldValue<'_>,
        report: &mut ValidationReport,
        render_bound: &dyn Fn(f64) -> String,
    ) {
        let text = value.text;
        let blank = text.trim().is_empty();
        let number = value.number.unwrap_or(0.0);

        let empty = match constraints.numeric {
            NumericMode::Formatted => blank || number == 0.0,
            NumericMode::Off | NumericMode::Native => blank,
        };

        if constraints.required && empty {
            report.push(ValidationError::Required {
                field: constraints.noun.unwrap_or("This field").to_string(),
            });
        }

        if text.is_empty() {
            return;
        }

        if let Some(pattern) = constraints.pattern {
            if !pattern.is_match(text) {
                report.push(ValidationError::PatternMismatch);
            }
        }

        let length = text.chars().count();
        if let Some(min) = constraints.min_length {
            if length < min {
                report.push(ValidationError::TooShort { min });
            }
        }
        if let Some(max) = constraints.max_length {
            if length > max {
                report.push(ValidationError::TooLong { max });
            }
        }

        let ranged = match constraints.numeric {
            NumericMode::Off => None,
            NumericMode::Native => crate::numeric::leading_float(text.trim()),
            NumericMode::Formatted => value.number.filter(|number| *number > 0.0),
        };

        if let Some(number) = ranged {
            let noun = constraints.noun.unwrap_or("Value");
            if let Some(min) = constraints.min {
                if number < min {
                    report.push(ValidationError::BelowMinimum {
                        field: noun.to_string(),
                        bound: render_bound(min),
                    });
                }
            }
            if let Some(max) = constraints.max {
                if number > max {
                    let field = noun.to_string();
                    let bound = render_bound(max);
                    report.push(match constraints.numeric {
                        NumericMode::Formatted => ValidationError::AboveMaximum { field, bound },
                        _ => ValidationError::AboveLimit { field, bound },
                    });
                }
            }
        }
    }
}
