//! Form-associated input widgets used by the property back-office screens.
//!
//! The crate models the value/validity state machine of each field without any
//! rendering layer: widgets parse free-typed text into canonical values, reformat
//! it for display, validate it and hand the result to an enclosing [`inputs::Form`].

pub mod config;
pub mod error;
pub mod inputs;
pub mod numeric;
pub mod telemetry;
pub mod units;
pub mod validation;
