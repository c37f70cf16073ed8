use serde::Serialize;

use crate::validation::ValidationError;

/// Mutable per-instance state, created empty at attach.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalState {
    /// Text as typed, before any blur reformat.
    pub raw_value: String,
    /// Text the control currently shows.
    pub display_value: String,
    pub touched: bool,
    pub dirty: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
    pub is_valid: bool,
}

impl Default for InternalState {
    fn default() -> Self {
        Self {
            raw_value: String::new(),
            display_value: String::new(),
            touched: false,
            dirty: false,
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        }
    }
}

impl InternalState {
    pub fn visual_state(&self) -> VisualState {
        VisualState::derive(self.is_valid, self.touched, !self.display_value.is_empty())
    }
}

/// Validity styling of the control. Nothing is shown before the first blur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl VisualState {
    pub fn derive(is_valid: bool, touched: bool, has_value: bool) -> Self {
        match (touched, is_valid) {
            (true, false) => VisualState::Invalid,
            (true, true) if has_value => VisualState::Valid,
            _ => VisualState::Neutral,
        }
    }
}
