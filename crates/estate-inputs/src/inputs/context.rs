use std::sync::Arc;

use super::events::EventBus;
use super::icons::{IconRegistry, StaticIconRegistry};
use crate::config::InputDefaults;
use crate::numeric::NumberLocale;
use crate::validation::SanityMode;

/// Collaborators and process defaults handed to every widget at construction.
#[derive(Debug, Clone)]
pub struct WidgetContext {
    pub bus: EventBus,
    pub locale: NumberLocale,
    pub sanity_mode: SanityMode,
    pub icons: Arc<dyn IconRegistry>,
    /// Process-wide switch; widgets still need `enable-autocomplete`.
    pub postal_autocomplete: bool,
}

impl WidgetContext {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            locale: NumberLocale::default(),
            sanity_mode: SanityMode::default(),
            icons: Arc::new(StaticIconRegistry::standard()),
            postal_autocomplete: true,
        }
    }

    pub fn from_defaults(defaults: &InputDefaults, bus: EventBus) -> Self {
        Self::new(bus)
            .with_locale(defaults.locale)
            .with_sanity_mode(defaults.sanity_mode)
            .with_postal_autocomplete(defaults.postal_autocomplete)
    }

    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_sanity_mode(mut self, sanity_mode: SanityMode) -> Self {
        self.sanity_mode = sanity_mode;
        self
    }

    pub fn with_icons(mut self, icons: Arc<dyn IconRegistry>) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_postal_autocomplete(mut self, enabled: bool) -> Self {
        self.postal_autocomplete = enabled;
        self
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new(EventBus::new())
    }
}
