use std::collections::BTreeMap;
use std::fmt;

/// Presentational icon source, looked up by name.
pub trait IconRegistry: Send + Sync + fmt::Debug {
    fn get(&self, name: &str) -> Option<&str>;
}

const STANDARD_ICONS: [&str; 12] = [
    "home",
    "key",
    "euro",
    "area",
    "garden",
    "bedroom",
    "floor-plan",
    "building",
    "garage",
    "location",
    "search",
    "close",
];

/// In-memory registry.
#[derive(Debug, Clone, Default)]
pub struct StaticIconRegistry {
    icons: BTreeMap<String, String>,
}

impl StaticIconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding a placeholder glyph for every icon the widgets reference.
    pub fn standard() -> Self {
        STANDARD_ICONS.iter().fold(Self::new(), |registry, name| {
            let markup = format!(r#"<svg class="icon icon-{name}" viewBox="0 0 24 24" aria-hidden="true"></svg>"#);
            registry.with(*name, markup)
        })
    }

    pub fn with(mut self, name: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(name, markup);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, markup: impl Into<String>) {
        self.icons.insert(name.into(), markup.into());
    }
}

impl IconRegistry for StaticIconRegistry {
    fn get(&self, name: &str) -> Option<&str> {
        self.icons.get(name).map(String::as_str)
    }
}
