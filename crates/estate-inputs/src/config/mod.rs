use crate::numeric::NumberLocale;
use crate::validation::SanityMode;
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2_000;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the form runtime.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub inputs: InputDefaults,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let locale = match env::var("APP_LOCALE") {
            Ok(raw) => raw
                .parse::<NumberLocale>()
                .map_err(|_| ConfigError::InvalidLocale(raw))?,
            Err(_) => NumberLocale::default(),
        };

        let postal_autocomplete = match env::var("APP_POSTAL_AUTOCOMPLETE") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "APP_POSTAL_AUTOCOMPLETE",
                value: raw,
            })?,
            Err(_) => true,
        };

        let lookup_timeout = match env::var("APP_LOOKUP_TIMEOUT_MS") {
            Ok(raw) => {
                let millis = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                (millis > 0).then(|| Duration::from_millis(millis))
            }
            Err(_) => Some(Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS)),
        };

        let sanity_mode = match env::var("APP_SANITY_MODE") {
            Ok(raw) => raw
                .parse::<SanityMode>()
                .map_err(|_| ConfigError::InvalidSanityMode(raw))?,
            Err(_) => SanityMode::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            inputs: InputDefaults {
                locale,
                postal_autocomplete,
                lookup_timeout,
                sanity_mode,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Process-wide defaults handed to every widget through its construction context.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDefaults {
    pub locale: NumberLocale,
    pub postal_autocomplete: bool,
    pub lookup_timeout: Option<Duration>,
    pub sanity_mode: SanityMode,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            locale: NumberLocale::default(),
            postal_autocomplete: true,
            lookup_timeout: Some(Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS)),
            sanity_mode: SanityMode::default(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLocale(String),
    InvalidFlag { name: &'static str, value: String },
    InvalidTimeout(String),
    InvalidSanityMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLocale(value) => {
                write!(f, "APP_LOCALE must be de-DE or en-US, found '{value}'")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, found '{value}'")
            }
            ConfigError::InvalidTimeout(value) => write!(
                f,
                "APP_LOOKUP_TIMEOUT_MS must be a whole number of milliseconds, found '{value}'"
            ),
            ConfigError::InvalidSanityMode(value) => {
                write!(f, "APP_SANITY_MODE must be block or warn, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LOCALE");
        env::remove_var("APP_POSTAL_AUTOCOMPLETE");
        env::remove_var("APP_LOOKUP_TIMEOUT_MS");
        env::remove_var("APP_SANITY_MODE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.inputs, InputDefaults::default());
    }

    #[test]
    fn zero_timeout_disables_lookup_deadline() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOOKUP_TIMEOUT_MS", "0");
        env::set_var("APP_SANITY_MODE", "warn");
        env::set_var("APP_LOCALE", "en-US");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.inputs.lookup_timeout, None);
        assert_eq!(config.inputs.sanity_mode, SanityMode::Warn);
        assert_eq!(config.inputs.locale, NumberLocale::English);
        reset_env();
    }

    #[test]
    fn rejects_unknown_locale_and_flags() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOCALE", "fr-FR");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidLocale(value)) if value == "fr-FR"
        ));

        reset_env();
        env::set_var("APP_POSTAL_AUTOCOMPLETE", "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag { name: "APP_POSTAL_AUTOCOMPLETE", .. })
        ));
        reset_env();
    }
}
