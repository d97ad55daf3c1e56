//! Layered settings for the geocoder and the batch run.
//!
//! Sources, lowest priority first: built-in defaults, an optional settings
//! file, `GEO_COUNTRY_*` environment variables, then command line overrides.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT, DEFAULT_LANGUAGE, DEFAULT_MIN_DELAY_SECS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_PREFIX,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeocoderSettings {
    #[serde(default = "default_endpoint")]
    #[validate(length(min = 1))]
    pub endpoint: String,

    #[serde(default = "default_user_agent")]
    #[validate(length(min = 1))]
    pub user_agent: String,

    #[serde(default = "default_language")]
    #[validate(length(min = 1))]
    pub language: String,

    #[serde(default = "default_min_delay_secs")]
    #[validate(range(min = 0.0, max = 86400.0))]
    pub min_delay_secs: f64,

    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    #[serde(default = "default_batch_size")]
    #[validate(range(min = 1))]
    pub batch_size: usize,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_min_delay_secs() -> f64 {
    DEFAULT_MIN_DELAY_SECS as f64
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            language: default_language(),
            min_delay_secs: default_min_delay_secs(),
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
        }
    }
}

/// Command line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub min_delay_secs: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub batch_size: Option<usize>,
}

impl GeocoderSettings {
    /// Load settings from an optional file plus the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_file, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_with_env(config_file: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "Settings file '{}' does not exist",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: GeocoderSettings = builder.add_source(env).build()?.try_deserialize()?;
        settings.checked()
    }

    /// Apply command line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Result<Self> {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(user_agent) = overrides.user_agent {
            self.user_agent = user_agent;
        }
        if let Some(min_delay_secs) = overrides.min_delay_secs {
            self.min_delay_secs = min_delay_secs;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(batch_size) = overrides.batch_size {
            self.batch_size = batch_size;
        }

        self.checked()
    }

    /// Derived rules plus the one `range` cannot express: NaN compares false
    /// against both bounds and would slip through.
    fn checked(self) -> Result<Self> {
        if self.min_delay_secs.is_nan() {
            let mut errors = ValidationErrors::new();
            errors.add("min_delay_secs", ValidationError::new("range"));
            return Err(errors.into());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.min_delay_secs).unwrap_or(Duration::MAX)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn empty_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults() {
        let settings = GeocoderSettings::load_with_env(None, empty_env()).unwrap();

        assert_eq!(settings.endpoint, "https://nominatim.openstreetmap.org");
        assert_eq!(settings.user_agent, "geolocation_program");
        assert_eq!(settings.language, "en");
        assert_eq!(settings.min_delay(), Duration::from_secs(2));
        assert_eq!(settings.timeout(), Duration::from_secs(120));
        assert_eq!(settings.batch_size, 100);
    }

    #[test]
    fn test_file_then_env_then_overrides() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "batch_size = 25").unwrap();
        writeln!(file, "timeout_secs = 30").unwrap();
        writeln!(file, "user_agent = \"from-file\"").unwrap();

        let env = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(HashMap::from([(
                "GEO_COUNTRY_TIMEOUT_SECS".to_string(),
                "45".to_string(),
            )])));

        let settings = GeocoderSettings::load_with_env(Some(file.path()), env)
            .unwrap()
            .with_overrides(SettingsOverrides {
                min_delay_secs: Some(0.5),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(settings.batch_size, 25);
        assert_eq!(settings.timeout_secs, 45);
        assert_eq!(settings.user_agent, "from-file");
        assert_eq!(settings.min_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_batch = GeocoderSettings::default().with_overrides(SettingsOverrides {
            batch_size: Some(0),
            ..Default::default()
        });
        assert!(matches!(zero_batch, Err(ProcessingError::Validation(_))));

        let negative_delay = GeocoderSettings::default().with_overrides(SettingsOverrides {
            min_delay_secs: Some(-1.0),
            ..Default::default()
        });
        assert!(matches!(negative_delay, Err(ProcessingError::Validation(_))));
    }

    #[test]
    fn test_unrepresentable_delays_rejected() {
        for delay in [f64::NAN, f64::INFINITY, 1e20] {
            let result = GeocoderSettings::default().with_overrides(SettingsOverrides {
                min_delay_secs: Some(delay),
                ..Default::default()
            });
            assert!(
                matches!(result, Err(ProcessingError::Validation(_))),
                "delay {} was accepted",
                delay
            );
        }

        let env = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(HashMap::from([(
                "GEO_COUNTRY_MIN_DELAY_SECS".to_string(),
                "inf".to_string(),
            )])));
        let result = GeocoderSettings::load_with_env(None, env);
        assert!(matches!(result, Err(ProcessingError::Validation(_))));
    }

    #[test]
    fn test_out_of_range_delay_does_not_panic() {
        let settings = GeocoderSettings {
            min_delay_secs: f64::NAN,
            ..Default::default()
        };
        assert_eq!(settings.min_delay(), Duration::MAX);
    }

    #[test]
    fn test_missing_settings_file() {
        let result = GeocoderSettings::load_with_env(Some(Path::new("no/such/settings.toml")), empty_env());
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }
}
