/// Reverse geocoding service defaults
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "geolocation_program";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Rate limiting and timeouts
pub const DEFAULT_MIN_DELAY_SECS: u64 = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Processing defaults
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Dataset layout
pub const COUNTRY_COLUMN: &str = "country";

/// Environment variable prefix for settings
pub const ENV_PREFIX: &str = "GEO_COUNTRY";
