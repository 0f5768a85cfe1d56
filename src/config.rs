use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Application settings loaded from the environment (and optionally a `.env`
/// file). Every field has a default so the service can boot in development
/// with nothing but `DATABASE_URL` set.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Comma-separated list of allowed CORS origins; "*" or empty allows all.
    #[serde(default, deserialize_with = "deserialize_comma_list")]
    pub cors_allow_origins: Vec<String>,

    /// API keys accepted by the auth middleware. Empty list means
    /// development mode (all requests run as admin).
    #[serde(default, deserialize_with = "deserialize_comma_list")]
    pub api_keys: Vec<String>,
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Interval for the in-process tenure recalculation ticker, in hours.
    /// Zero disables the ticker (the batch endpoint remains available).
    #[serde(default = "default_tenure_recalc_interval_hours")]
    pub tenure_recalc_interval_hours: u64,

    /// Number of employees returned in the dashboard "recent hires" list.
    #[serde(default = "default_recent_hires_limit")]
    pub recent_hires_limit: i64,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}

fn default_tenure_recalc_interval_hours() -> u64 {
    24
}

fn default_recent_hires_limit() -> i64 {
    5
}

fn default_server_port() -> u16 {
    8000
}

/// Accept both `a,b,c` strings and native sequences for list-valued settings.
fn deserialize_comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Str(String),
    }

    Ok(match ListOrString::deserialize(deserializer)? {
        ListOrString::List(list) => list,
        ListOrString::Str(s) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
    })
}

impl Settings {
    /// Load settings, reading a `.env` file first if one exists.
    pub fn new() -> Result<Self, ConfigError> {
        Self::new_with_env_file(true)
    }

    /// Load settings, optionally skipping the `.env` file (used by tests that
    /// control the environment themselves).
    pub fn new_with_env_file(load_env_file: bool) -> Result<Self, ConfigError> {
        if load_env_file {
            // Missing .env is fine; environment variables win either way.
            let _ = dotenvy::dotenv();
        }

        let settings: Settings = Config::builder()
            .add_source(Environment::default())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "DATABASE_URL must not be empty".to_string(),
            ));
        }
        if self.recent_hires_limit <= 0 {
            return Err(ConfigError::Message(
                "RECENT_HIRES_LIMIT must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
