use crate::adapters::clock::{resolve_timezone, DEFAULT_TIMEZONE};
use crate::core::slots::MAX_AVAILABLE_DAYS;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TerminError};
use crate::utils::validation::{
    validate_database_url, validate_non_empty_string, validate_one_of, validate_positive_number,
    validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const BACKENDS: [&str; 2] = ["sqlite", "memory"];
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: String,
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            url: "sqlite:appointment.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub timezone: String,
    /// Days offered by the date picker
    pub available_days: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            available_days: 14,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
    pub level: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            level: None,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TerminError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Reads `path` when given, otherwise starts from the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TerminError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env substitution pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;

        validate_one_of("database.backend", &self.database.backend, &BACKENDS)?;
        if self.database.backend == "sqlite" {
            validate_database_url("database.url", &self.database.url)?;
        }
        validate_positive_number(
            "database.max_connections",
            self.database.max_connections as usize,
            1,
        )?;

        resolve_timezone(&self.booking.timezone)?;
        validate_range(
            "booking.available_days",
            self.booking.available_days,
            1,
            MAX_AVAILABLE_DAYS,
        )?;

        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl ConfigProvider for TomlConfig {
    fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn database_backend(&self) -> &str {
        &self.database.backend
    }

    fn database_url(&self) -> &str {
        &self.database.url
    }

    fn max_connections(&self) -> u32 {
        self.database.max_connections
    }

    fn timezone(&self) -> &str {
        &self.booking.timezone
    }

    fn available_days(&self) -> usize {
        self.booking.available_days
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = TomlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(ConfigProvider::timezone(&config), "Europe/Berlin");
        assert_eq!(config.available_days(), 14);
        assert!(!config.json_logs());
    }

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
url = "sqlite:termine.db?mode=rwc"
max_connections = 2

[booking]
available_days = 21

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
        assert_eq!(config.database_backend(), "sqlite");
        assert_eq!(config.max_connections(), 2);
        assert_eq!(config.available_days(), 21);
        assert_eq!(config.booking.timezone, "Europe/Berlin");
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TERMIN_TEST_DATABASE_URL", "sqlite:from-env.db");

        let toml_content = r#"
[database]
url = "${TERMIN_TEST_DATABASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database.url, "sqlite:from-env.db");

        std::env::remove_var("TERMIN_TEST_DATABASE_URL");
    }

    #[test]
    fn test_unknown_timezone_is_location_failure() {
        let toml_content = r#"
[booking]
timezone = "Europe/Atlantis"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::LocationLoadFailure);
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[database]\nurl = \"postgres://localhost/termine\"").unwrap();
        assert!(bad_url.validate().is_err());

        // the memory backend ignores the url
        let memory = TomlConfig::from_toml_str("[database]\nbackend = \"memory\"\nurl = \"\"").unwrap();
        assert!(memory.validate().is_ok());

        let too_many_days = TomlConfig::from_toml_str("[booking]\navailable_days = 90").unwrap();
        assert!(too_many_days.validate().is_err());

        // the picker may not reach past the 28-day booking horizon
        let beyond_horizon = TomlConfig::from_toml_str("[booking]\navailable_days = 40").unwrap();
        assert!(beyond_horizon.validate().is_err());
        let at_cap = TomlConfig::from_toml_str("[booking]\navailable_days = 20").unwrap();
        assert!(at_cap.validate().is_ok());

        let bad_format = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Configuration);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
port = 9090
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
