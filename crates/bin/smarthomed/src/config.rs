//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;
use smarthome_adapter_mqtt::MqttConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// MQTT broker settings.
    pub mqtt: MqttConfig,
    /// Which devices run in this process, and over which bus.
    pub devices: DevicesConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Bus the devices and command initiators talk over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// A real MQTT broker; every device holds its own session.
    #[default]
    Mqtt,
    /// A broadcast channel inside this process. No broker needed.
    InProcess,
}

/// Device toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    pub transport: Transport,
    /// Run the relay emulator.
    pub relay_enabled: bool,
    /// Run the DHT emulator.
    pub dht_enabled: bool,
    /// Run the telemetry logger.
    pub logger_enabled: bool,
    /// Seconds between two DHT readings.
    pub dht_interval_secs: u64,
    /// Feed the DHT emulator simulated measurements. When off, only
    /// manual readings are published.
    pub simulate_readings: bool,
}

impl Config {
    /// Load configuration from `smarthome.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smarthome.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Overlay values looked up through `var`, keyed by environment
    /// variable name. Unparsable ports are ignored.
    ///
    /// `SMARTHOME_BIND` (`host:port`) wins over `SMARTHOME_HOST` and
    /// `SMARTHOME_PORT`; `RUST_LOG` wins over `SMARTHOME_LOG`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let port = |name: &str| var(name).and_then(|val| val.parse::<u16>().ok());

        if let Some(host) = var("SMARTHOME_HOST") {
            self.server.host = host;
        }
        if let Some(port) = port("SMARTHOME_PORT") {
            self.server.port = port;
        }
        if let Some((host, bind_port)) = var("SMARTHOME_BIND")
            .as_deref()
            .and_then(|bind| bind.rsplit_once(':'))
        {
            self.server.host = host.to_string();
            if let Ok(bind_port) = bind_port.parse() {
                self.server.port = bind_port;
            }
        }
        if let Some(url) = var("SMARTHOME_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = var("SMARTHOME_MQTT_HOST") {
            self.mqtt.broker_host = host;
        }
        if let Some(port) = port("SMARTHOME_MQTT_PORT") {
            self.mqtt.broker_port = port;
        }
        if let Some(prefix) = var("SMARTHOME_MQTT_CLIENT_ID") {
            self.mqtt.client_id = prefix;
        }
        if let Some(filter) = var("RUST_LOG").or_else(|| var("SMARTHOME_LOG")) {
            self.logging.filter = filter;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "mqtt broker_port must be non-zero".to_string(),
            ));
        }
        if self.devices.dht_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "dht_interval_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl DevicesConfig {
    /// Period of DHT telemetry.
    #[must_use]
    pub fn dht_interval(&self) -> Duration {
        Duration::from_secs(self.dht_interval_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data_manager/iot_database.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            relay_enabled: true,
            dht_enabled: true,
            logger_enabled: true,
            dht_interval_secs: 5,
            simulate_readings: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
