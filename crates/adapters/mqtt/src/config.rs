//! MQTT transport configuration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rumqttc::MqttOptions;
use serde::Deserialize;

static NEXT_CLIENT: AtomicU64 = AtomicU64::new(0);

/// Configuration for the MQTT transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// Prefix for MQTT client identifiers; each connection appends its role,
    /// the process id and a per-process counter.
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// How long a one-shot publish may take end to end, in seconds.
    pub publish_timeout_secs: u16,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "broker.emqx.io".to_string(),
            broker_port: 1883,
            client_id: "smarthome".to_string(),
            keep_alive_secs: 60,
            publish_timeout_secs: 5,
        }
    }
}

impl MqttConfig {
    /// Connection options for a client playing `role` (e.g. `relay`).
    ///
    /// A broker drops the older of two connections sharing a client id, so
    /// every call yields an id no other connection of any process uses.
    #[must_use]
    pub fn options(&self, role: &str) -> MqttOptions {
        let client_id = format!(
            "{}-{role}-{}-{}",
            self.client_id,
            std::process::id(),
            NEXT_CLIENT.fetch_add(1, Ordering::Relaxed)
        );
        let mut options = MqttOptions::new(client_id, self.broker_host.clone(), self.broker_port);
        options.set_keep_alive(Duration::from_secs(u64::from(self.keep_alive_secs)));
        options
    }

    /// Upper bound for a one-shot publish.
    #[must_use]
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.publish_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = MqttConfig::default();
        assert_eq!(config.broker_host, "broker.emqx.io");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.client_id, "smarthome");
        assert_eq!(config.keep_alive_secs, 60);
        assert_eq!(config.publish_timeout_secs, 5);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            broker_host = "mqtt.example.com"
            broker_port = 8883
            client_id = "my-home"
            keep_alive_secs = 30
            publish_timeout_secs = 2
        "#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "mqtt.example.com");
        assert_eq!(config.broker_port, 8883);
        assert_eq!(config.client_id, "my-home");
        assert_eq!(config.keep_alive_secs, 30);
        assert_eq!(config.publish_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let toml = r#"broker_host = "192.168.1.100""#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "192.168.1.100");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.client_id, "smarthome");
    }

    #[test]
    fn should_suffix_client_id_with_role_and_process() {
        let options = MqttConfig::default().options("relay");
        let prefix = format!("smarthome-relay-{}-", std::process::id());
        assert!(options.client_id().starts_with(&prefix));
        assert_eq!(
            options.broker_address(),
            ("broker.emqx.io".to_string(), 1883)
        );
        assert_eq!(options.keep_alive(), Duration::from_secs(60));
    }

    #[test]
    fn should_never_repeat_client_id_for_same_role() {
        let config = MqttConfig::default();
        let first = config.options("dht");
        let second = config.options("dht");
        assert_ne!(first.client_id(), second.client_id());
    }
}
