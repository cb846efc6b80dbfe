//! MQTT adapter error types.

use smarthome_domain::error::SmartHomeError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The request could not be queued on the rumqttc client.
    #[error("MQTT client error")]
    Client(#[from] rumqttc::ClientError),

    /// The connection to the broker failed.
    #[error("MQTT connection error")]
    Connection(#[from] rumqttc::ConnectionError),

    /// The broker did not complete the exchange in time.
    #[error("MQTT broker did not answer within {secs}s")]
    Timeout {
        /// Configured bound, in seconds.
        secs: u64,
    },
}

impl From<MqttError> for SmartHomeError {
    fn from(err: MqttError) -> Self {
        Self::Transport(Box::new(err))
    }
}
