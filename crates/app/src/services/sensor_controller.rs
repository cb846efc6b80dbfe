//! Sensor command initiator: enable/disable toggle and manual temperature.

use smarthome_domain::command::{Command, parse_temperature};
use smarthome_domain::error::{SmartHomeError, ValidationError};
use smarthome_domain::topic;

use crate::ports::MessagePublisher;

/// Sends DHT commands on behalf of a controller.
///
/// Like [`RelayController`](super::relay_controller::RelayController), the
/// enable flag is the controller's own last-sent intent.
pub struct SensorController<P> {
    enabled: bool,
    publisher: P,
}

impl<P: MessagePublisher> SensorController<P> {
    /// Create a controller that assumes the sensor is enabled.
    pub fn new(publisher: P) -> Self {
        Self {
            enabled: true,
            publisher,
        }
    }

    /// Whether the last request was to enable the sensor.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the enable intent and send `on` or `off`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Transport`] when the bus refused the publish;
    /// the intent stays flipped.
    pub async fn toggle(&mut self) -> Result<bool, SmartHomeError> {
        self.enabled = !self.enabled;
        let command = if self.enabled { Command::On } else { Command::Off };
        self.send(command).await?;
        Ok(self.enabled)
    }

    /// Parse user input and send it as a manual override reading.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTemperature`] (nothing is sent) when
    /// the input is not a finite number, or [`SmartHomeError::Transport`]
    /// when the bus refused the publish.
    pub async fn send_temperature(&self, input: &str) -> Result<f64, SmartHomeError> {
        let value = parse_temperature(input).ok_or_else(|| ValidationError::InvalidTemperature {
            input: input.to_string(),
        })?;
        self.send(Command::SetTemperature(value)).await?;
        Ok(value)
    }

    async fn send(&self, command: Command) -> Result<(), SmartHomeError> {
        let payload = command.to_payload();
        match self.publisher.publish(topic::SENSOR_CONTROL, payload).await {
            Ok(()) => {
                tracing::info!(%command, topic = topic::SENSOR_CONTROL, "sensor command sent");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = ?err, %command, "failed to send sensor command");
                Err(err)
            }
        }
    }
}
