//! Sensor Control State Machine: enable flag and manual override reading
//! of one DHT sensor.
//!
//! The two axes are independent: `temp:<float>` never touches `enabled`,
//! and `on`/`off` never clear the manual reading.

use crate::command::{Command, Decoded};

/// Control state of a sensor device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorControl {
    enabled: bool,
    last_manual_reading: Option<f64>,
}

impl Default for SensorControl {
    fn default() -> Self {
        Self {
            enabled: true,
            last_manual_reading: None,
        }
    }
}

/// What an inbound command did to a [`SensorControl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorTransition {
    /// `enabled` was set (possibly to its existing value).
    Enabled(bool),
    /// The manual override reading was replaced.
    ManualReading(f64),
    /// The payload was unrecognized; nothing changed.
    Ignored,
}

impl SensorControl {
    /// Create a sensor that is enabled and has no manual reading.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn last_manual_reading(&self) -> Option<f64> {
        self.last_manual_reading
    }

    /// Apply a decoded command. No range validation is done on manual readings.
    pub fn apply(&mut self, decoded: Decoded) -> SensorTransition {
        match decoded.command() {
            Some(Command::On) => {
                self.enabled = true;
                SensorTransition::Enabled(true)
            }
            Some(Command::Off) => {
                self.enabled = false;
                SensorTransition::Enabled(false)
            }
            Some(Command::SetTemperature(value)) => {
                self.last_manual_reading = Some(value);
                SensorTransition::ManualReading(value)
            }
            None => SensorTransition::Ignored,
        }
    }
}
