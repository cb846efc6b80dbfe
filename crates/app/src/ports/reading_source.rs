//! Reading source port: where a sensor device gets its measurements.

use smarthome_domain::telemetry::SensorReading;

/// A physical or emulated DHT sensor.
pub trait ReadingSource {
    /// Take one measurement, or `None` when no reading is available.
    fn sample(&mut self) -> Option<SensorReading>;
}
