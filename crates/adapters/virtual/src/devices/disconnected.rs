//! A DHT sensor that is not wired up.

use smarthome_app::ports::ReadingSource;
use smarthome_domain::telemetry::SensorReading;

/// Reading source that never has a measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedDht;

impl ReadingSource for DisconnectedDht {
    fn sample(&mut self) -> Option<SensorReading> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_never_yield_a_reading() {
        let mut source = DisconnectedDht;
        assert_eq!(source.sample(), None);
        assert_eq!(source.sample(), None);
    }
}
