//! Virtual DHT sensor: temperature and humidity wandering around a
//! baseline.

use smarthome_app::ports::ReadingSource;
use smarthome_domain::telemetry::SensorReading;

const BASE_TEMPERATURE: f64 = 21.5;
const BASE_HUMIDITY: f64 = 45.0;

/// Per-sample offsets, in tenths. One full cycle returns to the baseline.
const DRIFT: [i8; 12] = [0, 2, 4, 6, 4, 2, 0, -2, -4, -6, -4, -2];

/// A simulated DHT sensor.
///
/// Readings are deterministic: the n-th sample is always the same, so
/// tests and demos are reproducible.
#[derive(Debug, Clone)]
pub struct SimulatedDht {
    base_temperature: f64,
    base_humidity: f64,
    step: usize,
}

impl Default for SimulatedDht {
    fn default() -> Self {
        Self::around(BASE_TEMPERATURE, BASE_HUMIDITY)
    }
}

impl SimulatedDht {
    /// A sensor drifting around the given baseline.
    #[must_use]
    pub fn around(base_temperature: f64, base_humidity: f64) -> Self {
        Self {
            base_temperature,
            base_humidity,
            step: 0,
        }
    }
}

impl ReadingSource for SimulatedDht {
    fn sample(&mut self) -> Option<SensorReading> {
        let offset = f64::from(DRIFT[self.step % DRIFT.len()]) / 10.0;
        self.step = self.step.wrapping_add(1);
        Some(SensorReading {
            temperature: self.base_temperature + offset,
            humidity: Some(self.base_humidity - offset * 2.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn should_start_at_baseline() {
        let reading = SimulatedDht::default().sample().unwrap();
        assert!(close(reading.temperature, 21.5));
        assert_eq!(reading.humidity, Some(45.0));
    }

    #[test]
    fn should_drift_between_samples() {
        let mut sensor = SimulatedDht::default();
        let first = sensor.sample().unwrap();
        let second = sensor.sample().unwrap();
        assert!(close(second.temperature, 21.7));
        assert!(second.temperature > first.temperature);
    }

    #[test]
    fn should_stay_within_normal_band() {
        let mut sensor = SimulatedDht::default();
        for _ in 0..100 {
            let reading = sensor.sample().unwrap();
            assert!((20.0..=30.0).contains(&reading.temperature));
        }
    }

    #[test]
    fn should_repeat_after_one_cycle() {
        let mut sensor = SimulatedDht::around(10.0, 80.0);
        let first = sensor.sample().unwrap();
        for _ in 1..DRIFT.len() {
            sensor.sample();
        }
        assert_eq!(sensor.sample(), Some(first));
    }
}
