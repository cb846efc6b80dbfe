//! Alert Evaluator: classify a temperature against fixed thresholds.

use serde::Serialize;

/// Readings strictly above this are [`AlertLevel::High`].
pub const HIGH_TEMPERATURE_THRESHOLD: f64 = 30.0;

/// Readings strictly below this are [`AlertLevel::Low`].
pub const LOW_TEMPERATURE_THRESHOLD: f64 = 20.0;

/// Classification of a temperature reading. Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Normal,
    High,
    Low,
}

/// Classify `temperature`; both thresholds are themselves [`AlertLevel::Normal`].
#[must_use]
pub fn evaluate(temperature: f64) -> AlertLevel {
    if temperature > HIGH_TEMPERATURE_THRESHOLD {
        AlertLevel::High
    } else if temperature < LOW_TEMPERATURE_THRESHOLD {
        AlertLevel::Low
    } else {
        AlertLevel::Normal
    }
}
