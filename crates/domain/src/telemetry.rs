//! Telemetry records and their alert annotation.
//!
//! Records are owned by the external sensor log; the core only reads them
//! and annotates each one on the way to the viewer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alert::{AlertLevel, evaluate};

/// Key looked up in telemetry JSON payloads.
pub const TEMPERATURE_FIELD: &str = "temperature";

/// Text shown when there is nothing to display.
pub const EMPTY_VIEW: &str = "No data available";

/// One stored telemetry row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub timestamp: String,
    pub topic: String,
    pub message: String,
}

/// A DHT reading as published on the telemetry topic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

impl SensorReading {
    /// JSON payload for the telemetry topic.
    #[must_use]
    pub fn to_payload(&self) -> String {
        let mut payload = serde_json::Map::new();
        payload.insert(TEMPERATURE_FIELD.to_string(), self.temperature.into());
        if let Some(humidity) = self.humidity {
            payload.insert("humidity".to_string(), humidity.into());
        }
        serde_json::Value::Object(payload).to_string()
    }
}

/// What the viewer attaches to a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// The payload carried a numeric temperature.
    Alert { level: AlertLevel, temperature: f64 },
    /// The payload could not be evaluated.
    ProcessingError { reason: String },
}

/// A record paired with its annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: TelemetryRecord,
    pub annotation: Annotation,
}

/// Evaluate a record's payload.
///
/// Malformed JSON, a non-object payload, a missing `temperature` key or a
/// non-numeric temperature all produce [`Annotation::ProcessingError`]
/// instead of dropping the record.
#[must_use]
pub fn annotate(record: TelemetryRecord) -> AnnotatedRecord {
    let annotation = match extract_temperature(&record.message) {
        Ok(temperature) => Annotation::Alert {
            level: evaluate(temperature),
            temperature,
        },
        Err(reason) => Annotation::ProcessingError { reason },
    };
    AnnotatedRecord { record, annotation }
}

fn extract_temperature(message: &str) -> Result<f64, String> {
    let value: serde_json::Value = serde_json::from_str(message).map_err(|err| err.to_string())?;
    let object = value
        .as_object()
        .ok_or_else(|| "payload is not a JSON object".to_string())?;
    let temperature = object
        .get(TEMPERATURE_FIELD)
        .ok_or_else(|| format!("missing `{TEMPERATURE_FIELD}` field"))?;
    temperature
        .as_f64()
        .ok_or_else(|| format!("`{TEMPERATURE_FIELD}` is not a number"))
}

impl fmt::Display for AnnotatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TelemetryRecord {
            timestamp,
            topic,
            message,
        } = &self.record;
        write!(f, "[{timestamp}] {topic}: {message}")?;
        match &self.annotation {
            Annotation::Alert {
                level: AlertLevel::High,
                temperature,
            } => write!(f, "  WARNING: High Temperature {temperature}\u{b0}C"),
            Annotation::Alert {
                level: AlertLevel::Low,
                temperature,
            } => write!(f, "  ALERT: Low Temperature {temperature}\u{b0}C"),
            Annotation::Alert {
                level: AlertLevel::Normal,
                ..
            } => Ok(()),
            Annotation::ProcessingError { reason } => {
                write!(f, "  Error processing alert: {reason}")
            }
        }
    }
}

/// Render annotated records one per line, or [`EMPTY_VIEW`].
#[must_use]
pub fn render_view(records: &[AnnotatedRecord]) -> String {
    if records.is_empty() {
        return EMPTY_VIEW.to_string();
    }
    records
        .iter()
        .map(|rec| format!("{rec}\n"))
        .collect()
}
