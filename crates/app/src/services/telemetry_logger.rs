//! Telemetry logger: appends every telemetry message to the sensor log.

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::telemetry::TelemetryRecord;
use smarthome_domain::time::{Timestamp, format_record_timestamp, now};
use smarthome_domain::topic;

use crate::ports::{MessageHandler, TelemetrySink};

/// Writes `(timestamp, topic, message)` rows as telemetry arrives.
pub struct TelemetryLogger<S> {
    sink: S,
}

impl<S: TelemetrySink> TelemetryLogger<S> {
    /// Create a new logger writing into `sink`.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Append one message, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the sink.
    pub async fn record(
        &self,
        topic: &str,
        payload: &[u8],
    ) -> Result<TelemetryRecord, SmartHomeError> {
        self.record_at(now(), topic, payload).await
    }

    async fn record_at(
        &self,
        at: Timestamp,
        topic: &str,
        payload: &[u8],
    ) -> Result<TelemetryRecord, SmartHomeError> {
        let record = TelemetryRecord {
            timestamp: format_record_timestamp(at),
            topic: topic.to_string(),
            message: String::from_utf8_lossy(payload).into_owned(),
        };
        self.sink.append(record.clone()).await?;
        Ok(record)
    }
}

impl<S> MessageHandler for TelemetryLogger<S>
where
    S: TelemetrySink + Send + Sync,
{
    fn topics(&self) -> &'static [&'static str] {
        &[topic::SENSOR_TELEMETRY]
    }

    async fn handle(&mut self, topic: &str, payload: &[u8]) {
        match self.record(topic, payload).await {
            Ok(record) => tracing::debug!(topic, message = %record.message, "telemetry logged"),
            Err(err) => tracing::warn!(error = ?err, topic, "failed to log telemetry"),
        }
    }
}
