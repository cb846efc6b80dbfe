//! Telemetry store ports: the append-only sensor log.

use std::future::Future;

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::telemetry::TelemetryRecord;

/// Read side of the sensor log.
pub trait TelemetryStore {
    /// Get at most `limit` records, newest first by insertion order
    /// (not by timestamp).
    fn latest(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TelemetryRecord>, SmartHomeError>> + Send;
}

/// Write side of the sensor log.
pub trait TelemetrySink {
    /// Append one record.
    fn append(
        &self,
        record: TelemetryRecord,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send;
}

impl<T: TelemetryStore + Send + Sync> TelemetryStore for std::sync::Arc<T> {
    fn latest(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TelemetryRecord>, SmartHomeError>> + Send {
        (**self).latest(limit)
    }
}

impl<T: TelemetrySink + Send + Sync> TelemetrySink for std::sync::Arc<T> {
    fn append(
        &self,
        record: TelemetryRecord,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        (**self).append(record)
    }
}
