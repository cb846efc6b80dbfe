//! Test doubles shared by the service tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::telemetry::TelemetryRecord;

use crate::ports::{MessagePublisher, TelemetrySink, TelemetryStore};

/// Records every publish in order.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }

    pub fn payloads_on(&self, topic: &str) -> Vec<String> {
        self.published()
            .into_iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, payload)| payload)
            .collect()
    }
}

impl MessagePublisher for RecordingPublisher {
    fn publish(
        &self,
        topic: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        async { Ok(()) }
    }
}

/// Refuses every publish, like an unreachable broker.
#[derive(Clone, Copy, Default)]
pub struct FailingPublisher;

impl MessagePublisher for FailingPublisher {
    async fn publish(&self, _topic: &str, _payload: String) -> Result<(), SmartHomeError> {
        Err(SmartHomeError::Transport(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "broker unreachable",
        ))))
    }
}

/// Vec-backed sensor log, newest last.
#[derive(Clone, Default)]
pub struct InMemoryTelemetry {
    rows: Arc<Mutex<Vec<TelemetryRecord>>>,
}

impl InMemoryTelemetry {
    pub fn rows(&self) -> Vec<TelemetryRecord> {
        self.rows.lock().unwrap().clone()
    }
}

impl TelemetryStore for InMemoryTelemetry {
    fn latest(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TelemetryRecord>, SmartHomeError>> + Send {
        let rows: Vec<TelemetryRecord> =
            self.rows.lock().unwrap().iter().rev().take(limit).cloned().collect();
        async { Ok(rows) }
    }
}

impl TelemetrySink for InMemoryTelemetry {
    fn append(
        &self,
        record: TelemetryRecord,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        self.rows.lock().unwrap().push(record);
        async { Ok(()) }
    }
}

/// A store that is never reachable.
#[derive(Clone, Copy, Default)]
pub struct UnavailableStore;

impl TelemetryStore for UnavailableStore {
    async fn latest(&self, _limit: usize) -> Result<Vec<TelemetryRecord>, SmartHomeError> {
        Err(SmartHomeError::Storage(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such table: sensor_data",
        ))))
    }
}

impl TelemetrySink for UnavailableStore {
    async fn append(&self, _record: TelemetryRecord) -> Result<(), SmartHomeError> {
        Err(SmartHomeError::Storage(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such table: sensor_data",
        ))))
    }
}
