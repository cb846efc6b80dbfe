//! Stub ports shared by the handler tests.

use std::sync::{Arc, Mutex};

use smarthome_app::ports::{MessagePublisher, TelemetryStore};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::telemetry::TelemetryRecord;

use crate::state::AppState;

/// Store returning a fixed list of records, newest first.
pub struct StubStore(pub Vec<TelemetryRecord>);

impl TelemetryStore for StubStore {
    async fn latest(&self, limit: usize) -> Result<Vec<TelemetryRecord>, SmartHomeError> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }
}

/// Publisher remembering every `(topic, payload)`; fails when `offline`.
#[derive(Clone, Default)]
pub struct StubPublisher {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub offline: bool,
}

impl StubPublisher {
    pub fn payloads(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl MessagePublisher for StubPublisher {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), SmartHomeError> {
        if self.offline {
            return Err(SmartHomeError::Transport("offline".into()));
        }
        self.sent.lock().unwrap().push((topic.to_string(), payload));
        Ok(())
    }
}

pub fn record(message: &str) -> TelemetryRecord {
    TelemetryRecord {
        timestamp: "2024-01-01 12:00:00".to_string(),
        topic: "smarthome/sensor/dht".to_string(),
        message: message.to_string(),
    }
}

pub fn state(
    records: Vec<TelemetryRecord>,
    publisher: StubPublisher,
) -> AppState<StubStore, StubPublisher> {
    AppState::new(StubStore(records), publisher)
}
