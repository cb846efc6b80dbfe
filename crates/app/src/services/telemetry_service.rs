//! Telemetry Query Interface: latest N records for display, annotated
//! with temperature alerts.

use smarthome_domain::telemetry::{AnnotatedRecord, TelemetryRecord, annotate, render_view};

use crate::ports::TelemetryStore;

/// Number of records shown when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: usize = 20;

/// Read-only view over the sensor log.
///
/// A failing store degrades to "no data": this path only feeds a display,
/// so every read error is logged and swallowed here.
pub struct TelemetryService<S> {
    store: S,
}

impl<S: TelemetryStore> TelemetryService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// At most `limit` records, newest first. Empty when storage is
    /// unavailable or empty.
    pub async fn latest(&self, limit: usize) -> Vec<TelemetryRecord> {
        if limit == 0 {
            return Vec::new();
        }
        match self.store.latest(limit).await {
            Ok(mut records) => {
                records.truncate(limit);
                records
            }
            Err(err) => {
                tracing::warn!(error = ?err, limit, "telemetry store unavailable");
                Vec::new()
            }
        }
    }

    /// [`latest`](Self::latest), each record passed through the alert
    /// evaluator.
    pub async fn annotated(&self, limit: usize) -> Vec<AnnotatedRecord> {
        self.latest(limit)
            .await
            .into_iter()
            .map(annotate)
            .collect()
    }

    /// Plain-text view, one record per line.
    pub async fn render(&self, limit: usize) -> String {
        render_view(&self.annotated(limit).await)
    }
}
