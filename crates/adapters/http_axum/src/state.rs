//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use smarthome_app::ports::{MessagePublisher, TelemetryStore};
use smarthome_app::services::relay_controller::RelayController;
use smarthome_app::services::sensor_controller::SensorController;
use smarthome_app::services::telemetry_service::TelemetryService;

/// Application state shared across all axum handlers.
///
/// Generic over the telemetry store and the publisher the initiators send
/// commands with. The initiators keep their last-sent intent, so each sits
/// behind an async mutex: concurrent toggles are serialized.
///
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<TS, P> {
    /// Telemetry Query Interface.
    pub telemetry: Arc<TelemetryService<TS>>,
    /// Relay command initiator.
    pub relay: Arc<Mutex<RelayController<P>>>,
    /// Sensor command initiator.
    pub sensor: Arc<Mutex<SensorController<P>>>,
}

impl<TS, P> Clone for AppState<TS, P> {
    fn clone(&self) -> Self {
        Self {
            telemetry: Arc::clone(&self.telemetry),
            relay: Arc::clone(&self.relay),
            sensor: Arc::clone(&self.sensor),
        }
    }
}

impl<TS, P> AppState<TS, P>
where
    TS: TelemetryStore + Send + Sync + 'static,
    P: MessagePublisher + Clone + Send + Sync + 'static,
{
    /// Create a new application state reading from `store` and publishing
    /// commands through `publisher`.
    pub fn new(store: TS, publisher: P) -> Self {
        Self {
            telemetry: Arc::new(TelemetryService::new(store)),
            relay: Arc::new(Mutex::new(RelayController::new(publisher.clone()))),
            sensor: Arc::new(Mutex::new(SensorController::new(publisher))),
        }
    }
}
