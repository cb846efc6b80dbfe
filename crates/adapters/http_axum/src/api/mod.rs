//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod relay;
#[allow(clippy::missing_errors_doc)]
pub mod sensor;
pub mod telemetry;

use axum::Router;
use axum::routing::{get, post};

use smarthome_app::ports::{MessagePublisher, TelemetryStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<TS, P>() -> Router<AppState<TS, P>>
where
    TS: TelemetryStore + Send + Sync + 'static,
    P: MessagePublisher + Clone + Send + Sync + 'static,
{
    Router::new()
        // Telemetry
        .route("/telemetry", get(telemetry::list::<TS, P>))
        .route("/telemetry/view", get(telemetry::view::<TS, P>))
        // Relay
        .route("/relay/toggle", post(relay::toggle::<TS, P>))
        // Sensor
        .route("/sensor/toggle", post(sensor::toggle::<TS, P>))
        .route("/sensor/temperature", post(sensor::temperature::<TS, P>))
}
