//! Sensor command handlers: enable toggle and manual temperature.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use smarthome_app::ports::{MessagePublisher, TelemetryStore};

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after an enable toggle.
#[derive(Debug, Serialize)]
pub struct ToggleBody {
    /// Whether the sensor was asked to publish telemetry.
    pub enabled: bool,
}

/// Request body for a manual temperature.
///
/// The value is free text, exactly as typed by the user; it is validated
/// server side.
#[derive(Debug, Deserialize)]
pub struct TemperatureRequest {
    pub value: String,
}

/// Body returned once a manual temperature was sent.
#[derive(Debug, Serialize)]
pub struct TemperatureBody {
    /// The parsed value that went out on the bus.
    pub value: f64,
}

/// Possible responses from the toggle endpoint.
pub enum ToggleResponse {
    Accepted(Json<ToggleBody>),
}

impl IntoResponse for ToggleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// Possible responses from the temperature endpoint.
pub enum TemperatureResponse {
    Accepted(Json<TemperatureBody>),
}

impl IntoResponse for TemperatureResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `POST /api/sensor/toggle`: flip the sensor's enable intent.
pub async fn toggle<TS, P>(
    State(state): State<AppState<TS, P>>,
) -> Result<ToggleResponse, ApiError>
where
    TS: TelemetryStore + Send + Sync + 'static,
    P: MessagePublisher + Clone + Send + Sync + 'static,
{
    let enabled = state.sensor.lock().await.toggle().await?;
    Ok(ToggleResponse::Accepted(Json(ToggleBody { enabled })))
}

/// `POST /api/sensor/temperature`: inject a manual override reading.
pub async fn temperature<TS, P>(
    State(state): State<AppState<TS, P>>,
    Json(request): Json<TemperatureRequest>,
) -> Result<TemperatureResponse, ApiError>
where
    TS: TelemetryStore + Send + Sync + 'static,
    P: MessagePublisher + Clone + Send + Sync + 'static,
{
    let value = state
        .sensor
        .lock()
        .await
        .send_temperature(&request.value)
        .await?;
    Ok(TemperatureResponse::Accepted(Json(TemperatureBody {
        value,
    })))
}

#[cfg(test)]
mod tests {
    use crate::router::build;
    use crate::testing::{StubPublisher, state};
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_send_off_on_first_toggle() {
        let publisher = StubPublisher::default();
        let app = build(state(Vec::new(), publisher.clone()));

        let response = app.oneshot(post("/api/sensor/toggle", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["enabled"], false);
        assert_eq!(publisher.payloads(), vec!["off"]);
    }

    #[tokio::test]
    async fn should_send_manual_temperature() {
        let publisher = StubPublisher::default();
        let app = build(state(Vec::new(), publisher.clone()));

        let response = app
            .oneshot(post("/api/sensor/temperature", r#"{"value": " 25.5 "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(publisher.payloads(), vec!["temp:25.5"]);
        let sent = publisher.sent.lock().unwrap();
        assert_eq!(sent[0].0, "smarthome/control/dht");
    }

    #[tokio::test]
    async fn should_reject_invalid_temperature_with_message() {
        let publisher = StubPublisher::default();
        let app = build(state(Vec::new(), publisher.clone()));

        let response = app
            .oneshot(post("/api/sensor/temperature", r#"{"value": "hot"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["error"],
            "Invalid temperature format! Enter a valid number."
        );
        assert!(publisher.payloads().is_empty());
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_bus_unreachable() {
        let publisher = StubPublisher {
            offline: true,
            ..StubPublisher::default()
        };
        let app = build(state(Vec::new(), publisher));

        let response = app
            .oneshot(post("/api/sensor/temperature", r#"{"value": "21"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
