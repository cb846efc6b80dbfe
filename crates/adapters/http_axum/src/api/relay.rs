//! Relay command handler.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smarthome_app::ports::{MessagePublisher, TelemetryStore};
use smarthome_domain::relay::RelayState;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after a toggle.
#[derive(Debug, Serialize)]
pub struct ToggleBody {
    /// State the relay was asked to take.
    pub requested: RelayState,
}

/// Possible responses from the toggle endpoint.
pub enum ToggleResponse {
    /// 202 Accepted: the command was handed to the bus. The relay's actual
    /// state arrives later on its status topic.
    Accepted(Json<ToggleBody>),
}

impl IntoResponse for ToggleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (axum::http::StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `POST /api/relay/toggle`: request the opposite of the last requested state.
pub async fn toggle<TS, P>(
    State(state): State<AppState<TS, P>>,
) -> Result<ToggleResponse, ApiError>
where
    TS: TelemetryStore + Send + Sync + 'static,
    P: MessagePublisher + Clone + Send + Sync + 'static,
{
    let requested = state.relay.lock().await.toggle().await?;
    Ok(ToggleResponse::Accepted(Json(ToggleBody { requested })))
}

#[cfg(test)]
mod tests {
    use crate::router::build;
    use crate::testing::{StubPublisher, state};
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    fn toggle_request() -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/relay/toggle")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn should_alternate_relay_commands() {
        let publisher = StubPublisher::default();
        let app = build(state(Vec::new(), publisher.clone()));

        let first = app.clone().oneshot(toggle_request()).await.unwrap();
        assert_eq!(first.status(), StatusCode::ACCEPTED);
        let body = to_bytes(first.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["requested"], "ON");

        app.oneshot(toggle_request()).await.unwrap();

        assert_eq!(publisher.payloads(), vec!["on", "off"]);
        assert_eq!(publisher.sent.lock().unwrap()[0].0, "smarthome/control/relay");
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_bus_unreachable() {
        let publisher = StubPublisher {
            offline: true,
            ..StubPublisher::default()
        };
        let app = build(state(Vec::new(), publisher));

        let response = app.oneshot(toggle_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn should_reject_get_on_toggle() {
        let app = build(state(Vec::new(), StubPublisher::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/relay/toggle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
