//! Telemetry handlers: the viewer's latest records with their alerts.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smarthome_app::ports::{MessagePublisher, TelemetryStore};
use smarthome_app::services::telemetry_service::DEFAULT_LIMIT;
use smarthome_domain::telemetry::AnnotatedRecord;

use crate::state::AppState;

/// Query parameters for the telemetry endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TelemetryQuery {
    /// Maximum number of records. Defaults to 20.
    pub limit: Option<usize>,
}

impl TelemetryQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    /// 200 OK with the annotated records, newest first.
    Ok(Json<Vec<AnnotatedRecord>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/telemetry?limit=`: latest records, each with its alert.
///
/// Never fails: an unreachable store yields an empty list.
pub async fn list<TS, P>(
    State(state): State<AppState<TS, P>>,
    Query(params): Query<TelemetryQuery>,
) -> ListResponse
where
    TS: TelemetryStore + Send + Sync + 'static,
    P: MessagePublisher + Clone + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.telemetry.annotated(params.limit()).await))
}

/// `GET /api/telemetry/view?limit=`: the same records as plain text.
pub async fn view<TS, P>(
    State(state): State<AppState<TS, P>>,
    Query(params): Query<TelemetryQuery>,
) -> String
where
    TS: TelemetryStore + Send + Sync + 'static,
    P: MessagePublisher + Clone + Send + Sync + 'static,
{
    state.telemetry.render(params.limit()).await
}

#[cfg(test)]
mod tests {
    use crate::router::build;
    use crate::testing::{StubPublisher, record, state};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use smarthome_domain::telemetry::TelemetryRecord;
    use tower::ServiceExt;

    async fn get(uri: &str, records: Vec<TelemetryRecord>) -> (StatusCode, String) {
        let app = build(state(records, StubPublisher::default()));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn should_list_annotated_records() {
        let (status, body) = get(
            "/api/telemetry",
            vec![record(r#"{"temperature": 35}"#), record("garbage")],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["message"], r#"{"temperature": 35}"#);
        assert_eq!(json[0]["annotation"]["kind"], "alert");
        assert_eq!(json[0]["annotation"]["level"], "high");
        assert_eq!(json[1]["annotation"]["kind"], "processing_error");
    }

    #[tokio::test]
    async fn should_honor_limit_parameter() {
        let records = (0..30).map(|_| record(r#"{"temperature": 25}"#)).collect();

        let (_, body) = get("/api/telemetry?limit=3", records).await;

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_default_to_twenty_records() {
        let records = (0..30).map(|_| record(r#"{"temperature": 25}"#)).collect();

        let (_, body) = get("/api/telemetry", records).await;

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn should_render_no_data_view() {
        let (status, body) = get("/api/telemetry/view", Vec::new()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "No data available");
    }

    #[tokio::test]
    async fn should_render_low_temperature_alert_in_view() {
        let (_, body) = get("/api/telemetry/view", vec![record(r#"{"temperature": 15}"#)]).await;

        assert!(body.starts_with("[2024-01-01 12:00:00] smarthome/sensor/dht:"));
        assert!(body.contains("ALERT: Low Temperature 15\u{b0}C"));
    }

    #[tokio::test]
    async fn should_reject_non_numeric_limit() {
        let (status, _) = get("/api/telemetry?limit=many", Vec::new()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
