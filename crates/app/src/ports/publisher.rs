//! Publish port: fire a payload at a bus topic.

use std::future::Future;

use smarthome_domain::error::SmartHomeError;

/// Publishes raw payloads on named bus topics.
///
/// Publishing is fire-and-forget: implementations do not wait for any
/// consumer acknowledgment and callers do not retry on failure.
pub trait MessagePublisher {
    /// Publish `payload` on `topic`.
    fn publish(
        &self,
        topic: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send;
}

impl<T: MessagePublisher + Send + Sync> MessagePublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        topic: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        (**self).publish(topic, payload)
    }
}
