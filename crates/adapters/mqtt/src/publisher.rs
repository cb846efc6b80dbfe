//! Publisher bound to a live [`MqttSession`](crate::MqttSession).

use std::future::Future;

use rumqttc::{AsyncClient, QoS};

use smarthome_app::ports::MessagePublisher;
use smarthome_domain::error::SmartHomeError;

use crate::error::MqttError;

/// Queues publishes on the session's request channel.
///
/// The session's event loop does the actual sending; this never waits for
/// it, so a full request queue is reported as an error instead of blocking
/// the handler that publishes.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
}

impl MqttPublisher {
    pub(crate) fn new(client: AsyncClient) -> Self {
        Self { client }
    }
}

impl MessagePublisher for MqttPublisher {
    fn publish(
        &self,
        topic: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        let result = self
            .client
            .try_publish(topic, QoS::AtLeastOnce, false, payload)
            .map_err(|err| SmartHomeError::from(MqttError::from(err)));
        async move { result }
    }
}
