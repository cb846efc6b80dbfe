//! Publisher that opens a fresh connection for every message.
//!
//! Used by command initiators, which publish rarely and have nothing to
//! subscribe to.

use std::future::Future;

use rumqttc::{AsyncClient, Event, Outgoing, Packet, QoS};

use smarthome_app::ports::MessagePublisher;
use smarthome_domain::error::SmartHomeError;

use crate::config::MqttConfig;
use crate::error::MqttError;

/// Connect, publish, wait for the broker's `PUBACK`, disconnect.
///
/// The whole exchange is bounded by
/// [`publish_timeout`](MqttConfig::publish_timeout).
#[derive(Debug, Clone)]
pub struct OneShotPublisher {
    config: MqttConfig,
}

impl OneShotPublisher {
    /// Create a publisher connecting with `config`.
    #[must_use]
    pub fn new(config: MqttConfig) -> Self {
        Self { config }
    }

    async fn send(&self, topic: &str, payload: String) -> Result<(), MqttError> {
        let (client, mut eventloop) = AsyncClient::new(self.config.options("initiator"), 10);
        client.try_publish(topic, QoS::AtLeastOnce, false, payload)?;

        let timeout = self.config.publish_timeout();
        let exchange = async {
            loop {
                match eventloop.poll().await? {
                    Event::Incoming(Packet::PubAck(_)) => client.try_disconnect()?,
                    Event::Outgoing(Outgoing::Disconnect) => return Ok::<(), MqttError>(()),
                    _ => {}
                }
            }
        };

        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| MqttError::Timeout {
                secs: timeout.as_secs(),
            })?
    }
}

impl MessagePublisher for OneShotPublisher {
    fn publish(
        &self,
        topic: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        let topic = topic.to_string();
        async move {
            self.send(&topic, payload).await.map_err(|err| {
                tracing::debug!(error = ?err, %topic, "one-shot MQTT publish failed");
                SmartHomeError::from(err)
            })
        }
    }
}
