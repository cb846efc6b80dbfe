//! Long-lived broker connection driving one message handler.

use std::time::Duration;

use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, Packet, QoS};
use tokio::sync::watch;

use smarthome_app::ports::MessageHandler;
use smarthome_app::ports::handler::{next_tick, ticker_for};

use crate::config::MqttConfig;
use crate::publisher::MqttPublisher;

/// Delay before polling again after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Capacity of the rumqttc request queue.
const REQUEST_CAPACITY: usize = 32;

/// One client connection, owned by one handler.
///
/// Subscriptions are (re)issued on every `CONNACK`, so a handler keeps
/// receiving its topics across broker reconnects.
pub struct MqttSession {
    client: AsyncClient,
    eventloop: EventLoop,
    client_id: String,
}

impl MqttSession {
    /// Prepare a session for `role`. Nothing touches the network until
    /// [`run`](Self::run) polls the event loop.
    #[must_use]
    pub fn new(config: &MqttConfig, role: &str) -> Self {
        let options = config.options(role);
        let client_id = options.client_id();
        let (client, eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        Self {
            client,
            eventloop,
            client_id,
        }
    }

    /// Identifier this session presents to the broker.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// A publisher sharing this session's connection.
    #[must_use]
    pub fn publisher(&self) -> MqttPublisher {
        MqttPublisher::new(self.client.clone())
    }

    /// Drive `handler` until `shutdown` flips.
    pub async fn run<H>(mut self, mut handler: H, mut shutdown: watch::Receiver<bool>)
    where
        H: MessageHandler + Send,
    {
        let topics = handler.topics();
        let mut ticker = ticker_for(&handler);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                event = self.eventloop.poll() => match event {
                    Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                        if ack.code == ConnectReturnCode::Success {
                            tracing::info!(client_id = %self.client_id, "connected to MQTT broker");
                            self.subscribe(topics);
                        } else {
                            tracing::warn!(client_id = %self.client_id, code = ?ack.code, "MQTT broker refused connection");
                        }
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        let topic = String::from_utf8_lossy(publish.topic.as_ref()).into_owned();
                        if topics.contains(&topic.as_str()) {
                            handler.handle(&topic, &publish.payload[..]).await;
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(client_id = %self.client_id, error = %err, "MQTT connection error, retrying");
                        tokio::time::sleep(RECONNECT_DELAY).await;
                    }
                },
                () = next_tick(&mut ticker) => handler.tick().await,
            }
        }

        if let Err(err) = self.client.try_disconnect() {
            tracing::debug!(client_id = %self.client_id, error = %err, "MQTT disconnect not queued");
        }
        tracing::info!(client_id = %self.client_id, "MQTT session stopped");
    }

    fn subscribe(&self, topics: &[&str]) {
        for topic in topics {
            match self.client.try_subscribe(*topic, QoS::AtLeastOnce) {
                Ok(()) => tracing::debug!(client_id = %self.client_id, topic, "subscribed"),
                Err(err) => {
                    tracing::warn!(client_id = %self.client_id, topic, error = %err, "MQTT subscribe failed");
                }
            }
        }
    }
}
