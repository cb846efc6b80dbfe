//! Relay device: decode → transition → publish status.

use smarthome_domain::command::decode;
use smarthome_domain::relay::{Relay, RelayState};
use smarthome_domain::topic;

use crate::ports::{MessageHandler, MessagePublisher};

/// The relay emulator: owns the authoritative [`Relay`] and announces its
/// state after every inbound command.
pub struct RelayDevice<P> {
    relay: Relay,
    publisher: P,
}

impl<P: MessagePublisher> RelayDevice<P> {
    /// Create a relay device, initially `OFF`.
    pub fn new(publisher: P) -> Self {
        Self {
            relay: Relay::new(),
            publisher,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RelayState {
        self.relay.state()
    }

    /// Process one raw control payload and return the post-command state.
    ///
    /// The status is published exactly once per call, whether or not the
    /// payload was recognized. A failed publish is logged, not retried.
    pub async fn process(&mut self, payload: &[u8]) -> RelayState {
        let decoded = decode(payload);
        let state = self.relay.apply(decoded);

        if decoded.is_unrecognized() {
            tracing::debug!(
                payload = %String::from_utf8_lossy(payload),
                "ignoring unrecognized relay command"
            );
        } else {
            tracing::info!(%state, "relay state applied");
        }

        if let Err(err) = self
            .publisher
            .publish(topic::RELAY_STATUS, state.status_payload().to_string())
            .await
        {
            tracing::warn!(error = ?err, %state, "relay status publish failed");
        }

        state
    }
}

impl<P> MessageHandler for RelayDevice<P>
where
    P: MessagePublisher + Send + Sync,
{
    fn topics(&self) -> &'static [&'static str] {
        &[topic::RELAY_CONTROL]
    }

    async fn handle(&mut self, _topic: &str, payload: &[u8]) {
        self.process(payload).await;
    }
}
