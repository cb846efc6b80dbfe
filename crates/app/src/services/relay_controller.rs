//! Relay command initiator: the viewer's "toggle relay" action.

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::relay::RelayState;
use smarthome_domain::topic;

use crate::ports::MessagePublisher;

/// Sends relay commands on behalf of a controller.
///
/// Tracks the state it last *asked for*, not the state the relay reports.
/// Lost commands or a second initiator make the two diverge; nothing here
/// reconciles them.
pub struct RelayController<P> {
    last_sent: RelayState,
    publisher: P,
}

impl<P: MessagePublisher> RelayController<P> {
    /// Create a controller that assumes the relay was last sent `off`.
    pub fn new(publisher: P) -> Self {
        Self {
            last_sent: RelayState::Off,
            publisher,
        }
    }

    /// The state most recently requested.
    #[must_use]
    pub fn last_sent(&self) -> RelayState {
        self.last_sent
    }

    /// Request the opposite of the last requested state.
    ///
    /// The intent is updated before publishing and is not rolled back when
    /// the publish fails.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Transport`] when the bus refused the publish.
    pub async fn toggle(&mut self) -> Result<RelayState, SmartHomeError> {
        let requested = self.last_sent.opposite();
        self.last_sent = requested;

        let payload = requested.as_command().to_payload();
        if let Err(err) = self.publisher.publish(topic::RELAY_CONTROL, payload).await {
            tracing::warn!(error = ?err, %requested, "failed to send relay command");
            return Err(err);
        }

        tracing::info!(%requested, topic = topic::RELAY_CONTROL, "relay command sent");
        Ok(requested)
    }
}
