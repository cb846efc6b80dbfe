//! In-process message bus backed by a tokio broadcast channel.
//!
//! Lets the whole fabric run without a broker: devices, the telemetry
//! logger and the command initiators all share one [`InProcessBus`].

use std::future::Future;

use tokio::sync::{broadcast, watch};

use smarthome_domain::error::SmartHomeError;

use crate::ports::MessagePublisher;
use crate::ports::handler::{MessageHandler, next_tick, ticker_for};

/// One message travelling on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// In-process bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the message is simply dropped), like publishing to a broker nobody
/// listens on.
#[derive(Clone)]
pub struct InProcessBus {
    sender: broadcast::Sender<BusMessage>,
}

impl InProcessBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to every topic on this bus.
    ///
    /// Returns a receiver that will get all messages published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.sender.subscribe()
    }

    /// Drive `handler` with the messages of its topics until `shutdown`
    /// flips or the bus closes.
    ///
    /// The subscription is taken before this returns its future, so
    /// messages published right after the call are not missed.
    pub fn serve<H>(
        &self,
        handler: H,
        shutdown: watch::Receiver<bool>,
    ) -> impl Future<Output = ()> + Send + use<H>
    where
        H: MessageHandler + Send + 'static,
    {
        drive(self.subscribe(), handler, shutdown)
    }
}

impl MessagePublisher for InProcessBus {
    fn publish(
        &self,
        topic: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(BusMessage {
            topic: topic.to_string(),
            payload: payload.into_bytes(),
        });
        async { Ok(()) }
    }
}

async fn drive<H>(
    mut rx: broadcast::Receiver<BusMessage>,
    mut handler: H,
    mut shutdown: watch::Receiver<bool>,
) where
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
            received = rx.recv() => match received {
                Ok(msg) if topics.contains(&msg.topic.as_str()) => {
                    handler.handle(&msg.topic, &msg.payload).await;
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "in-process bus subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            () = next_tick(&mut ticker) => handler.tick().await,
        }
    }

    tracing::debug!(?topics, "in-process bus handler stopped");
}
