//! Message handler port: the inbound side of every device.
//!
//! A transport (MQTT session, in-process bus) subscribes to
//! [`topics`](MessageHandler::topics) and feeds each message to
//! [`handle`](MessageHandler::handle), awaiting it before taking the next
//! one. A handler therefore never sees two messages at once.

use std::future::Future;
use std::time::Duration;

use tokio::time::Interval;

/// Something that consumes bus messages one at a time.
pub trait MessageHandler {
    /// Topics this handler listens on.
    fn topics(&self) -> &'static [&'static str];

    /// Process one inbound message to completion.
    fn handle(&mut self, topic: &str, payload: &[u8]) -> impl Future<Output = ()> + Send;

    /// Period of [`tick`](Self::tick), if the handler has periodic work.
    fn tick_interval(&self) -> Option<Duration> {
        None
    }

    /// Periodic work, run between messages.
    fn tick(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }
}

/// Shortest period a ticker runs at; shorter requests are raised to it.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Build the ticker for a handler, if it wants one.
#[must_use]
pub fn ticker_for(handler: &impl MessageHandler) -> Option<Interval> {
    handler
        .tick_interval()
        .map(|period| tokio::time::interval(period.max(MIN_TICK_PERIOD)))
}

/// Wait for the next tick, or forever when there is no ticker.
pub async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
