//! Sensor device: applies control commands to the DHT and publishes its
//! telemetry while enabled.

use std::time::Duration;

use smarthome_domain::command::decode;
use smarthome_domain::sensor::{SensorControl, SensorTransition};
use smarthome_domain::telemetry::SensorReading;
use smarthome_domain::topic;

use crate::ports::{MessageHandler, MessagePublisher, ReadingSource};

/// The DHT emulator.
///
/// Control commands arrive on `smarthome/control/dht`; readings go out on
/// `smarthome/sensor/dht` every `interval`. A manual override reading,
/// once set, replaces the sampled temperature.
pub struct SensorDevice<P, S> {
    control: SensorControl,
    publisher: P,
    source: S,
    interval: Duration,
}

impl<P, S> SensorDevice<P, S>
where
    P: MessagePublisher,
    S: ReadingSource,
{
    /// Create an enabled sensor device without manual reading.
    ///
    /// Transports tick no faster than
    /// [`MIN_TICK_PERIOD`](crate::ports::handler::MIN_TICK_PERIOD), whatever
    /// `interval` says.
    pub fn new(publisher: P, source: S, interval: Duration) -> Self {
        Self {
            control: SensorControl::new(),
            publisher,
            source,
            interval,
        }
    }

    /// Current control state.
    #[must_use]
    pub fn control(&self) -> SensorControl {
        self.control
    }

    /// Process one raw control payload.
    pub fn process(&mut self, payload: &[u8]) -> SensorTransition {
        let transition = self.control.apply(decode(payload));
        match transition {
            SensorTransition::Enabled(enabled) => {
                tracing::info!(enabled, "sensor enable flag applied");
            }
            SensorTransition::ManualReading(temperature) => {
                tracing::info!(temperature, "sensor manual reading set");
            }
            SensorTransition::Ignored => {
                tracing::debug!(
                    payload = %String::from_utf8_lossy(payload),
                    "ignoring unrecognized sensor command"
                );
            }
        }
        transition
    }

    /// The reading the sensor would report right now, if any.
    pub fn current_reading(&mut self) -> Option<SensorReading> {
        if !self.control.is_enabled() {
            return None;
        }
        let sampled = self.source.sample();
        match self.control.last_manual_reading() {
            Some(temperature) => Some(SensorReading {
                temperature,
                humidity: sampled.and_then(|reading| reading.humidity),
            }),
            None => sampled,
        }
    }

    /// Publish one telemetry reading. Returns what was published.
    pub async fn publish_reading(&mut self) -> Option<SensorReading> {
        let reading = self.current_reading()?;
        match self
            .publisher
            .publish(topic::SENSOR_TELEMETRY, reading.to_payload())
            .await
        {
            Ok(()) => {
                tracing::debug!(temperature = reading.temperature, "sensor reading published");
                Some(reading)
            }
            Err(err) => {
                tracing::warn!(error = ?err, "sensor reading publish failed");
                None
            }
        }
    }
}

impl<P, S> MessageHandler for SensorDevice<P, S>
where
    P: MessagePublisher + Send + Sync,
    S: ReadingSource + Send,
{
    fn topics(&self) -> &'static [&'static str] {
        &[topic::SENSOR_CONTROL]
    }

    async fn handle(&mut self, _topic: &str, payload: &[u8]) {
        self.process(payload);
    }

    fn tick_interval(&self) -> Option<Duration> {
        Some(self.interval)
    }

    async fn tick(&mut self) {
        self.publish_reading().await;
    }
}
