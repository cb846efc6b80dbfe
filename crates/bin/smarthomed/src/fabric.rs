//! Device wiring: which emulators and loggers run, and over which bus.

use smarthome_adapter_mqtt::{MqttConfig, MqttSession};
use smarthome_adapter_virtual::{DisconnectedDht, SimulatedDht};
use smarthome_app::bus::InProcessBus;
use smarthome_app::ports::{ReadingSource, TelemetrySink};
use smarthome_app::services::relay_device::RelayDevice;
use smarthome_app::services::sensor_device::SensorDevice;
use smarthome_app::services::telemetry_logger::TelemetryLogger;
use smarthome_domain::telemetry::SensorReading;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::DevicesConfig;

/// Measurement source for the DHT emulator, picked from configuration.
pub enum DhtSource {
    Simulated(SimulatedDht),
    Disconnected(DisconnectedDht),
}

impl DhtSource {
    #[must_use]
    pub fn from_config(devices: &DevicesConfig) -> Self {
        if devices.simulate_readings {
            Self::Simulated(SimulatedDht::default())
        } else {
            Self::Disconnected(DisconnectedDht)
        }
    }
}

impl ReadingSource for DhtSource {
    fn sample(&mut self) -> Option<SensorReading> {
        match self {
            Self::Simulated(source) => source.sample(),
            Self::Disconnected(source) => source.sample(),
        }
    }
}

/// Spawn the enabled devices on an in-process bus.
pub fn spawn_in_process<S>(
    bus: &InProcessBus,
    devices: &DevicesConfig,
    sink: S,
    shutdown: &watch::Receiver<bool>,
) -> Vec<JoinHandle<()>>
where
    S: TelemetrySink + Send + Sync + 'static,
{
    let mut tasks = Vec::new();
    if devices.logger_enabled {
        tasks.push(tokio::spawn(
            bus.serve(TelemetryLogger::new(sink), shutdown.clone()),
        ));
    }
    if devices.relay_enabled {
        tasks.push(tokio::spawn(
            bus.serve(RelayDevice::new(bus.clone()), shutdown.clone()),
        ));
    }
    if devices.dht_enabled {
        let sensor = SensorDevice::new(
            bus.clone(),
            DhtSource::from_config(devices),
            devices.dht_interval(),
        );
        tasks.push(tokio::spawn(bus.serve(sensor, shutdown.clone())));
    }
    tracing::info!(count = tasks.len(), "devices started on in-process bus");
    tasks
}

/// Spawn the enabled devices, each with its own MQTT session.
pub fn spawn_mqtt<S>(
    mqtt: &MqttConfig,
    devices: &DevicesConfig,
    sink: S,
    shutdown: &watch::Receiver<bool>,
) -> Vec<JoinHandle<()>>
where
    S: TelemetrySink + Send + Sync + 'static,
{
    let mut tasks = Vec::new();
    if devices.logger_enabled {
        let session = MqttSession::new(mqtt, "logger");
        tasks.push(tokio::spawn(
            session.run(TelemetryLogger::new(sink), shutdown.clone()),
        ));
    }
    if devices.relay_enabled {
        let session = MqttSession::new(mqtt, "relay");
        let relay = RelayDevice::new(session.publisher());
        tasks.push(tokio::spawn(session.run(relay, shutdown.clone())));
    }
    if devices.dht_enabled {
        let session = MqttSession::new(mqtt, "dht");
        let sensor = SensorDevice::new(
            session.publisher(),
            DhtSource::from_config(devices),
            devices.dht_interval(),
        );
        tasks.push(tokio::spawn(session.run(sensor, shutdown.clone())));
    }
    tracing::info!(
        count = tasks.len(),
        broker = %mqtt.broker_host,
        port = mqtt.broker_port,
        "devices started on MQTT"
    );
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Transport;
    use smarthome_domain::error::SmartHomeError;
    use smarthome_domain::telemetry::TelemetryRecord;

    struct NullSink;

    impl TelemetrySink for NullSink {
        async fn append(&self, _record: TelemetryRecord) -> Result<(), SmartHomeError> {
            Ok(())
        }
    }

    fn devices() -> DevicesConfig {
        DevicesConfig {
            transport: Transport::InProcess,
            ..DevicesConfig::default()
        }
    }

    #[test]
    fn should_sample_simulated_readings_by_default() {
        let mut source = DhtSource::from_config(&devices());
        assert!(source.sample().is_some());
    }

    #[test]
    fn should_sample_nothing_without_simulation() {
        let config = DevicesConfig {
            simulate_readings: false,
            ..devices()
        };
        let mut source = DhtSource::from_config(&config);
        assert_eq!(source.sample(), None);
    }

    #[tokio::test]
    async fn should_spawn_only_enabled_devices() {
        let bus = InProcessBus::new(16);
        let (stop_tx, stop_rx) = watch::channel(false);
        let config = DevicesConfig {
            dht_enabled: false,
            ..devices()
        };

        let tasks = spawn_in_process(&bus, &config, NullSink, &stop_rx);
        assert_eq!(tasks.len(), 2);

        stop_tx.send(true).unwrap();
        for task in tasks {
            task.await.unwrap();
        }
    }
}
