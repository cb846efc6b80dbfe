//! Bus topic names. These are part of the wire contract and are not
//! configurable.

/// Inbound commands for the relay (`on` / `off`).
pub const RELAY_CONTROL: &str = "smarthome/control/relay";

/// Outbound relay status (`ON` / `OFF`).
pub const RELAY_STATUS: &str = "smarthome/relay";

/// Inbound commands for the DHT sensor (`on` / `off` / `temp:<float>`).
pub const SENSOR_CONTROL: &str = "smarthome/control/dht";

/// DHT telemetry stream, JSON with a `temperature` field.
pub const SENSOR_TELEMETRY: &str = "smarthome/sensor/dht";
