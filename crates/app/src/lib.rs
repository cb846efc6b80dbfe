//! # smarthome-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `MessagePublisher`: fire a payload at a bus topic
//!   - `TelemetryStore`: read the latest stored telemetry rows
//!   - `TelemetrySink`: append a telemetry row
//!   - `ReadingSource`: sample a physical or emulated DHT
//! - Define the **driving/inbound port** `MessageHandler`, implemented by
//!   every device service and driven by a transport loop
//! - Provide the use-cases:
//!   - `RelayDevice` / `SensorDevice`: decode → transition → publish
//!   - `RelayController` / `SensorController`: command initiators
//!   - `TelemetryService`: latest N records, annotated with alerts
//!   - `TelemetryLogger`: append telemetry as it arrives
//! - Provide **in-process infrastructure** (a broadcast bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod bus;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
