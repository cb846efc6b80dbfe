//! # smarthome-adapter-virtual
//!
//! Virtual/demo reading sources for the DHT sensor device.
//!
//! ## Provided sources
//!
//! | Source | Behaviour |
//! |--------|-----------|
//! | [`SimulatedDht`] | Deterministic drift around 21.5 °C / 45 % humidity |
//! | [`DisconnectedDht`] | Never yields a reading; only manual readings get published |
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-app` (port traits) and `smarthome-domain` only.

mod devices;

pub use devices::{DisconnectedDht, SimulatedDht};
