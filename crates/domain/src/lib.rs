//! # smarthome-domain
//!
//! Pure domain model for the smarthome control fabric.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, topic names
//! - The **Command Codec**: decode raw bus payloads into [`command::Decoded`]
//!   and encode outbound [`command::Command`]s
//! - The **Relay State Machine** ([`relay::Relay`]) and its `ON`/`OFF` status
//! - The **Sensor Control State Machine** ([`sensor::SensorControl`])
//! - The **Alert Evaluator** ([`alert::evaluate`]) and telemetry annotation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;
pub mod topic;

pub mod alert;
pub mod command;
pub mod relay;
pub mod sensor;
pub mod telemetry;
