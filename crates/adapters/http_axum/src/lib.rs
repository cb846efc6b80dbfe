//! # smarthome-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the viewer's **JSON API**: latest telemetry annotated with
//!   temperature alerts, plus a plain-text rendering of the same view
//! - Drive the command initiators (relay toggle, sensor toggle, manual
//!   temperature) from HTTP requests
//! - Map application results and [`SmartHomeError`](smarthome_domain::error::SmartHomeError)
//!   into HTTP responses
//!
//! ## Dependency rule
//! Depends on `smarthome-app` (for port traits and services) and `smarthome-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
