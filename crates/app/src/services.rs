//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod relay_controller;
pub mod relay_device;
pub mod sensor_controller;
pub mod sensor_device;
pub mod telemetry_logger;
pub mod telemetry_service;
