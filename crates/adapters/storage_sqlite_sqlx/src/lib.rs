//! # smarthome-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the telemetry store ports defined in `smarthome-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between [`TelemetryRecord`](smarthome_domain::telemetry::TelemetryRecord)
//!   and `sensor_data` rows
//!
//! ## Dependency rule
//! Depends on `smarthome-app` (for port traits) and `smarthome-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod telemetry_repo;

pub use pool::{Config, Database};
pub use telemetry_repo::SqliteTelemetryStore;
