//! # smarthome-adapter-mqtt
//!
//! MQTT adapter: carries the fabric's topics over a broker.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker ([`MqttSession`]) and resubscribe after every
//!   (re)connect
//! - Feed inbound publishes to a [`MessageHandler`](smarthome_app::ports::MessageHandler)
//! - Publish through a live session ([`MqttPublisher`]) or through a
//!   short-lived connection per message ([`OneShotPublisher`])
//!
//! ## Dependency rule
//! Same as other adapters: depends on `smarthome-app` and `smarthome-domain`.

pub mod config;
pub mod error;
pub mod one_shot;
pub mod publisher;
pub mod session;

pub use config::MqttConfig;
pub use error::MqttError;
pub use one_shot::OneShotPublisher;
pub use publisher::MqttPublisher;
pub use session::MqttSession;
