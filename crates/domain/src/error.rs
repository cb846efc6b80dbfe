//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHomeError`] when crossing a port boundary. Decoding an
//! unrecognized command is *not* an error; see [`crate::command::Decoded`].

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by ports and application services.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    /// Input rejected before anything was sent or stored.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The message bus could not be reached or refused a publish.
    #[error("bus transport error")]
    Transport(#[source] BoxError),

    /// The telemetry store could not be read or written.
    #[error("storage error")]
    Storage(#[source] BoxError),
}

/// Invariant violations on user-supplied input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A manual temperature could not be read as a number.
    #[error("Invalid temperature format! Enter a valid number.")]
    InvalidTemperature {
        /// The rejected input, as typed.
        input: String,
    },
}
