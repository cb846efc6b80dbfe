//! Relay State Machine: authoritative `ON`/`OFF` state of one relay.

use serde::{Deserialize, Serialize};

use crate::command::{Command, Decoded};

/// Discrete state of a relay, also its status payload on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelayState {
    On,
    #[default]
    Off,
}

impl RelayState {
    /// The other state.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    /// The command that drives a relay into this state.
    #[must_use]
    pub fn as_command(self) -> Command {
        match self {
            Self::On => Command::On,
            Self::Off => Command::Off,
        }
    }

    /// Status payload published on the status topic.
    #[must_use]
    pub fn status_payload(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    /// Parse a status payload (`ON` / `OFF`, exact).
    #[must_use]
    pub fn from_status(payload: &str) -> Option<Self> {
        match payload {
            "ON" => Some(Self::On),
            "OFF" => Some(Self::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_payload())
    }
}

/// A single relay device. Starts `OFF` and has no terminal state.
#[derive(Debug, Clone, Default)]
pub struct Relay {
    state: RelayState,
}

impl Relay {
    /// Create a relay in its initial `OFF` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Apply a decoded command and return the post-command state.
    ///
    /// Only `on` and `off` transition. Anything else, including a
    /// `temp:` command, leaves the state untouched; the returned state is
    /// still meant to be re-announced.
    pub fn apply(&mut self, decoded: Decoded) -> RelayState {
        match decoded {
            Decoded::Command(Command::On) => self.state = RelayState::On,
            Decoded::Command(Command::Off) => self.state = RelayState::Off,
            Decoded::Command(Command::SetTemperature(_)) | Decoded::Unrecognized => {}
        }
        self.state
    }
}
