//! Command Codec: the tiny command vocabulary exchanged on control topics.
//!
//! Decoding never fails with an error: anything outside the vocabulary is
//! the first-class value [`Decoded::Unrecognized`].

use std::fmt;

const ON: &str = "on";
const OFF: &str = "off";
const TEMPERATURE_PREFIX: &str = "temp:";

/// A recognized command from the closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `on`: switch the relay on, or enable the sensor.
    On,
    /// `off`: switch the relay off, or disable the sensor.
    Off,
    /// `temp:<float>`: inject a manual override reading into the sensor.
    SetTemperature(f64),
}

impl Command {
    /// Wire payload for this command.
    ///
    /// Temperatures always carry a decimal point (`temp:25.0`).
    #[must_use]
    pub fn to_payload(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str(ON),
            Self::Off => f.write_str(OFF),
            Self::SetTemperature(value) => write!(f, "{TEMPERATURE_PREFIX}{value:?}"),
        }
    }
}

/// Result of decoding a raw bus payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded {
    /// The payload matched the vocabulary.
    Command(Command),
    /// The payload matched nothing; it must cause no state change.
    Unrecognized,
}

impl Decoded {
    /// The recognized command, if any.
    #[must_use]
    pub fn command(self) -> Option<Command> {
        match self {
            Self::Command(cmd) => Some(cmd),
            Self::Unrecognized => None,
        }
    }

    /// Whether decoding failed.
    #[must_use]
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized)
    }
}

impl From<Command> for Decoded {
    fn from(cmd: Command) -> Self {
        Self::Command(cmd)
    }
}

/// Decode a raw bus payload.
///
/// The payload is read as UTF-8, trimmed and lower-cased, then matched
/// exactly against `on` / `off`, or against `temp:<number>`. A `temp:`
/// suffix that is not a finite decimal number makes the whole payload
/// [`Decoded::Unrecognized`].
#[must_use]
pub fn decode(raw: &[u8]) -> Decoded {
    let Ok(text) = std::str::from_utf8(raw) else {
        return Decoded::Unrecognized;
    };
    let normalized = text.trim().to_lowercase();

    match normalized.as_str() {
        ON => Command::On.into(),
        OFF => Command::Off.into(),
        other => other
            .strip_prefix(TEMPERATURE_PREFIX)
            .and_then(parse_temperature)
            .map_or(Decoded::Unrecognized, |value| {
                Command::SetTemperature(value).into()
            }),
    }
}

/// Parse a decimal temperature, rejecting `nan` and infinities.
#[must_use]
pub fn parse_temperature(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn should_decode_on_and_off() {
        assert_eq!(decode(b"on"), Decoded::Command(Command::On));
        assert_eq!(decode(b"off"), Decoded::Command(Command::Off));
    }

    #[test]
    fn should_ignore_case_and_surrounding_whitespace() {
        assert_eq!(decode(b"  ON "), decode(b"on"));
        assert_eq!(decode(b"\tOfF\n"), Decoded::Command(Command::Off));
    }

    #[test]
    fn should_decode_manual_temperature() {
        assert_eq!(
            decode(b"temp:25.5"),
            Decoded::Command(Command::SetTemperature(25.5))
        );
        assert_eq!(
            decode(b" TEMP:-4 "),
            Decoded::Command(Command::SetTemperature(-4.0))
        );
    }

    #[test]
    fn should_accept_implausible_temperatures() {
        assert_eq!(
            decode(b"temp:1000000"),
            Decoded::Command(Command::SetTemperature(1_000_000.0))
        );
    }

    #[test]
    fn should_reject_non_numeric_temperature_suffix() {
        assert!(decode(b"temp:warm").is_unrecognized());
        assert!(decode(b"temp:").is_unrecognized());
        assert!(decode(b"temp:25.5c").is_unrecognized());
    }

    #[test]
    fn should_reject_non_finite_temperature() {
        assert!(decode(b"temp:nan").is_unrecognized());
        assert!(decode(b"temp:inf").is_unrecognized());
    }

    #[test]
    fn should_reject_partial_matches() {
        assert!(decode(b"onn").is_unrecognized());
        assert!(decode(b"turn on").is_unrecognized());
        assert!(decode(b"").is_unrecognized());
        assert!(decode(b"temperature:20").is_unrecognized());
    }

    #[test]
    fn should_reject_invalid_utf8() {
        assert!(decode(&[0xff, 0xfe, b'o', b'n']).is_unrecognized());
    }

    #[test]
    fn should_encode_temperature_with_decimal_point() {
        assert_eq!(Command::SetTemperature(25.0).to_payload(), "temp:25.0");
        assert_eq!(Command::SetTemperature(25.5).to_payload(), "temp:25.5");
        assert_eq!(Command::On.to_payload(), "on");
        assert_eq!(Command::Off.to_payload(), "off");
    }

    #[test]
    fn should_expose_command_of_decoded_value() {
        assert_eq!(decode(b"on").command(), Some(Command::On));
        assert_eq!(decode(b"nope").command(), None);
    }

    proptest! {
        #[test]
        fn should_leave_everything_outside_vocabulary_unrecognized(input in "[a-zA-Z0-9 :._-]{0,16}") {
            let normalized = input.trim().to_lowercase();
            prop_assume!(normalized != "on" && normalized != "off");
            prop_assume!(!normalized.starts_with("temp:"));
            prop_assert!(decode(input.as_bytes()).is_unrecognized());
        }

        #[test]
        fn should_decode_what_it_encodes(value in -1.0e6f64..1.0e6f64) {
            let payload = Command::SetTemperature(value).to_payload();
            prop_assert_eq!(
                decode(payload.as_bytes()),
                Decoded::Command(Command::SetTemperature(value))
            );
        }
    }
}
