//! Operator commands
//!
//! A command is a JSON value on a single line. Only top-level objects carry
//! information; the recognized fields are:
//!
//! | Field    | Type        | Meaning                                   |
//! |----------|-------------|-------------------------------------------|
//! | `torque` | signed int  | New commanded torque (replaces the old)   |
//! | `budget` | signed int  | Energy credit added to the ledger         |
//!
//! Decoding is deliberately lenient below the syntax level: a field that is
//! missing, not an integer, or out of `i32` range reads as 0, unknown fields
//! are skipped, and any well-formed JSON that is not an object decodes to the
//! all-zero command. Only the first JSON value on a line is read, and any
//! text after it is ignored. Lines that do not start with JSON are rejected.

use core::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// A decoded operator command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Commanded torque; sign selects direction
    pub torque: i32,
    /// Energy credit to add to the ledger
    pub budget: i32,
}

impl Command {
    /// Create a new command
    pub const fn new(torque: i32, budget: i32) -> Self {
        Self { torque, budget }
    }
}

/// Reasons a command line could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Line holds nothing but whitespace
    EmptyInput,
    /// Not valid JSON (bad token, nesting too deep)
    InvalidInput,
    /// Input ended in the middle of a value
    IncompleteInput,
    /// JSON was well formed but could not be mapped to a command
    InvalidData,
}

impl DecodeError {
    /// Short diagnostic string for operator output
    pub const fn as_str(&self) -> &'static str {
        match self {
            DecodeError::EmptyInput => "EmptyInput",
            DecodeError::InvalidInput => "InvalidInput",
            DecodeError::IncompleteInput => "IncompleteInput",
            DecodeError::InvalidData => "InvalidData",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Eof => DecodeError::IncompleteInput,
            serde_json::error::Category::Data => DecodeError::InvalidData,
            serde_json::error::Category::Syntax | serde_json::error::Category::Io => {
                DecodeError::InvalidInput
            }
        }
    }
}

/// Decode a single command line
///
/// The line should already be stripped of its terminator. Leading
/// whitespace is skipped and anything after the first value is ignored.
pub fn decode_command(line: &[u8]) -> Result<Command, DecodeError> {
    match serde_json::Deserializer::from_slice(line)
        .into_iter::<Command>()
        .next()
    {
        Some(result) => result.map_err(DecodeError::from),
        None => Err(DecodeError::EmptyInput),
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CommandVisitor)
    }
}

/// Recognized object keys
enum Field {
    Torque,
    Budget,
    Other,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Field, E> {
                Ok(match v {
                    "torque" => Field::Torque,
                    "budget" => Field::Budget,
                    _ => Field::Other,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

/// Integer field that reads as 0 unless it holds an `i32`
struct LenientInt(i32);

impl<'de> Deserialize<'de> for LenientInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientIntVisitor)
    }
}

struct LenientIntVisitor;

impl<'de> Visitor<'de> for LenientIntVisitor {
    type Value = LenientInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<LenientInt, E> {
        Ok(LenientInt(i32::try_from(v).unwrap_or(0)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<LenientInt, E> {
        Ok(LenientInt(i32::try_from(v).unwrap_or(0)))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<LenientInt, E> {
        Ok(LenientInt(0))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<LenientInt, E> {
        Ok(LenientInt(0))
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<LenientInt, E> {
        Ok(LenientInt(0))
    }

    fn visit_unit<E: de::Error>(self) -> Result<LenientInt, E> {
        Ok(LenientInt(0))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LenientInt, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(LenientInt(0))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LenientInt, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LenientInt(0))
    }
}

struct CommandVisitor;

impl<'de> Visitor<'de> for CommandVisitor {
    type Value = Command;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON command")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Command, A::Error> {
        let mut command = Command::default();
        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Torque => command.torque = map.next_value::<LenientInt>()?.0,
                Field::Budget => command.budget = map.next_value::<LenientInt>()?.0,
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(command)
    }

    // Well-formed values that are not objects carry no fields

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Command, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Command::default())
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Command, E> {
        Ok(Command::default())
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Command, E> {
        Ok(Command::default())
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Command, E> {
        Ok(Command::default())
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Command, E> {
        Ok(Command::default())
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<Command, E> {
        Ok(Command::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Command, E> {
        Ok(Command::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_full_command() {
        let cmd = decode_command(br#"{"torque": 50, "budget": 1000}"#).unwrap();
        assert_eq!(cmd, Command::new(50, 1000));
    }

    #[test]
    fn test_decode_negative_torque() {
        let cmd = decode_command(br#"{"torque":-30}"#).unwrap();
        assert_eq!(cmd, Command::new(-30, 0));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        assert_eq!(decode_command(b"{}").unwrap(), Command::default());
        assert_eq!(
            decode_command(br#"{"budget": 7}"#).unwrap(),
            Command::new(0, 7)
        );
    }

    #[test]
    fn test_invalid_field_values_default_to_zero() {
        let cmd = decode_command(br#"{"torque": "fast", "budget": 2.5}"#).unwrap();
        assert_eq!(cmd, Command::default());

        let cmd = decode_command(br#"{"torque": [1, 2], "budget": {"a": 1}}"#).unwrap();
        assert_eq!(cmd, Command::default());

        let cmd = decode_command(br#"{"torque": null, "budget": true}"#).unwrap();
        assert_eq!(cmd, Command::default());
    }

    #[test]
    fn test_out_of_range_integer_defaults_to_zero() {
        let cmd = decode_command(br#"{"torque": 3000000000, "budget": -3000000000}"#).unwrap();
        assert_eq!(cmd, Command::default());

        let cmd = decode_command(br#"{"torque": 2147483647, "budget": -2147483648}"#).unwrap();
        assert_eq!(cmd, Command::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let cmd = decode_command(br#"{"mode": "eco", "torque": 12, "extra": [1, {"x": 2}]}"#)
            .unwrap();
        assert_eq!(cmd, Command::new(12, 0));
    }

    #[test]
    fn test_non_object_json_is_all_zero() {
        assert_eq!(decode_command(b"5").unwrap(), Command::default());
        assert_eq!(decode_command(b"[1, 2]").unwrap(), Command::default());
        assert_eq!(decode_command(b"\"hi\"").unwrap(), Command::default());
        assert_eq!(decode_command(b"null").unwrap(), Command::default());
    }

    #[test]
    fn test_surrounding_whitespace_accepted() {
        let cmd = decode_command(b"  {\"torque\": 1}\r").unwrap();
        assert_eq!(cmd, Command::new(1, 0));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(
            decode_command(b"torque=5"),
            Err(DecodeError::InvalidInput)
        );
        assert_eq!(
            decode_command(br#"{"torque": 5"#),
            Err(DecodeError::IncompleteInput)
        );
        assert_eq!(decode_command(b""), Err(DecodeError::EmptyInput));
        assert_eq!(decode_command(b"   \r"), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn test_text_after_first_value_ignored() {
        assert_eq!(
            decode_command(br#"{"torque": 5} trailing"#),
            Ok(Command::new(5, 0))
        );
        assert_eq!(
            decode_command(br#"{"budget": 2}{"budget": 9}"#),
            Ok(Command::new(0, 2))
        );
    }

    #[test]
    fn test_last_duplicate_field_wins() {
        let cmd = decode_command(br#"{"torque": 1, "torque": 2}"#).unwrap();
        assert_eq!(cmd.torque, 2);
    }

    proptest! {
        #[test]
        fn prop_any_i32_pair_decodes(torque in any::<i32>(), budget in any::<i32>()) {
            let mut buf = heapless::String::<64>::new();
            core::fmt::Write::write_fmt(
                &mut buf,
                format_args!("{{\"torque\":{},\"budget\":{}}}", torque, budget),
            )
            .unwrap();
            let cmd = decode_command(buf.as_bytes()).unwrap();
            prop_assert_eq!(cmd, Command::new(torque, budget));
        }

        #[test]
        fn prop_decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = decode_command(&bytes);
        }
    }
}
