//! # Panel Addressing
//!
//! Panels on a shared RS-485 bus are selected by one or more address bytes
//! placed right after the command byte. An empty address means "every panel"
//! and goes on the wire as the broadcast byte `0xFF`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::commands::BROADCAST;
use crate::error::PanelError;

/// Address bytes of one physical panel. Empty means broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Vec<u8>);

impl Address {
    /// The all-panels address.
    pub const fn broadcast() -> Self {
        Self(Vec::new())
    }

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn is_broadcast(&self) -> bool {
        self.0.is_empty()
    }

    /// The stored bytes, empty for broadcast.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Bytes to put in a frame: the stored bytes, or `[0xFF]` for broadcast.
    pub fn wire_bytes(&self) -> &[u8] {
        if self.0.is_empty() {
            &[BROADCAST]
        } else {
            &self.0
        }
    }

    /// Parse hex address bytes.
    ///
    /// Accepts separators (`,`, `:`, whitespace) and optional `0x` prefixes:
    /// `"01"`, `"0x01,0x02"`, `"01:02"`. An empty string is broadcast.
    pub fn parse(s: &str) -> Result<Self, PanelError> {
        parse_hex_bytes(s).map(Self)
    }
}

impl From<Vec<u8>> for Address {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_broadcast() {
            return f.write_str("broadcast");
        }
        f.write_str(&to_hex(&self.0))
    }
}

/// Parse a list of hex bytes separated by commas, colons or whitespace.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, PanelError> {
    s.split(|c: char| c == ',' || c == ':' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let digits = part
                .strip_prefix("0x")
                .or_else(|| part.strip_prefix("0X"))
                .unwrap_or(part);
            u8::from_str_radix(digits, 16)
                .map_err(|_| PanelError::Config(format!("Invalid hex byte: {}", part)))
        })
        .collect()
}

/// Lowercase hex dump without separators, e.g. `80887f8f`.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
