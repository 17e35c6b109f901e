//! # Error Types
//!
//! This module defines error types used throughout the flipdot-panel library.

use std::io;

use thiserror::Error;

/// Main error type for panel operations
#[derive(Debug, Error)]
pub enum PanelError {
    /// Payload byte count has no entry in the command table
    #[error("Unknown byte length {length} to send to board")]
    UnsupportedLength { length: usize },

    /// The serial device could not be opened or configured
    #[error("Could not open panel port {device}: {source}")]
    PortOpen {
        device: String,
        #[source]
        source: io::Error,
    },

    /// Transport accepted a different number of bytes than the frame holds
    #[error("Didn't send all bytes to the board, expected {expected} bytes, got {actual} bytes")]
    ShortWrite { expected: usize, actual: usize },

    /// The transport write itself failed
    #[error("Couldn't write to port: {0}")]
    WriteFailed(#[source] io::Error),

    /// Panel dimensions must both be positive
    #[error("Invalid panel dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Coordinate outside the bitmap (strict accessors only)
    #[error("Dot ({x}, {y}) out of range for {width}x{height} panel")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Bytes that do not form a well-formed frame
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// The panel's transport was already released
    #[error("Panel is closed")]
    Closed,

    /// Invalid profile, address or config file contents
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_write_message_carries_both_counts() {
        let err = PanelError::ShortWrite {
            expected: 5,
            actual: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 5"));
        assert!(msg.contains("got 4"));
    }

    #[test]
    fn test_unsupported_length_message() {
        let err = PanelError::UnsupportedLength { length: 13 };
        assert_eq!(err.to_string(), "Unknown byte length 13 to send to board");
    }
}
