//! # Flip-Dot Controller Commands
//!
//! This module holds the byte constants and the command table of the serial
//! protocol spoken by AlfaZeta-style flip-dot controllers.
//!
//! ## Frame Structure
//!
//! Every message on the wire is framed the same way:
//!
//! ```text
//! ┌──────┬─────────┬──────────────┬──────────────┬──────┐
//! │ 0x80 │ command │ address 0..N │ payload 0..N │ 0x8F │
//! └──────┴─────────┴──────────────┴──────────────┴──────┘
//! ```
//!
//! The command byte encodes both the payload length (one byte per panel
//! column) and whether the panel should display the data immediately
//! ("refresh") or only buffer it until the next refresh ("queue").
//!
//! ## Command Table
//!
//! | Payload bytes | Queue | Refresh |
//! |---------------|-------|---------|
//! | 112 | 0x81 | 0x82 |
//! | 56  | 0x86 | 0x85 |
//! | 28  | 0x84 | 0x83 |
//! | 14  | 0x93 | 0x92 |
//! | 7   | 0x88 | 0x87 |
//! | 0   | 0x82 | 0x82 |
//!
//! The pairs are vendor constants. They are not related arithmetically and
//! the queue/refresh order flips between rows.

// ============================================================================
// FRAME CONSTANTS
// ============================================================================

/// Start of frame marker
pub const START: u8 = 0x80;

/// End of frame marker
pub const END: u8 = 0x8F;

/// Address byte that every panel on the bus listens to
pub const BROADCAST: u8 = 0xFF;

/// Start, command and end bytes wrapped around every frame
pub const FRAMING_LEN: usize = 3;

// ============================================================================
// COMMAND BYTES
// ============================================================================

/// 112 columns, buffer only
pub const QUEUE_112: u8 = 0x81;
/// 112 columns, display now
pub const REFRESH_112: u8 = 0x82;
/// 56 columns, buffer only
pub const QUEUE_56: u8 = 0x86;
/// 56 columns, display now
pub const REFRESH_56: u8 = 0x85;
/// 28 columns, buffer only
pub const QUEUE_28: u8 = 0x84;
/// 28 columns, display now
pub const REFRESH_28: u8 = 0x83;
/// 14 columns, buffer only
pub const QUEUE_14: u8 = 0x93;
/// 14 columns, display now
pub const REFRESH_14: u8 = 0x92;
/// 7 columns, buffer only
pub const QUEUE_7: u8 = 0x88;
/// 7 columns, display now
pub const REFRESH_7: u8 = 0x87;

/// Payload-less frame: show whatever every panel has buffered.
///
/// Shares its value with [`REFRESH_112`]; the controller tells them apart by
/// frame length.
pub const REFRESH_ALL: u8 = 0x82;

/// Payload lengths (panel widths) the controller understands.
pub const SUPPORTED_LENGTHS: &[usize] = &[7, 14, 28, 56, 112];

/// # Command Lookup
///
/// Select the command byte for a payload of `payload_len` bytes.
///
/// Returns `None` when the controller has no command for that length.
///
/// ## Example
///
/// ```
/// use flipdot_panel::protocol::commands;
///
/// assert_eq!(commands::command_for(7, false), Some(0x88));
/// assert_eq!(commands::command_for(7, true), Some(0x87));
/// assert_eq!(commands::command_for(0, false), Some(0x82));
/// assert_eq!(commands::command_for(13, true), None);
/// ```
pub fn command_for(payload_len: usize, refresh: bool) -> Option<u8> {
    match (payload_len, refresh) {
        (112, false) => Some(QUEUE_112),
        (112, true) => Some(REFRESH_112),
        (56, false) => Some(QUEUE_56),
        (56, true) => Some(REFRESH_56),
        (28, false) => Some(QUEUE_28),
        (28, true) => Some(REFRESH_28),
        (14, false) => Some(QUEUE_14),
        (14, true) => Some(REFRESH_14),
        (7, false) => Some(QUEUE_7),
        (7, true) => Some(REFRESH_7),
        (0, _) => Some(REFRESH_ALL),
        _ => None,
    }
}

/// Reverse lookup: payload length and refresh flag for a command byte.
///
/// `0x82` reports the 112-column refresh; callers that see an empty frame
/// body should treat it as [`REFRESH_ALL`].
pub fn describe(command: u8) -> Option<(usize, bool)> {
    match command {
        QUEUE_112 => Some((112, false)),
        REFRESH_112 => Some((112, true)),
        QUEUE_56 => Some((56, false)),
        REFRESH_56 => Some((56, true)),
        QUEUE_28 => Some((28, false)),
        REFRESH_28 => Some((28, true)),
        QUEUE_14 => Some((14, false)),
        REFRESH_14 => Some((14, true)),
        QUEUE_7 => Some((7, false)),
        REFRESH_7 => Some((7, true)),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
