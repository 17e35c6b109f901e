//! # Frame Encoding
//!
//! Turns a [`Bitmap`] into the byte-exact message a flip-dot controller
//! accepts.
//!
//! ## Column Packing
//!
//! Each panel column becomes one payload byte. Rows are shifted in top to
//! bottom, so row 0 ends up in the highest used bit and the last row in bit 0:
//!
//! ```text
//! column (height 7)    byte
//!   row 0  ●           bit 6
//!   row 1  ○           bit 5
//!   row 2  ○           bit 4      ●○○●○○● → 0b1001001 = 0x49
//!   row 3  ●           bit 3
//!   row 4  ○           bit 2
//!   row 5  ○           bit 1
//!   row 6  ●           bit 0
//! ```
//!
//! Panels taller than 8 rows do not fit in a byte; only the bottom 8 rows
//! survive the shift.
//!
//! ## Addressing
//!
//! The frame carries the panel's address bytes, or `0xFF` when the address
//! is empty (broadcast). A payload-less frame carries no address at all.

use super::address::Address;
use super::commands::{self, END, FRAMING_LEN, REFRESH_ALL, START};
use crate::error::PanelError;
use crate::panel::Bitmap;

/// Pack one column of dots into a byte, first row in the highest used bit.
pub fn pack_column(dots: &[bool]) -> u8 {
    dots.iter().fold(0u8, |acc, &dot| (acc << 1) | u8::from(dot))
}

/// Inverse of [`pack_column`] for a column of `height` rows.
///
/// Rows above bit 7 (tall panels) come back as off.
pub fn unpack_column(byte: u8, height: usize) -> Vec<bool> {
    (0..height)
        .map(|y| {
            let shift = height - 1 - y;
            shift < 8 && (byte >> shift) & 1 == 1
        })
        .collect()
}

/// Pack every column of the bitmap, left to right. One byte per column.
pub fn pack_columns(bitmap: &Bitmap) -> Vec<u8> {
    bitmap.columns().map(pack_column).collect()
}

/// # Assemble a Frame
///
/// Wrap an already packed payload into a complete frame:
/// `[0x80, command, address.., payload.., 0x8F]`.
///
/// An empty payload always becomes the refresh-all frame `80 82 8F`,
/// whatever `address` and `refresh` say.
///
/// ## Errors
///
/// [`PanelError::UnsupportedLength`] when the payload length has no command.
///
/// ## Example
///
/// ```
/// use flipdot_panel::protocol::{Address, frame};
///
/// let bytes = frame::assemble(&[0x7F; 7], &Address::broadcast(), false).unwrap();
/// assert_eq!(&bytes[..3], &[0x80, 0x88, 0xFF]);
/// assert_eq!(bytes.len(), 1 + 7 + 3);
/// ```
pub fn assemble(payload: &[u8], address: &Address, refresh: bool) -> Result<Vec<u8>, PanelError> {
    let command = commands::command_for(payload.len(), refresh).ok_or(
        PanelError::UnsupportedLength {
            length: payload.len(),
        },
    )?;
    let address: &[u8] = if payload.is_empty() {
        &[]
    } else {
        address.wire_bytes()
    };

    let mut frame = Vec::with_capacity(FRAMING_LEN + address.len() + payload.len());
    frame.push(START);
    frame.push(command);
    frame.extend_from_slice(address);
    frame.extend_from_slice(payload);
    frame.push(END);
    Ok(frame)
}

/// Encode the whole bitmap for `address`.
///
/// `refresh` selects between displaying immediately and buffering on the
/// panel until the next refresh.
pub fn encode(bitmap: &Bitmap, address: &Address, refresh: bool) -> Result<Vec<u8>, PanelError> {
    assemble(&pack_columns(bitmap), address, refresh)
}

/// The frame that makes every panel display what it has buffered.
pub fn refresh_all() -> Vec<u8> {
    vec![START, REFRESH_ALL, END]
}

// ============================================================================
// INSPECTION
// ============================================================================

/// A frame split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameParts {
    pub command: u8,
    pub refresh: bool,
    pub address: Vec<u8>,
    pub payload: Vec<u8>,
}

/// Split a frame produced by [`assemble`] into command, address and payload.
///
/// The payload length is implied by the command byte; whatever sits between
/// the command and the payload is the address.
pub fn inspect(frame: &[u8]) -> Result<FrameParts, PanelError> {
    if frame.len() < FRAMING_LEN {
        return Err(PanelError::InvalidFrame(format!(
            "{} bytes is shorter than the framing",
            frame.len()
        )));
    }
    if frame[0] != START || frame[frame.len() - 1] != END {
        return Err(PanelError::InvalidFrame(
            "missing start or end marker".to_string(),
        ));
    }

    let command = frame[1];
    let body = &frame[2..frame.len() - 1];

    if body.is_empty() && command == REFRESH_ALL {
        return Ok(FrameParts {
            command,
            refresh: true,
            address: Vec::new(),
            payload: Vec::new(),
        });
    }

    let (payload_len, refresh) = commands::describe(command)
        .ok_or_else(|| PanelError::InvalidFrame(format!("unknown command 0x{:02x}", command)))?;
    if body.len() < payload_len {
        return Err(PanelError::InvalidFrame(format!(
            "command 0x{:02x} needs {} payload bytes, frame has {}",
            command,
            payload_len,
            body.len()
        )));
    }

    let (address, payload) = body.split_at(body.len() - payload_len);
    Ok(FrameParts {
        command,
        refresh,
        address: address.to_vec(),
        payload: payload.to_vec(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
