//! # Flip-Dot Serial Protocol
//!
//! This module provides the wire format for AlfaZeta-style flip-dot
//! controllers: command bytes, addressing and frame encoding.
//!
//! ## Module Structure
//!
//! - [`commands`]: Frame markers and the command table
//! - [`address`]: Panel addresses and the broadcast rule
//! - [`frame`]: Column packing, frame assembly and inspection
//!
//! ## Usage Example
//!
//! ```
//! use flipdot_panel::panel::Bitmap;
//! use flipdot_panel::protocol::{Address, frame};
//!
//! let mut bitmap = Bitmap::new(28, 7).unwrap();
//! bitmap.set(0, 0, true);
//!
//! // Buffer on every panel, then show
//! let queued = frame::encode(&bitmap, &Address::broadcast(), false).unwrap();
//! assert_eq!(&queued[..3], &[0x80, 0x84, 0xFF]);
//! assert_eq!(queued[3], 0x40);
//! ```

pub mod address;
pub mod commands;
pub mod frame;

pub use address::Address;
pub use frame::{FrameParts, encode};
