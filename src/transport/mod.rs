//! # Panel Transport Layer
//!
//! This module provides the byte pipes a [`Panel`](crate::panel::Panel)
//! writes frames into.
//!
//! ## Available Transports
//!
//! - [`serial`]: Raw TTY serial port (USB-RS485 adapters and the like)
//! - [`mock`]: In-memory recorder for tests and dry runs
//!
//! A panel without hardware uses [`Connection::Debug`], which never touches a
//! transport and logs the frame instead.

use std::io;

use log::info;

use crate::error::PanelError;

pub mod mock;
pub mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

/// Capabilities a panel needs from a byte stream.
pub trait Transport: Send {
    /// Write `data` with a single call, returning how many bytes were accepted.
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Push buffered bytes to the device.
    fn flush(&mut self) -> io::Result<()>;

    /// Release the device. Calling it twice is harmless.
    fn close(&mut self) -> io::Result<()>;
}

/// Where a panel's frames go.
pub enum Connection {
    /// Frames are written to hardware.
    Live(Box<dyn Transport>),
    /// No hardware attached; frames are logged with a picture of the bitmap.
    Debug,
    /// A live transport that [`Connection::close`] already released.
    Closed,
}

impl Connection {
    /// Open a serial connection, or fall back to debug mode when `device` is
    /// empty or `baud` is zero.
    pub fn open(device: &str, baud: u32) -> Result<Self, PanelError> {
        if device.is_empty() || baud == 0 {
            info!("Running in debug mode, with no panel connection");
            return Ok(Self::Debug);
        }
        let transport = SerialTransport::open(device, baud)?;
        Ok(Self::Live(Box::new(transport)))
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Release the live transport. Debug and closed connections are left as is.
    pub fn close(&mut self) -> Result<(), PanelError> {
        if let Self::Live(transport) = self {
            let result = transport.close();
            *self = Self::Closed;
            result?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live(_) => f.write_str("Live"),
            Self::Debug => f.write_str("Debug"),
            Self::Closed => f.write_str("Closed"),
        }
    }
}
