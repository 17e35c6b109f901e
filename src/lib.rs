//! # flipdot-panel - Flip-Dot Display Driver
//!
//! flipdot-panel drives AlfaZeta-style flip-dot boards over a serial line.
//! It provides:
//!
//! - **Bitmap model**: A fixed grid of dot states with clamped writes
//! - **Protocol implementation**: Column packing and command framing
//! - **Transport**: Raw serial port, or a debug mode that only logs
//! - **Panel controller**: Send, queue, broadcast refresh and raw frames
//!
//! ## Quick Start
//!
//! ```no_run
//! use flipdot_panel::{Panel, render::patterns};
//!
//! // Open a 28x7 board on the first USB serial adapter
//! let mut panel = Panel::new(28, 7, "/dev/ttyUSB0", 57600)?;
//!
//! // Draw something
//! patterns::draw(&patterns::Checker, panel.bitmap_mut());
//! panel.set(0, 0, false);
//!
//! // Show it
//! panel.send()?;
//! panel.close()?;
//!
//! # Ok::<(), flipdot_panel::PanelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`panel`] | Bitmap, panel controller and configuration |
//! | [`protocol`] | Command table, addressing, frame encoding |
//! | [`transport`] | Serial and mock transports |
//! | [`render`] | Test patterns |
//! | [`error`] | Error types |
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade. Debug-mode frames are logged
//! at `info`, live writes at `debug`, skipped dots and dropped queue frames at
//! `warn`.

pub mod error;
pub mod panel;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::PanelError;
pub use panel::{Bitmap, Panel, PanelConfig};
pub use protocol::Address;
pub use transport::{SerialTransport, Transport};
