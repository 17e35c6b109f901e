//! # Panel Controller
//!
//! A [`Panel`] owns the dot bitmap of one physical board (or one addressing
//! target) and sends it through its connection.
//!
//! ## Send, Queue, Refresh
//!
//! - [`Panel::send`] shows the bitmap immediately.
//! - [`Panel::queue`] stores the bitmap on the board without showing it.
//! - [`Panel::refresh`] broadcasts this bitmap with a refresh, so every board
//!   on the bus shows this one bitmap.
//!
//! Several boards on one bus update at the same instant by queueing to each
//! address and then sending the payload-less refresh frame once. Each board
//! then shows what it has queued:
//!
//! ```
//! use flipdot_panel::panel::Panel;
//! use flipdot_panel::protocol::{Address, frame};
//!
//! let mut left = Panel::debug(28, 7)?.with_address(Address::new(vec![1]));
//! let mut right = Panel::debug(28, 7)?.with_address(Address::new(vec![2]));
//!
//! left.set(0, 0, true);
//! right.set(27, 6, true);
//! left.queue();
//! right.queue();
//! left.send_raw(&frame::refresh_all())?;
//!
//! # Ok::<(), flipdot_panel::PanelError>(())
//! ```
//!
//! ## Modes
//!
//! A panel opened without a device (or with baud 0) runs in debug mode: frames
//! are logged as hex together with a picture of the bitmap, and nothing is
//! written anywhere. The mode is fixed when the panel is created.

pub mod bitmap;
pub mod config;

pub use bitmap::{Bitmap, Glyphs, Render};
pub use config::{PanelConfig, PanelGeometry};

use log::{debug, info, warn};

use crate::error::PanelError;
use crate::protocol::address::to_hex;
use crate::protocol::{Address, frame};
use crate::transport::{Connection, Transport};

/// Rows that fit in one payload byte
pub const MAX_HEIGHT: usize = 8;

/// One flip-dot board and its connection.
#[derive(Debug)]
pub struct Panel {
    bitmap: Bitmap,
    address: Address,
    connection: Connection,
    glyphs: Glyphs,
}

impl Panel {
    /// Create a panel of `width × height` dots, all off.
    ///
    /// Opens `device` at `baud`; an empty device or zero baud selects debug
    /// mode. Call [`Panel::close`] when done, or let the panel drop.
    pub fn new(width: usize, height: usize, device: &str, baud: u32) -> Result<Self, PanelError> {
        let bitmap = Bitmap::new(width, height)?;
        Ok(Self::assemble(bitmap, Connection::open(device, baud)?))
    }

    /// Panel that only logs its frames.
    pub fn debug(width: usize, height: usize) -> Result<Self, PanelError> {
        Self::with_connection(width, height, Connection::Debug)
    }

    /// Panel writing to a caller-supplied transport.
    pub fn with_transport<T: Transport + 'static>(
        width: usize,
        height: usize,
        transport: T,
    ) -> Result<Self, PanelError> {
        Self::with_connection(width, height, Connection::Live(Box::new(transport)))
    }

    pub fn with_connection(
        width: usize,
        height: usize,
        connection: Connection,
    ) -> Result<Self, PanelError> {
        Ok(Self::assemble(Bitmap::new(width, height)?, connection))
    }

    fn assemble(bitmap: Bitmap, connection: Connection) -> Self {
        if bitmap.height() > MAX_HEIGHT {
            warn!(
                "Panel height {} exceeds {} rows; only the bottom {} rows are sent",
                bitmap.height(),
                MAX_HEIGHT,
                MAX_HEIGHT
            );
        }
        Self {
            bitmap,
            address: Address::broadcast(),
            connection,
            glyphs: Glyphs::default(),
        }
    }

    /// Target a specific board instead of broadcasting.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Glyphs used when debug mode logs the bitmap.
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_debug(&self) -> bool {
        self.connection.is_debug()
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        self.bitmap.get(x, y)
    }

    /// Set one dot; outside coordinates are logged and ignored.
    pub fn set(&mut self, x: i32, y: i32, state: bool) {
        self.bitmap.set(x, y, state);
    }

    pub fn clear(&mut self, state: bool) {
        self.bitmap.clear(state);
    }

    /// The bitmap rendered with this panel's glyphs.
    pub fn render(&self) -> Render<'_> {
        self.bitmap.render().with_glyphs(self.glyphs)
    }

    /// The frame [`send`](Self::send) (`refresh = true`) or
    /// [`queue`](Self::queue) (`refresh = false`) would write.
    pub fn frame(&self, refresh: bool) -> Result<Vec<u8>, PanelError> {
        frame::encode(&self.bitmap, &self.address, refresh)
    }

    /// Show the bitmap on the board now.
    pub fn send(&mut self) -> Result<(), PanelError> {
        let frame = self.frame(true)?;
        self.transmit(&frame)
    }

    /// Store the bitmap on the board without showing it.
    ///
    /// Failures are logged rather than returned; use
    /// [`try_queue`](Self::try_queue) to see them.
    pub fn queue(&mut self) {
        if let Err(e) = self.try_queue() {
            warn!("Queue to {} failed: {}", self.address, e);
        }
    }

    pub fn try_queue(&mut self) -> Result<(), PanelError> {
        let frame = self.frame(false)?;
        self.transmit(&frame)
    }

    /// Broadcast this bitmap with a refresh.
    ///
    /// Every board on the bus replaces its dots with this bitmap, overwriting
    /// anything it had queued. To show each board's own queued data, send
    /// [`frame::refresh_all`] through [`send_raw`](Self::send_raw) instead.
    pub fn refresh(&mut self) -> Result<(), PanelError> {
        let frame = frame::encode(&self.bitmap, &Address::broadcast(), true)?;
        self.transmit(&frame)
    }

    /// Write caller-built bytes, e.g. [`frame::refresh_all`].
    pub fn send_raw(&mut self, data: &[u8]) -> Result<(), PanelError> {
        info!("Sending raw data: {}", to_hex(data));
        self.transmit(data)
    }

    /// Release the transport. Safe to call more than once.
    pub fn close(&mut self) -> Result<(), PanelError> {
        self.connection.close()
    }

    fn transmit(&mut self, frame: &[u8]) -> Result<(), PanelError> {
        match &mut self.connection {
            Connection::Debug => {
                info!("Message: {}", to_hex(frame));
                for line in self.bitmap.render().with_glyphs(self.glyphs).lines() {
                    info!("{}", line);
                }
                Ok(())
            }
            Connection::Closed => Err(PanelError::Closed),
            Connection::Live(transport) => {
                debug!("Writing {} bytes: {}", frame.len(), to_hex(frame));
                let written = transport.write(frame).map_err(PanelError::WriteFailed)?;
                transport.flush().map_err(PanelError::WriteFailed)?;
                if written != frame.len() {
                    return Err(PanelError::ShortWrite {
                        expected: frame.len(),
                        actual: written,
                    });
                }
                Ok(())
            }
        }
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Closing panel failed: {}", e);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use pretty_assertions::assert_eq;

    fn mock_panel(width: usize, height: usize) -> (Panel, MockTransport) {
        let mock = MockTransport::new();
        let panel = Panel::with_transport(width, height, mock.clone()).unwrap();
        (panel, mock)
    }

    #[test]
    fn test_new_debug_panel_is_blank() {
        let panel = Panel::new(28, 7, "", 0).unwrap();
        assert!(panel.is_debug());
        assert!(panel.address().is_broadcast());
        assert!(panel.bitmap().columns().all(|c| c.iter().all(|&d| !d)));
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            Panel::new(0, 7, "", 0),
            Err(PanelError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_new_rejects_oversized() {
        assert!(matches!(
            Panel::new(usize::MAX, 7, "", 0),
            Err(PanelError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Panel::debug(1 << 16, 1 << 16),
            Err(PanelError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_new_missing_port() {
        let err = Panel::new(28, 7, "/dev/does-not-exist-flipdot", 57600).unwrap_err();
        assert!(matches!(err, PanelError::PortOpen { .. }));
    }

    #[test]
    fn test_debug_send_never_writes() {
        let mut panel = Panel::debug(7, 7).unwrap();
        panel.clear(true);
        assert!(panel.send().is_ok());
        assert!(panel.try_queue().is_ok());
        assert!(panel.refresh().is_ok());
    }

    #[test]
    fn test_send_writes_refresh_frame() {
        let (mut panel, mock) = mock_panel(7, 1);
        panel.clear(true);
        panel.send().unwrap();
        assert_eq!(
            mock.writes(),
            vec![vec![0x80, 0x87, 0xFF, 1, 1, 1, 1, 1, 1, 1, 0x8F]]
        );
        assert_eq!(mock.flush_count(), 1);
    }

    #[test]
    fn test_queue_writes_queue_frame_with_address() {
        let (panel, mock) = mock_panel(7, 7);
        let mut panel = panel.with_address(Address::new(vec![0x02]));
        panel.set(0, 6, true);
        panel.queue();
        assert_eq!(
            mock.writes(),
            vec![vec![0x80, 0x88, 0x02, 0x01, 0, 0, 0, 0, 0, 0, 0x8F]]
        );
    }

    #[test]
    fn test_refresh_broadcasts() {
        let (panel, mock) = mock_panel(14, 7);
        let mut panel = panel.with_address(Address::new(vec![0x09]));
        panel.refresh().unwrap();
        let writes = mock.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(&writes[0][..3], &[0x80, 0x92, 0xFF]);
        assert_eq!(writes[0].len(), 1 + 14 + 3);
    }

    #[test]
    fn test_short_write() {
        let mock = MockTransport::new().short_by(1);
        let mut panel = Panel::with_transport(7, 7, mock).unwrap();
        let err = panel.send().unwrap_err();
        assert!(matches!(
            err,
            PanelError::ShortWrite {
                expected: 11,
                actual: 10
            }
        ));
    }

    #[test]
    fn test_write_failure_is_wrapped() {
        let mut panel = Panel::with_transport(7, 7, MockTransport::new().failing()).unwrap();
        assert!(matches!(panel.send(), Err(PanelError::WriteFailed(_))));
        assert!(matches!(panel.refresh(), Err(PanelError::WriteFailed(_))));
        // Swallowed on the queue path
        panel.queue();
        assert!(matches!(panel.try_queue(), Err(PanelError::WriteFailed(_))));
    }

    #[test]
    fn test_unsupported_width_never_writes() {
        let (mut panel, mock) = mock_panel(10, 7);
        assert!(matches!(
            panel.send(),
            Err(PanelError::UnsupportedLength { length: 10 })
        ));
        panel.queue();
        assert!(mock.writes().is_empty());
    }

    #[test]
    fn test_frame_matches_sent_bytes() {
        let (mut panel, mock) = mock_panel(28, 7);
        panel.set(5, 3, true);
        let expected = panel.frame(true).unwrap();
        panel.send().unwrap();
        assert_eq!(mock.writes(), vec![expected]);
    }

    #[test]
    fn test_send_raw() {
        let (mut panel, mock) = mock_panel(7, 7);
        panel.send_raw(&frame::refresh_all()).unwrap();
        assert_eq!(mock.writes(), vec![vec![0x80, 0x82, 0x8F]]);
    }

    #[test]
    fn test_close_idempotent_and_final() {
        let (mut panel, mock) = mock_panel(7, 7);
        panel.close().unwrap();
        panel.close().unwrap();
        assert_eq!(mock.close_count(), 1);
        assert!(matches!(panel.send(), Err(PanelError::Closed)));
        drop(panel);
        assert_eq!(mock.close_count(), 1);
    }

    #[test]
    fn test_drop_closes_transport() {
        let (panel, mock) = mock_panel(7, 7);
        drop(panel);
        assert_eq!(mock.close_count(), 1);
    }

    #[test]
    fn test_debug_close_is_noop() {
        let mut panel = Panel::debug(7, 7).unwrap();
        panel.close().unwrap();
        assert!(panel.is_debug());
        assert!(panel.send().is_ok());
    }
}
