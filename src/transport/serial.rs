//! # Serial Port Transport
//!
//! This module talks to a flip-dot controller over a serial line, usually a
//! USB to RS-485 adapter such as `/dev/ttyUSB0`.
//!
//! ## TTY Configuration
//!
//! The device is opened in raw mode so frame bytes reach the controller
//! unmodified:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//! - **Baud rate**: Input and output speed set to the configured rate
//!
//! The port is opened non-blocking so a line without carrier detect cannot
//! stall `open`. Once CLOCAL is set, blocking writes are restored.
//!
//! Flow control is off. Frame bytes such as `0x93` and payload bytes like
//! `0x11`/`0x13` must not be swallowed as XON/XOFF.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::debug;

use super::Transport;
use crate::error::PanelError;

/// Baud rate of AlfaZeta controllers out of the box
pub const DEFAULT_BAUD: u32 = 57600;

/// # Serial Panel Transport
///
/// ## Example
///
/// ```no_run
/// use flipdot_panel::transport::{SerialTransport, Transport};
///
/// let mut port = SerialTransport::open("/dev/ttyUSB0", 57600)?;
/// port.write(&[0x80, 0x82, 0x8F])?;
/// port.flush()?;
/// port.close()?;
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SerialTransport {
    device: String,
    file: Option<File>,
}

impl SerialTransport {
    /// Open `device` at `baud` in raw mode.
    ///
    /// ## Errors
    ///
    /// [`PanelError::PortOpen`] if:
    /// - The device doesn't exist
    /// - Permission denied (may need the dialout group)
    /// - The baud rate is not one the TTY layer supports
    /// - TTY configuration fails
    /// - The platform has no termios (non-unix targets)
    pub fn open<P: AsRef<Path>>(device: P, baud: u32) -> Result<Self, PanelError> {
        let path = device.as_ref();
        let port_open = |source: io::Error| PanelError::PortOpen {
            device: path.display().to_string(),
            source,
        };

        let file = open_options().open(path).map_err(port_open)?;
        configure_tty_raw(&file, baud).map_err(port_open)?;
        clear_nonblocking(&file).map_err(port_open)?;

        debug!("Opened {} at {} baud", path.display(), baud);
        Ok(Self {
            device: path.display().to_string(),
            file: Some(file),
        })
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    fn file(&mut self) -> io::Result<&mut File> {
        self.file.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "serial port already closed")
        })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.file()?.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            debug!("Closed {}", self.device);
        }
        Ok(())
    }
}

#[cfg(unix)]
fn open_options() -> OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options
        .read(true)
        .write(true)
        .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK);
    options
}

#[cfg(not(unix))]
fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true);
    options
}

/// Put the descriptor back into blocking mode.
#[cfg(unix)]
fn clear_nonblocking(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn clear_nonblocking(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Map a numeric baud rate to its termios speed constant.
#[cfg(unix)]
fn speed_for(baud: u32) -> Option<libc::speed_t> {
    let speed = match baud {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19200 => libc::B19200,
        38400 => libc::B38400,
        57600 => libc::B57600,
        115200 => libc::B115200,
        230400 => libc::B230400,
        _ => return None,
    };
    Some(speed)
}

/// Configure a serial file descriptor for raw 8N1 at `baud`.
///
/// ## What Gets Disabled
///
/// - **Input flags**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL, IXON, IXOFF, IXANY
/// - **Output flags**: OPOST
/// - **Local flags**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
/// - **Control flags**: CSIZE, PARENB, CSTOPB, CRTSCTS (then CS8, CLOCAL, CREAD are set)
#[cfg(unix)]
fn configure_tty_raw(file: &File, baud: u32) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let speed = speed_for(baud).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported baud rate {}", baud),
        )
    })?;
    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB | libc::CSTOPB | libc::CRTSCTS);
    termios.c_cflag |= libc::CS8 | libc::CLOCAL | libc::CREAD;

    unsafe {
        if libc::cfsetispeed(&mut termios, speed) != 0 || libc::cfsetospeed(&mut termios, speed) != 0
        {
            return Err(io::Error::last_os_error());
        }
        if libc::tcsetattr(fd, libc::TCSANOW, &termios) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File, baud: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot set {} baud without termios", baud),
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_baud() {
        assert_eq!(DEFAULT_BAUD, 57600);
    }

    #[cfg(unix)]
    #[test]
    fn test_speed_table() {
        assert_eq!(speed_for(9600), Some(libc::B9600));
        assert_eq!(speed_for(57600), Some(libc::B57600));
        assert_eq!(speed_for(115200), Some(libc::B115200));
        assert_eq!(speed_for(0), None);
        assert_eq!(speed_for(12345), None);
    }

    #[test]
    fn test_open_missing_device() {
        let err = SerialTransport::open("/dev/does-not-exist-flipdot", DEFAULT_BAUD)
            .err()
            .unwrap();
        match err {
            PanelError::PortOpen { device, source } => {
                assert_eq!(device, "/dev/does-not-exist-flipdot");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_regular_file_is_not_a_tty() {
        let path = std::env::temp_dir().join(format!("flipdot-not-a-tty-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();
        let result = SerialTransport::open(&path, DEFAULT_BAUD);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(PanelError::PortOpen { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_opens_nonblocking_then_clears_it() {
        use std::os::unix::io::AsRawFd;

        let status = |file: &File| unsafe { libc::fcntl(file.as_raw_fd(), libc::F_GETFL) };

        let path = std::env::temp_dir().join(format!("flipdot-nonblock-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();
        let file = open_options().open(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_ne!(status(&file) & libc::O_NONBLOCK, 0);
        clear_nonblocking(&file).unwrap();
        let flags = status(&file);
        assert!(flags >= 0);
        assert_eq!(flags & libc::O_NONBLOCK, 0);
    }

    #[cfg(not(unix))]
    #[test]
    fn test_baud_unsupported_without_termios() {
        let path = std::env::temp_dir().join(format!("flipdot-no-termios-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();
        let result = SerialTransport::open(&path, DEFAULT_BAUD);
        let _ = std::fs::remove_file(&path);
        match result {
            Err(PanelError::PortOpen { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::Unsupported);
                assert!(source.to_string().contains("57600"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("opened without termios"),
        }
    }
}
