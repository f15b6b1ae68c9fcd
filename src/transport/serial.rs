//! # Serial Port Transport
//!
//! This module provides communication with the P12 over a serial device,
//! either its USB interface (`/dev/ttyUSB0`) or an RFCOMM binding of the
//! Bluetooth variant (`/dev/rfcomm0`).
//!
//! ## TTY Configuration
//!
//! The device is opened read/write and configured raw so binary data passes
//! through unmodified:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP,
//!   INLCR, IGNCR, ICRNL
//! - **No software flow control**: Disable IXON, IXOFF, IXANY. This matters
//!   for the P12 in particular: 0x11 (XON/DC1) and 0x13 (XOFF/DC3) both
//!   appear inside its initialization packets and must travel as data
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! ## Read Timeout
//!
//! Reads are bounded at 10 seconds (VMIN = 0, VTIME = 100): a read returns
//! whatever bytes have arrived, possibly none. The P12 acknowledges some
//! packets and ignores others, so an empty response is normal and not an
//! error.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::LabelError;
use crate::transport::Transport;

/// Read timeout in tenths of a second (termios VTIME units)
const READ_TIMEOUT_DS: u8 = 100;

/// Response read buffer size; the P12's replies are a handful of bytes
const RESPONSE_BUF: usize = 64;

/// # Hardware Serial Transport
///
/// Wraps the serial device file. The descriptor is closed when the
/// transport drops, which the print job guarantees happens on every exit
/// path, success or failure.
///
/// ## Example
///
/// ```no_run
/// use p12_label::transport::{SerialTransport, Transport};
///
/// let mut transport = SerialTransport::open("/dev/ttyUSB0")?;
/// transport.write_all(&[0x1F, 0x11, 0x38])?;
/// transport.flush()?;
/// let response = transport.read()?;
/// # Ok::<(), p12_label::LabelError>(())
/// ```
#[derive(Debug)]
pub struct SerialTransport {
    file: File,
}

impl SerialTransport {
    /// Open and configure the serial device.
    ///
    /// ## Errors
    ///
    /// Returns [`LabelError::Port`] if:
    /// - The device doesn't exist
    /// - Permission denied (membership in the dialout group is usually
    ///   needed)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, LabelError> {
        let path = device.as_ref();
        let port_error = |source| LabelError::Port {
            port: path.display().to_string(),
            source,
        };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(port_error)?;

        configure_tty_raw(&file, READ_TIMEOUT_DS).map_err(port_error)?;

        Ok(Self { file })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.file.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        drain(&self.file)
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = [0u8; RESPONSE_BUF];
        let n = self.file.read(&mut buf)?;
        Ok(buf[..n].to_vec())
    }
}

/// Configure a descriptor for raw TTY mode with a bounded read timeout.
///
/// This disables all input/output processing so binary data passes through
/// unmodified, and sets VMIN = 0 / VTIME = `timeout_ds` so reads return
/// whatever arrived within the timeout instead of blocking forever.
#[cfg(unix)]
fn configure_tty_raw(file: &File, timeout_ds: u8) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    // Get current terminal attributes
    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    // Input flags: disable all processing, including XON/XOFF flow control
    // (0x11 and 0x13 occur inside the init packets)
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

    // Output flags: disable post-processing
    termios.c_oflag &= !libc::OPOST;

    // Local flags: disable echo, canonical mode, signals
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    // Control flags: 8-bit characters, no parity
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // Bounded reads: return available bytes within the timeout, or nothing
    termios.c_cc[libc::VMIN] = 0;
    termios.c_cc[libc::VTIME] = timeout_ds;

    // Apply settings immediately
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File, _timeout_ds: u8) -> io::Result<()> {
    // On non-Unix platforms, skip TTY configuration
    Ok(())
}

/// Block until every written byte has actually left the kernel for the
/// device. `File::flush` is a no-op on a TTY descriptor, which would make
/// the protocol's write-flush-read lockstep meaningless.
#[cfg(unix)]
fn drain(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    if unsafe { libc::tcdrain(file.as_raw_fd()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn drain(mut file: &File) -> io::Result<()> {
    file.flush()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device_is_port_error() {
        let err = SerialTransport::open("/definitely/not/a/serial/device").unwrap_err();
        match err {
            LabelError::Port { port, .. } => {
                assert_eq!(port, "/definitely/not/a/serial/device");
            }
            other => panic!("expected Port error, got {:?}", other),
        }
    }

    // Write/flush/read behavior needs a connected printer; exercised
    // manually against hardware.
}
