//! # Printer Transport Layer
//!
//! This module provides communication backends for sending protocol data to
//! the printer.
//!
//! ## Available Transports
//!
//! - [`serial`]: Raw serial TTY for a physically connected printer (Linux)
//! - [`diagnostic`]: In-memory sink that hex-logs writes, for dry runs and
//!   protocol tests
//!
//! The protocol driver is generic over [`Transport`], so a new backend
//! (network, USB HID) only needs the three-method capability set.

use std::io;

pub mod diagnostic;
pub mod serial;

pub use diagnostic::{DIAGNOSTIC_PORT, DiagnosticTransport};
pub use serial::SerialTransport;

/// A byte channel to the printer.
///
/// The protocol needs exactly three capabilities: write some bytes, flush
/// them to the device, and collect whatever response is available. Reads
/// may legitimately return nothing; the P12 stays silent after most
/// packets.
pub trait Transport {
    /// Write up to `data.len()` bytes, returning how many were accepted.
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Push any buffered bytes out to the device.
    fn flush(&mut self) -> io::Result<()>;

    /// Read the available response bytes, bounded by the transport's
    /// timeout. An empty vec means the printer said nothing.
    fn read(&mut self) -> io::Result<Vec<u8>>;

    /// Write an entire buffer, retrying partial writes.
    ///
    /// Serial links may accept a large payload in arbitrary fragments; a
    /// protocol packet must nevertheless be delivered whole before the
    /// following flush.
    fn write_all(&mut self, mut data: &[u8]) -> io::Result<()> {
        while !data.is_empty() {
            match self.write(data) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "transport accepted no bytes",
                    ));
                }
                Ok(n) => data = &data[n..],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Hex-encode bytes for diagnostic logging (lowercase, no separators).
pub(crate) fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
