//! # Print Job Driver
//!
//! Sequences one print job over a [`Transport`]: the fixed initialization
//! handshake, the raster image transfer, and the tape feed.
//!
//! ## State Machine
//!
//! ```text
//! Idle -> Initializing -> Transmitting -> Feeding -> Closed
//!              |               |             |
//!              +---------------+-------------+-----> Failed
//! ```
//!
//! No phase is retried. A transport failure in any phase aborts the rest of
//! the job: the printer has no error correction, so a half-sent image is a
//! lost job either way. The driver owns the transport and releases it on
//! every exit path, which closes a hardware port.
//!
//! ## Fail-fast Checks
//!
//! Before any byte is written, the image dimensions are checked against the
//! 16-bit wire header fields and the payload length against
//! `width_bytes * height`. A job that would announce dimensions it cannot
//! deliver never starts.

use std::fmt;

use log::debug;

use crate::error::LabelError;
use crate::pack::PackedImage;
use crate::protocol::commands;
use crate::transport::{Transport, hex};

/// Print job phase, carried in transport errors to identify where a job
/// died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Job constructed, nothing sent yet
    Idle,
    /// Sending the six-packet initialization handshake
    Initializing,
    /// Sending the raster header and pixel payload
    Transmitting,
    /// Sending the tape feed
    Feeding,
    /// All phases completed
    Closed,
    /// Aborted by a transport error
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Initializing => "initializing",
            Phase::Transmitting => "transmitting",
            Phase::Feeding => "feeding",
            Phase::Closed => "closed",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// # Print Job
///
/// Owns a transport for the duration of one label print. [`run`](Self::run)
/// consumes the job, so the transport is dropped whether the job completes
/// or fails; nothing can reuse a connection in an unknown protocol state.
///
/// ## Example
///
/// ```
/// use p12_label::protocol::driver::PrintJob;
/// use p12_label::transport::DiagnosticTransport;
/// use p12_label::{pack, Bitmap};
///
/// let image = pack(&Bitmap::blank(96, 16));
/// PrintJob::new(DiagnosticTransport::new(96)).run(&image)?;
/// # Ok::<(), p12_label::LabelError>(())
/// ```
pub struct PrintJob<T: Transport> {
    transport: T,
    phase: Phase,
}

impl<T: Transport> PrintJob<T> {
    /// Create a job in the `Idle` phase.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            phase: Phase::Idle,
        }
    }

    /// Run the full print sequence for one packed image.
    ///
    /// ## Errors
    ///
    /// - [`LabelError::ImageTooLarge`] if `width_bytes` or `height` exceeds
    ///   the 16-bit header fields
    /// - [`LabelError::PayloadMismatch`] if the payload length disagrees
    ///   with the declared dimensions
    /// - [`LabelError::Transport`] for any write, flush, or read failure,
    ///   tagged with the phase it interrupted
    ///
    /// The first two are detected before any I/O; a rejected image leaves
    /// the printer untouched.
    pub fn run(mut self, image: &PackedImage) -> Result<(), LabelError> {
        let too_large = LabelError::ImageTooLarge {
            width_bytes: image.width_bytes,
            height: image.height,
        };
        let Ok(width_bytes) = u16::try_from(image.width_bytes) else {
            return Err(too_large);
        };
        let Ok(height) = u16::try_from(image.height) else {
            return Err(too_large);
        };

        let expected = image.width_bytes as usize * image.height as usize;
        if image.data.len() != expected {
            return Err(LabelError::PayloadMismatch {
                expected,
                actual: image.data.len(),
            });
        }

        match self.print(width_bytes, height, &image.data) {
            Ok(()) => {
                self.phase = Phase::Closed;
                debug!("print job closed");
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Failed;
                Err(e)
            }
        }
    }

    fn print(&mut self, width_bytes: u16, height: u16, payload: &[u8]) -> Result<(), LabelError> {
        self.phase = Phase::Initializing;
        for packet in commands::INIT_SEQUENCE {
            self.exchange(packet)?;
        }

        self.phase = Phase::Transmitting;
        self.exchange(&commands::raster_header(width_bytes, height))?;
        self.exchange(payload)?;

        self.phase = Phase::Feeding;
        self.exchange(&commands::feed())?;

        Ok(())
    }

    /// Write one packet, flush, then perform the protocol's single response
    /// read and log whatever arrived.
    fn exchange(&mut self, packet: &[u8]) -> Result<(), LabelError> {
        let phase = self.phase;
        let wrap = |source| LabelError::Transport { phase, source };

        self.transport.write_all(packet).map_err(wrap)?;
        self.transport.flush().map_err(wrap)?;
        let response = self.transport.read().map_err(wrap)?;
        debug!("printer response: {}", hex(&response));
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
