//! # P12 Serial Protocol
//!
//! This module provides the wire protocol for the P12 thermal label printer.
//!
//! ## Module Structure
//!
//! - [`commands`]: Wire command builders (initialization packets, raster
//!   header, tape feed)
//! - [`driver`]: The print job state machine that sequences them over a
//!   transport
//!
//! ## Protocol Shape
//!
//! One print job is three phases on one connection:
//!
//! ```text
//! Initializing    6 fixed packets
//! Transmitting    raster header, then the packed pixel payload
//! Feeding         tape feed packet
//! ```
//!
//! Every write is followed by a flush and exactly one bounded read. The
//! responses are hex-logged at debug level and never interpreted; the P12
//! offers no status protocol worth parsing.
//!
//! ## Usage Example
//!
//! ```
//! use p12_label::protocol::driver::PrintJob;
//! use p12_label::transport::DiagnosticTransport;
//! use p12_label::{pack, Bitmap};
//!
//! let image = pack(&Bitmap::blank(96, 16));
//! let job = PrintJob::new(DiagnosticTransport::new(96));
//! job.run(&image)?;
//! # Ok::<(), p12_label::LabelError>(())
//! ```

pub mod commands;
pub mod driver;
