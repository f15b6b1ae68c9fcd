//! # P12 Label - Thermal Label Printer Library
//!
//! p12-label renders styled text into 1-bit label bitmaps and prints them
//! on the P12 thermal tape printer over its serial protocol. It provides:
//!
//! - **Rasterization**: deterministic text-to-bitmap rendering with host
//!   font resolution
//! - **Packing**: MSB-first 1-bit row packing into the wire pixel format
//! - **Protocol implementation**: the vendor initialization handshake,
//!   raster command, and tape feed, sequenced as a print job state machine
//! - **Transport**: raw serial TTY and an in-memory diagnostic sink
//!
//! ## Quick Start
//!
//! ```no_run
//! use p12_label::render::StyleSpec;
//! use p12_label::transport::SerialTransport;
//! use p12_label::{PrintJob, PrinterConfig, pack, render};
//!
//! let config = PrinterConfig::P12;
//!
//! // Compose the label, then rotate it into the tape feed direction and
//! // fit it to the print head
//! let spec = StyleSpec::new("Shelf A3", "DejaVu Sans", 16);
//! let bitmap = render(&spec, config.canvas_height)?;
//! let label = bitmap.rotate_cw().fit_width(config.dots_per_line as u32);
//!
//! // Pack to the wire format and print
//! let image = pack(&label);
//! let transport = SerialTransport::open("/dev/ttyUSB0")?;
//! PrintJob::new(transport).run(&image)?;
//!
//! # Ok::<(), p12_label::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`](mod@render) | Text rasterization and font resolution |
//! | [`bitmap`] | Monochrome bitmap type and label geometry |
//! | [`pack`](mod@pack) | 1-bit wire packing |
//! | [`pbm`] | Plain portable bitmap (P1) label artifacts |
//! | [`protocol`] | Wire commands and the print job driver |
//! | [`transport`] | Communication backends |
//! | [`config`] | Printer hardware profiles |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Currently tested with:
//! - P12 (12mm tape, 96-dot head, 203 DPI, USB/Bluetooth serial)
//!
//! Badge-engineered variants of the same mechanism speak the same protocol
//! and should work unchanged.

pub mod bitmap;
pub mod config;
pub mod error;
pub mod pack;
pub mod pbm;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use bitmap::Bitmap;
pub use config::PrinterConfig;
pub use error::LabelError;
pub use pack::{PackedImage, pack};
pub use protocol::driver::{Phase, PrintJob};
pub use render::{StyleSpec, render};
pub use transport::Transport;
