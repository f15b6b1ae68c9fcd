//! # Error Types
//!
//! This module defines error types used throughout the p12-label library.

use thiserror::Error;

use crate::protocol::driver::Phase;

/// Main error type for label rendering and printing operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Label text is empty, nothing to rasterize
    #[error("Label text is empty")]
    EmptyText,

    /// Font size must be at least 1 pixel
    #[error("Invalid font size: {0}")]
    InvalidFontSize(u32),

    /// Canvas height must be at least 1 dot
    #[error("Invalid canvas height: {0}")]
    InvalidCanvasHeight(u32),

    /// Requested font family is not installed on the host
    #[error("Font family not found: {family}")]
    FontNotFound { family: String },

    /// Font face was found but its data could not be loaded
    #[error("Failed to load font {family}: {reason}")]
    FontLoad { family: String, reason: String },

    /// Image dimensions exceed the 16-bit wire header fields
    #[error("Image too large for wire format: {width_bytes} byte(s) x {height} row(s), max 65535 each")]
    ImageTooLarge { width_bytes: u32, height: u32 },

    /// Packed payload length does not match the declared dimensions
    #[error("Payload is {actual} byte(s), header declares {expected}")]
    PayloadMismatch { expected: usize, actual: usize },

    /// Malformed portable bitmap input
    #[error("Invalid PBM: {0}")]
    InvalidPbm(String),

    /// Serial port could not be opened or configured
    #[error("Failed to open port {port}: {source}")]
    Port {
        port: String,
        source: std::io::Error,
    },

    /// Transport failure during a print job, tagged with the phase it
    /// interrupted
    #[error("Transport error while {phase}: {source}")]
    Transport {
        phase: Phase,
        source: std::io::Error,
    },

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
