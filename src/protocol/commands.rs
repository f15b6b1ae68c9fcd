//! # P12 Protocol Commands
//!
//! This module implements the serial command protocol spoken by the P12
//! thermal label printer.
//!
//! ## Protocol Overview
//!
//! The P12 has no published command reference. Its protocol is a small
//! ESC/POS-like dialect with a vendor-specific initialization handshake:
//!
//! - **Initialization**: six fixed packets of `US DC1`-prefixed triples,
//!   captured from the vendor's Android app ("Print Master") and replayed
//!   verbatim
//! - **Raster image**: a reset plus raster opcode announcing a packed 1-bit
//!   image, followed by the pixel payload
//! - **Tape feed**: advances the tape so the printed label clears the head
//!
//! The handshake is stateless: no packet depends on any response, and the
//! printer's replies are logged but never interpreted.
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// The raster and feed commands begin with ESC (0x1B), as in ESC/POS.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Graphics command prefix
///
/// Introduces the raster image opcode:
/// - `GS v 0` announces raster graphics
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// US (Unit Separator) - Initialization packet prefix
///
/// Every initialization packet is a run of `US DC1 <code>` triples.
/// - Hex: 0x1F, Decimal: 31
pub const US: u8 = 0x1F;

/// DC1 (Device Control 1) - Second byte of every initialization triple
///
/// - Hex: 0x11, Decimal: 17
pub const DC1: u8 = 0x11;

// ============================================================================
// INITIALIZATION SEQUENCE
// ============================================================================

/// # Initialization Packets
///
/// Six opaque packets sent in fixed order before any image data, replayed
/// exactly as the vendor app sends them.
///
/// ## Protocol Details
///
/// | # | Hex |
/// |---|-----|
/// | 1 | `1F 11 38` |
/// | 2 | `1F 11 11 1F 11 12 1F 11 09 1F 11 13` |
/// | 3 | `1F 11 09` |
/// | 4 | `1F 11 19 1F 11 11` |
/// | 5 | `1F 11 19` |
/// | 6 | `1F 11 07` |
///
/// ## Behavior
///
/// The printer acknowledges some packets and stays silent on others. Nothing
/// downstream depends on the replies; each packet is written, the link is
/// flushed, and one response read is logged.
pub const INIT_SEQUENCE: [&[u8]; 6] = [
    &[US, DC1, 0x38],
    &[US, DC1, 0x11, US, DC1, 0x12, US, DC1, 0x09, US, DC1, 0x13],
    &[US, DC1, 0x09],
    &[US, DC1, 0x19, US, DC1, 0x11],
    &[US, DC1, 0x19],
    &[US, DC1, 0x07],
];

// ============================================================================
// RASTER IMAGE COMMAND
// ============================================================================

/// Fixed 6-byte opcode prefix of the raster command: `ESC @` then `GS v 0`
/// with mode 0.
pub const RASTER_PREFIX: &[u8] = &[ESC, b'@', GS, b'v', b'0', 0x00];

/// # Raster Image Header (ESC @ GS v 0)
///
/// Announces a packed 1-bit raster image. The packed pixel payload follows
/// as a separate write of exactly `width_bytes * height` bytes.
///
/// ## Protocol Details
///
/// | Format | Bytes |
/// |--------|-------|
/// | ASCII  | ESC @ GS v 0 NUL xL xH yL yH |
/// | Hex    | 1B 40 1D 76 30 00 xL xH yL yH |
///
/// ## Parameters
///
/// - `width_bytes`: row stride in bytes (xL xH, little-endian)
/// - `height`: image height in rows (yL yH, little-endian)
///
/// Each row of the payload is `width_bytes` long, MSB = leftmost dot; the
/// head prints `8 * width_bytes` dots per row.
///
/// ## Example
///
/// ```
/// use p12_label::protocol::commands;
///
/// let header = commands::raster_header(12, 88);
/// assert_eq!(
///     header,
///     vec![0x1B, 0x40, 0x1D, 0x76, 0x30, 0x00, 12, 0, 88, 0]
/// );
/// ```
pub fn raster_header(width_bytes: u16, height: u16) -> Vec<u8> {
    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(RASTER_PREFIX.len() + 4);
    cmd.extend_from_slice(RASTER_PREFIX);
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd
}

// ============================================================================
// TAPE FEED COMMAND
// ============================================================================

/// # Tape Feed (ESC d 13, twice)
///
/// Advances the tape far enough for the printed label to clear the print
/// head and reach the tear-off edge.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC d CR ESC d CR |
/// | Hex     | 1B 64 0D 1B 64 0D |
/// | Decimal | 27 100 13 27 100 13 |
///
/// ## Behavior
///
/// The ESC/POS "print and feed n lines" command with n = 13, sent twice,
/// matching the vendor app byte for byte.
#[inline]
pub fn feed() -> Vec<u8> {
    vec![ESC, b'd', 0x0D, ESC, b'd', 0x0D]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use p12_label::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(96), [0x60, 0x00]); // Head width: 96 dots
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
