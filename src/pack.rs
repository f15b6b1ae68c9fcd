//! # Bitmap Packer
//!
//! Converts a [`Bitmap`] into the printer's wire pixel format: 1 bit per
//! pixel, packed row-major.
//!
//! ## Bit Packing
//!
//! Each row is packed left to right into bytes, most significant bit first:
//!
//! ```text
//! Pixels:  [P0, P1, P2, P3, P4, P5, P6, P7]
//! Byte:     P0 is bit 7 (MSB) ... P7 is bit 0 (LSB)
//! ```
//!
//! Ink = 1, background = 0. Rows whose width is not a multiple of 8 are
//! padded: the unused low bits of the row's final byte stay 0, so stray ink
//! can never leak into the pad. The source bitmap is never modified.

use crate::bitmap::Bitmap;

/// A bitmap packed into the printer's 1-bit wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedImage {
    /// Row stride in bytes = ceil(width / 8)
    pub width_bytes: u32,
    /// Image height in rows
    pub height: u32,
    /// Packed pixel data, length = width_bytes * height
    pub data: Vec<u8>,
}

/// Pack a bitmap row-major, MSB first, final byte of each row zero-padded.
pub fn pack(bitmap: &Bitmap) -> PackedImage {
    let width_bytes = bitmap.width.div_ceil(8);
    let mut data = Vec::with_capacity(width_bytes as usize * bitmap.height as usize);

    for y in 0..bitmap.height {
        data.extend(pack_row(bitmap.row(y)));
    }

    PackedImage {
        width_bytes,
        height: bitmap.height,
        data,
    }
}

/// Pack one row of pixels into bytes.
fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8);
            bytes[byte_idx] |= 1 << bit_idx;
        }
    }

    bytes
}

// ============================================================================
// TESTS
// ============================================================================
