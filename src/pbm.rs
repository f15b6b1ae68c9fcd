//! # Plain Portable Bitmap (P1) Artifacts
//!
//! The rotated label image is persisted as a plain-text PBM so it can be
//! inspected in an editor and fed back to the print path later:
//!
//! ```text
//! P1
//! <width> <height>
//! 0 1 1 0 ...        (one line per row, space-separated tokens)
//! ```
//!
//! Token convention: `0` = ink, `1` = background. This is the inverse of
//! the PBM standard's "1 is black", so external viewers show the label with
//! polarity flipped; the writer and parser here agree with each other, which
//! is what label round-trips depend on.

use std::fs;
use std::path::Path;

use crate::bitmap::Bitmap;
use crate::error::LabelError;

/// Token written for an ink pixel.
const INK: &str = "0";

/// Token written for a background pixel.
const BACKGROUND: &str = "1";

/// Write a bitmap as a plain PBM (P1) file.
pub fn write<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> Result<(), LabelError> {
    fs::write(path, to_ascii(bitmap))?;
    Ok(())
}

/// Encode a bitmap as P1 text.
pub fn to_ascii(bitmap: &Bitmap) -> String {
    // Two bytes per pixel token plus the header
    let mut out = String::with_capacity(bitmap.pixels.len() * 2 + 16);

    out.push_str("P1\n");
    out.push_str(&format!("{} {}\n", bitmap.width, bitmap.height));

    for y in 0..bitmap.height {
        let tokens: Vec<&str> = bitmap
            .row(y)
            .iter()
            .map(|&ink| if ink { INK } else { BACKGROUND })
            .collect();
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }

    out
}

/// Read a plain PBM (P1) file back into a bitmap.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Bitmap, LabelError> {
    parse(&fs::read_to_string(path)?)
}

/// Parse P1 text into a bitmap.
///
/// Accepts any whitespace layout and `#` comment lines. The raster must
/// contain exactly `width * height` tokens.
pub fn parse(text: &str) -> Result<Bitmap, LabelError> {
    let mut tokens = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace);

    match tokens.next() {
        Some("P1") => {}
        other => {
            return Err(LabelError::InvalidPbm(format!(
                "expected P1 magic, got {:?}",
                other
            )));
        }
    }

    let width = dimension(tokens.next(), "width")?;
    let height = dimension(tokens.next(), "height")?;
    let expected = width as usize * height as usize;

    let mut pixels = Vec::with_capacity(expected);
    for token in tokens {
        match token {
            INK => pixels.push(true),
            BACKGROUND => pixels.push(false),
            other => {
                return Err(LabelError::InvalidPbm(format!(
                    "unexpected raster token {:?}",
                    other
                )));
            }
        }
    }

    if pixels.len() != expected {
        return Err(LabelError::InvalidPbm(format!(
            "raster has {} token(s), header declares {}x{}",
            pixels.len(),
            width,
            height
        )));
    }

    Ok(Bitmap {
        width,
        height,
        pixels,
    })
}

/// Parse one positive header dimension.
fn dimension(token: Option<&str>, what: &str) -> Result<u32, LabelError> {
    let token =
        token.ok_or_else(|| LabelError::InvalidPbm(format!("missing {} in header", what)))?;
    let value: u32 = token
        .parse()
        .map_err(|_| LabelError::InvalidPbm(format!("bad {} {:?}", what, token)))?;
    if value == 0 {
        return Err(LabelError::InvalidPbm(format!("{} must be positive", what)));
    }
    Ok(value)
}

// ============================================================================
// TESTS
// ============================================================================
