//! # Monochrome Bitmap
//!
//! Row-major 1-bit image type shared by the rasterizer, the packer, and the
//! print path. `true` pixels are ink (they fire the thermal head).
//!
//! Two geometry operations live here because the P12 prints labels sideways:
//!
//! - [`Bitmap::rotate_cw`]: labels are composed horizontally (reading
//!   direction) but transmitted rotated 90 degrees clockwise, because the
//!   printer feeds the tape perpendicular to the composed text.
//! - [`Bitmap::fit_width`]: the transmitted image must match the print head
//!   width exactly. Wider images are cropped, narrower ones padded on the
//!   left so content stays against the tape's reference edge.

/// A monochrome raster image. `true` = ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels (always > 0)
    pub width: u32,
    /// Height in pixels (always > 0)
    pub height: u32,
    /// Row-major pixels, length = width * height
    pub pixels: Vec<bool>,
}

impl Bitmap {
    /// Create an all-background bitmap.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Pixel at (x, y). Out-of-range coordinates read as background.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize]
        } else {
            false
        }
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored, so
    /// callers can draw shapes that overhang the canvas and get clipping.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = ink;
        }
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Indices of the first and last row containing ink, or `None` for an
    /// all-background bitmap.
    pub fn ink_rows(&self) -> Option<(u32, u32)> {
        let top = (0..self.height).find(|&y| self.row(y).contains(&true))?;
        let bottom = (0..self.height).rfind(|&y| self.row(y).contains(&true))?;
        Some((top, bottom))
    }

    /// Rotate 90 degrees clockwise. The result is `height` wide and `width`
    /// tall: the source's bottom-left pixel becomes the top-left.
    pub fn rotate_cw(&self) -> Bitmap {
        let mut rotated = Bitmap::blank(self.height, self.width);
        for y in 0..rotated.height {
            for x in 0..rotated.width {
                rotated.set(x, y, self.get(y, self.height - 1 - x));
            }
        }
        rotated
    }

    /// Fit to an exact width, keeping the height.
    ///
    /// A wider bitmap keeps its leftmost `width` columns; a narrower one is
    /// padded with background on the left, leaving content right-aligned.
    pub fn fit_width(&self, width: u32) -> Bitmap {
        if self.width == width {
            return self.clone();
        }

        let mut fitted = Bitmap::blank(width, self.height);
        if self.width > width {
            for y in 0..self.height {
                for x in 0..width {
                    fitted.set(x, y, self.get(x, y));
                }
            }
        } else {
            let pad = width - self.width;
            for y in 0..self.height {
                for x in 0..self.width {
                    fitted.set(pad + x, y, self.get(x, y));
                }
            }
        }
        fitted
    }
}

// ============================================================================
// TESTS
// ============================================================================
