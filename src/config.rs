//! # Printer Configuration
//!
//! This module defines hardware specifications for supported label printers.
//!
//! ## Supported Printers
//!
//! | Model | Head (dots) | Canvas (dots) | Resolution | Tape |
//! |-------|-------------|---------------|------------|------|
//! | P12   | 96          | 88            | 203 DPI    | 12mm |
//!
//! ## Usage
//!
//! ```
//! use p12_label::PrinterConfig;
//!
//! let config = PrinterConfig::P12;
//! println!("Head width: {} dots on {:.0}mm tape",
//!          config.dots_per_line,
//!          config.tape_width_mm());
//! ```

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal label printer.
///
/// ## Physical Properties
///
/// - **dots_per_line**: print head width in dots, the exact width of every
///   transmitted raster row
/// - **canvas_height**: label composition height in dots, the printable band
///   of the tape
/// - **dpi**: resolution in dots per inch
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// tape_width_mm = dots_per_line / dots_per_mm
///
/// For the P12:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   tape_width_mm = 96 / 8 = 12mm
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Print head width in dots per raster line
    pub dots_per_line: u16,

    /// Label composition canvas height in dots
    pub canvas_height: u32,

    /// Resolution in dots per inch
    pub dpi: u16,
}

impl PrinterConfig {
    /// # P12 Configuration
    ///
    /// 12mm tape thermal label printer, sold under assorted badge-engineered
    /// names, driven over a USB or Bluetooth serial link.
    ///
    /// ## Specifications
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Tape width | 12mm |
    /// | Head width | 96 dots |
    /// | Canvas | 88 dots (11mm printable) |
    /// | Resolution | 203 DPI |
    /// | Interface | Serial (USB / RFCOMM) |
    ///
    /// ## Print Area
    ///
    /// Labels are composed on the 88-dot canvas and padded up to the 96-dot
    /// head on transmission:
    ///
    /// ```text
    /// ├ 8 dots ┼──────── 88-dot canvas ────────┤
    /// │ margin │      printable tape band      │
    /// ```
    pub const P12: Self = Self {
        name: "P12",
        dots_per_line: 96,
        canvas_height: 88,
        dpi: 203,
    };

    /// Calculate dots per millimeter
    ///
    /// ## Example
    ///
    /// ```
    /// use p12_label::PrinterConfig;
    ///
    /// let config = PrinterConfig::P12;
    /// assert!((config.dots_per_mm() - 8.0).abs() < 0.1);
    /// ```
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate tape width in millimeters
    #[inline]
    pub fn tape_width_mm(&self) -> f32 {
        self.dots_per_line as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::P12
    }
}

// ============================================================================
// TESTS
// ============================================================================
