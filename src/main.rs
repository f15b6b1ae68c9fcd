//! # P12 Label CLI
//!
//! Command-line interface for rendering and printing P12 tape labels.
//!
//! ## Usage
//!
//! ```bash
//! # Render a label to preview.png + label.pbm
//! p12-label render --text "Shelf A3" --font "DejaVu Sans"
//!
//! # Larger, bold italic, underlined
//! p12-label render --text "FRAGILE" --font "DejaVu Sans" --size 36 \
//!     --bold --italic --underline
//!
//! # Dry-run the print (RUST_LOG=debug shows the exact wire bytes)
//! RUST_LOG=debug p12-label print label.pbm
//!
//! # Print for real
//! p12-label print label.pbm --port /dev/ttyUSB0
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use p12_label::render::StyleSpec;
use p12_label::transport::{DIAGNOSTIC_PORT, DiagnosticTransport, SerialTransport};
use p12_label::{
    Bitmap, LabelError, PackedImage, PrintJob, PrinterConfig, Transport, pack, pbm, render,
};

/// P12 - Thermal label printer utility
#[derive(Parser, Debug)]
#[command(name = "p12-label")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a styled text label to preview and print artifacts
    Render {
        /// Label text
        #[arg(long)]
        text: String,

        /// Host font family name (must be installed)
        #[arg(long)]
        font: String,

        /// Font size in pixels
        #[arg(long, default_value_t = 16)]
        size: u32,

        /// Use the bold face
        #[arg(long)]
        bold: bool,

        /// Use the italic face
        #[arg(long)]
        italic: bool,

        /// Underline the text
        #[arg(long)]
        underline: bool,

        /// Strike through the text
        #[arg(long)]
        strikethrough: bool,

        /// Canvas height in dots
        #[arg(long, default_value_t = PrinterConfig::P12.canvas_height)]
        height: u32,

        /// Preview image output (composition orientation, ink black on white)
        #[arg(long, value_name = "FILE", default_value = "preview.png")]
        preview: PathBuf,

        /// Portable bitmap output (rotated into the tape feed direction)
        #[arg(long, value_name = "FILE", default_value = "label.pbm")]
        pbm: PathBuf,
    },

    /// Send a rendered label image to the printer
    Print {
        /// Label image: a .pbm from `render`, or any raster image file
        image: PathBuf,

        /// Serial port device, or "dummy" for a logged dry run
        #[arg(long, default_value = DIAGNOSTIC_PORT)]
        port: String,

        /// Print head width in dots per line
        #[arg(long, default_value_t = PrinterConfig::P12.dots_per_line)]
        dots: u16,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            text,
            font,
            size,
            bold,
            italic,
            underline,
            strikethrough,
            height,
            preview,
            pbm: pbm_path,
        } => {
            let spec = StyleSpec {
                text,
                font_family: font,
                font_size: size,
                bold,
                italic,
                underline,
                strikethrough,
            };

            let bitmap = render(&spec, height)?;

            save_preview_png(&preview, &bitmap)?;
            println!("Saved preview to {}", preview.display());

            // The printer feeds the tape perpendicular to the composed text
            pbm::write(&bitmap.rotate_cw(), &pbm_path)?;
            println!("Saved label to {}", pbm_path.display());
        }

        Commands::Print { image, port, dots } => {
            let bitmap = load_label_image(&image)?;
            let packed = pack(&bitmap.fit_width(dots as u32));

            if port == DIAGNOSTIC_PORT {
                run_job(DiagnosticTransport::new(dots), &packed)?;
            } else {
                run_job(SerialTransport::open(&port)?, &packed)?;
            }
            println!("Printed successfully!");
        }
    }

    Ok(())
}

/// Run one print job; the transport is released when the job ends.
fn run_job<T: Transport>(transport: T, image: &PackedImage) -> Result<(), LabelError> {
    PrintJob::new(transport).run(image)
}

/// Save the composed label as a preview PNG, ink black on white.
fn save_preview_png(path: &Path, bitmap: &Bitmap) -> Result<(), LabelError> {
    use image::{GrayImage, Luma};

    let mut img = GrayImage::new(bitmap.width, bitmap.height);

    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            let color = if bitmap.get(x, y) { 0u8 } else { 255u8 };
            img.put_pixel(x, y, Luma([color]));
        }
    }

    img.save(path)
        .map_err(|e| LabelError::Image(format!("Failed to save preview: {}", e)))?;

    Ok(())
}

/// Load a label image for printing: P1 bitmaps go through the pbm parser,
/// anything else through the image crate with dark pixels as ink.
fn load_label_image(path: &Path) -> Result<Bitmap, LabelError> {
    let is_pbm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pbm"));
    if is_pbm {
        return pbm::read(path);
    }

    let img = image::open(path)
        .map_err(|e| LabelError::Image(format!("Failed to open {}: {}", path.display(), e)))?
        .to_luma8();

    let mut bitmap = Bitmap::blank(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        bitmap.set(x, y, pixel.0[0] < 128);
    }

    Ok(bitmap)
}
