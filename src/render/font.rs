//! # Host Font Resolution
//!
//! Resolves a font family name against the fonts installed on the host and
//! loads the matched face for outline rasterization.
//!
//! Resolution is strict: the family must exist, with bold mapped to weight
//! 700 and italic to the italic slant. There is no fallback chain; an
//! unknown family is an error, not a substitution, because the physical
//! print is the product and a silently swapped typeface would go unnoticed
//! until the label is on the tape.

use ab_glyph::{Font, FontVec, PxScale};
use fontdb::{Database, Family, Query, Source, Style, Weight};
use log::debug;

use crate::error::LabelError;

/// Load the host face matching `family` with the given weight and slant.
pub fn load_font(family: &str, bold: bool, italic: bool) -> Result<FontVec, LabelError> {
    let mut db = Database::new();
    db.load_system_fonts();
    load_from(&db, family, bold, italic)
}

/// Query a prepared database for the face and load its bytes.
pub fn load_from(
    db: &Database,
    family: &str,
    bold: bool,
    italic: bool,
) -> Result<FontVec, LabelError> {
    let query = Query {
        families: &[Family::Name(family)],
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: fontdb::Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let not_found = || LabelError::FontNotFound {
        family: family.to_string(),
    };
    let id = db.query(&query).ok_or_else(not_found)?;
    let face = db.face(id).ok_or_else(not_found)?;

    debug!(
        "resolved font family '{}' to {} (face index {})",
        family, face.post_script_name, face.index
    );

    let load_failed = |reason: String| LabelError::FontLoad {
        family: family.to_string(),
        reason,
    };
    let data = match &face.source {
        Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        Source::File(path) => std::fs::read(path).map_err(|e| load_failed(e.to_string()))?,
        _ => return Err(load_failed("unsupported font source".to_string())),
    };

    FontVec::try_from_vec_and_index(data, face.index)
        .map_err(|e| load_failed(format!("unparsable face: {}", e)))
}

/// Convert a requested pixel size into the scale ab_glyph draws with.
///
/// `PxScale` is relative to the face's line height (ascent minus descent),
/// which for most faces is taller than the em square. Scaling by the
/// height/em ratio makes "size 16" select a 16px em, the convention desktop
/// text engines use for pixel sizes.
pub fn px_scale(font: &impl Font, size: u32) -> PxScale {
    let height = font.height_unscaled();
    let upem = font.units_per_em().unwrap_or(height);
    PxScale::from(size as f32 * height / upem)
}

// ============================================================================
// TESTS
// ============================================================================
