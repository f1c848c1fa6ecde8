use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, point};
use es_core::error::CoreError;
use es_core::traits::GlyphRasterizer;

use crate::builtin::BuiltinRasterizer;

/// Rasterise une police TrueType/OpenType dans un atlas de masques
/// `pixel_size × pixel_size`.
///
/// The font is scaled so ascent to descent spans `pixel_size` pixels; each
/// glyph is anchored at the cell's top-left on the font ascent and clipped
/// to the cell, so descenders such as `_` stay visible.
pub struct FontRasterizer {
    size: u32,
    atlas: HashMap<char, Vec<u8>>,
}

impl FontRasterizer {
    /// Parse `font_data` and pre-render `glyphs`.
    ///
    /// Glyphs the font does not cover are left out of the atlas.
    ///
    /// # Errors
    /// Returns `FontUnavailable` if the data is not a valid font.
    pub fn new(font_data: Vec<u8>, pixel_size: u32, glyphs: &[char]) -> Result<Self, CoreError> {
        let font = FontVec::try_from_vec(font_data)
            .map_err(|e| CoreError::FontUnavailable(format!("police invalide : {e}")))?;
        let size = pixel_size.max(1);
        let scale = PxScale::from(size as f32);

        let mut atlas = HashMap::with_capacity(glyphs.len());
        for &ch in glyphs {
            let gid = font.glyph_id(ch);
            // glyph_id 0 is .notdef
            if gid.0 == 0 && !ch.is_whitespace() {
                log::debug!("Glyphe {ch:?} absent de la police, ignoré");
                continue;
            }
            atlas.insert(ch, render_glyph(&font, gid, scale, size));
        }

        Ok(Self { size, atlas })
    }

    /// Load a font file from disk.
    ///
    /// # Errors
    /// Returns `FontUnavailable` if the file cannot be read or parsed.
    pub fn from_file(path: &Path, pixel_size: u32, glyphs: &[char]) -> Result<Self, CoreError> {
        let data = std::fs::read(path)
            .map_err(|e| CoreError::FontUnavailable(format!("{} : {e}", path.display())))?;
        Self::new(data, pixel_size, glyphs)
    }
}

fn render_glyph(font: &FontVec, gid: ab_glyph::GlyphId, scale: PxScale, size: u32) -> Vec<u8> {
    let mut mask = vec![0u8; (size * size) as usize];
    let ascent_px = font.ascent_unscaled() * scale.y / font.height_unscaled();
    let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

    if let Some(outline) = font.outline_glyph(glyph) {
        let bounds = outline.px_bounds();
        outline.draw(|x, y, v| {
            let px = x as i32 + bounds.min.x as i32;
            let py = y as i32 + bounds.min.y as i32;
            if px >= 0 && py >= 0 && (px as u32) < size && (py as u32) < size {
                let idx = py as usize * size as usize + px as usize;
                mask[idx] = mask[idx].max((v * 255.0).round() as u8);
            }
        });
    }
    mask
}

impl GlyphRasterizer for FontRasterizer {
    fn cell_size(&self) -> (u32, u32) {
        (self.size, self.size)
    }

    fn coverage(&self, ch: char) -> Option<&[u8]> {
        self.atlas.get(&ch).map(Vec::as_slice)
    }

    fn name(&self) -> &'static str {
        "truetype"
    }
}

/// Charge la police si possible, sinon le jeu intégré.
///
/// A missing or unparsable font is not fatal: it logs a warning and falls
/// back to [`BuiltinRasterizer`].
///
/// # Example
/// ```
/// use es_core::traits::GlyphRasterizer;
/// use es_export::rasterizer::load_rasterizer;
/// use std::path::Path;
/// let r = load_rasterizer(Path::new("/no/such/font.ttf"), 8, &['@']);
/// assert_eq!(r.name(), "builtin");
/// assert!(r.coverage('@').is_some());
/// ```
#[must_use]
pub fn load_rasterizer(font_path: &Path, pixel_size: u32, glyphs: &[char]) -> Box<dyn GlyphRasterizer> {
    match FontRasterizer::from_file(font_path, pixel_size, glyphs) {
        Ok(r) => {
            log::info!("Police chargée : {}", font_path.display());
            Box::new(r)
        }
        Err(e) => {
            log::warn!("{e}, repli sur le jeu de glyphes intégré");
            Box::new(BuiltinRasterizer::new(pixel_size, glyphs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn garbage_font_is_unavailable() {
        assert!(matches!(
            FontRasterizer::new(vec![0, 1, 2, 3], 8, &['a']),
            Err(CoreError::FontUnavailable(_))
        ));
    }

    #[test]
    fn missing_file_is_unavailable() {
        assert!(matches!(
            FontRasterizer::from_file(Path::new("/definitely/missing.ttf"), 8, &['a']),
            Err(CoreError::FontUnavailable(_))
        ));
    }

    const MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

    fn mono(size: u32, glyphs: &[char]) -> FontRasterizer {
        FontRasterizer::new(MONO.to_vec(), size, glyphs).unwrap()
    }

    /// Summed coverage per column.
    fn column_ink(mask: &[u8], size: usize) -> Vec<u32> {
        let mut cols = vec![0u32; size];
        for row in mask.chunks_exact(size) {
            for (c, &v) in cols.iter_mut().zip(row) {
                *c += u32::from(v);
            }
        }
        cols
    }

    #[test]
    fn font_builds_a_sized_atlas() {
        let r = mono(16, &['|', '_', '@', ' ']);
        assert_eq!(r.name(), "truetype");
        assert_eq!(r.cell_size(), (16, 16));
        for ch in ['|', '_', '@', ' '] {
            assert_eq!(r.coverage(ch).map(<[u8]>::len), Some(256), "{ch:?}");
        }
        assert!(r.coverage(' ').unwrap().iter().all(|&v| v == 0));
        assert!(r.coverage('@').unwrap().iter().any(|&v| v > 0));
    }

    #[test]
    fn bar_is_a_centred_vertical_stroke() {
        // The monospace advance is about 8.3px at this size; the bar sits
        // in its middle, around x = 3.6..4.7.
        let r = mono(16, &['|']);
        let mask = r.coverage('|').unwrap();
        let cols = column_ink(mask, 16);
        let peak = (0..16).max_by_key(|&x| cols[x]).unwrap();
        assert!((3..=4).contains(&peak), "peak column {peak}, {cols:?}");
        assert!(cols.iter().enumerate().all(|(x, &c)| c == 0 || (2..=5).contains(&x)));
        // Tall: ink from the upper rows down to the bottom row.
        assert!(mask[3 * 16 + peak] > 0);
        assert!(mask[15 * 16 + peak] > 0);
    }

    #[test]
    fn underscore_stays_in_the_cell() {
        // '_' lies wholly under the baseline; with ascent to descent fitted
        // to the cell it lands on the bottom row instead of being clipped.
        for size in [8, 16] {
            let r = mono(size, &['_']);
            let mask = r.coverage('_').unwrap();
            let s = size as usize;
            assert_eq!(mask.len(), s * s);
            let (upper, bottom) = mask.split_at(s * (s - 1));
            assert!(upper.iter().all(|&v| v == 0), "size {size}");
            assert!(bottom.iter().any(|&v| v > 0), "size {size}");
        }
        let mask = mono(16, &['_']).coverage('_').unwrap().to_vec();
        assert!(mask[15 * 16..].iter().any(|&v| v >= crate::compositor::COVERAGE_THRESHOLD));
    }

    #[test]
    fn glyph_missing_from_font_has_no_entry() {
        let r = mono(8, &['\u{E000}', '\u{4E00}', '#']);
        assert!(r.coverage('\u{E000}').is_none());
        assert!(r.coverage('\u{4E00}').is_none());
        assert!(r.coverage('#').is_some());
    }

    #[test]
    fn font_file_loads_through_fallback_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MONO).unwrap();
        let r = load_rasterizer(file.path(), 8, &['|']);
        assert_eq!(r.name(), "truetype");
        assert!(r.coverage('|').unwrap().iter().any(|&v| v > 0));
    }

    #[test]
    fn corrupt_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a font at all").unwrap();
        let r = load_rasterizer(file.path(), 6, &['|', '_']);
        assert_eq!(r.name(), "builtin");
        assert_eq!(r.cell_size(), (6, 6));
        assert_eq!(r.coverage('_').map(<[u8]>::len), Some(36));
    }
}
