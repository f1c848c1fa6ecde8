use es_core::charset::GlyphRamp;
use es_core::color::hls_lightness;

/// Exposant de la courbe de ton appliquée à la lightness.
pub const TONE_GAMMA: f32 = 0.6;

/// Tone curve `l^0.6`, l in [0, 1].
///
/// Lifts the dark end so typical photos land on mid-to-dense glyphs.
#[inline(always)]
#[must_use]
pub fn tone(lightness: f32) -> f32 {
    lightness.clamp(0.0, 1.0).powf(TONE_GAMMA)
}

/// Ramp index for a color: `floor(tone(l) × (len − 1))`, clamped.
///
/// # Example
/// ```
/// use es_ascii::luminance::ramp_index;
/// assert_eq!(ramp_index(128, 128, 128, 11), 6);
/// assert_eq!(ramp_index(0, 0, 0, 11), 0);
/// assert_eq!(ramp_index(255, 255, 255, 11), 10);
/// ```
#[inline]
#[must_use]
pub fn ramp_index(r: u8, g: u8, b: u8, ramp_len: usize) -> usize {
    if ramp_len == 0 {
        return 0;
    }
    let last = ramp_len - 1;
    let t = tone(hls_lightness(r, g, b));
    ((t * last as f32) as usize).min(last)
}

/// Glyph de la rampe pour une couleur.
///
/// # Example
/// ```
/// use es_core::charset::GlyphRamp;
/// use es_ascii::luminance::ramp_glyph;
/// let ramp = GlyphRamp::default();
/// assert_eq!(ramp_glyph(&ramp, 128, 128, 128), '2');
/// assert_eq!(ramp_glyph(&ramp, 255, 255, 255), '@');
/// ```
#[inline]
#[must_use]
pub fn ramp_glyph(ramp: &GlyphRamp, r: u8, g: u8, b: u8) -> char {
    ramp.glyph(ramp_index(r, g, b, ramp.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_monotonic_in_lightness() {
        let mut prev = 0;
        for v in 0..=255u8 {
            let idx = ramp_index(v, v, v, 11);
            assert!(idx >= prev, "index dropped at {v}: {prev} -> {idx}");
            prev = idx;
        }
        assert_eq!(prev, 10);
    }

    #[test]
    fn known_gray_levels() {
        for (v, expected) in [(0u8, 0usize), (10, 1), (50, 3), (100, 5), (200, 8), (255, 10)] {
            assert_eq!(ramp_index(v, v, v, 11), expected, "gray {v}");
        }
    }

    #[test]
    fn lightness_ignores_hue() {
        // Same max+min, same glyph.
        assert_eq!(ramp_index(255, 0, 0, 11), ramp_index(0, 0, 255, 11));
        assert_eq!(ramp_index(255, 0, 0, 11), ramp_index(128, 127, 127, 11));
    }

    #[test]
    fn inverted_ramp_flips_glyphs() {
        let ramp = GlyphRamp::new(" .:#@", true).unwrap();
        assert_eq!(ramp_glyph(&ramp, 255, 255, 255), ' ');
        assert_eq!(ramp_glyph(&ramp, 0, 0, 0), '@');
    }

    #[test]
    fn degenerate_ramp_lengths() {
        assert_eq!(ramp_index(255, 255, 255, 1), 0);
        assert_eq!(ramp_index(255, 255, 255, 0), 0);
    }
}
