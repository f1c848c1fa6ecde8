use crate::direction::DirectionBin;
use crate::error::CoreError;

/// 11 caractères, du plus clair au plus dense.
pub const RAMP_DEFAULT: &str = " .a!?12$N#@";

/// Stroke glyphs for 0°, 45°, 90° and 135°.
pub const STROKES_DEFAULT: &str = "|/_\\";

/// Ordered glyph ramp, sparse/dark first.
///
/// # Example
/// ```
/// use es_core::charset::GlyphRamp;
/// let ramp = GlyphRamp::new(" .:#@", false).unwrap();
/// assert_eq!(ramp.len(), 5);
/// assert_eq!(ramp.glyph(0), ' ');
/// assert_eq!(ramp.glyph(4), '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a string ordered lightest→densest.
    /// `invert` reverses it, for light backgrounds.
    ///
    /// # Errors
    /// Returns `Config` if the ramp has fewer than 2 glyphs.
    pub fn new(glyphs: &str, invert: bool) -> Result<Self, CoreError> {
        let mut glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.len() < 2 {
            return Err(CoreError::Config(format!(
                "la rampe de glyphes doit contenir au moins 2 caractères, reçu {}",
                glyphs.len()
            )));
        }
        if invert {
            glyphs.reverse();
        }
        Ok(Self { glyphs })
    }

    /// Number of glyphs.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false, a ramp holds at least 2 glyphs.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: RAMP_DEFAULT.chars().collect(),
        }
    }
}

/// Binding from [`DirectionBin`] to a stroke glyph.
///
/// # Example
/// ```
/// use es_core::charset::StrokeSet;
/// use es_core::direction::DirectionBin;
/// let strokes = StrokeSet::default();
/// assert_eq!(strokes.glyph(DirectionBin::Deg0), '|');
/// assert_eq!(strokes.glyph(DirectionBin::Deg90), '_');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeSet {
    glyphs: [char; 4],
}

impl StrokeSet {
    /// Parse exactly four glyphs, for 0°, 45°, 90° and 135° in that order.
    ///
    /// # Errors
    /// Returns `Config` unless the string holds exactly 4 characters.
    pub fn new(glyphs: &str) -> Result<Self, CoreError> {
        let chars: Vec<char> = glyphs.chars().collect();
        let glyphs: [char; 4] = chars.as_slice().try_into().map_err(|_| {
            CoreError::Config(format!(
                "le jeu de traits doit contenir exactement 4 caractères, reçu {glyphs:?}"
            ))
        })?;
        Ok(Self { glyphs })
    }

    /// Stroke glyph bound to `bin`.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, bin: DirectionBin) -> char {
        self.glyphs[bin.index()]
    }
}

impl Default for StrokeSet {
    fn default() -> Self {
        Self {
            glyphs: ['|', '/', '_', '\\'],
        }
    }
}
