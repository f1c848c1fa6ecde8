/// Image source immuable. Pixels RGB, row-major, 3 bytes par pixel.
///
/// # Example
/// ```
/// use es_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGB, row-major, 3 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 3],
            width,
            height,
        }
    }

    /// Crée un buffer rempli d'une couleur unie.
    ///
    /// # Example
    /// ```
    /// use es_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(4, 2, (128, 64, 32));
    /// assert_eq!(fb.pixel(3, 1), (128, 64, 32));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: (u8, u8, u8)) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[color.0, color.1, color.2]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → (r, g, b).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Écrit le pixel (x, y).
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.data[idx] = rgb.0;
        self.data[idx + 1] = rgb.1;
        self.data[idx + 2] = rgb.2;
    }
}

/// One output block: the glyph to draw (if any) and its color.
///
/// `glyph == None` marks a skipped block, whose footprint keeps the
/// background color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphCell {
    /// Caractère à dessiner, `None` pour un bloc ignoré.
    pub glyph: Option<char>,
    /// Couleur du glyphe (RGB).
    pub color: (u8, u8, u8),
}

/// Grille de glyphes, une cellule par bloc, row-major.
///
/// # Example
/// ```
/// use es_core::frame::{GlyphCell, GlyphGrid};
/// let mut grid = GlyphGrid::new(4, 3);
/// grid.set(1, 2, GlyphCell { glyph: Some('#'), color: (255, 0, 0) });
/// assert_eq!(grid.get(1, 2).glyph, Some('#'));
/// assert_eq!(grid.cells.len(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<GlyphCell>,
    /// Width in blocks.
    pub width: u32,
    /// Height in blocks.
    pub height: u32,
}

impl GlyphGrid {
    /// Crée une grille de cellules vides.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![GlyphCell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at block position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, cell: GlyphCell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at block position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &GlyphCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Number of blocks that carry a glyph.
    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.cells.iter().filter(|c| c.glyph.is_some()).count()
    }

    /// Render the glyphs as plain text, one line per block row.
    /// Skipped blocks become spaces.
    ///
    /// # Example
    /// ```
    /// use es_core::frame::{GlyphCell, GlyphGrid};
    /// let mut grid = GlyphGrid::new(2, 1);
    /// grid.set(0, 0, GlyphCell { glyph: Some('@'), color: (9, 9, 9) });
    /// assert_eq!(grid.to_text(), "@ \n");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|c| c.glyph.unwrap_or(' ')));
            out.push('\n');
        }
        out
    }
}

/// Toile de sortie RGBA, initialisée à la couleur de fond.
///
/// # Example
/// ```
/// use es_core::frame::Canvas;
/// let canvas = Canvas::new(3, 2, [3, 46, 58, 255]);
/// assert_eq!(canvas.pixel(2, 1), [3, 46, 58, 255]);
/// assert_eq!(canvas.data.len(), 3 * 2 * 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Crée une toile remplie de `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&background);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → RGBA.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Bytes per canvas row.
    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pixel_roundtrips() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.set_pixel(2, 1, (7, 8, 9));
        assert_eq!(fb.pixel(2, 1), (7, 8, 9));
        assert_eq!(fb.pixel(1, 2), (0, 0, 0));
    }

    #[test]
    fn grid_counts_drawn_cells() {
        let mut grid = GlyphGrid::new(3, 1);
        grid.set(
            2,
            0,
            GlyphCell {
                glyph: Some('a'),
                color: (1, 2, 3),
            },
        );
        assert_eq!(grid.drawn_count(), 1);
        assert_eq!(grid.to_text(), "  a\n");
    }
}
