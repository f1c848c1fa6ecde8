use std::collections::HashMap;

use es_core::traits::GlyphRasterizer;

/// Bitmap 5×5 d'un glyphe, bit 24 = coin haut-gauche, ligne par ligne.
///
/// Covers the default ramp, the compact ramp and the stroke glyphs.
/// Anything else gets a density pattern.
///
/// # Example
/// ```
/// use es_export::builtin::glyph_bitmap;
/// assert_eq!(glyph_bitmap(' '), 0);
/// assert_eq!(glyph_bitmap('|'), 0b00100_00100_00100_00100_00100);
/// ```
#[must_use]
pub fn glyph_bitmap(ch: char) -> u32 {
    match ch {
        ' ' => 0b00000_00000_00000_00000_00000,
        '.' => 0b00000_00000_00000_00100_00000,
        'a' => 0b00000_01110_10010_10010_01111,
        '!' => 0b00100_00100_00100_00000_00100,
        '?' => 0b01110_00001_00110_00000_00100,
        '1' => 0b00100_01100_00100_00100_01110,
        '2' => 0b11110_00001_01110_10000_11111,
        '$' => 0b01111_10100_01110_00101_11110,
        'N' => 0b10001_11001_10101_10011_10001,
        '#' => 0b01010_11111_01010_11111_01010,
        '@' => 0b01110_10001_10111_10000_01110,
        ':' => 0b00000_00100_00000_00100_00000,
        '-' => 0b00000_00000_11111_00000_00000,
        '=' => 0b00000_11111_00000_11111_00000,
        '+' => 0b00100_00100_11111_00100_00100,
        '*' => 0b10101_01110_11111_01110_10101,
        '%' => 0b11001_11010_00100_01011_10011,
        '|' => 0b00100_00100_00100_00100_00100,
        '/' => 0b00001_00010_00100_01000_10000,
        '_' => 0b00000_00000_00000_00000_11111,
        '\\' => 0b10000_01000_00100_00010_00001,
        '█' => 0b11111_11111_11111_11111_11111,
        _ => density_pattern(ch),
    }
}

fn density_pattern(ch: char) -> u32 {
    let density = match ch {
        'a'..='z' => 12,
        'A'..='Z' => 14,
        '0'..='9' => 13,
        _ => 8,
    };
    // Centre-out fill order.
    let order: [u32; 25] = [
        12, 7, 2, 8, 14, 6, 1, 0, 3, 9, 11, 5, 4, 10, 16, 13, 17, 18, 19, 23, 20, 21, 22, 24,
        15,
    ];
    let mut bm = 0u32;
    for &bit in order.iter().take(density) {
        bm |= 1 << bit;
    }
    bm
}

/// Nearest-neighbour upscale of a 5×5 bitmap to a `size × size` mask.
fn scale_bitmap(bitmap: u32, size: u32) -> Vec<u8> {
    let size = size.max(1);
    let mut mask = vec![0u8; (size * size) as usize];
    for y in 0..size {
        let row = y * 5 / size;
        for x in 0..size {
            let col = x * 5 / size;
            if bitmap & (1 << (24 - (row * 5 + col))) != 0 {
                mask[(y * size + x) as usize] = 255;
            }
        }
    }
    mask
}

/// Rasteriseur de repli, sans police : bitmaps 5×5 agrandis à la cellule.
///
/// # Example
/// ```
/// use es_export::builtin::BuiltinRasterizer;
/// use es_core::traits::GlyphRasterizer;
/// let r = BuiltinRasterizer::new(10, &['|', '@']);
/// assert_eq!(r.cell_size(), (10, 10));
/// let mask = r.coverage('|').unwrap();
/// assert_eq!(mask[5], 255);
/// assert_eq!(mask[0], 0);
/// assert!(r.coverage('x').is_none());
/// ```
pub struct BuiltinRasterizer {
    size: u32,
    atlas: HashMap<char, Vec<u8>>,
}

impl BuiltinRasterizer {
    /// Pre-render `glyphs` at `size × size`.
    #[must_use]
    pub fn new(size: u32, glyphs: &[char]) -> Self {
        let size = size.max(1);
        let atlas = glyphs
            .iter()
            .map(|&ch| (ch, scale_bitmap(glyph_bitmap(ch), size)))
            .collect();
        Self { size, atlas }
    }
}

impl GlyphRasterizer for BuiltinRasterizer {
    fn cell_size(&self) -> (u32, u32) {
        (self.size, self.size)
    }

    fn coverage(&self, ch: char) -> Option<&[u8]> {
        self.atlas.get(&ch).map(Vec::as_slice)
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}
