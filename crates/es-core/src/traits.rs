/// Fournit les masques de couverture des glyphes au compositeur.
///
/// Implémenté par : `FontRasterizer` (TrueType), `BuiltinRasterizer` (bitmaps intégrés).
///
/// # Example
/// ```
/// use es_core::traits::GlyphRasterizer;
///
/// struct SolidRasterizer { mask: Vec<u8> }
/// impl GlyphRasterizer for SolidRasterizer {
///     fn cell_size(&self) -> (u32, u32) { (2, 2) }
///     fn coverage(&self, _ch: char) -> Option<&[u8]> { Some(&self.mask) }
///     fn name(&self) -> &'static str { "solid" }
/// }
///
/// let r = SolidRasterizer { mask: vec![255; 4] };
/// assert_eq!(r.coverage('x').map(<[u8]>::len), Some(4));
/// ```
pub trait GlyphRasterizer: Send + Sync {
    /// Dimensions (largeur, hauteur) de chaque masque en pixels.
    fn cell_size(&self) -> (u32, u32);

    /// Masque alpha row-major de taille `cell_size`, `None` si le glyphe
    /// est inconnu. 0 = vide, 255 = plein.
    fn coverage(&self, ch: char) -> Option<&[u8]>;

    /// Nom lisible pour le debug.
    fn name(&self) -> &'static str;
}
