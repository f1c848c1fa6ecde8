use es_core::charset::{GlyphRamp, StrokeSet};
use es_core::color::is_black;
use es_core::config::PipelineConfig;
use es_core::error::CoreError;
use es_core::frame::{FrameBuffer, GlyphCell, GlyphGrid};
use rayon::prelude::*;

use crate::classify::BlockClassification;
use crate::luminance::ramp_glyph;

/// Choisit un glyphe et sa couleur pour chaque bloc.
///
/// Tables are owned per run and never mutated, so one mapper can be
/// shared across rayon workers.
///
/// # Example
/// ```
/// use es_ascii::mapper::GlyphMapper;
/// use es_core::config::PipelineConfig;
/// let mapper = GlyphMapper::from_config(&PipelineConfig::default()).unwrap();
/// let cell = mapper.map_cell((128, 128, 128), None);
/// assert_eq!(cell.glyph, Some('2'));
/// assert_eq!(cell.color, (128, 128, 128));
/// ```
#[derive(Clone, Debug)]
pub struct GlyphMapper {
    ramp: GlyphRamp,
    strokes: StrokeSet,
    edge_threshold: f32,
    fill: Option<[u8; 3]>,
}

impl GlyphMapper {
    /// Build a mapper from explicit tables.
    #[must_use]
    pub fn new(ramp: GlyphRamp, strokes: StrokeSet, edge_threshold: f32, fill: Option<[u8; 3]>) -> Self {
        Self {
            ramp,
            strokes,
            edge_threshold,
            fill,
        }
    }

    /// Build a mapper from the ramp, strokes, threshold and fill of `config`.
    ///
    /// # Errors
    /// Returns `Config` if the ramp or stroke set is invalid.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, CoreError> {
        Ok(Self::new(
            config.glyph_ramp()?,
            config.stroke_set()?,
            config.edge_threshold,
            config.glyph_fill,
        ))
    }

    /// Map one block.
    ///
    /// Pure black blocks are skipped (`glyph == None`). A classification whose
    /// mean magnitude exceeds the threshold yields its stroke glyph, anything
    /// else falls back to the luminance ramp.
    #[inline]
    #[must_use]
    pub fn map_cell(&self, rgb: (u8, u8, u8), class: Option<&BlockClassification>) -> GlyphCell {
        let (r, g, b) = rgb;
        if is_black(r, g, b) {
            return GlyphCell {
                glyph: None,
                color: rgb,
            };
        }

        let glyph = match class {
            Some(c) if c.mean_magnitude > self.edge_threshold => self.strokes.glyph(c.dominant),
            _ => ramp_glyph(&self.ramp, r, g, b),
        };
        let color = self.fill.map_or(rgb, |[fr, fg, fb]| (fr, fg, fb));

        GlyphCell {
            glyph: Some(glyph),
            color,
        }
    }

    /// Map every block of the downsampled image, in parallel.
    ///
    /// `classes`, when given, must hold one entry per block in row-major order.
    ///
    /// # Errors
    /// Returns `InvalidDimensions` if `classes` does not match the block count.
    pub fn map_blocks(
        &self,
        sampled: &FrameBuffer,
        classes: Option<&[BlockClassification]>,
    ) -> Result<GlyphGrid, CoreError> {
        let count = sampled.width as usize * sampled.height as usize;
        if classes.is_some_and(|c| c.len() != count) {
            return Err(CoreError::InvalidDimensions {
                width: sampled.width,
                height: sampled.height,
            });
        }

        let cells: Vec<GlyphCell> = sampled
            .data
            .par_chunks_exact(3)
            .enumerate()
            .map(|(i, px)| self.map_cell((px[0], px[1], px[2]), classes.map(|c| &c[i])))
            .collect();

        Ok(GlyphGrid {
            cells,
            width: sampled.width,
            height: sampled.height,
        })
    }
}
