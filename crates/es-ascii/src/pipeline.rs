use std::time::Instant;

use es_core::config::PipelineConfig;
use es_core::error::CoreError;
use es_core::frame::{FrameBuffer, GlyphGrid};
use es_source::resize::downsample;

use crate::classify::classify_blocks;
use crate::edge::detect_edges;
use crate::mapper::GlyphMapper;

/// Image source → grille de glyphes, un glyphe par bloc.
///
/// Validates `config`, downsamples, and in edge mode classifies the blocks
/// of the full-resolution gradient field before mapping.
///
/// # Errors
/// `Config` for an invalid configuration, `InvalidDimensions` when the image
/// is smaller than one block, `Resize` if resampling fails.
///
/// # Example
/// ```
/// use es_core::config::PipelineConfig;
/// use es_core::frame::FrameBuffer;
/// use es_ascii::pipeline::render_grid;
///
/// let image = FrameBuffer::filled(64, 32, (128, 128, 128));
/// let grid = render_grid(&image, &PipelineConfig::default()).unwrap();
/// assert_eq!((grid.width, grid.height), (8, 4));
/// assert!(grid.cells.iter().all(|c| c.glyph == Some('2')));
/// ```
pub fn render_grid(image: &FrameBuffer, config: &PipelineConfig) -> Result<GlyphGrid, CoreError> {
    config.validate()?;
    let mapper = GlyphMapper::from_config(config)?;

    let start = Instant::now();
    let sampled = downsample(image, config.pixel_size)?;
    log::debug!("Échantillonnage : {:?}", start.elapsed());

    let classes = if config.edge_detection {
        let start = Instant::now();
        let field = detect_edges(image, config.sigma1, config.sigma2);
        let classes = classify_blocks(
            &field,
            sampled.width as usize,
            sampled.height as usize,
            config.pixel_size as usize,
        );
        log::debug!("Contours + classification : {:?}", start.elapsed());
        Some(classes)
    } else {
        None
    };

    let start = Instant::now();
    let grid = mapper.map_blocks(&sampled, classes.as_deref())?;
    log::debug!(
        "Mapping : {:?}, {} glyphes sur {} blocs",
        start.elapsed(),
        grid.drawn_count(),
        grid.cells.len()
    );
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("Grille :\n{}", grid.to_text());
    }
    Ok(grid)
}
