use es_ascii::pipeline::render_grid;
use es_core::config::PipelineConfig;
use es_core::error::CoreError;
use es_core::frame::{Canvas, FrameBuffer, GlyphGrid};
use es_core::traits::GlyphRasterizer;
use rayon::prelude::*;

/// Couverture minimale pour qu'un pixel du masque soit dessiné.
pub const COVERAGE_THRESHOLD: u8 = 128;

/// Dessine chaque cellule de `grid` sur `canvas`.
///
/// Block (bx, by) owns the footprint starting at
/// `(bx × pixel_size, by × pixel_size)`. Mask pixels at or above
/// [`COVERAGE_THRESHOLD`] take the cell color (opaque), everything else keeps
/// the canvas content. Masks are clipped to the footprint and to the canvas.
/// Block rows are drawn in parallel over disjoint canvas bands.
///
/// # Example
/// ```
/// use es_core::frame::{Canvas, GlyphCell, GlyphGrid};
/// use es_export::builtin::BuiltinRasterizer;
/// use es_export::compositor::compose;
///
/// let mut grid = GlyphGrid::new(2, 1);
/// grid.set(0, 0, GlyphCell { glyph: Some('|'), color: (255, 0, 0) });
/// let raster = BuiltinRasterizer::new(5, &['|']);
/// let mut canvas = Canvas::new(10, 5, [0, 0, 0, 255]);
/// compose(&grid, &raster, 5, &mut canvas);
/// assert_eq!(canvas.pixel(2, 0), [255, 0, 0, 255]);
/// assert_eq!(canvas.pixel(7, 0), [0, 0, 0, 255]);
/// ```
pub fn compose(grid: &GlyphGrid, raster: &dyn GlyphRasterizer, pixel_size: u32, canvas: &mut Canvas) {
    let p = pixel_size.max(1) as usize;
    let (mask_w, mask_h) = raster.cell_size();
    let (mask_w, mask_h) = (mask_w as usize, mask_h as usize);
    let stride = canvas.stride();
    let canvas_w = canvas.width as usize;
    if stride == 0 || grid.width == 0 {
        return;
    }
    let draw_w = p.min(mask_w);

    canvas
        .data
        .par_chunks_mut(stride * p)
        .take(grid.height as usize)
        .enumerate()
        .for_each(|(by, band)| {
            let band_rows = band.len() / stride;
            let draw_h = p.min(mask_h).min(band_rows);
            let row = &grid.cells[by * grid.width as usize..(by + 1) * grid.width as usize];

            for (bx, cell) in row.iter().enumerate() {
                let Some(ch) = cell.glyph else { continue };
                let Some(mask) = raster.coverage(ch) else {
                    continue;
                };
                let x0 = bx * p;
                if x0 >= canvas_w {
                    break;
                }
                let w = draw_w.min(canvas_w - x0);
                let rgba = [cell.color.0, cell.color.1, cell.color.2, 255];

                for my in 0..draw_h {
                    let mask_row = &mask[my * mask_w..my * mask_w + w];
                    let out = &mut band[my * stride + x0 * 4..my * stride + (x0 + w) * 4];
                    for (&cov, px) in mask_row.iter().zip(out.chunks_exact_mut(4)) {
                        if cov >= COVERAGE_THRESHOLD {
                            px.copy_from_slice(&rgba);
                        }
                    }
                }
            }
        });
}

/// Pipeline complet : grille de glyphes puis toile RGBA de la taille source.
///
/// # Errors
/// Propagates every [`render_grid`] error.
///
/// # Example
/// ```
/// use es_core::config::PipelineConfig;
/// use es_core::frame::FrameBuffer;
/// use es_export::builtin::BuiltinRasterizer;
/// use es_export::compositor::render_canvas;
///
/// let config = PipelineConfig::default();
/// let raster = BuiltinRasterizer::new(8, &['@']);
/// let image = FrameBuffer::filled(16, 16, (0, 0, 0));
/// let canvas = render_canvas(&image, &config, &raster).unwrap();
/// assert!(canvas.data.chunks_exact(4).all(|px| px == [3, 46, 58, 255]));
/// ```
pub fn render_canvas(
    image: &FrameBuffer,
    config: &PipelineConfig,
    raster: &dyn GlyphRasterizer,
) -> Result<Canvas, CoreError> {
    let grid = render_grid(image, config)?;
    let mut canvas = Canvas::new(image.width, image.height, config.background);
    compose(&grid, raster, config.pixel_size, &mut canvas);
    log::info!(
        "Rendu {}×{} : {} glyphes ({}), {}×{} blocs",
        canvas.width,
        canvas.height,
        grid.drawn_count(),
        raster.name(),
        grid.width,
        grid.height
    );
    Ok(canvas)
}
