use es_core::direction::DirectionBin;
use rayon::prelude::*;

use crate::edge::GradientField;

/// Direction dominante et magnitude représentative d'un bloc.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockClassification {
    /// Bin with the most votes in the block.
    pub dominant: DirectionBin,
    /// Mean magnitude over the samples within 22.5° of `dominant`.
    pub mean_magnitude: f32,
}

/// Classify the `pixel_size × pixel_size` block at block coordinates
/// (`bx`, `by`), clipped to the field.
///
/// Votes go to the nearest bin; vote ties keep the lowest angle. An empty
/// sub-rectangle classifies as `Deg0` with a zero mean.
///
/// # Example
/// ```
/// use es_core::frame::FrameBuffer;
/// use es_core::direction::DirectionBin;
/// use es_ascii::classify::classify_block;
/// use es_ascii::edge::detect_edges;
///
/// let field = detect_edges(&FrameBuffer::filled(16, 16, (200, 10, 10)), 0.5, 1.0);
/// let c = classify_block(&field, 1, 1, 8);
/// assert_eq!(c.dominant, DirectionBin::Deg0);
/// assert_eq!(c.mean_magnitude, 0.0);
/// ```
#[must_use]
pub fn classify_block(
    field: &GradientField,
    bx: usize,
    by: usize,
    pixel_size: usize,
) -> BlockClassification {
    let x0 = (bx * pixel_size).min(field.width());
    let x1 = ((bx + 1) * pixel_size).min(field.width());
    let y0 = (by * pixel_size).min(field.height());
    let y1 = ((by + 1) * pixel_size).min(field.height());

    let mut votes = [0u32; 4];
    for y in y0..y1 {
        for &angle in &field.direction.row(y)[x0..x1] {
            votes[DirectionBin::nearest(angle).index()] += 1;
        }
    }

    let mut dominant = DirectionBin::Deg0;
    for bin in &DirectionBin::ALL[1..] {
        if votes[bin.index()] > votes[dominant.index()] {
            dominant = *bin;
        }
    }

    // Accumulate in f64: a block of strong edges sums to ~1e6 per row.
    let mut sum = 0.0f64;
    let mut count = 0u32;
    for y in y0..y1 {
        let angles = &field.direction.row(y)[x0..x1];
        let mags = &field.magnitude.row(y)[x0..x1];
        for (&angle, &mag) in angles.iter().zip(mags) {
            if dominant.contains(angle) {
                sum += f64::from(mag);
                count += 1;
            }
        }
    }

    let mean_magnitude = if count == 0 {
        0.0
    } else {
        (sum / f64::from(count)) as f32
    };

    BlockClassification {
        dominant,
        mean_magnitude,
    }
}

/// Classify every block of a `cols × rows` grid, row-major.
///
/// Blocks are independent and processed in parallel.
#[must_use]
pub fn classify_blocks(
    field: &GradientField,
    cols: usize,
    rows: usize,
    pixel_size: usize,
) -> Vec<BlockClassification> {
    let blocks: Vec<BlockClassification> = (0..cols * rows)
        .into_par_iter()
        .map(|i| classify_block(field, i % cols, i / cols, pixel_size))
        .collect();
    log::debug!(
        "Classification : {} blocs, dont {} avec magnitude > 0",
        blocks.len(),
        blocks.iter().filter(|b| b.mean_magnitude > 0.0).count()
    );
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Plane;
    use es_core::frame::FrameBuffer;

    use crate::edge::detect_edges;

    fn field_from(direction: Vec<f32>, magnitude: Vec<f32>, w: usize, h: usize) -> GradientField {
        GradientField {
            magnitude: Plane {
                width: w,
                height: h,
                data: magnitude,
            },
            direction: Plane {
                width: w,
                height: h,
                data: direction,
            },
        }
    }

    #[test]
    fn vertical_line_blocks() {
        let mut frame = FrameBuffer::filled(32, 32, (40, 40, 40));
        for y in 0..32 {
            frame.set_pixel(11, y, (255, 255, 255));
            frame.set_pixel(12, y, (255, 255, 255));
        }
        let field = detect_edges(&frame, 0.5, 1.0);
        let blocks = classify_blocks(&field, 4, 4, 8);
        assert_eq!(blocks.len(), 16);
        for row in blocks.chunks(4) {
            for b in row {
                assert_eq!(b.dominant, DirectionBin::Deg0);
            }
            assert!(row[1].mean_magnitude > 5200.0, "{}", row[1].mean_magnitude);
            assert!(row[0].mean_magnitude > 0.0 && row[0].mean_magnitude < 5200.0);
            assert!(row[2].mean_magnitude > 0.0 && row[2].mean_magnitude < 5200.0);
            assert_eq!(row[3].mean_magnitude, 0.0);
        }
    }

    #[test]
    fn horizontal_line_blocks() {
        let mut frame = FrameBuffer::filled(32, 32, (40, 40, 40));
        for x in 0..32 {
            frame.set_pixel(x, 11, (255, 255, 255));
            frame.set_pixel(x, 12, (255, 255, 255));
        }
        let field = detect_edges(&frame, 0.5, 1.0);
        let blocks = classify_blocks(&field, 4, 4, 8);
        for b in &blocks[4..8] {
            assert_eq!(b.dominant, DirectionBin::Deg90);
            assert!(b.mean_magnitude > 5200.0);
        }
        assert_eq!(blocks[12].mean_magnitude, 0.0);
    }

    #[test]
    fn vote_tie_keeps_lowest_angle() {
        // Two samples at 45°, two at 135°.
        let field = field_from(vec![45.0, 135.0, 135.0, 45.0], vec![1.0, 9.0, 9.0, 1.0], 2, 2);
        let c = classify_block(&field, 0, 0, 2);
        assert_eq!(c.dominant, DirectionBin::Deg45);
        assert!((c.mean_magnitude - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mean_ignores_off_axis_samples() {
        let field = field_from(
            vec![88.0, 91.0, 95.0, 10.0],
            vec![100.0, 200.0, 300.0, 5000.0],
            4,
            1,
        );
        let c = classify_block(&field, 0, 0, 4);
        assert_eq!(c.dominant, DirectionBin::Deg90);
        assert!((c.mean_magnitude - 200.0).abs() < 1e-3);
    }

    #[test]
    fn empty_block_is_zero() {
        let field = field_from(vec![30.0; 4], vec![50.0; 4], 2, 2);
        let c = classify_block(&field, 5, 5, 2);
        assert_eq!(c, BlockClassification::default());
    }

    #[test]
    fn partial_block_is_clipped() {
        let field = field_from(vec![135.0; 9], vec![12.0; 9], 3, 3);
        let c = classify_block(&field, 1, 1, 2);
        assert_eq!(c.dominant, DirectionBin::Deg135);
        assert!((c.mean_magnitude - 12.0).abs() < 1e-6);
    }

    #[test]
    fn near_180_votes_for_135() {
        // 179.9 has no wrap to 0: nearest bin is 135, and the mask rejects it.
        let field = field_from(vec![179.9; 4], vec![7.0; 4], 2, 2);
        let c = classify_block(&field, 0, 0, 2);
        assert_eq!(c.dominant, DirectionBin::Deg135);
        assert_eq!(c.mean_magnitude, 0.0);
    }
}
