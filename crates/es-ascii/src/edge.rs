use es_core::config::DOG_THRESHOLD;
use es_core::frame::FrameBuffer;
use rayon::prelude::*;

use crate::blur::gaussian_blur;
use crate::plane::{Plane, reflect_101};

/// 5-tap binomial smoothing half of the 5×5 Sobel operator.
const SOBEL5_SMOOTH: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];
/// 5-tap derivative half of the 5×5 Sobel operator.
const SOBEL5_DERIV: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];

/// Per-pixel gradient magnitude and undirected direction, aligned with the
/// source image. Produced once per run, never mutated afterward.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// `sqrt(gx² + gy²)`, always ≥ 0.
    pub magnitude: Plane<f32>,
    /// `atan2(gy, gx)` in degrees, folded into `[0, 180)`.
    pub direction: Plane<f32>,
}

impl GradientField {
    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.magnitude.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.magnitude.height
    }
}

/// Intensité 8 bits, pondération BT.601 (0.299, 0.587, 0.114), arrondie.
///
/// # Example
/// ```
/// use es_core::frame::FrameBuffer;
/// use es_ascii::edge::intensity;
/// let fb = FrameBuffer::filled(2, 2, (255, 255, 255));
/// assert_eq!(intensity(&fb).get(1, 1), 255);
/// ```
#[must_use]
pub fn intensity(frame: &FrameBuffer) -> Plane<u8> {
    let mut out = Plane {
        width: frame.width as usize,
        height: frame.height as usize,
        data: Vec::with_capacity(frame.width as usize * frame.height as usize),
    };
    out.data.extend(frame.data.chunks_exact(3).map(|px| {
        let y = u32::from(px[0]) * 299 + u32::from(px[1]) * 587 + u32::from(px[2]) * 114;
        ((y + 500) / 1000) as u8
    }));
    out
}

/// Band-pass the intensity plane and binarize it.
///
/// `blur(sigma1) − blur(sigma2)` is taken with 8-bit wrapping arithmetic,
/// so pixels where the wide blur is slightly brighter than the narrow one
/// (the dark shoulder of a contour) wrap above [`DOG_THRESHOLD`] and become
/// 255. Everything else becomes 0.
#[must_use]
pub fn difference_of_gaussians(gray: &Plane<u8>, sigma1: f32, sigma2: f32) -> Plane<u8> {
    let narrow = gaussian_blur(gray, sigma1);
    let wide = gaussian_blur(gray, sigma2);
    Plane {
        width: gray.width,
        height: gray.height,
        data: narrow
            .data
            .iter()
            .zip(&wide.data)
            .map(|(&a, &b)| {
                if a.wrapping_sub(b) > DOG_THRESHOLD {
                    255
                } else {
                    0
                }
            })
            .collect(),
    }
}

/// Fold an angle in degrees into `[0, 180)`.
///
/// # Example
/// ```
/// use es_ascii::edge::fold_direction;
/// assert_eq!(fold_direction(-90.0), 90.0);
/// assert_eq!(fold_direction(180.0), 0.0);
/// assert_eq!(fold_direction(-1e-9), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn fold_direction(degrees: f32) -> f32 {
    let folded = degrees.rem_euclid(180.0);
    // rem_euclid of a tiny negative rounds up to exactly 180.0
    if folded >= 180.0 { 0.0 } else { folded }
}

/// 5×5 Sobel gradients of an 8-bit plane, reflect-101 borders.
///
/// Returns the magnitude/direction field; `gx` is the derivative along x
/// (columns), so a vertical contour yields a 0° direction.
#[must_use]
pub fn sobel5(src: &Plane<u8>) -> GradientField {
    let (w, h) = (src.width, src.height);
    let mut magnitude: Plane<f32> = Plane::new(w, h);
    let mut direction: Plane<f32> = Plane::new(w, h);
    if w == 0 || h == 0 {
        return GradientField {
            magnitude,
            direction,
        };
    }

    // Horizontal 1-D passes: derivative and smoothing along x.
    let mut dx: Plane<f32> = Plane::new(w, h);
    let mut sx: Plane<f32> = Plane::new(w, h);
    dx.data
        .par_chunks_mut(w)
        .zip(sx.data.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (d_row, s_row))| {
            let row = src.row(y);
            for (x, (d_out, s_out)) in d_row.iter_mut().zip(s_row.iter_mut()).enumerate() {
                let mut d = 0.0f32;
                let mut s = 0.0f32;
                for (k, (dk, sk)) in SOBEL5_DERIV.iter().zip(&SOBEL5_SMOOTH).enumerate() {
                    let v = f32::from(row[reflect_101(x as isize + k as isize - 2, w)]);
                    d += dk * v;
                    s += sk * v;
                }
                *d_out = d;
                *s_out = s;
            }
        });

    // Vertical passes, then magnitude and folded direction.
    magnitude
        .data
        .par_chunks_mut(w)
        .zip(direction.data.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (m_row, a_row))| {
            let taps: [usize; 5] =
                std::array::from_fn(|k| reflect_101(y as isize + k as isize - 2, h));
            for (x, (m_out, a_out)) in m_row.iter_mut().zip(a_row.iter_mut()).enumerate() {
                let mut gx = 0.0f32;
                let mut gy = 0.0f32;
                for (k, &ty) in taps.iter().enumerate() {
                    gx += SOBEL5_SMOOTH[k] * dx.get(x, ty);
                    gy += SOBEL5_DERIV[k] * sx.get(x, ty);
                }
                *m_out = (gx * gx + gy * gy).sqrt();
                *a_out = fold_direction(gy.atan2(gx).to_degrees());
            }
        });

    GradientField {
        magnitude,
        direction,
    }
}

/// Full edge pass: intensity, DoG binarization, 5×5 Sobel.
///
/// # Example
/// ```
/// use es_core::frame::FrameBuffer;
/// use es_ascii::edge::detect_edges;
/// let frame = FrameBuffer::filled(16, 16, (90, 120, 30));
/// let field = detect_edges(&frame, 0.5, 1.0);
/// assert_eq!(field.width(), 16);
/// assert!(field.magnitude.data.iter().all(|&m| m == 0.0));
/// ```
#[must_use]
pub fn detect_edges(frame: &FrameBuffer, sigma1: f32, sigma2: f32) -> GradientField {
    let gray = intensity(frame);
    let binary = difference_of_gaussians(&gray, sigma1, sigma2);
    log::debug!(
        "DoG : {} pixels de contour sur {}",
        binary.data.iter().filter(|&&v| v != 0).count(),
        binary.data.len()
    );
    sobel5(&binary)
}
