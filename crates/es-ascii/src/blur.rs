//! Separable Gaussian blur on 8-bit planes.
//!
//! Kernel size follows the usual 8-bit convention `round(6σ + 1) | 1`
//! (σ = 0.5 → 5 taps, σ = 1.0 → 7 taps). Borders mirror without repeating
//! the edge sample.
//!
//! Arithmetic is integer fixed-point, bit-exact with the common 8-bit
//! implementation: weights carry [`KERNEL_BITS`] fractional bits, the
//! horizontal pass keeps exact `u16` sums, the vertical pass accumulates
//! in `u32` and rounds half up once at the end.

use rayon::prelude::*;

use crate::plane::{Plane, reflect_101};

/// Fractional bits of each fixed-point kernel weight.
pub const KERNEL_BITS: u32 = 8;

/// Normalized 1-D Gaussian weights in f64, odd length, centered.
fn gaussian_weights(sigma: f32) -> Vec<f64> {
    let sigma = f64::from(sigma);
    let size = (((sigma * 6.0 + 1.0).round() as usize) | 1).max(3);
    let radius = (size / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|i| {
            let d = f64::from(i);
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Fixed-point 1-D Gaussian, odd length, summing to exactly
/// `1 << KERNEL_BITS`.
///
/// Outer taps are rounded with error diffusion toward the center; the
/// center tap takes whatever remains so the sum is exact.
///
/// # Example
/// ```
/// use es_ascii::blur::gaussian_kernel;
/// assert_eq!(gaussian_kernel(1.0), vec![1, 14, 62, 102, 62, 14, 1]);
/// assert_eq!(gaussian_kernel(0.5), vec![0, 27, 202, 27, 0]);
/// ```
#[must_use]
pub fn gaussian_kernel(sigma: f32) -> Vec<u16> {
    let weights = gaussian_weights(sigma);
    let n = weights.len();
    let one = f64::from(1u32 << KERNEL_BITS);
    let mut kernel = vec![0u16; n];
    let mut err = 0.0f64;
    let mut outer = 0u32;
    for i in 0..n / 2 {
        let adjusted = weights[i] * one + err;
        let v = adjusted.round_ties_even();
        err = adjusted - v;
        let v = v as u16;
        kernel[i] = v;
        kernel[n - 1 - i] = v;
        outer += 2 * u32::from(v);
    }
    kernel[n / 2] = (1u32 << KERNEL_BITS).saturating_sub(outer) as u16;
    kernel
}

/// Gaussian blur of an 8-bit plane.
///
/// # Example
/// ```
/// use es_ascii::blur::gaussian_blur;
/// use es_ascii::plane::Plane;
/// let mut p: Plane<u8> = Plane::new(5, 5);
/// p.data.fill(90);
/// let out = gaussian_blur(&p, 1.0);
/// assert!(out.data.iter().all(|&v| v == 90));
/// ```
#[must_use]
pub fn gaussian_blur(src: &Plane<u8>, sigma: f32) -> Plane<u8> {
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let (w, h) = (src.width, src.height);
    let mut out: Plane<u8> = Plane::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    // Horizontal pass: 255 × 2^8 fits in u16.
    let mut tmp: Plane<u16> = Plane::new(w, h);
    tmp.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row = src.row(y);
            for (x, slot) in row_out.iter_mut().enumerate() {
                let mut acc = 0u32;
                for (k, &weight) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - radius, w);
                    acc += u32::from(weight) * u32::from(row[sx]);
                }
                *slot = acc as u16;
            }
        });

    // Vertical pass, 2 × KERNEL_BITS fractional bits.
    let shift = 2 * KERNEL_BITS;
    let half = 1u32 << (shift - 1);
    out.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row_out)| {
            let rows: Vec<&[u16]> = (0..kernel.len())
                .map(|k| tmp.row(reflect_101(y as isize + k as isize - radius, h)))
                .collect();
            for (x, slot) in row_out.iter_mut().enumerate() {
                let mut acc = 0u32;
                for (&weight, row) in kernel.iter().zip(&rows) {
                    acc += u32::from(weight) * u32::from(row[x]);
                }
                *slot = ((acc + half) >> shift).min(255) as u8;
            }
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_sizes_follow_sigma() {
        assert_eq!(gaussian_kernel(0.5).len(), 5);
        assert_eq!(gaussian_kernel(1.0).len(), 7);
        assert_eq!(gaussian_kernel(2.0).len(), 13);
        assert_eq!(gaussian_kernel(0.01).len(), 3);
    }

    #[test]
    fn kernel_is_symmetric_and_sums_to_one() {
        for sigma in [0.01, 0.5, 1.0, 1.3, 2.0, 7.5] {
            let k = gaussian_kernel(sigma);
            for i in 0..k.len() / 2 {
                assert_eq!(k[i], k[k.len() - 1 - i], "sigma {sigma}");
            }
            let sum: u32 = k.iter().map(|&v| u32::from(v)).sum();
            assert_eq!(sum, 1 << KERNEL_BITS, "sigma {sigma}");
        }
        assert_eq!(gaussian_kernel(1.3), vec![1, 5, 24, 59, 78, 59, 24, 5, 1]);
        assert_eq!(gaussian_kernel(0.01), vec![0, 256, 0]);
    }

    #[test]
    fn impulse_response_is_bit_exact() {
        // A float blur gives 158 at the narrow center and 41 at the wide
        // one; fixed point gives 159 and 40.
        let mut p: Plane<u8> = Plane::new(9, 9);
        p.set(4, 4, 255);
        let narrow = gaussian_blur(&p, 0.5);
        assert_eq!(narrow.row(4)[2..7], [0, 21, 159, 21, 0]);
        assert_eq!(narrow.row(3)[2..7], [0, 3, 21, 3, 0]);
        let wide = gaussian_blur(&p, 1.0);
        assert_eq!(wide.row(4)[1..8], [0, 6, 25, 40, 25, 6, 0]);
    }

    #[test]
    fn blur_saturates_at_white() {
        let mut p: Plane<u8> = Plane::new(6, 6);
        p.data.fill(255);
        assert!(gaussian_blur(&p, 2.0).data.iter().all(|&v| v == 255));
    }

    #[test]
    fn blur_spreads_an_impulse() {
        let mut p: Plane<u8> = Plane::new(9, 9);
        p.set(4, 4, 255);
        let narrow = gaussian_blur(&p, 0.5);
        let wide = gaussian_blur(&p, 1.0);
        assert!(narrow.get(4, 4) > wide.get(4, 4));
        assert!(wide.get(6, 4) >= narrow.get(6, 4));
        assert_eq!(narrow.get(0, 0), 0);
    }

    #[test]
    fn blur_of_empty_plane_is_empty() {
        let p: Plane<u8> = Plane::new(0, 0);
        assert!(gaussian_blur(&p, 1.0).data.is_empty());
    }
}
