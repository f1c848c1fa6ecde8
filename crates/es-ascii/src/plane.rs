//! Owned single-channel plane in row-major layout.
//!
//! Backs the intensity, blur, binary and gradient buffers of the edge pass.

/// Single-channel image, `width × height`, stride equal to width.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T> {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Backing storage, row-major.
    pub data: Vec<T>,
}

impl<T: Copy + Default> Plane<T> {
    /// Construct a default-initialized plane.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Value at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    /// Write (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        self.data[y * self.width + x] = v;
    }

    /// Row `y` as a slice.
    #[inline(always)]
    #[must_use]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Mirror an out-of-range index back into `[0, n)` without repeating the
/// edge sample (`dcb|abcd|cba`).
///
/// # Example
/// ```
/// use es_ascii::plane::reflect_101;
/// assert_eq!(reflect_101(-1, 5), 1);
/// assert_eq!(reflect_101(-2, 5), 2);
/// assert_eq!(reflect_101(5, 5), 3);
/// assert_eq!(reflect_101(2, 5), 2);
/// assert_eq!(reflect_101(-3, 1), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn reflect_101(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let last = n as isize - 1;
    let mut i = i;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}
