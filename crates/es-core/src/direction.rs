/// Canonical edge orientation, in degrees modulo 180.
///
/// Gradient directions are binned to the nearest of these four angles.
/// The order of [`DirectionBin::ALL`] is also the tie-break order: on equal
/// distance (or equal vote count) the lowest angle wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DirectionBin {
    /// 0°: horizontal gradient, i.e. a vertical contour.
    #[default]
    Deg0,
    /// 45°.
    Deg45,
    /// 90°: vertical gradient, i.e. a horizontal contour.
    Deg90,
    /// 135°.
    Deg135,
}

/// Half the angular width of a bin.
pub const BIN_HALF_WIDTH: f32 = 22.5;

impl DirectionBin {
    /// All bins, ascending angle.
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg45, Self::Deg90, Self::Deg135];

    /// Angle of the bin in degrees.
    #[inline(always)]
    #[must_use]
    pub fn degrees(self) -> f32 {
        match self {
            Self::Deg0 => 0.0,
            Self::Deg45 => 45.0,
            Self::Deg90 => 90.0,
            Self::Deg135 => 135.0,
        }
    }

    /// Position in [`DirectionBin::ALL`].
    #[inline(always)]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Nearest bin by absolute angular difference, without wrap-around.
    ///
    /// Angles near 180 therefore land in `Deg135`, not `Deg0`.
    ///
    /// # Example
    /// ```
    /// use es_core::direction::DirectionBin;
    /// assert_eq!(DirectionBin::nearest(44.0), DirectionBin::Deg45);
    /// assert_eq!(DirectionBin::nearest(22.5), DirectionBin::Deg0);
    /// assert_eq!(DirectionBin::nearest(179.9), DirectionBin::Deg135);
    /// ```
    #[inline]
    #[must_use]
    pub fn nearest(angle: f32) -> Self {
        let mut best = Self::Deg0;
        let mut best_dist = (angle - best.degrees()).abs();
        for bin in &Self::ALL[1..] {
            let dist = (angle - bin.degrees()).abs();
            if dist < best_dist {
                best = *bin;
                best_dist = dist;
            }
        }
        best
    }

    /// True if `angle` lies strictly within [`BIN_HALF_WIDTH`] of this bin.
    #[inline(always)]
    #[must_use]
    pub fn contains(self, angle: f32) -> bool {
        (angle - self.degrees()).abs() < BIN_HALF_WIDTH
    }
}
