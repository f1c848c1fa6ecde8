use es_core::error::CoreError;
use es_core::frame::FrameBuffer;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// Resizer réutilisable wrappant fast_image_resize.
///
/// Always uses Lanczos3 convolution, so every output pixel averages the
/// source neighborhood it covers instead of picking a single pixel.
///
/// # Example
/// ```
/// use es_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch image for source (owned buffer to avoid the mut borrow issue).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new Lanczos3 resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns `CoreError::Resize` if either buffer is rejected.
    ///
    /// # Example
    /// ```
    /// use es_source::resize::Resizer;
    /// use es_core::frame::FrameBuffer;
    /// let mut r = Resizer::new();
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), CoreError> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        // fast_image_resize wants &mut on the source buffer
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x3)
                .map_err(|e| CoreError::Resize(format!("source invalide : {e}")))?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x3)
                .map_err(|e| CoreError::Resize(format!("destination invalide : {e}")))?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|e| CoreError::Resize(e.to_string()))?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Block grid for an image: `⌊width/pixel_size⌋ × ⌊height/pixel_size⌋`.
///
/// # Errors
/// `Config` if `pixel_size == 0`. `InvalidDimensions`, carrying the source
/// size, if the image is smaller than one block on either side.
///
/// # Example
/// ```
/// use es_source::resize::grid_dimensions;
/// assert_eq!(grid_dimensions(100, 37, 8).unwrap(), (12, 4));
/// assert!(grid_dimensions(7, 100, 8).is_err());
/// ```
pub fn grid_dimensions(width: u32, height: u32, pixel_size: u32) -> Result<(u32, u32), CoreError> {
    if pixel_size == 0 {
        return Err(CoreError::Config("pixel_size doit être > 0".into()));
    }
    let cols = width / pixel_size;
    let rows = height / pixel_size;
    if cols == 0 || rows == 0 {
        log::debug!("Grille vide : {cols}×{rows} blocs de {pixel_size}px");
        return Err(CoreError::InvalidDimensions { width, height });
    }
    Ok((cols, rows))
}

/// Downsample `src` to one representative color per block.
///
/// # Errors
/// Returns `InvalidDimensions` when the source is smaller than one block,
/// `Config` for a zero `pixel_size`, `Resize` if the resampler fails.
///
/// # Example
/// ```
/// use es_source::resize::downsample;
/// use es_core::frame::FrameBuffer;
/// let src = FrameBuffer::filled(64, 40, (128, 128, 128));
/// let small = downsample(&src, 8).unwrap();
/// assert_eq!((small.width, small.height), (8, 5));
/// let (r, _, _) = small.pixel(3, 2);
/// assert!((127..=129).contains(&r));
/// ```
pub fn downsample(src: &FrameBuffer, pixel_size: u32) -> Result<FrameBuffer, CoreError> {
    let (cols, rows) = grid_dimensions(src.width, src.height, pixel_size)?;
    let mut dst = FrameBuffer::new(cols, rows);
    Resizer::new().resize_into(src, &mut dst)?;
    log::debug!(
        "Sous-échantillonnage {}×{} → {cols}×{rows} (bloc {pixel_size}px)",
        src.width,
        src.height
    );
    Ok(dst)
}
